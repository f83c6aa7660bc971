//! Property-based tests for the JSON extractor.
//!
//! These tests use proptest to generate events and configurations and
//! verify that pass-through and idempotence hold for all of them.

use json_extract::{Event, ExtractionConfig, JsonExtractor, Metadata, Transformer};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_metadata()(
        entries in prop::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,16}"), 0..5)
    ) -> Metadata {
        entries.into_iter().collect()
    }
}

prop_compose! {
    fn arbitrary_path()(segments in prop::collection::vec("[a-c]{1,2}", 1..4)) -> String {
        segments.join(".")
    }
}

// Nested objects over a small key alphabet so generated paths often resolve.
fn arbitrary_document() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z ]{0,10}".prop_map(serde_json::Value::from),
    ];
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(serde_json::Value::from),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    });
    prop::collection::btree_map("[a-c]{1,2}", tree, 0..4)
        .prop_map(|m| serde_json::Value::Object(m.into_iter().collect()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// With nothing configured the event is returned byte-for-byte.
    #[test]
    fn test_empty_config_is_identity(
        body in prop::collection::vec(any::<u8>(), 0..128),
        metadata in arbitrary_metadata(),
    ) {
        let extractor = JsonExtractor::new(&ExtractionConfig::default());
        let original = Event::with_metadata(body, metadata);

        let event = extractor.transform(original.clone());
        prop_assert_eq!(event, original);
    }

    /// Bodies that are not JSON objects never change the event.
    #[test]
    fn test_invalid_json_is_identity(
        body in "[^{}]{0,64}",
        metadata in arbitrary_metadata(),
        headers in prop::collection::vec(arbitrary_path(), 0..4),
        body_path in prop::option::of(arbitrary_path()),
    ) {
        prop_assume!(serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&body).is_err());

        let config = ExtractionConfig::new(&headers, body_path.as_deref());
        let extractor = JsonExtractor::new(&config);
        let original = Event::with_metadata(body, metadata);

        let event = extractor.transform(original.clone());
        prop_assert_eq!(event, original);
    }

    /// Re-running header extraction on its own output changes nothing.
    #[test]
    fn test_header_extraction_is_idempotent(
        document in arbitrary_document(),
        headers in prop::collection::vec(arbitrary_path(), 1..5),
        metadata in arbitrary_metadata(),
    ) {
        let extractor = JsonExtractor::new(&ExtractionConfig::new(&headers, None));
        let body = serde_json::to_vec(&document).unwrap();

        let once = extractor.transform(Event::with_metadata(body, metadata));
        let twice = extractor.transform(once.clone());
        prop_assert_eq!(twice.metadata, once.metadata);
        prop_assert_eq!(twice.body, once.body);
    }

    /// Batches keep their length and order.
    #[test]
    fn test_batch_preserves_length_and_order(
        documents in prop::collection::vec(arbitrary_document(), 0..8),
        headers in prop::collection::vec(arbitrary_path(), 0..3),
    ) {
        let extractor = JsonExtractor::new(&ExtractionConfig::new(&headers, None));
        let events: Vec<Event> = documents
            .iter()
            .map(|d| Event::new(serde_json::to_vec(d).unwrap()))
            .collect();

        let expected: Vec<Event> = events.iter().cloned().map(|e| extractor.transform(e)).collect();
        let batch = extractor.transform_all(events);
        prop_assert_eq!(batch, expected);
    }
}
