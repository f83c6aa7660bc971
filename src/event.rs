//! Event passed through the extractor.

use indexmap::IndexMap;

/// Event metadata. Keys are unique; inserting an existing key overwrites it
/// in place.
pub type Metadata = IndexMap<String, String>;

/// A single event: an opaque byte body plus string metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Payload, expected to be UTF-8 JSON
    pub body: Vec<u8>,
    /// Key/value annotations
    pub metadata: Metadata,
}

impl Event {
    /// Create an event with the given body and no metadata.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            metadata: Metadata::new(),
        }
    }

    /// Create an event with the given body and metadata.
    pub fn with_metadata(body: impl Into<Vec<u8>>, metadata: Metadata) -> Self {
        Self {
            body: body.into(),
            metadata,
        }
    }

    /// Add a metadata entry.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get a metadata value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Body as text, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let event = Event::new("{}")
            .with_header("source", "a")
            .with_header("host", "h1")
            .with_header("source", "b");

        assert_eq!(event.header("source"), Some("b"));
        let keys: Vec<_> = event.metadata.keys().cloned().collect();
        assert_eq!(keys, vec!["source", "host"]);
    }

    #[test]
    fn test_body_str() {
        assert_eq!(Event::new("{\"a\":1}").body_str(), Some("{\"a\":1}"));
        assert_eq!(Event::new(vec![0xff, 0xfe]).body_str(), None);
    }
}
