//! Dotted path resolution.
//!
//! A dotted path names nested object fields left to right: `a.b.c` reads
//! field `c` of field `b` of field `a`. Segments are split on every `.`;
//! there is no escaping, so a field name that itself contains a `.` cannot
//! be addressed.

use crate::node::JsonNode;
use std::fmt;

/// A pre-split dotted path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DottedPath {
    raw: String,
    segments: Vec<String>,
}

impl DottedPath {
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment; used as the metadata key for header extraction.
    pub fn last_segment(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Descend from `root` one field per segment. Once a segment fails to
    /// resolve, the remaining segments stay on the missing sentinel.
    pub fn resolve<'a>(&self, root: &'a JsonNode) -> &'a JsonNode {
        self.segments
            .iter()
            .fold(root, |current, segment| current.get(segment))
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for DottedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Resolve `path` against an optional root. An absent root resolves to the
/// missing sentinel.
pub fn resolve<'a>(root: Option<&'a JsonNode>, path: &str) -> &'a JsonNode {
    match root {
        Some(root) => DottedPath::new(path).resolve(root),
        None => JsonNode::missing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FractionalNumbers, NodeKind};

    fn parse(body: &str) -> JsonNode {
        JsonNode::parse_object(body.as_bytes(), FractionalNumbers::Double).unwrap()
    }

    #[test]
    fn test_segments() {
        let path = DottedPath::new("user.profile.name");
        assert_eq!(path.segments(), ["user", "profile", "name"]);
        assert_eq!(path.last_segment(), "name");
        assert_eq!(path.as_str(), "user.profile.name");

        let path = DottedPath::new("single");
        assert_eq!(path.segments().len(), 1);
        assert_eq!(path.last_segment(), "single");
    }

    #[test]
    fn test_resolve_nested() {
        let root = parse(r#"{"a":{"b":{"c":5}}}"#);
        assert_eq!(DottedPath::new("a.b.c").resolve(&root), &JsonNode::Int(5));
        assert_eq!(DottedPath::new("a.b").resolve(&root).kind(), NodeKind::Object);
    }

    #[test]
    fn test_resolve_single_segment() {
        let root = parse(r#"{"key1":"value1"}"#);
        assert_eq!(
            DottedPath::new("key1").resolve(&root),
            &JsonNode::String("value1".to_string())
        );
    }

    #[test]
    fn test_missing_propagates_through_remaining_segments() {
        let root = parse(r#"{"a":{"b":1}}"#);
        assert!(DottedPath::new("x.y.z").resolve(&root).is_missing());
        assert!(DottedPath::new("a.b.c.d").resolve(&root).is_missing());
        assert!(DottedPath::new("a.x").resolve(&root).is_missing());
    }

    #[test]
    fn test_arrays_are_not_indexed() {
        let root = parse(r#"{"items":[{"id":1}]}"#);
        assert!(DottedPath::new("items.0.id").resolve(&root).is_missing());
        assert_eq!(DottedPath::new("items").resolve(&root).kind(), NodeKind::Array);
    }

    #[test]
    fn test_dotted_field_names_are_unreachable() {
        let root = parse(r#"{"a.b":1}"#);
        assert!(DottedPath::new("a.b").resolve(&root).is_missing());
    }

    #[test]
    fn test_resolve_absent_root() {
        assert!(resolve(None, "a.b").is_missing());

        let root = parse(r#"{"a":{"b":true}}"#);
        assert_eq!(resolve(Some(&root), "a.b"), &JsonNode::Boolean(true));
    }
}
