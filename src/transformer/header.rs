//! Metadata extraction.

use crate::event::Metadata;
use crate::node::JsonNode;
use crate::path::DottedPath;
use crate::stringify::stringify;
use tracing::trace;

/// Copies values at dotted paths into event metadata.
///
/// Each value is written under the final segment of its path, so `a.b.c`
/// writes key `c`. Paths that share a final segment write the same key.
#[derive(Debug, Clone, Default)]
pub struct HeaderExtraction {
    /// Paths to extract
    paths: Vec<DottedPath>,
}

impl HeaderExtraction {
    /// Create a header extraction over the given paths.
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a DottedPath>) -> Self {
        Self {
            paths: paths.into_iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Write every resolvable path into `metadata`. Returns the number of
    /// entries written.
    pub fn apply(&self, root: &JsonNode, metadata: &mut Metadata) -> usize {
        let mut written = 0;

        for path in &self.paths {
            let node = path.resolve(root);
            if node.is_missing() {
                trace!(path = %path, "Header path not found");
                continue;
            }

            let value = match stringify(node) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    trace!(path = %path, kind = %node.kind(), "Header path produced no value");
                    continue;
                }
            };

            trace!(path = %path, key = path.last_segment(), "Extracted header");
            metadata.insert(path.last_segment().to_string(), value);
            written += 1;
        }

        written
    }
}
