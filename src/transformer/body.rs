//! Body replacement.

use crate::node::JsonNode;
use crate::path::DottedPath;
use crate::stringify::stringify;
use tracing::{debug, trace};

/// Replaces the event body with the value found at a dotted path.
///
/// The original body is discarded. Objects and arrays are written as
/// compact JSON, scalars as their plain text.
#[derive(Debug, Clone)]
pub struct BodyExtraction {
    /// Path to the replacement value
    path: DottedPath,
}

impl BodyExtraction {
    /// Create a body extraction for the given path.
    pub fn new(path: &DottedPath) -> Self {
        Self { path: path.clone() }
    }

    pub fn path(&self) -> &DottedPath {
        &self.path
    }

    /// Replace `body` with the value at the configured path. Returns whether
    /// the body was replaced.
    pub fn apply(&self, root: &JsonNode, body: &mut Vec<u8>) -> bool {
        let node = self.path.resolve(root);
        if node.is_missing() {
            trace!(path = %self.path, "Body path not found");
            return false;
        }

        match stringify(node) {
            Some(value) => {
                trace!(path = %self.path, bytes = value.len(), "Replaced body");
                *body = value.into_bytes();
                true
            }
            None => {
                debug!(path = %self.path, kind = %node.kind(), "Body path produced no value");
                false
            }
        }
    }
}
