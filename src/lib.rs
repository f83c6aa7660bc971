//! JSON field extraction for event pipelines.
//!
//! This crate provides an event transform stage that reads a JSON object
//! payload and republishes selected fields:
//!
//! - Header extraction: values at dotted paths are copied into event
//!   metadata, keyed by the last path segment
//! - Body replacement: the body is swapped for the value at a dotted path
//!
//! Payloads that are not JSON objects, and paths that do not resolve, leave
//! the event untouched. The stage never fails an event.
//!
//! ## Configuration Example
//!
//! ```yaml
//! extractHeaderProperties: "level, meta.id"
//! extractBodyProperty: "payload"
//! ```
//!
//! With that configuration the body `{"level":"warn","meta":{"id":7},"payload":{"msg":"x"}}`
//! gains metadata `level=warn` and `id=7`, and its body becomes `{"msg":"x"}`.

pub mod config;
pub mod event;
pub mod extractor;
pub mod node;
pub mod path;
pub mod stringify;
pub mod transformer;

pub use config::{ConfigError, ExtractionConfig, ExtractorSettings};
pub use event::{Event, Metadata};
pub use extractor::{ExtractorBuilder, JsonExtractor};
pub use node::{FractionalNumbers, JsonNode, NodeKind, ParseError};
pub use path::DottedPath;
pub use stringify::stringify;
pub use transformer::{Outcome, Transformer, UnchangedReason};
