//! Event transformers.
//!
//! A transformer mutates one event in place and reports what it did. The
//! by-value [`Transformer::transform`] and [`Transformer::transform_all`]
//! wrappers always hand back a usable event, so callers never branch on
//! failure.

pub mod body;
pub mod header;

pub use body::BodyExtraction;
pub use header::HeaderExtraction;

use crate::event::Event;

/// What a single [`Transformer::apply`] call did to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one extraction was written
    Transformed {
        /// Metadata entries written (including overwrites)
        headers_written: usize,
        /// Whether the body was replaced
        body_replaced: bool,
    },
    /// The event was passed through untouched
    Unchanged(UnchangedReason),
}

impl Outcome {
    pub fn is_transformed(&self) -> bool {
        matches!(self, Outcome::Transformed { .. })
    }
}

/// Why an event was passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedReason {
    /// No header paths and no body path configured
    NothingConfigured,
    /// The event body is empty
    EmptyBody,
    /// The body is not UTF-8 JSON with an object at the top level
    MalformedPayload,
    /// No configured path produced a value
    NothingExtracted,
}

/// An in-place, synchronous event transform.
pub trait Transformer: Send + Sync {
    /// Transform `event` in place.
    fn apply(&self, event: &mut Event) -> Outcome;

    /// Get the transformer name (for logging).
    fn name(&self) -> &'static str;

    /// Transform an owned event and hand it back.
    fn transform(&self, mut event: Event) -> Event {
        self.apply(&mut event);
        event
    }

    /// Transform every event, preserving order and count.
    fn transform_all(&self, events: Vec<Event>) -> Vec<Event> {
        events.into_iter().map(|event| self.transform(event)).collect()
    }
}
