//! Moving records over a topic-addressed channel.
//!
//! The crate ships two channels: a JSON-lines stream (files, pipes) and an
//! in-process retained-topic bus. Anything implementing [`Publisher`] can
//! carry a document.

pub mod collector;
pub mod errors;
pub mod filter;
pub mod jsonl;
pub mod memory;
pub mod publish;

use serde::{Deserialize, Serialize};

pub use collector::{CollectSummary, Collector, Retention};
pub use errors::TransportError;
pub use filter::TopicFilter;
pub use jsonl::{read_json_lines, JsonLinesPublisher};
pub use memory::MemoryBus;
pub use publish::{publish_document, PublishSummary};

/// A `(key, value)` pair on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub payload: String,
}

impl Message {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

pub trait Publisher {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), TransportError>;

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
