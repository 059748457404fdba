use crate::transport::errors::TransportError;
use crate::transport::filter::TopicFilter;
use crate::transport::{Message, Publisher};

/// In-process bus that retains the last payload per topic.
#[derive(Debug, Default, Clone)]
pub struct MemoryBus {
    retained: Vec<Message>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained messages matching `filter`, in first-publish order.
    pub fn subscribe(&self, filter: &TopicFilter) -> Vec<Message> {
        self.retained
            .iter()
            .filter(|message| filter.matches(&message.topic))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.retained.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }
}

impl Publisher for MemoryBus {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), TransportError> {
        match self.retained.iter_mut().find(|message| message.topic == topic) {
            Some(existing) => existing.payload = payload.to_string(),
            None => self.retained.push(Message::new(topic, payload)),
        }
        Ok(())
    }
}
