use crate::document::Document;
use crate::path::{encode, topic_for};
use crate::transport::errors::TransportError;
use crate::transport::Publisher;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub published: usize,
}

/// Encode `document` and publish each record as soon as it is produced.
///
/// A malformed tree stops publishing at the offending node; records already
/// sent stay sent.
pub fn publish_document<P>(
    document: &Document,
    prefix: &str,
    publisher: &mut P,
) -> Result<PublishSummary, TransportError>
where
    P: Publisher + ?Sized,
{
    let mut summary = PublishSummary::default();
    for record in encode(document) {
        let record = record?;
        let topic = topic_for(prefix, record.path());
        publisher.publish(&topic, record.content())?;
        info!(topic = %topic, "published: {}", record.content());
        summary.published += 1;
    }
    publisher.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use crate::transport::{MemoryBus, Message, TopicFilter};

    #[test]
    fn test_publishes_each_record_under_prefix() {
        let doc = Document::new(vec![
            Node::heading(1, "Title"),
            Node::heading(2, "Section A"),
            Node::paragraph("Hello world."),
        ]);
        let mut bus = MemoryBus::new();
        let summary = publish_document(&doc, "markdown", &mut bus).unwrap();
        assert_eq!(summary.published, 1);
        assert_eq!(
            bus.subscribe(&TopicFilter::for_prefix("markdown").unwrap()),
            vec![Message::new("markdown/Title/Section_A", "Hello world.")]
        );
    }

    #[test]
    fn test_malformed_tree_stops_publishing() {
        let doc = Document::new(vec![
            Node::heading(1, "A"),
            Node::paragraph("sent"),
            Node::heading(0, "bad"),
            Node::paragraph("unsent"),
        ]);
        let mut bus = MemoryBus::new();
        let result = publish_document(&doc, "m", &mut bus);
        assert!(matches!(result, Err(TransportError::Encode(_))));
        assert_eq!(bus.len(), 1);
    }
}
