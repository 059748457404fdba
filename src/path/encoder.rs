//! Document tree -> records.
//!
//! The walk keeps a heading stack: entering a heading of level `L` closes
//! every open heading at level `L` or deeper, then pushes the new title.
//! Each non-empty paragraph under at least one heading becomes a record
//! whose path is the stack joined with `/`.

use crate::document::{direct_text, Document, Inline, Node};
use crate::path::codec;
use crate::path::errors::EncodeError;
use crate::path::record::Record;
use std::slice;
use tracing::{debug, warn};

/// Lazily encode a document. Calling `encode` again restarts from scratch.
pub fn encode(document: &Document) -> Records<'_> {
    Records {
        pending: vec![document.blocks.iter()],
        headings: Vec::new(),
    }
}

/// Encode a whole document, stopping at the first malformed node.
pub fn encode_all(document: &Document) -> Result<Vec<Record>, EncodeError> {
    encode(document).collect()
}

/// Iterator over the records of a document, in document order.
#[derive(Debug, Clone)]
#[must_use = "records are produced only when the iterator is consumed"]
pub struct Records<'a> {
    // One iterator per open block, innermost last.
    pending: Vec<slice::Iter<'a, Node>>,
    headings: Vec<String>,
}

impl<'a> Records<'a> {
    /// Encoded titles of the currently open headings, outermost first.
    pub fn heading_stack(&self) -> &[String] {
        &self.headings
    }

    fn open_heading(&mut self, level: u8, inlines: &[Inline]) -> Result<(), EncodeError> {
        if level == 0 {
            return Err(EncodeError::InvalidHeadingLevel { level });
        }

        let level = usize::from(level);
        if self.headings.len() >= level {
            self.headings.truncate(level - 1);
        }

        let title = direct_text(inlines);
        if let Some(ambiguity) = codec::ambiguity(&title) {
            warn!(title = %title, "heading title {ambiguity}");
        }
        self.headings.push(codec::encode_segment(&title));
        debug!(depth = self.headings.len(), level, "opened heading");
        Ok(())
    }

    fn paragraph(&self, inlines: &[Inline]) -> Option<Record> {
        let content = direct_text(inlines);
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        if self.headings.is_empty() {
            debug!("dropping paragraph before the first heading");
            return None;
        }
        Some(Record::new(codec::join(&self.headings), content))
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record, EncodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(node) = self.pending.last_mut()?.next() else {
                self.pending.pop();
                continue;
            };

            match node {
                Node::Heading { level, inlines } => {
                    if let Err(error) = self.open_heading(*level, inlines) {
                        self.pending.clear();
                        return Some(Err(error));
                    }
                }
                Node::Paragraph { inlines } => {
                    if let Some(record) = self.paragraph(inlines) {
                        return Some(Ok(record));
                    }
                }
                Node::Block { children } => self.pending.push(children.iter()),
            }
        }
    }
}
