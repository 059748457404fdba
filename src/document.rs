//! Parser-independent document tree.
//!
//! The encoder only needs to tell headings from paragraphs and to read their
//! direct text. Any parser that can produce this shape can feed it; the
//! [`crate::markdown`] module is the adapter shipped with the crate.

/// A parsed document: top-level blocks in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Node>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Heading with its level (1 for `#`) and inline content.
    Heading { level: u8, inlines: Vec<Inline> },
    /// Body paragraph.
    Paragraph { inlines: Vec<Inline> },
    /// Any other block (list, quote, code...). Only its descendants matter.
    Block { children: Vec<Node> },
}

/// An inline node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// Non-text inline markup (emphasis, link, code span...) with its children.
    Markup(Vec<Inline>),
}

impl Document {
    pub fn new(blocks: Vec<Node>) -> Self {
        Self { blocks }
    }

    /// Every heading as `(level, direct text)`, in document order.
    pub fn headings(&self) -> Vec<(u8, String)> {
        let mut out = Vec::new();
        collect_headings(&self.blocks, &mut out);
        out
    }
}

fn collect_headings(nodes: &[Node], out: &mut Vec<(u8, String)>) {
    for node in nodes {
        match node {
            Node::Heading { level, inlines } => out.push((*level, direct_text(inlines))),
            Node::Paragraph { .. } => {}
            Node::Block { children } => collect_headings(children, out),
        }
    }
}

impl Node {
    /// Heading made of a single text run.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            inlines: vec![Inline::Text(text.into())],
        }
    }

    /// Paragraph made of a single text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            inlines: vec![Inline::Text(text.into())],
        }
    }
}

/// Concatenate the direct `Text` children only; markup is not recursed into.
pub fn direct_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .filter_map(|inline| match inline {
            Inline::Text(text) => Some(text.as_str()),
            Inline::Markup(_) => None,
        })
        .collect()
}
