//! CommonMark adapter: markdown text -> [`Document`] via comrak.

use crate::document::{Document, Inline, Node};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, Options};

/// Parse markdown text into a document tree.
///
/// Paragraphs that are the bare text of a tight list item are mapped to
/// plain blocks: they carry no paragraph semantics and produce no record.
/// Soft and hard line breaks become `"\n"` text so multi-line paragraphs
/// keep their lines. Inside a heading they become a single space: a title
/// is one path segment and is rebuilt as one ATX line.
pub fn parse(text: &str) -> Document {
    let arena = Arena::new();
    let options = Options::default();
    let root = parse_document(&arena, text, &options);
    Document::new(blocks(root, false))
}

fn blocks<'a>(parent: &'a AstNode<'a>, tight_item: bool) -> Vec<Node> {
    parent
        .children()
        .map(|child| block(child, tight_item))
        .collect()
}

fn block<'a>(node: &'a AstNode<'a>, tight_item: bool) -> Node {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Heading(heading) => Node::Heading {
            level: heading.level,
            inlines: inlines(node, " "),
        },
        NodeValue::Paragraph if tight_item => Node::Block {
            children: Vec::new(),
        },
        NodeValue::Paragraph => Node::Paragraph {
            inlines: inlines(node, "\n"),
        },
        NodeValue::List(list) => {
            let tight = list.tight;
            Node::Block {
                children: node
                    .children()
                    .map(|item| Node::Block {
                        children: blocks(item, tight),
                    })
                    .collect(),
            }
        }
        _ => Node::Block {
            children: blocks(node, false),
        },
    }
}

fn inlines<'a>(parent: &'a AstNode<'a>, line_break: &str) -> Vec<Inline> {
    parent
        .children()
        .map(|child| inline(child, line_break))
        .collect()
}

fn inline<'a>(node: &'a AstNode<'a>, line_break: &str) -> Inline {
    let data = node.data.borrow();
    match &data.value {
        NodeValue::Text(text) => Inline::Text(text.to_string()),
        NodeValue::SoftBreak | NodeValue::LineBreak => Inline::Text(line_break.to_string()),
        _ => Inline::Markup(inlines(node, line_break)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::direct_text;

    #[test]
    fn test_headings_and_paragraphs() {
        let doc = parse("# Title\n## Section A\nHello world.\n");
        assert_eq!(
            doc.headings(),
            vec![(1, "Title".to_string()), (2, "Section A".to_string())]
        );
        assert!(matches!(doc.blocks.last(), Some(Node::Paragraph { .. })));
    }

    #[test]
    fn test_emphasis_is_markup() {
        let doc = parse("# Plain *loud*\n");
        match &doc.blocks[0] {
            Node::Heading { inlines, .. } => {
                assert_eq!(direct_text(inlines), "Plain ");
                assert!(matches!(inlines.last(), Some(Inline::Markup(_))));
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn test_soft_break_keeps_lines() {
        let doc = parse("first line\nsecond line\n");
        match &doc.blocks[0] {
            Node::Paragraph { inlines } => {
                assert_eq!(direct_text(inlines), "first line\nsecond line");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_setext_heading_lines_join_with_space() {
        let doc = parse("Release\nNotes\n=====\n\nbody\n");
        assert_eq!(doc.headings(), vec![(1, "Release Notes".to_string())]);
    }

    #[test]
    fn test_tight_list_items_are_not_paragraphs() {
        let doc = parse("- one\n- two\n");
        let Node::Block { children } = &doc.blocks[0] else {
            panic!("expected list block");
        };
        for item in children {
            let Node::Block { children } = item else {
                panic!("expected item block");
            };
            assert!(children
                .iter()
                .all(|node| !matches!(node, Node::Paragraph { .. })));
        }
    }

    #[test]
    fn test_loose_list_items_keep_paragraphs() {
        let doc = parse("- one\n\n- two\n");
        let Node::Block { children } = &doc.blocks[0] else {
            panic!("expected list block");
        };
        let Node::Block { children } = &children[0] else {
            panic!("expected item block");
        };
        assert!(matches!(children[0], Node::Paragraph { .. }));
    }
}
