//! Records -> markdown.
//!
//! Records are sorted by path (then content) and printed like a directory
//! tree: only the headings that differ from the previous entry's path are
//! emitted. Heading depth comes from segment position, not from any level
//! recorded at encode time.

use crate::path::codec;
use crate::path::record::Record;
use tracing::debug;

pub const HEADING_MARKER: char = '#';

struct Entry {
    segments: Vec<String>,
    record: Record,
}

/// Rebuild a document from an unordered, possibly incomplete, record set.
///
/// Output is identical for every permutation of the same records.
pub fn decode<I>(records: I) -> String
where
    I: IntoIterator<Item = Record>,
{
    let mut entries: Vec<Entry> = records
        .into_iter()
        .map(|record| Entry {
            segments: record.segments(),
            record,
        })
        .collect();
    entries.sort_by(|a, b| a.record.cmp(&b.record));

    let mut lines: Vec<String> = Vec::new();
    let mut last: Vec<&str> = Vec::new();
    let mut headings = 0usize;

    for entry in &entries {
        for (idx, segment) in entry.segments.iter().enumerate() {
            if last.get(idx) == Some(&segment.as_str()) {
                continue;
            }
            lines.push(heading_line(idx + 1, segment));
            lines.push(String::new());
            headings += 1;
            last.truncate(idx);
            last.push(segment);
        }
        lines.push(entry.record.content().to_string());
        lines.push(String::new());
    }

    debug!(records = entries.len(), headings, "decoded records");
    lines.join("\n")
}

fn heading_line(level: usize, segment: &str) -> String {
    let marker = HEADING_MARKER.to_string().repeat(level);
    format!("{marker} {}", codec::decode_segment(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_document() {
        let records = vec![
            Record::new("Title/Section_B", "Goodbye."),
            Record::new("Title/Section_A", "Hello world."),
        ];
        assert_eq!(
            decode(records),
            "# Title\n\n## Section A\n\nHello world.\n\n## Section B\n\nGoodbye.\n"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(Vec::new()), "");
    }

    #[test]
    fn test_prefix_suppression() {
        let out = decode(vec![Record::new("A/C", "c"), Record::new("A/B", "b")]);
        assert_eq!(out.matches("# A\n").count(), 1);
        let b = out.find("## B").unwrap();
        let c = out.find("## C").unwrap();
        assert!(out.find("# A").unwrap() < b);
        assert!(b < c);
    }

    #[test]
    fn test_divergence_rebuilds_tail() {
        let out = decode(vec![
            Record::new("A/B/C", "1"),
            Record::new("A/D/C", "2"),
        ]);
        assert_eq!(
            out,
            "# A\n\n## B\n\n### C\n\n1\n\n## D\n\n### C\n\n2\n"
        );
    }

    #[test]
    fn test_parent_content_comes_before_children() {
        let out = decode(vec![Record::new("A/B", "child"), Record::new("A", "parent")]);
        assert_eq!(out, "# A\n\nparent\n\n## B\n\nchild\n");
    }

    #[test]
    fn test_duplicate_paths_share_heading() {
        let out = decode(vec![Record::new("A", "second"), Record::new("A", "first")]);
        assert_eq!(out, "# A\n\nfirst\n\nsecond\n");
    }

    #[test]
    fn test_empty_segment_heading() {
        assert_eq!(decode(vec![Record::new("A/", "x")]), "# A\n\n## \n\nx\n");
    }

    #[test]
    fn test_underscores_decode_to_spaces() {
        assert_eq!(decode(vec![Record::new("snake_case", "x")]), "# snake case\n\nx\n");
    }
}
