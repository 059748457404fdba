//! Transport keys: `<prefix>/<path>`.

use crate::path::codec::SEPARATOR;
use crate::path::errors::DecodeError;

/// Build the transport key for a record path.
pub fn topic_for(prefix: &str, path: &str) -> String {
    format!("{prefix}{SEPARATOR}{path}")
}

/// Strip `prefix/` from a transport key.
///
/// The bare prefix is rejected with [`DecodeError::EmptyPath`]: a `prefix/#`
/// subscription receives it, but it names no heading. `prefix/` on its own
/// is accepted and yields the empty path of an untitled top-level heading.
pub fn path_from_topic<'a>(prefix: &str, topic: &'a str) -> Result<&'a str, DecodeError> {
    let foreign = || DecodeError::ForeignTopic {
        topic: topic.to_string(),
        prefix: prefix.to_string(),
    };

    let rest = topic.strip_prefix(prefix).ok_or_else(foreign)?;
    if rest.is_empty() {
        return Err(DecodeError::EmptyPath {
            topic: topic.to_string(),
        });
    }
    rest.strip_prefix(SEPARATOR).ok_or_else(foreign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_for() {
        assert_eq!(topic_for("markdown", "Title/Section_A"), "markdown/Title/Section_A");
    }

    #[test]
    fn test_path_from_topic() {
        assert_eq!(
            path_from_topic("markdown", "markdown/Title/Section_A").unwrap(),
            "Title/Section_A"
        );
        assert_eq!(path_from_topic("markdown", "markdown/").unwrap(), "");
    }

    #[test]
    fn test_bare_prefix_is_empty_path() {
        assert!(matches!(
            path_from_topic("markdown", "markdown"),
            Err(DecodeError::EmptyPath { .. })
        ));
    }

    #[test]
    fn test_foreign_topics() {
        assert!(matches!(
            path_from_topic("markdown", "other/Title"),
            Err(DecodeError::ForeignTopic { .. })
        ));
        // Shares the prefix text but not the level.
        assert!(matches!(
            path_from_topic("markdown", "markdowns/Title"),
            Err(DecodeError::ForeignTopic { .. })
        ));
    }
}
