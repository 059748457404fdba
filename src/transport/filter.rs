use crate::transport::errors::TransportError;
use std::fmt;

const MULTI_LEVEL: &str = "#";
const SINGLE_LEVEL: &str = "+";

/// MQTT-style subscription pattern.
///
/// `+` matches exactly one level, a trailing `#` matches any number of
/// levels including none, so `markdown/#` also matches `markdown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFilter {
    levels: Vec<String>,
}

impl TopicFilter {
    pub fn parse(input: &str) -> Result<Self, TransportError> {
        let invalid = |message: &str| TransportError::InvalidFilter {
            filter: input.to_string(),
            message: message.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("empty filter"));
        }

        let levels: Vec<String> = input.split('/').map(str::to_string).collect();
        for (idx, level) in levels.iter().enumerate() {
            if level.contains(MULTI_LEVEL) && (level != MULTI_LEVEL || idx + 1 != levels.len()) {
                return Err(invalid("'#' must be the whole last level"));
            }
            if level.contains(SINGLE_LEVEL) && level != SINGLE_LEVEL {
                return Err(invalid("'+' must be a whole level"));
            }
        }
        Ok(Self { levels })
    }

    /// `<prefix>/#`: everything published under a prefix.
    pub fn for_prefix(prefix: &str) -> Result<Self, TransportError> {
        Self::parse(&format!("{prefix}/{MULTI_LEVEL}"))
    }

    pub fn matches(&self, topic: &str) -> bool {
        let mut levels = topic.split('/');
        for pattern in &self.levels {
            match pattern.as_str() {
                MULTI_LEVEL => return true,
                SINGLE_LEVEL => {
                    if levels.next().is_none() {
                        return false;
                    }
                }
                literal => {
                    if levels.next() != Some(literal) {
                        return false;
                    }
                }
            }
        }
        levels.next().is_none()
    }
}

impl fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.levels.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_level_wildcard() {
        let filter = TopicFilter::for_prefix("markdown").unwrap();
        assert!(filter.matches("markdown/Title"));
        assert!(filter.matches("markdown/Title/Section_A"));
        assert!(filter.matches("markdown"));
        assert!(!filter.matches("other/Title"));
        assert!(!filter.matches("markdowns/Title"));
    }

    #[test]
    fn test_single_level_wildcard() {
        let filter = TopicFilter::parse("markdown/+/Intro").unwrap();
        assert!(filter.matches("markdown/Title/Intro"));
        assert!(!filter.matches("markdown/Title/Other"));
        assert!(!filter.matches("markdown/A/B/Intro"));
        assert!(!filter.matches("markdown/Title"));
    }

    #[test]
    fn test_literal_filter() {
        let filter = TopicFilter::parse("markdown/Title").unwrap();
        assert!(filter.matches("markdown/Title"));
        assert!(!filter.matches("markdown/Title/Sub"));
    }

    #[test]
    fn test_invalid_filters() {
        assert!(TopicFilter::parse("").is_err());
        assert!(TopicFilter::parse("a/#/b").is_err());
        assert!(TopicFilter::parse("a/b#").is_err());
        assert!(TopicFilter::parse("a/b+").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TopicFilter::for_prefix("md").unwrap().to_string(), "md/#");
    }
}
