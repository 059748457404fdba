use crate::transport::Retention;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_PREFIX: &str = "markdown";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ToolConfig {
    #[serde(default)]
    pub topic: TopicSettings,
    #[serde(default)]
    pub collect: CollectSettings,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if let Err(issue) = validate_prefix(&self.topic.prefix) {
            issues.push(issue);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TopicSettings {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CollectSettings {
    #[serde(default)]
    pub retention: Retention,
}

/// Check a topic prefix independently of where it came from (file, flag,
/// environment).
pub fn validate_prefix(prefix: &str) -> Result<(), ValidationIssue> {
    let invalid = |message: &str| ValidationIssue::InvalidPrefix {
        prefix: prefix.to_string(),
        message: message.to_string(),
    };

    if prefix.trim().is_empty() {
        return Err(ValidationIssue::MissingField {
            field: "topic.prefix",
        });
    }
    if prefix.contains(['#', '+']) {
        return Err(invalid("wildcards are not allowed"));
    }
    if prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(invalid("must not start or end with '/'"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    MissingField { field: &'static str },
    InvalidPrefix { prefix: String, message: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "missing required field '{field}'")
            }
            ValidationIssue::InvalidPrefix { prefix, message } => {
                write!(f, "invalid topic prefix '{prefix}': {message}")
            }
        }
    }
}

impl std::error::Error for ValidationIssue {}
