use crate::path::codec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One addressable unit of a document: the heading path of a paragraph and
/// its trimmed text.
///
/// Ordering is by path first, then content, which is the order the decoder
/// reconstructs in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Record {
    path: String,
    content: String,
}

impl Record {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Path split back into encoded segments.
    pub fn segments(&self) -> Vec<String> {
        codec::split(&self.path)
    }

    pub fn into_parts(self) -> (String, String) {
        (self.path, self.content)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.content)
    }
}
