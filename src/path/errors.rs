use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid heading level {level}: levels start at 1")]
    InvalidHeadingLevel { level: u8 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("topic '{topic}' carries no path after the prefix")]
    EmptyPath { topic: String },

    #[error("topic '{topic}' is outside prefix '{prefix}'")]
    ForeignTopic { topic: String, prefix: String },
}
