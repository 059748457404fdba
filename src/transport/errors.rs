use crate::path::EncodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid topic filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("malformed message on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}
