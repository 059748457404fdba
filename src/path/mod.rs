//! Heading paths: the codec, the encoder and the decoder.
//!
//! Encoding and decoding are pure, synchronous functions over in-memory
//! data. They do no I/O; the [`crate::transport`] module moves records.

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod record;
pub mod topic;

pub use codec::{ambiguity, decode_segment, encode_segment, join, split, Ambiguity};
pub use decoder::decode;
pub use encoder::{encode, encode_all, Records};
pub use errors::{DecodeError, EncodeError};
pub use record::Record;
pub use topic::{path_from_topic, topic_for};
