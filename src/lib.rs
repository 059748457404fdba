//! mdtopics: markdown documents as topic-addressed records
//!
//! Every non-empty paragraph of a document becomes a record keyed by the
//! path of headings that encloses it. The record set can travel over any
//! topic-based channel, arrive in any order, and still be rebuilt into a
//! document with correctly nested headings.
//!
//! # Architecture
//!
//! - [`markdown`] parses CommonMark into a parser-independent [`Document`].
//! - [`path`] holds the pure core: the path codec, the encoder (document to
//!   records) and the decoder (records to markdown).
//! - [`transport`] publishes records and collects them back.
//! - [`config`] loads the optional `mdtopics.toml`.
//!
//! # Known limitations
//!
//! Heading titles are not escaped. A `/` inside a title is read back as a
//! heading boundary and `_` is read back as a space. Skipped heading levels
//! (a `###` directly under a `#`) are rebuilt by depth, as `##`.
//!
//! # Example
//!
//! ```
//! use mdtopics::{decode, encode_all, markdown};
//!
//! let doc = markdown::parse("# Title\n## Section A\nHello world.\n");
//! let records = encode_all(&doc).unwrap();
//! assert_eq!(records[0].path(), "Title/Section_A");
//!
//! let text = decode(records);
//! assert_eq!(text, "# Title\n\n## Section A\n\nHello world.\n");
//! ```

pub mod config;
pub mod document;
pub mod markdown;
pub mod path;
pub mod transport;

// Re-exports
pub use config::{load_from_path, load_from_str, ConfigError, ToolConfig};
pub use document::{Document, Inline, Node};
pub use path::{decode, encode, encode_all, DecodeError, EncodeError, Record, Records};
pub use transport::{
    publish_document, read_json_lines, Collector, JsonLinesPublisher, MemoryBus, Message,
    Publisher, Retention, TopicFilter, TransportError,
};
