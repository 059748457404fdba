//! JSON-lines message stream: one `{"topic": ..., "payload": ...}` per line.

use crate::transport::errors::TransportError;
use crate::transport::{Message, Publisher};
use std::io::{BufRead, Write};

/// Writes every published message as a JSON line.
#[derive(Debug)]
pub struct JsonLinesPublisher<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Publisher for JsonLinesPublisher<W> {
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), TransportError> {
        let message = Message::new(topic, payload);
        serde_json::to_writer(&mut self.writer, &message).map_err(TransportError::Serialize)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read messages back. Blank lines are skipped; line numbers are 1-based.
pub fn read_json_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<Message, TransportError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(
                serde_json::from_str(&line)
                    .map_err(|source| TransportError::Malformed { line: idx + 1, source }),
            ),
            Err(error) => Some(Err(error.into())),
        })
}
