//! Turns received messages back into records for the decoder.

use crate::path::{decode, path_from_topic, DecodeError, Record};
use crate::transport::errors::TransportError;
use crate::transport::Message;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// How repeated deliveries for the same path are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Retention {
    /// Every distinct `(path, content)` pair; exact redeliveries are dropped.
    #[default]
    All,
    /// One record per path, the latest delivery wins.
    LastValue,
}

impl FromStr for Retention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Retention::All),
            "last-value" => Ok(Retention::LastValue),
            other => Err(format!(
                "unknown retention '{other}' (expected 'all' or 'last-value')"
            )),
        }
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retention::All => write!(f, "all"),
            Retention::LastValue => write!(f, "last-value"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

#[derive(Debug)]
pub struct Collector {
    prefix: String,
    retention: Retention,
    records: Vec<Record>,
    seen: HashSet<Record>,
    by_path: HashMap<String, usize>,
    summary: CollectSummary,
}

impl Collector {
    pub fn new(prefix: impl Into<String>, retention: Retention) -> Self {
        Self {
            prefix: prefix.into(),
            retention,
            records: Vec::new(),
            seen: HashSet::new(),
            by_path: HashMap::new(),
            summary: CollectSummary::default(),
        }
    }

    /// Accept one delivery. Keys without a path, or outside the prefix, are
    /// rejected and leave the collection untouched.
    pub fn accept(&mut self, topic: &str, payload: &str) -> Result<(), DecodeError> {
        let path = match path_from_topic(&self.prefix, topic) {
            Ok(path) => path,
            Err(error) => {
                self.summary.rejected += 1;
                return Err(error);
            }
        };
        let record = Record::new(path, payload);

        match self.retention {
            Retention::All => {
                if self.seen.insert(record.clone()) {
                    self.records.push(record);
                    self.summary.accepted += 1;
                } else {
                    debug!(topic, "dropping duplicate delivery");
                    self.summary.duplicates += 1;
                }
            }
            Retention::LastValue => match self.by_path.get(path) {
                Some(&idx) => {
                    debug!(topic, "replacing earlier value");
                    self.records[idx] = record;
                    self.summary.duplicates += 1;
                }
                None => {
                    self.by_path.insert(path.to_string(), self.records.len());
                    self.records.push(record);
                    self.summary.accepted += 1;
                }
            },
        }
        Ok(())
    }

    pub fn accept_message(&mut self, message: &Message) -> Result<(), DecodeError> {
        self.accept(&message.topic, &message.payload)
    }

    /// Drain a message stream. Rejected keys are logged and skipped; stream
    /// errors abort collection.
    pub fn collect<I>(&mut self, messages: I) -> Result<CollectSummary, TransportError>
    where
        I: IntoIterator<Item = Result<Message, TransportError>>,
    {
        for message in messages {
            let message = message?;
            if let Err(error) = self.accept_message(&message) {
                warn!("skipping message: {error}");
            }
        }
        info!(
            accepted = self.summary.accepted,
            duplicates = self.summary.duplicates,
            rejected = self.summary.rejected,
            "collected messages"
        );
        Ok(self.summary)
    }

    pub fn summary(&self) -> CollectSummary {
        self.summary
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Decode everything collected so far.
    pub fn finish(self) -> String {
        decode(self.records)
    }
}
