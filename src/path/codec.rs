//! Heading titles <-> path strings.
//!
//! The mapping is lossy: `/` inside a title is indistinguishable from a
//! segment separator, and `_` is indistinguishable from an encoded space.
//! Titles are not escaped; [`ambiguity`] reports the inputs that will not
//! round-trip.

use std::fmt;

pub const SEPARATOR: char = '/';

/// Replace every space with an underscore.
pub fn encode_segment(title: &str) -> String {
    title.replace(' ', "_")
}

/// Replace every underscore with a space.
pub fn decode_segment(segment: &str) -> String {
    segment.replace('_', " ")
}

/// Join already-encoded segments into a path.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            path.push(SEPARATOR);
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Split a path into its segments. Never returns an empty vector.
pub fn split(path: &str) -> Vec<String> {
    path.split(SEPARATOR).map(str::to_string).collect()
}

/// Title content the codec cannot carry through a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// Title contains `/`; decoding splits it into extra headings.
    Separator,
    /// Title contains `_`; decoding renders it as a space.
    Underscore,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ambiguity::Separator => write!(f, "contains '/' and will be split into nested headings"),
            Ambiguity::Underscore => write!(f, "contains '_' and will be decoded as a space"),
        }
    }
}

/// Check a raw (unencoded) title. `/` is reported before `_`.
pub fn ambiguity(title: &str) -> Option<Ambiguity> {
    if title.contains(SEPARATOR) {
        Some(Ambiguity::Separator)
    } else if title.contains('_') {
        Some(Ambiguity::Underscore)
    } else {
        None
    }
}
