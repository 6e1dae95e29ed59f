// src/record.rs
use std::fmt;

use crate::types::RawRecord;
use crate::uri::UriRecord;

/// What the renderer needs from every decoded record.
pub trait RecordContract: fmt::Debug + Send + Sync {
    /// The data read from the tag, as displayable text.
    fn str(&self) -> String;
}

/// Result of classifying one raw record.
#[derive(Debug)]
pub enum ParsedRecord {
    Uri(UriRecord),
    Fallback(FallbackRecord),
    /// Produced by a collaborator codec (text, smart poster, ...).
    External(Box<dyn RecordContract>),
}

impl ParsedRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedRecord::Uri(_) => "URI",
            ParsedRecord::Fallback(_) => "FALLBACK",
            ParsedRecord::External(_) => "EXTERNAL",
        }
    }
}

impl RecordContract for ParsedRecord {
    fn str(&self) -> String {
        match self {
            ParsedRecord::Uri(record) => record.str(),
            ParsedRecord::Fallback(record) => record.str(),
            ParsedRecord::External(record) => record.str(),
        }
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.str())
    }
}

/// Payload dumped as text when no codec claims the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackRecord {
    text: String,
}

impl FallbackRecord {
    /// Never fails; invalid UTF-8 sequences become U+FFFD.
    pub fn decode(record: &RawRecord) -> Self {
        FallbackRecord {
            text: String::from_utf8_lossy(record.payload()).into_owned(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl RecordContract for FallbackRecord {
    fn str(&self) -> String {
        self.text.clone()
    }
}
