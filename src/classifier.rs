// src/classifier.rs
use log::{debug, warn};

use crate::error::ClassificationError;
use crate::record::{FallbackRecord, ParsedRecord};
use crate::types::RawRecord;
use crate::uri::UriCodec;

/// A (recognizer, decoder) pair consulted by the [`Classifier`].
///
/// `recognizes` must not panic on malformed input and must accept exactly
/// the records `decode` would accept. The default derives it from `decode`.
pub trait RecordCodec: Send + Sync {
    fn name(&self) -> &'static str;

    fn recognizes(&self, record: &RawRecord) -> bool {
        self.decode(record).is_ok()
    }

    fn decode(&self, record: &RawRecord) -> Result<ParsedRecord, ClassificationError>;
}

/// Maps every raw record to exactly one parsed record, in input order.
pub struct Classifier {
    codecs: Vec<Box<dyn RecordCodec>>,
}

impl Classifier {
    /// URI codec only. Collaborator codecs are appended with [`Classifier::with_codec`].
    pub fn new() -> Self {
        Classifier {
            codecs: vec![Box::new(UriCodec)],
        }
    }

    /// Adds a codec with lower priority than every codec already registered.
    pub fn with_codec(mut self, codec: impl RecordCodec + 'static) -> Self {
        self.codecs.push(Box::new(codec));
        self
    }

    pub fn codec_names(&self) -> Vec<&'static str> {
        self.codecs.iter().map(|codec| codec.name()).collect()
    }

    pub fn classify(&self, records: &[RawRecord]) -> Vec<ParsedRecord> {
        records.iter().map(|record| self.classify_record(record)).collect()
    }

    pub fn classify_record(&self, record: &RawRecord) -> ParsedRecord {
        if let Some(codec) = self.codecs.iter().find(|codec| codec.recognizes(record)) {
            match codec.decode(record) {
                Ok(parsed) => {
                    debug!("Record {:?} claimed by {} codec", record.tnf(), codec.name());
                    return parsed;
                }
                Err(err) => {
                    warn!(
                        "{} codec recognized record but failed to decode it: {}",
                        codec.name(),
                        err
                    );
                }
            }
        }

        debug!(
            "Falling back to raw payload for {:?} record: {}",
            record.tnf(),
            hex::encode(record.payload())
        );
        ParsedRecord::Fallback(FallbackRecord::decode(record))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new()
    }
}

/// Classifies with the default codec list.
pub fn classify(records: &[RawRecord]) -> Vec<ParsedRecord> {
    Classifier::new().classify(records)
}
