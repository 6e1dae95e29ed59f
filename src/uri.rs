// src/uri.rs
use std::str;

use crate::classifier::RecordCodec;
use crate::error::ClassificationError;
use crate::record::{ParsedRecord, RecordContract};
use crate::types::{RTD_URI, RawRecord, Tnf};
use crate::uri_prefix;

/// A parsed record containing a URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UriRecord {
    uri: String,
}

/// The two payload layouts a URI record can use, validated but not yet decoded.
enum UriLayout<'a> {
    // TNF 3: payload is the whole URI
    Absolute(&'a str),
    // TNF 1 / "U": [Prefix Code] + [Rest of URI]
    WellKnown { prefix: &'static str, rest: &'a [u8] },
}

impl<'a> UriLayout<'a> {
    fn validate(record: &'a RawRecord) -> Result<Self, ClassificationError> {
        let payload = record.payload();
        match record.tnf() {
            Tnf::AbsoluteUri => {
                if payload.is_empty() {
                    return Err(ClassificationError::EmptyPayload);
                }
                Ok(UriLayout::Absolute(str::from_utf8(payload)?))
            }
            Tnf::WellKnown => {
                if record.record_type() != RTD_URI {
                    return Err(ClassificationError::TypeMismatch {
                        expected: RTD_URI,
                        found: record.record_type().to_vec(),
                    });
                }
                let (&code, rest) = payload
                    .split_first()
                    .ok_or(ClassificationError::EmptyPayload)?;
                let prefix = uri_prefix::prefix_for(code)
                    .ok_or(ClassificationError::UnknownPrefixCode(code))?;
                Ok(UriLayout::WellKnown { prefix, rest })
            }
            other => Err(ClassificationError::UnknownTnf(other)),
        }
    }
}

impl UriRecord {
    /// Handles both TNF_WELL_KNOWN / RTD_URI and TNF_ABSOLUTE_URI.
    pub fn parse(record: &RawRecord) -> Result<Self, ClassificationError> {
        let uri = match UriLayout::validate(record)? {
            UriLayout::Absolute(uri) => uri.to_string(),
            UriLayout::WellKnown { prefix, rest } => {
                let rest = String::from_utf8_lossy(rest);
                let mut uri = String::with_capacity(prefix.len() + rest.len());
                uri.push_str(prefix);
                uri.push_str(&rest);
                uri
            }
        };
        Ok(UriRecord { uri })
    }

    /// True exactly when `parse` would succeed.
    pub fn is_uri(record: &RawRecord) -> bool {
        UriLayout::validate(record).is_ok()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl RecordContract for UriRecord {
    fn str(&self) -> String {
        self.uri.clone()
    }
}

/// Classifier strategy for URI records.
#[derive(Clone, Copy, Debug, Default)]
pub struct UriCodec;

impl RecordCodec for UriCodec {
    fn name(&self) -> &'static str {
        "uri"
    }

    fn recognizes(&self, record: &RawRecord) -> bool {
        UriRecord::is_uri(record)
    }

    fn decode(&self, record: &RawRecord) -> Result<ParsedRecord, ClassificationError> {
        UriRecord::parse(record).map(ParsedRecord::Uri)
    }
}
