//! Decodes NFC Data Exchange Format (NDEF) records into displayable values.
//!
//! Raw records go through a [`Classifier`], which hands each one to the first
//! [`RecordCodec`] that recognizes it and falls back to a plain payload dump
//! otherwise. Classification never fails and keeps the input order.
//!
//! ```
//! use ndef_record_reader::{classify, RawRecord, RecordContract, Tnf};
//!
//! let records = [
//!     RawRecord::well_known_uri(0x01, "example.com"),
//!     RawRecord::new(Tnf::Unknown, b"", None, b"hello".to_vec()),
//! ];
//! let lines: Vec<String> = classify(&records).iter().map(|r| r.str()).collect();
//! assert_eq!(lines, ["http://www.example.com", "hello"]);
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod ndef;
pub mod record;
pub mod render;
pub mod types;
pub mod uri;
pub mod uri_prefix;

pub use classifier::{Classifier, RecordCodec, classify};
pub use error::{ClassificationError, NdefError};
pub use record::{FallbackRecord, ParsedRecord, RecordContract};
pub use types::{RawRecord, Tnf};
pub use uri::{UriCodec, UriRecord};
