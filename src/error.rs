// src/error.rs
use thiserror::Error;

use crate::types::Tnf;

/// Why a codec refused a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("Unknown TNF {0:?}")]
    UnknownTnf(Tnf),

    #[error("Record type mismatch: expected {expected:02X?}, got {found:02X?}")]
    TypeMismatch {
        expected: &'static [u8],
        found: Vec<u8>,
    },

    #[error("Empty payload")]
    EmptyPayload,

    #[error("URI prefix code {0:#04x} is not defined")]
    UnknownPrefixCode(u8),

    #[error("UTF-8 decode error: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Failures while reading NDEF bytes off the tag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NdefError {
    #[error("Empty NDEF")]
    Empty,

    #[error("Incomplete data: need {need} bytes at offset {offset}, buffer has {len}")]
    Truncated {
        offset: usize,
        need: usize,
        len: usize,
    },

    #[error("First record does not carry the Message Begin flag")]
    MissingMessageBegin,

    #[error("Message ended without a Message End flag")]
    MissingMessageEnd,

    #[error("Chunk continuation at record {0} without an open chunk")]
    UnexpectedChunk(usize),

    #[error("Chunked record was not terminated before record {0}")]
    UnterminatedChunk(usize),

    #[error("Chunk continuation at record {0} carries an id")]
    ChunkWithId(usize),

    #[error("No NDEF TLV found")]
    NoNdefTlv,
}
