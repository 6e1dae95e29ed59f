// src/types.rs
use serde::Serialize;

/// Well-known record type for URI records ("U").
pub const RTD_URI: &[u8] = b"U";
/// Well-known record type for text records ("T").
pub const RTD_TEXT: &[u8] = b"T";
/// Well-known record type for smart posters ("Sp").
pub const RTD_SMART_POSTER: &[u8] = b"Sp";

// Type Name Format (How to interpret the type). Lives in the low 3 bits of the record header.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tnf {
    Empty,
    WellKnown,
    MimeMedia,
    AbsoluteUri,
    External,
    Unknown,
    Unchanged,
    Reserved,
}

impl Tnf {
    /// Maps the 3-bit header field; higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0x00 => Tnf::Empty,
            0x01 => Tnf::WellKnown,
            0x02 => Tnf::MimeMedia,
            0x03 => Tnf::AbsoluteUri,
            0x04 => Tnf::External,
            0x05 => Tnf::Unknown,
            0x06 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Tnf::Empty => 0x00,
            Tnf::WellKnown => 0x01,
            Tnf::MimeMedia => 0x02,
            Tnf::AbsoluteUri => 0x03,
            Tnf::External => 0x04,
            Tnf::Unknown => 0x05,
            Tnf::Unchanged => 0x06,
            Tnf::Reserved => 0x07,
        }
    }
}

impl From<u8> for Tnf {
    fn from(bits: u8) -> Self {
        Tnf::from_bits(bits)
    }
}

/// One record as read off the tag. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    tnf: Tnf,
    record_type: Vec<u8>,
    id: Option<Vec<u8>>,
    payload: Vec<u8>,
}

impl RawRecord {
    pub fn new(
        tnf: Tnf,
        record_type: impl Into<Vec<u8>>,
        id: Option<Vec<u8>>,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        RawRecord {
            tnf,
            record_type: record_type.into(),
            id,
            payload: payload.into(),
        }
    }

    /// Well-known URI record with the given prefix code and remainder.
    pub fn well_known_uri(code: u8, rest: &str) -> Self {
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code);
        payload.extend_from_slice(rest.as_bytes());
        RawRecord::new(Tnf::WellKnown, RTD_URI, None, payload)
    }

    pub fn tnf(&self) -> Tnf {
        self.tnf
    }

    pub fn record_type(&self) -> &[u8] {
        &self.record_type
    }

    pub fn id(&self) -> Option<&[u8]> {
        self.id.as_deref()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

// Messages written to stdout when JSON output is selected
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutgoingMessage {
    DataReadSuccess { records: Vec<RecordView> },
    DataReadError { error: String },
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordView {
    pub kind: &'static str,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tnf_bits_round_trip_through_header_field() {
        for bits in 0u8..8 {
            assert_eq!(Tnf::from_bits(bits).bits(), bits);
        }
        // MB|ME|SR flags around an absolute-URI TNF
        assert_eq!(Tnf::from_bits(0xD3), Tnf::AbsoluteUri);
    }

    #[test]
    fn well_known_uri_builder_prepends_code() {
        let record = RawRecord::well_known_uri(0x04, "a.b");
        assert_eq!(record.tnf(), Tnf::WellKnown);
        assert_eq!(record.record_type(), RTD_URI);
        assert_eq!(record.payload(), b"\x04a.b");
        assert_eq!(record.id(), None);
    }

    #[test]
    fn outgoing_message_is_tagged_by_type() {
        let msg = OutgoingMessage::DataReadError {
            error: "Empty/Non-NDEF".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"DATA_READ_ERROR","error":"Empty/Non-NDEF"}"#);
    }
}
