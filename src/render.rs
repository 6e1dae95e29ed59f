// src/render.rs
use log::{error, info};

use crate::classifier::Classifier;
use crate::config::{Config, InputMode, OutputFormat};
use crate::error::NdefError;
use crate::ndef;
use crate::record::RecordContract;
use crate::types::{OutgoingMessage, RawRecord, RecordView, Tnf};

/// Decodes one tag dump and renders its records, one line per record in text mode.
pub fn render(classifier: &Classifier, config: &Config, bytes: &[u8]) -> String {
    let records = match read_records(config.input, bytes) {
        Ok(records) => records,
        Err(e) => {
            info!("No NDEF message ({}), dumping raw data", e);
            vec![dump_record(bytes)]
        }
    };

    let parsed = classifier.classify(&records);
    info!("Classified {} record(s)", parsed.len());

    match config.output {
        OutputFormat::Text => parsed
            .iter()
            .map(|record| record.str())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => to_json(&OutgoingMessage::DataReadSuccess {
            records: parsed
                .iter()
                .map(|record| RecordView {
                    kind: record.kind(),
                    text: record.str(),
                })
                .collect(),
        }),
    }
}

pub fn read_records(mode: InputMode, bytes: &[u8]) -> Result<Vec<RawRecord>, NdefError> {
    match mode {
        InputMode::Auto => ndef::parse_tag_data(bytes),
        InputMode::Message => ndef::parse_message(bytes),
        InputMode::Tlv => ndef::parse_message(ndef::find_ndef_tlv(bytes)?),
    }
}

// Tags without an NDEF message still show something: a dump of what was read
pub fn dump_record(bytes: &[u8]) -> RawRecord {
    let payload = format!("Raw data ({} bytes, hex): {}", bytes.len(), hex::encode(bytes));
    RawRecord::new(Tnf::Unknown, b"", None, payload)
}

pub fn to_json(msg: &OutgoingMessage) -> String {
    serde_json::to_string(msg).unwrap_or_else(|e| {
        error!("Failed to serialize output: {}", e);
        String::from(r#"{"type":"DATA_READ_ERROR","error":"serialization failed"}"#)
    })
}
