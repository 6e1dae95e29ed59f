use std::io::{self, BufRead, Write};

use log::{error, info, warn};
use ndef_record_reader::Classifier;
use ndef_record_reader::config::{Config, OutputFormat};
use ndef_record_reader::render::{render, to_json};
use ndef_record_reader::types::OutgoingMessage;

fn main() {
    env_logger::init();
    let config = Config::from_env();
    info!("Starting NDEF record reader ({:?})", config);

    let classifier = Classifier::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // One hex-encoded tag dump per line
    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let rendered = match hex::decode(line.replace(' ', "")) {
            Ok(bytes) => render(&classifier, &config, &bytes),
            Err(e) => {
                warn!("Line {}: not hex: {}", line_no + 1, e);
                match config.output {
                    OutputFormat::Text => continue,
                    OutputFormat::Json => to_json(&OutgoingMessage::DataReadError {
                        error: format!("Invalid hex input: {}", e),
                    }),
                }
            }
        };

        if let Err(e) = writeln!(out, "{}", rendered) {
            error!("Failed to write output: {}", e);
            break;
        }
    }
}
