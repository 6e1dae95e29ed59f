// src/config.rs
use std::env;

use log::warn;

pub const ENV_OUTPUT: &str = "NDEF_OUTPUT";
pub const ENV_INPUT: &str = "NDEF_INPUT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Bare message if the first byte has MB set, TLV area otherwise
    #[default]
    Auto,
    Message,
    Tlv,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub output: OutputFormat,
    pub input: InputMode,
}

impl Config {
    pub fn from_env() -> Self {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output = match lookup(ENV_OUTPUT).as_deref().map(str::trim) {
            None | Some("") => OutputFormat::default(),
            Some(v) if v.eq_ignore_ascii_case("text") => OutputFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("json") => OutputFormat::Json,
            Some(other) => {
                warn!("Ignoring {}={:?}, using text output", ENV_OUTPUT, other);
                OutputFormat::default()
            }
        };

        let input = match lookup(ENV_INPUT).as_deref().map(str::trim) {
            None | Some("") => InputMode::default(),
            Some(v) if v.eq_ignore_ascii_case("auto") => InputMode::Auto,
            Some(v) if v.eq_ignore_ascii_case("message") => InputMode::Message,
            Some(v) if v.eq_ignore_ascii_case("tlv") => InputMode::Tlv,
            Some(other) => {
                warn!("Ignoring {}={:?}, detecting input format", ENV_INPUT, other);
                InputMode::default()
            }
        };

        Config { output, input }
    }
}
