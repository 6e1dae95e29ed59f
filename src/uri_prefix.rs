// src/uri_prefix.rs
//
// NFC Forum "URI Record Type Definition", URI Identifier Codes.
use std::collections::HashMap;

use lazy_static::lazy_static;

/// Prefix strings indexed by identifier code (0x00..=0x23).
pub const URI_PREFIXES: [&str; 36] = [
    "",                           // 0x00 No prefix
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

lazy_static! {
    static ref CODE_BY_PREFIX: HashMap<&'static str, u8> = URI_PREFIXES
        .iter()
        .enumerate()
        .map(|(code, prefix)| (*prefix, code as u8))
        .collect();
}

/// Prefix for an identifier code, or `None` outside 0x00..=0x23.
pub fn prefix_for(code: u8) -> Option<&'static str> {
    URI_PREFIXES.get(code as usize).copied()
}

/// Identifier code for an exact prefix string.
pub fn code_for(prefix: &str) -> Option<u8> {
    CODE_BY_PREFIX.get(prefix).copied()
}
