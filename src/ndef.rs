// src/ndef.rs
use log::debug;

use crate::error::NdefError;
use crate::types::{RawRecord, Tnf};

// Header flags: Bit 7: MB, Bit 6: ME, Bit 5: CF, Bit 4: SR, Bit 3: IL, Bits 2-0: TNF
const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;

// Tag memory TLV blocks
const TLV_NULL: u8 = 0x00;
const TLV_LOCK_CONTROL: u8 = 0x01;
const TLV_MEMORY_CONTROL: u8 = 0x02;
const TLV_NDEF_MESSAGE: u8 = 0x03;
const TLV_PROPRIETARY: u8 = 0xFD;
const TLV_TERMINATOR: u8 = 0xFE;

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], NdefError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(NdefError::Truncated {
                offset: self.pos,
                need: len,
                len: self.data.len(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8, NdefError> {
        Ok(self.take(1)?[0])
    }

    fn u16_be(&mut self) -> Result<u16, NdefError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32_be(&mut self) -> Result<u32, NdefError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

struct WireRecord<'a> {
    header: u8,
    record_type: &'a [u8],
    id: Option<&'a [u8]>,
    payload: &'a [u8],
}

impl WireRecord<'_> {
    fn flag(&self, mask: u8) -> bool {
        self.header & mask != 0
    }

    fn tnf(&self) -> Tnf {
        Tnf::from_bits(self.header)
    }
}

fn read_record<'a>(cursor: &mut Cursor<'a>) -> Result<WireRecord<'a>, NdefError> {
    let header = cursor.u8()?;
    // 1. Type Length
    let type_len = cursor.u8()? as usize;
    // 2. Payload Length (1 byte for Short Record, 4 bytes otherwise)
    let payload_len = if header & FLAG_SR != 0 {
        cursor.u8()? as usize
    } else {
        cursor.u32_be()? as usize
    };
    // 3. ID Length (if present)
    let id_len = if header & FLAG_IL != 0 {
        Some(cursor.u8()? as usize)
    } else {
        None
    };
    let record_type = cursor.take(type_len)?;
    let id = id_len.map(|len| cursor.take(len)).transpose()?;
    let payload = cursor.take(payload_len)?;

    Ok(WireRecord {
        header,
        record_type,
        id,
        payload,
    })
}

/// Decodes an NDEF message into its records, reassembling chunked payloads.
pub fn parse_message(data: &[u8]) -> Result<Vec<RawRecord>, NdefError> {
    if data.is_empty() {
        return Err(NdefError::Empty);
    }

    let mut cursor = Cursor::new(data);
    let mut records = Vec::new();
    // First chunk of a record still being reassembled, with payload accumulated so far
    let mut chunk: Option<(Tnf, Vec<u8>, Option<Vec<u8>>, Vec<u8>)> = None;
    let mut index = 0;

    loop {
        if cursor.is_empty() {
            return Err(NdefError::MissingMessageEnd);
        }
        let wire = read_record(&mut cursor)?;
        if index == 0 && !wire.flag(FLAG_MB) {
            return Err(NdefError::MissingMessageBegin);
        }

        match chunk.take() {
            Some((tnf, record_type, id, mut payload)) => {
                if wire.tnf() != Tnf::Unchanged || !wire.record_type.is_empty() {
                    return Err(NdefError::UnterminatedChunk(index));
                }
                // Only the first chunk may carry an id
                if wire.flag(FLAG_IL) {
                    return Err(NdefError::ChunkWithId(index));
                }
                payload.extend_from_slice(wire.payload);
                if wire.flag(FLAG_CF) {
                    chunk = Some((tnf, record_type, id, payload));
                } else {
                    records.push(RawRecord::new(tnf, record_type, id, payload));
                }
            }
            None => {
                if wire.tnf() == Tnf::Unchanged {
                    return Err(NdefError::UnexpectedChunk(index));
                }
                let id = wire.id.map(<[u8]>::to_vec);
                if wire.flag(FLAG_CF) {
                    chunk = Some((
                        wire.tnf(),
                        wire.record_type.to_vec(),
                        id,
                        wire.payload.to_vec(),
                    ));
                } else {
                    records.push(RawRecord::new(wire.tnf(), wire.record_type, id, wire.payload));
                }
            }
        }

        index += 1;
        if wire.flag(FLAG_ME) {
            if chunk.is_some() {
                return Err(NdefError::UnterminatedChunk(index));
            }
            break;
        }
    }

    debug!("Parsed {} NDEF record(s) from {} bytes", records.len(), cursor.pos);
    Ok(records)
}

/// Returns the value of the first NDEF Message TLV in a tag memory area.
pub fn find_ndef_tlv(buffer: &[u8]) -> Result<&[u8], NdefError> {
    let mut cursor = Cursor::new(buffer);

    while !cursor.is_empty() {
        let tag = cursor.u8()?;
        match tag {
            TLV_NULL => continue,
            TLV_TERMINATOR => break,
            _ => {}
        }

        // L: 1 byte, or 0xFF followed by a 2-byte length
        let len = match cursor.u8()? {
            0xFF => cursor.u16_be()? as usize,
            len => len as usize,
        };
        let value = cursor.take(len)?;
        if tag == TLV_NDEF_MESSAGE {
            return Ok(value);
        }
        debug!("Skipping TLV {:#04x} ({} bytes)", tag, len);
    }

    Err(NdefError::NoNdefTlv)
}

fn is_tlv_tag(byte: u8) -> bool {
    matches!(
        byte,
        TLV_NULL
            | TLV_LOCK_CONTROL
            | TLV_MEMORY_CONTROL
            | TLV_NDEF_MESSAGE
            | TLV_PROPRIETARY
            | TLV_TERMINATOR
    )
}

/// Accepts either a bare NDEF message or a tag memory area wrapping one in a TLV.
///
/// Data opening with an MB header that is not a TLV tag is read as a bare
/// message first; if that fails the TLV area is tried before giving up.
pub fn parse_tag_data(data: &[u8]) -> Result<Vec<RawRecord>, NdefError> {
    match data.first() {
        None => Err(NdefError::Empty),
        Some(&first) if first & FLAG_MB != 0 && !is_tlv_tag(first) => {
            parse_message(data).or_else(|err| {
                debug!("Not a bare NDEF message ({}), trying TLV area", err);
                find_ndef_tlv(data)
                    .map_err(|_| err)
                    .and_then(parse_message)
            })
        }
        Some(_) => parse_message(find_ndef_tlv(data)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RTD_URI;

    // D1 01 0C 55 01 "example.com"
    fn uri_message() -> Vec<u8> {
        let mut msg = vec![0xD1, 0x01, 0x0C, 0x55, 0x01];
        msg.extend_from_slice(b"example.com");
        msg
    }

    #[test]
    fn parses_single_short_record() {
        let records = parse_message(&uri_message()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tnf(), Tnf::WellKnown);
        assert_eq!(records[0].record_type(), RTD_URI);
        assert_eq!(records[0].payload(), b"\x01example.com");
        assert_eq!(records[0].id(), None);
    }

    #[test]
    fn parses_long_record_and_id() {
        // MB|ME|IL, TNF=5, type len 0, 4-byte payload len 3, id len 2
        let data = [0xCD, 0x00, 0x00, 0x00, 0x00, 0x03, 0x02, b'i', b'd', b'a', b'b', b'c'];
        let records = parse_message(&data).unwrap();
        assert_eq!(records[0].tnf(), Tnf::Unknown);
        assert_eq!(records[0].id(), Some(&b"id"[..]));
        assert_eq!(records[0].payload(), b"abc");
    }

    #[test]
    fn parses_multiple_records_in_order() {
        let data = [
            0x91, 0x01, 0x02, b'U', 0x03, b'a', // MB|SR, URI
            0x15, 0x00, 0x01, b'x', // SR, Unknown
            0x53, 0x00, 0x03, b'u', b':', b'v', // ME|SR, Absolute URI
        ];
        let records = parse_message(&data).unwrap();
        let tnfs: Vec<_> = records.iter().map(RawRecord::tnf).collect();
        assert_eq!(tnfs, vec![Tnf::WellKnown, Tnf::Unknown, Tnf::AbsoluteUri]);
        assert_eq!(records[2].payload(), b"u:v");
    }

    #[test]
    fn reassembles_chunks() {
        let data = [
            0xB1, 0x01, 0x02, b'U', 0x04, b'a', // MB|CF|SR, URI first chunk
            0x36, 0x00, 0x02, b'.', b'b', // CF|SR, Unchanged
            0x56, 0x00, 0x01, b'c', // ME|SR, Unchanged
        ];
        let records = parse_message(&data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tnf(), Tnf::WellKnown);
        assert_eq!(records[0].payload(), b"\x04a.bc");
    }

    #[test]
    fn rejects_malformed_messages() {
        assert_eq!(parse_message(&[]), Err(NdefError::Empty));
        assert_eq!(
            parse_message(&[0xD1, 0x01, 0x05, b'U', 0x01]),
            Err(NdefError::Truncated { offset: 4, need: 5, len: 5 })
        );
        assert_eq!(parse_message(&[0x51, 0x00, 0x00]), Err(NdefError::MissingMessageBegin));
        assert_eq!(parse_message(&[0x95, 0x00, 0x00]), Err(NdefError::MissingMessageEnd));
        assert_eq!(
            parse_message(&[0x95, 0x00, 0x00, 0x56, 0x00, 0x00]),
            Err(NdefError::UnexpectedChunk(1))
        );
        assert_eq!(
            parse_message(&[0xF5, 0x00, 0x00]),
            Err(NdefError::UnterminatedChunk(1))
        );
    }

    #[test]
    fn huge_declared_length_does_not_panic() {
        let data = [0xC5, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(parse_message(&data), Err(NdefError::Truncated { .. })));
    }

    #[test]
    fn finds_ndef_tlv_after_null_and_other_blocks() {
        let mut area = vec![0x00, 0x00, 0x01, 0x03, 0xA0, 0x10, 0x44, 0x03];
        let msg = uri_message();
        area.push(msg.len() as u8);
        area.extend_from_slice(&msg);
        area.push(0xFE);
        assert_eq!(find_ndef_tlv(&area).unwrap(), &msg[..]);
    }

    #[test]
    fn finds_ndef_tlv_with_three_byte_length() {
        let mut area = vec![0x03, 0xFF, 0x00, 0x03, 0xD5, 0x00, 0x00, 0xFE];
        assert_eq!(find_ndef_tlv(&area).unwrap(), &[0xD5, 0x00, 0x00]);
        area[3] = 0x10;
        assert!(matches!(find_ndef_tlv(&area), Err(NdefError::Truncated { .. })));
    }

    #[test]
    fn terminator_stops_tlv_search() {
        assert_eq!(find_ndef_tlv(&[0xFE, 0x03, 0x00]), Err(NdefError::NoNdefTlv));
        assert_eq!(find_ndef_tlv(&[0x00, 0x00]), Err(NdefError::NoNdefTlv));
    }

    #[test]
    fn tag_data_accepts_bare_message_or_tlv() {
        let msg = uri_message();
        let mut tlv = vec![0x03, msg.len() as u8];
        tlv.extend_from_slice(&msg);
        tlv.push(0xFE);

        assert_eq!(parse_tag_data(&msg).unwrap(), parse_tag_data(&tlv).unwrap());
        assert_eq!(parse_tag_data(&[]), Err(NdefError::Empty));
        assert_eq!(parse_tag_data(&[0xFE]), Err(NdefError::NoNdefTlv));
    }

    #[test]
    fn tag_data_starting_with_proprietary_tlv_is_a_tlv_area() {
        let area = [
            0xFD, 0x02, 0xAA, 0xBB, // proprietary
            0x03, 0x05, 0xD1, 0x01, 0x01, b'U', 0x03, // NDEF
            0xFE,
        ];
        let records = parse_tag_data(&area).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type(), RTD_URI);
        assert_eq!(records[0].payload(), b"\x03");
    }

    #[test]
    fn broken_bare_message_reports_message_error() {
        // MB|ME|SR header, payload runs past the end, no TLV to fall back to
        assert_eq!(
            parse_tag_data(&[0xD1, 0x01, 0x05, b'U', 0x01]),
            Err(NdefError::Truncated { offset: 4, need: 5, len: 5 })
        );
    }

    #[test]
    fn continuation_chunk_must_not_carry_id() {
        let data = [
            0xB1, 0x01, 0x01, b'U', 0x04, // MB|CF|SR, URI first chunk
            0x5E, 0x00, 0x01, 0x01, b'i', b'a', // ME|SR|IL, Unchanged with id
        ];
        assert_eq!(parse_message(&data), Err(NdefError::ChunkWithId(1)));
    }
}
