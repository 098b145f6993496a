//! NDEF message encoding and decoding
//!
//! Messages are encoded in the short-record form (payload length in a single
//! byte), which covers everything that fits on the tags this toolkit writes.

use bytes::{BufMut, Bytes, BytesMut};

use crate::record::URI_PREFIXES;
use crate::{NdefError, Record, TextRecord, UriRecord};

// Record header flag bits
const FLAG_MB: u8 = 0x80; // Message Begin
const FLAG_ME: u8 = 0x40; // Message End
const FLAG_CF: u8 = 0x20; // Chunk Flag
const FLAG_SR: u8 = 0x10; // Short Record
const FLAG_IL: u8 = 0x08; // ID Length present

// Type Name Format values
const TNF_WELL_KNOWN: u8 = 0x01;

const TYPE_URI: &[u8] = b"U";
const TYPE_TEXT: &[u8] = b"T";

/// Encode records into an NDEF message
pub fn encode(records: &[Record]) -> Result<Bytes, NdefError> {
    if records.is_empty() {
        return Err(NdefError::EmptyMessage);
    }

    let mut buffer = BytesMut::new();
    let last = records.len() - 1;

    for (i, record) in records.iter().enumerate() {
        let (record_type, payload) = match record {
            Record::Uri(uri) => {
                let (code, rest) = uri.abbreviate();
                let mut payload = Vec::with_capacity(1 + rest.len());
                payload.push(code);
                payload.extend_from_slice(rest.as_bytes());
                (TYPE_URI, payload)
            }
            Record::Text(text) => {
                // Status byte: UTF-8 encoding, language code length in the
                // low six bits
                let lang = text.language().as_bytes();
                let mut payload = Vec::with_capacity(1 + lang.len() + text.text().len());
                payload.push((lang.len() & 0x3F) as u8);
                payload.extend_from_slice(lang);
                payload.extend_from_slice(text.text().as_bytes());
                (TYPE_TEXT, payload)
            }
        };

        if payload.len() > 255 {
            return Err(NdefError::PayloadTooLong(payload.len()));
        }

        let mut header = FLAG_SR | TNF_WELL_KNOWN;
        if i == 0 {
            header |= FLAG_MB;
        }
        if i == last {
            header |= FLAG_ME;
        }

        buffer.put_u8(header);
        buffer.put_u8(record_type.len() as u8);
        buffer.put_u8(payload.len() as u8);
        buffer.put_slice(record_type);
        buffer.put_slice(&payload);
    }

    Ok(buffer.freeze())
}

/// Encode a single URI into an NDEF message
pub fn encode_uri(uri: &str) -> Result<Bytes, NdefError> {
    encode(&[Record::Uri(UriRecord::new(uri))])
}

/// Decode an NDEF message into its records.
///
/// Records of unknown type are skipped; chunked records are rejected as
/// truncated input (no tag written by this toolkit produces them).
pub fn decode(data: &[u8]) -> Result<Vec<Record>, NdefError> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let header = data[offset];
        offset += 1;

        if header & FLAG_CF != 0 {
            return Err(NdefError::InvalidPayload("chunked records not supported"));
        }

        let type_len = *data
            .get(offset)
            .ok_or(NdefError::Truncated("record type length"))? as usize;
        offset += 1;

        let payload_len = if header & FLAG_SR != 0 {
            let len = *data
                .get(offset)
                .ok_or(NdefError::Truncated("record payload length"))? as usize;
            offset += 1;
            len
        } else {
            let bytes = data
                .get(offset..offset + 4)
                .ok_or(NdefError::Truncated("record payload length"))?;
            offset += 4;
            let mut len = [0u8; 4];
            len.copy_from_slice(bytes);
            u32::from_be_bytes(len) as usize
        };

        let id_len = if header & FLAG_IL != 0 {
            let len = *data
                .get(offset)
                .ok_or(NdefError::Truncated("record id length"))? as usize;
            offset += 1;
            len
        } else {
            0
        };

        let record_type = data
            .get(offset..offset + type_len)
            .ok_or(NdefError::Truncated("record type"))?;
        offset += type_len + id_len;

        let payload = data
            .get(offset..offset + payload_len)
            .ok_or(NdefError::Truncated("record payload"))?;
        offset += payload_len;

        let tnf = header & 0x07;
        if tnf == TNF_WELL_KNOWN {
            match record_type {
                TYPE_URI => records.push(Record::Uri(decode_uri_payload(payload)?)),
                TYPE_TEXT => records.push(Record::Text(decode_text_payload(payload)?)),
                _ => {} // Unknown well-known type, skip
            }
        }

        if header & FLAG_ME != 0 {
            break;
        }
    }

    if records.is_empty() {
        return Err(NdefError::EmptyMessage);
    }

    Ok(records)
}

fn decode_uri_payload(payload: &[u8]) -> Result<UriRecord, NdefError> {
    let (&code, rest) = payload
        .split_first()
        .ok_or(NdefError::InvalidPayload("empty URI payload"))?;

    if (code as usize) >= URI_PREFIXES.len() {
        return Err(NdefError::InvalidPayload("unknown URI identifier code"));
    }

    UriRecord::from_parts(code, std::str::from_utf8(rest)?)
}

fn decode_text_payload(payload: &[u8]) -> Result<TextRecord, NdefError> {
    let (&status, rest) = payload
        .split_first()
        .ok_or(NdefError::InvalidPayload("empty text payload"))?;

    if status & 0x80 != 0 {
        return Err(NdefError::InvalidPayload("UTF-16 text not supported"));
    }

    let lang_len = (status & 0x3F) as usize;
    if rest.len() < lang_len {
        return Err(NdefError::Truncated("text language code"));
    }

    let (lang, text) = rest.split_at(lang_len);
    Ok(TextRecord::new(
        std::str::from_utf8(lang)?,
        std::str::from_utf8(text)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_layout() {
        let encoded = encode_uri("https://example.com").unwrap();

        // Header: MB | ME | SR | well-known
        assert_eq!(encoded[0], 0xD1);
        // Type length 1, payload = code byte + "example.com"
        assert_eq!(encoded[1], 0x01);
        assert_eq!(encoded[2], 1 + "example.com".len() as u8);
        assert_eq!(encoded[3], b'U');
        assert_eq!(encoded[4], 0x04);
        assert_eq!(&encoded[5..], b"example.com");
    }

    #[test]
    fn test_uri_roundtrip() {
        for uri in [
            "https://example.com/card/jane",
            "http://www.example.com",
            "tel:+4915112345678",
            "geo:52.52,13.40",
        ] {
            let encoded = encode_uri(uri).unwrap();
            let records = decode(&encoded).unwrap();
            assert_eq!(records, vec![Record::Uri(UriRecord::new(uri))]);
        }
    }

    #[test]
    fn test_multi_record_roundtrip() {
        let records = vec![
            Record::Uri(UriRecord::new("https://example.com/u/jane")),
            Record::Text(TextRecord::new("en", "Jane Doe")),
        ];

        let encoded = encode(&records).unwrap();

        // MB set only on the first record, ME only on the last
        assert_eq!(encoded[0] & (FLAG_MB | FLAG_ME), FLAG_MB);

        assert_eq!(decode(&encoded).unwrap(), records);
    }

    #[test]
    fn test_decode_skips_unknown_types() {
        // A well-known "X" record followed by a URI record
        let mut data = vec![0x91, 0x01, 0x01, b'X', 0xAA];
        data.extend_from_slice(&encode_uri("https://example.com").unwrap()[..]);
        // Patch the second record's MB flag off to keep the message shape
        data[5] &= !FLAG_MB;

        let records = decode(&data).unwrap();
        assert_eq!(
            records,
            vec![Record::Uri(UriRecord::new("https://example.com"))]
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(&[]), Err(NdefError::EmptyMessage));
        assert_eq!(decode(&[0xD1]), Err(NdefError::Truncated("record type length")));
        assert_eq!(
            decode(&[0xD1, 0x01, 0x05, b'U', 0x04]),
            Err(NdefError::Truncated("record payload"))
        );

        let too_long = "x".repeat(300);
        assert_eq!(
            encode_uri(&format!("https://example.com/{too_long}")),
            Err(NdefError::PayloadTooLong(1 + "example.com/".len() + 300))
        );
    }

    #[test]
    fn test_empty_message_rejected() {
        assert_eq!(encode(&[]), Err(NdefError::EmptyMessage));
    }
}
