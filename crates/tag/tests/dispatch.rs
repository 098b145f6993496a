//! Dispatch tests over a scripted transport
//!
//! Each test scripts the exact reader responses for one tag flavor and
//! checks that the expected write/read path runs, byte for byte.

use std::collections::VecDeque;

use taplink::{Error, TagKind, TagOps, Type2Subtype, WriteOutcome};
use taplink_core::{Bytes, CardTransport, Error as CoreError};

/// Transport that replays a fixed list of responses and records every
/// command it was sent
#[derive(Debug)]
struct ScriptedTransport {
    responses: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
}

impl ScriptedTransport {
    fn new<I: IntoIterator<Item = Vec<u8>>>(responses: I) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            sent: Vec::new(),
        }
    }

    fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }
}

impl CardTransport for ScriptedTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, CoreError> {
        self.sent.push(command.to_vec());
        self.responses
            .pop_front()
            .map(Bytes::from)
            .ok_or(CoreError::Other("script exhausted"))
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn reset(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

const URI: &str = "https://example.com";

fn ok(payload: &[u8]) -> Vec<u8> {
    let mut response = payload.to_vec();
    response.extend_from_slice(&[0x90, 0x00]);
    response
}

fn status(sw1: u8, sw2: u8) -> Vec<u8> {
    vec![sw1, sw2]
}

/// TLV-wrapped NDEF message for `URI`: 20 bytes, five pages
fn wrapped_uri_tlv() -> Vec<u8> {
    let mut tlv = vec![0x03, 0x10, 0xD1, 0x01, 0x0C, b'U', 0x04];
    tlv.extend_from_slice(b"example.com");
    tlv.push(0xFE);
    tlv.push(0x00);
    assert_eq!(tlv.len(), 20);
    tlv
}

#[test]
fn type2_with_capability_container_takes_ndef_path() {
    let mut responses = vec![ok(&[0xE1, 0x10, 0x06, 0x00])]; // CC, 48-byte area
    responses.extend(std::iter::repeat_n(ok(&[]), 5)); // five page writes

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let outcome = ops
        .write_uri(TagKind::Type2(Type2Subtype::Ultralight), URI)
        .unwrap();

    assert_eq!(outcome, WriteOutcome::Ndef { pages: 5 });

    let sent = ops.transport().sent();
    assert_eq!(sent.len(), 6);
    // CC read, then pages 4..=8 in order
    assert_eq!(&sent[0], &[0xFF, 0xB0, 0x00, 0x03, 0x04]);
    let tlv = wrapped_uri_tlv();
    for (i, chunk) in tlv.chunks(4).enumerate() {
        let mut expected = vec![0xFF, 0xD6, 0x00, 4 + i as u8, 0x04];
        expected.extend_from_slice(chunk);
        assert_eq!(&sent[1 + i], &expected);
    }
}

#[test]
fn type2_without_capability_container_falls_back_to_raw_pages() {
    let responses = vec![
        ok(&[0x00, 0x00, 0x00, 0x00]), // CC page readable but no magic
        ok(&[]),                       // page 4
        ok(&[]),                       // page 5
        status(0x63, 0x00),            // page 6 refused
        ok(&[]),                       // page 7
        ok(&[]),                       // page 8
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let outcome = ops
        .write_uri(TagKind::Type2(Type2Subtype::Ultralight), URI)
        .unwrap();

    // The refused page is skipped and the write still counts
    assert_eq!(
        outcome,
        WriteOutcome::RawPages {
            written: 4,
            attempted: 5
        }
    );
}

#[test]
fn raw_write_with_no_successful_pages_is_an_error() {
    let mut responses = vec![ok(&[0x00, 0x00, 0x00, 0x00])];
    responses.extend(std::iter::repeat_n(status(0x63, 0x00), 5));

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let result = ops.write_uri(TagKind::Unknown, URI);

    assert!(matches!(result, Err(Error::NoPagesWritten)));
}

#[test]
fn mifare_classic_takes_block_path() {
    let url = "https://example.com/u/jane"; // 26 bytes, two blocks
    let responses = vec![
        status(0x6A, 0x81), // CC read not supported
        ok(&[]),            // load key
        ok(&[]),            // auth block 4
        ok(&[]),            // write block 4
        ok(&[]),            // load key
        ok(&[]),            // auth block 5
        ok(&[]),            // write block 5
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let outcome = ops.write_uri(TagKind::MifareClassic1k, url).unwrap();

    assert_eq!(outcome, WriteOutcome::MifareBlocks { blocks: 2 });

    let sent = ops.transport().sent();
    assert_eq!(sent.len(), 7);
    assert_eq!(&sent[1][..5], &[0xFF, 0x82, 0x00, 0x00, 0x06]);
    assert_eq!(&sent[2], &[0xFF, 0x86, 0x00, 0x00, 0x05, 0x01, 0x00, 0x04, 0x60, 0x00]);

    // First block carries the first 16 URL bytes, zero-padded writes after
    let mut expected = vec![0xFF, 0xD6, 0x00, 0x04, 0x10];
    expected.extend_from_slice(&url.as_bytes()[..16]);
    assert_eq!(&sent[3], &expected);

    let mut expected = vec![0xFF, 0xD6, 0x00, 0x05, 0x10];
    expected.extend_from_slice(&url.as_bytes()[16..]);
    expected.resize(5 + 16, 0x00);
    assert_eq!(&sent[6], &expected);
}

#[test]
fn mifare_classic_with_capability_container_falls_through_to_type2() {
    let mut responses = vec![ok(&[0xE1, 0x10, 0x06, 0x00])];
    responses.extend(std::iter::repeat_n(ok(&[]), 5));

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let outcome = ops.write_uri(TagKind::MifareClassic1k, URI).unwrap();

    // MIFARE product name, but the tag answered the page read: Type 2 path
    assert_eq!(outcome, WriteOutcome::Ndef { pages: 5 });
    assert_eq!(&ops.transport().sent()[1][..4], &[0xFF, 0xD6, 0x00, 0x04]);
}

#[test]
fn mifare_authentication_failure_names_the_block() {
    let responses = vec![
        status(0x6A, 0x81), // CC read not supported
        ok(&[]),            // load key
        status(0x63, 0x00), // auth refused
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let result = ops.write_uri(TagKind::MifareClassic1k, URI);

    assert!(matches!(result, Err(Error::AuthenticationFailed(4))));
}

#[test]
fn read_type2_returns_decoded_uri() {
    let tlv = wrapped_uri_tlv();
    let mut area = tlv.clone();
    area.resize(48, 0x00);

    let responses = vec![
        ok(&[0x04, 0xA1, 0xB2, 0xC3]),  // UID
        ok(&[0xE1, 0x10, 0x06, 0x00]),  // CC
        ok(&area[0..16]),               // pages 4..8
        ok(&area[16..32]),              // pages 8..12
        ok(&area[32..48]),              // pages 12..16
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let content = ops.read(TagKind::Type2(Type2Subtype::Ultralight)).unwrap();

    assert!(content.ndef);
    assert_eq!(content.uri.as_deref(), Some(URI));
    assert_eq!(content.text, None);
    assert_eq!(hex::encode(&content.uid), "04a1b2c3");
}

#[test]
fn read_blank_type2_reports_no_ndef() {
    let responses = vec![
        ok(&[0x04, 0xA1, 0xB2, 0xC3]),
        ok(&[0xE1, 0x10, 0x06, 0x00]),
        ok(&[0x00; 16]),
        ok(&[0x00; 16]),
        ok(&[0x00; 16]),
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let content = ops.read(TagKind::Type2(Type2Subtype::Ultralight)).unwrap();

    assert!(!content.ndef);
    assert_eq!(content.uri, None);
}

#[test]
fn read_mifare_returns_raw_url() {
    // 26 URL bytes split 16/10 across the first two data blocks
    let url = b"https://example.com/u/jane";
    let mut block4 = [0u8; 16];
    block4.copy_from_slice(&url[..16]);
    let mut block5 = [0u8; 16];
    block5[..10].copy_from_slice(&url[16..]);

    let responses = vec![
        ok(&[0x0A, 0x1B, 0x2C, 0x3D]), // UID
        status(0x6A, 0x81),            // CC read not supported
        ok(&[]),                       // load key
        ok(&[]),                       // auth block 4
        ok(&block4),                   // read block 4
        ok(&[]),                       // load key
        ok(&[]),                       // auth block 5
        ok(&block5),                   // read block 5
        ok(&[]),                       // load key
        ok(&[]),                       // auth block 6
        ok(&[0x00; 16]),               // read block 6
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let content = ops.read(TagKind::MifareClassic1k).unwrap();

    assert!(!content.ndef);
    assert_eq!(content.uri.as_deref(), Some("https://example.com/u/jane"));
}

#[test]
fn read_mifare_without_url_reports_none() {
    let responses = vec![
        ok(&[0x0A, 0x1B, 0x2C, 0x3D]),
        status(0x6A, 0x81),
        ok(&[]),
        ok(&[]),
        ok(&[0x00; 16]),
        ok(&[]),
        ok(&[]),
        ok(&[0x00; 16]),
        ok(&[]),
        ok(&[]),
        ok(&[0x00; 16]),
    ];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    let content = ops.read(TagKind::MifareClassic1k).unwrap();

    assert!(!content.ndef);
    assert_eq!(content.uri, None);
}

#[test]
fn erase_type2_writes_empty_message_tlv() {
    let responses = vec![ok(&[])];

    let mut ops = TagOps::new(ScriptedTransport::new(responses));
    ops.erase(TagKind::Type2(Type2Subtype::Ultralight)).unwrap();

    // One page: empty NDEF message TLV plus terminator
    assert_eq!(
        ops.transport().sent(),
        &[vec![0xFF, 0xD6, 0x00, 0x04, 0x04, 0x03, 0x00, 0xFE, 0x00]]
    );
}
