//! Block-addressed MIFARE Classic operations
//!
//! Every data block access is preceded by key A authentication with the
//! factory transport key. The URL is stored as raw zero-padded UTF-8 across
//! blocks 4-6 (the first data sector after the manufacturer sector); sector
//! trailers are never touched.

use taplink_core::CardTransport;
use tracing::{debug, warn};

use crate::commands::{self, KeyType};
use crate::constants::{MIFARE_BLOCK_SIZE, MIFARE_DEFAULT_KEY, MIFARE_URL_BLOCKS};
use crate::{Error, Result};

/// Load the factory key and authenticate a block with key A
pub(crate) fn authenticate<T: CardTransport>(transport: &mut T, block: u8) -> Result<()> {
    transport
        .send(&commands::load_key(&MIFARE_DEFAULT_KEY))?
        .into_payload()?;

    let response = transport.send(&commands::authenticate(block, KeyType::A))?;
    if !response.is_success() {
        return Err(Error::AuthenticationFailed(block));
    }

    Ok(())
}

/// Write a URL as raw UTF-8 across the data blocks.
///
/// At most three blocks (48 bytes) are written; a longer URL is truncated
/// the way the tag would be read back anyway.
pub(crate) fn write_url<T: CardTransport>(transport: &mut T, url: &str) -> Result<usize> {
    let bytes = url.as_bytes();
    debug!(bytes = bytes.len(), "Using MIFARE Classic block write");

    if bytes.len() > MIFARE_URL_BLOCKS.len() * MIFARE_BLOCK_SIZE {
        warn!(
            len = bytes.len(),
            max = MIFARE_URL_BLOCKS.len() * MIFARE_BLOCK_SIZE,
            "URL exceeds MIFARE data blocks, truncating"
        );
    }

    let mut blocks_written = 0;

    for (chunk, &block) in bytes.chunks(MIFARE_BLOCK_SIZE).zip(MIFARE_URL_BLOCKS.iter()) {
        let mut data = [0u8; MIFARE_BLOCK_SIZE];
        data[..chunk.len()].copy_from_slice(chunk);

        authenticate(transport, block)?;
        transport
            .send(&commands::update_binary(block, data.to_vec()))?
            .into_payload()?;

        blocks_written += 1;
    }

    Ok(blocks_written)
}

/// Read the data blocks back into a URL.
///
/// Blocks are read until authentication fails; the accumulated bytes count
/// as a URL only when they start with `http`.
pub(crate) fn read_url<T: CardTransport>(transport: &mut T) -> Result<Option<String>> {
    let mut bytes = Vec::with_capacity(MIFARE_URL_BLOCKS.len() * MIFARE_BLOCK_SIZE);

    for &block in &MIFARE_URL_BLOCKS {
        if authenticate(transport, block).is_err() {
            break;
        }

        match transport
            .send(&commands::read_binary(block, MIFARE_BLOCK_SIZE as u8))
            .and_then(|r| r.into_payload())
        {
            Ok(payload) => bytes.extend_from_slice(&payload),
            Err(_) => break,
        }
    }

    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let url = String::from_utf8_lossy(&bytes[..end]).into_owned();

    if url.starts_with("http") {
        Ok(Some(url))
    } else {
        Ok(None)
    }
}

/// Zero the data blocks
pub(crate) fn erase<T: CardTransport>(transport: &mut T) -> Result<()> {
    for &block in &MIFARE_URL_BLOCKS {
        authenticate(transport, block)?;
        transport
            .send(&commands::update_binary(block, vec![0u8; MIFARE_BLOCK_SIZE]))?
            .into_payload()?;
    }
    Ok(())
}
