//! Page-addressed Type 2 tag operations
//!
//! Type 2 tags are written four bytes at a time. The data area starts at
//! page 4; pages 0-3 hold the UID, lock bits and the capability container
//! and are never written here.

use taplink_core::CardTransport;
use tracing::{debug, warn};

use crate::commands;
use crate::constants::{
    TYPE2_CC_MAGIC, TYPE2_CC_PAGE, TYPE2_DATA_PAGE, TYPE2_FALLBACK_DATA_SIZE,
};
use crate::{Error, Result};

/// Parsed capability container of an NDEF-formatted Type 2 tag
#[derive(Debug, Clone, Copy)]
pub(crate) struct CapabilityContainer {
    /// Mapping version byte
    #[allow(dead_code)]
    pub version: u8,
    /// Size of the data area in bytes
    pub data_area_size: usize,
}

/// Read the capability container page.
///
/// `Ok(None)` means the page was readable but carries no NDEF magic (a
/// factory-blank or non-NDEF tag); errors mean the tag did not answer the
/// page read at all.
pub(crate) fn read_capability_container<T: CardTransport>(
    transport: &mut T,
) -> Result<Option<CapabilityContainer>> {
    let response = transport.send(&commands::read_binary(TYPE2_CC_PAGE, 4))?;
    let cc = response.into_payload()?;

    if cc.len() < 4 || cc[0] != TYPE2_CC_MAGIC {
        return Ok(None);
    }

    Ok(Some(CapabilityContainer {
        version: cc[1],
        data_area_size: cc[2] as usize * 8,
    }))
}

/// Write one 4-byte page
fn write_page<T: CardTransport>(transport: &mut T, page: u8, chunk: &[u8]) -> Result<()> {
    let mut data = [0u8; 4];
    data[..chunk.len()].copy_from_slice(chunk);

    transport
        .send(&commands::update_binary(page, data.to_vec()))?
        .into_payload()?;
    Ok(())
}

/// Write a TLV-wrapped message through the NDEF path.
///
/// All pages must be written; a failed page aborts the write.
pub(crate) fn write_ndef<T: CardTransport>(
    transport: &mut T,
    tlv: &[u8],
    cc: &CapabilityContainer,
) -> Result<usize> {
    if tlv.len() > cc.data_area_size {
        return Err(Error::MessageTooLarge {
            size: tlv.len(),
            capacity: cc.data_area_size,
        });
    }

    debug!(bytes = tlv.len(), pages = tlv.len() / 4, "Using NDEF write");

    let mut page = TYPE2_DATA_PAGE;
    for chunk in tlv.chunks(4) {
        write_page(transport, page, chunk)?;
        page += 1;
    }

    Ok(tlv.len().div_ceil(4))
}

/// Write a TLV-wrapped message page by page, skipping pages that fail.
///
/// Mirrors the behavior on tags without a readable capability container:
/// a page that refuses the write is logged and skipped, and the write counts
/// as successful when at least one page went through.
pub(crate) fn write_raw<T: CardTransport>(transport: &mut T, tlv: &[u8]) -> Result<(usize, usize)> {
    debug!(bytes = tlv.len(), pages = tlv.len() / 4, "Using raw page write");

    let mut page = TYPE2_DATA_PAGE;
    let mut written = 0;
    let mut attempted = 0;

    for chunk in tlv.chunks(4) {
        attempted += 1;
        match write_page(transport, page, chunk) {
            Ok(()) => written += 1,
            Err(e) => warn!(page, error = %e, "Page write failed, continuing"),
        }
        page += 1;
    }

    if written == 0 {
        return Err(Error::NoPagesWritten);
    }

    Ok((written, attempted))
}

/// Read the data area, sized from the capability container when available
pub(crate) fn read_data_area<T: CardTransport>(
    transport: &mut T,
    cc: Option<&CapabilityContainer>,
) -> Result<Vec<u8>> {
    let size = cc.map_or(TYPE2_FALLBACK_DATA_SIZE, |cc| cc.data_area_size);

    let mut data = Vec::with_capacity(size);
    let mut page = TYPE2_DATA_PAGE;

    while data.len() < size {
        // Readers return 16 bytes (four pages) per READ BINARY on Type 2
        match transport
            .send(&commands::read_binary(page, 16))
            .and_then(|r| r.into_payload())
        {
            Ok(payload) if !payload.is_empty() => {
                data.extend_from_slice(&payload);
                page += 4;
            }
            // Stop at the first page that does not answer; whatever was
            // collected may still hold a complete TLV
            _ => break,
        }
    }

    data.truncate(size);
    Ok(data)
}

/// Overwrite the start of the data area with an empty NDEF message TLV
pub(crate) fn erase<T: CardTransport>(transport: &mut T) -> Result<()> {
    let empty = taplink_ndef::tlv::wrap(&[])?;
    let mut page = TYPE2_DATA_PAGE;
    for chunk in empty.chunks(4) {
        write_page(transport, page, chunk)?;
        page += 1;
    }
    Ok(())
}
