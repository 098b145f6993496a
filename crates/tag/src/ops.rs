//! Tag operations over a transport
//!
//! [`TagOps`] wraps any [`CardTransport`] and dispatches reads and writes to
//! the path the presented tag actually supports. This is the decision table
//! at the heart of the toolkit:
//!
//! - Type 2 tags (and anything unrecognized) take the page-addressed path:
//!   NDEF through the capability container when one is present, raw page
//!   writes otherwise.
//! - MIFARE Classic tags take the block-addressed, authenticated path —
//!   unless they answer Type 2 page reads, in which case they are treated
//!   as page-addressed after all (some readers report NDEF-formatted tags
//!   under a MIFARE product name).

use taplink_core::{Bytes, CardTransport};
use taplink_ndef::{Record, message, tlv};
use tracing::{debug, warn};

use crate::types::{TagContent, TagKind, WriteOutcome};
use crate::{Result, commands, mifare, type2};

/// Tag operations over a card transport
#[derive(Debug)]
pub struct TagOps<T: CardTransport> {
    /// The transport used for communication
    transport: T,
}

impl<T: CardTransport> TagOps<T> {
    /// Create new tag operations over the given transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Take ownership of the transport and return it
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Fetch the UID of the presented tag
    pub fn uid(&mut self) -> Result<Bytes> {
        let response = self.transport.send(&commands::get_uid())?;
        Ok(response.into_payload()?)
    }

    /// Write a URI onto the presented tag, dispatching on its kind
    pub fn write_uri(&mut self, kind: TagKind, uri: &str) -> Result<WriteOutcome> {
        if kind.is_mifare_classic() {
            // A MIFARE name with a working capability container means the
            // tag is page-addressed underneath; fall through to Type 2
            match type2::read_capability_container(&mut self.transport) {
                Ok(Some(cc)) => {
                    debug!(%kind, "Tag answers page reads, using Type 2 path");
                    return self.write_type2(uri, Some(cc));
                }
                Ok(None) | Err(_) => {
                    let blocks = mifare::write_url(&mut self.transport, uri)?;
                    return Ok(WriteOutcome::MifareBlocks { blocks });
                }
            }
        }

        // Type 2 and unknown kinds both take the page-addressed path
        let cc = type2::read_capability_container(&mut self.transport).unwrap_or(None);
        self.write_type2(uri, cc)
    }

    /// Page-addressed write: NDEF when a capability container is present,
    /// raw pages otherwise (and as fallback when the NDEF write fails)
    fn write_type2(
        &mut self,
        uri: &str,
        cc: Option<type2::CapabilityContainer>,
    ) -> Result<WriteOutcome> {
        let encoded = message::encode_uri(uri)?;
        let wrapped = tlv::wrap(&encoded)?;

        if let Some(cc) = cc {
            match type2::write_ndef(&mut self.transport, &wrapped, &cc) {
                Ok(pages) => return Ok(WriteOutcome::Ndef { pages }),
                Err(e) => warn!(error = %e, "NDEF write failed, trying raw pages"),
            }
        }

        let (written, attempted) = type2::write_raw(&mut self.transport, &wrapped)?;
        Ok(WriteOutcome::RawPages { written, attempted })
    }

    /// Read the presented tag, dispatching on its kind
    pub fn read(&mut self, kind: TagKind) -> Result<TagContent> {
        let uid = self.uid()?;

        if kind.is_mifare_classic() {
            match type2::read_capability_container(&mut self.transport) {
                Ok(Some(cc)) => return self.read_type2(uid, kind, Some(cc)),
                Ok(None) | Err(_) => {
                    let uri = mifare::read_url(&mut self.transport)?;
                    return Ok(TagContent {
                        uid,
                        kind,
                        ndef: false,
                        uri,
                        text: None,
                    });
                }
            }
        }

        let cc = type2::read_capability_container(&mut self.transport).unwrap_or(None);
        self.read_type2(uid, kind, cc)
    }

    /// Page-addressed read: unwrap the TLV area and decode the message
    fn read_type2(
        &mut self,
        uid: Bytes,
        kind: TagKind,
        cc: Option<type2::CapabilityContainer>,
    ) -> Result<TagContent> {
        let area = type2::read_data_area(&mut self.transport, cc.as_ref())?;

        let records = match tlv::unwrap(&area).and_then(message::decode) {
            Ok(records) => records,
            Err(e) => {
                // Not an error at this level: a factory-blank tag simply has
                // nothing to report
                debug!(error = %e, "No NDEF message on tag");
                return Ok(TagContent {
                    uid,
                    kind,
                    ndef: false,
                    uri: None,
                    text: None,
                });
            }
        };

        let mut uri = None;
        let mut text = None;
        for record in records {
            match record {
                Record::Uri(r) if uri.is_none() => uri = Some(r.uri().to_owned()),
                Record::Text(r) if text.is_none() => text = Some(r.text().to_owned()),
                _ => {}
            }
        }

        Ok(TagContent {
            uid,
            kind,
            ndef: true,
            uri,
            text,
        })
    }

    /// Erase the data area of the presented tag
    pub fn erase(&mut self, kind: TagKind) -> Result<()> {
        if kind.is_mifare_classic() {
            match type2::read_capability_container(&mut self.transport) {
                Ok(Some(_)) => return type2::erase(&mut self.transport),
                Ok(None) | Err(_) => return mifare::erase(&mut self.transport),
            }
        }

        type2::erase(&mut self.transport)
    }
}
