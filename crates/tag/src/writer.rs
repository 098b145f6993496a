//! High-level writer: wait for a tag, then dispatch
//!
//! [`TagWriter`] owns reader discovery and the wait-for-tag loop, opening a
//! transport for whichever reader a tag lands on and handing it to
//! [`TagOps`](crate::TagOps) for the actual work.

use std::time::{Duration, Instant};

use taplink_transport_pcsc::{
    CardEvent, PcscConfig, PcscDeviceManager, PcscError, PcscReader, PcscTransport,
};
use tracing::{debug, info};

use crate::detect;
use crate::ops::TagOps;
use crate::types::{TagContent, TagInfo, WriteOutcome};
use crate::{Error, Result};

/// High-level tag writer bound to a PC/SC device manager
#[allow(missing_debug_implementations)]
pub struct TagWriter {
    /// PC/SC device manager
    manager: PcscDeviceManager,
    /// Transport configuration used for opened readers
    config: PcscConfig,
    /// Restrict waiting to this reader, when set
    reader: Option<String>,
}

impl TagWriter {
    /// Create a new tag writer
    pub fn new() -> Result<Self> {
        Ok(Self {
            manager: PcscDeviceManager::new()?,
            config: PcscConfig::default(),
            reader: None,
        })
    }

    /// Restrict operations to a specific reader
    pub fn with_reader(mut self, reader: impl Into<String>) -> Self {
        self.reader = Some(reader.into());
        self
    }

    /// Use a custom transport configuration
    pub fn with_config(mut self, config: PcscConfig) -> Self {
        self.config = config;
        self
    }

    /// List the available readers with their card status
    pub fn readers(&self) -> Result<Vec<PcscReader>> {
        Ok(self.manager.list_readers()?)
    }

    /// Wait for a tag and report what was presented
    pub fn wait_for_tag(&self, timeout: Duration) -> Result<TagInfo> {
        let (reader, atr) = self.wait_for_card_event(timeout)?;
        let mut ops = self.open_ops(&reader)?;
        let uid = ops.uid()?;

        Ok(TagInfo {
            reader,
            uid,
            kind: detect::detect(&atr),
            atr,
        })
    }

    /// Wait for a tag, then write a URI onto it
    pub fn write_uri(&self, uri: &str, timeout: Duration) -> Result<(TagInfo, WriteOutcome)> {
        let (reader, atr) = self.wait_for_card_event(timeout)?;
        let kind = detect::detect(&atr);

        let mut ops = self.open_ops(&reader)?;
        let uid = ops.uid()?;
        info!(%kind, uid = %hex::encode(&uid), %uri, "Writing tag");

        let outcome = ops.write_uri(kind, uri)?;
        Ok((
            TagInfo {
                reader,
                uid,
                kind,
                atr,
            },
            outcome,
        ))
    }

    /// Wait for a tag, then read its contents
    pub fn read(&self, timeout: Duration) -> Result<TagContent> {
        let (reader, atr) = self.wait_for_card_event(timeout)?;
        let kind = detect::detect(&atr);

        let mut ops = self.open_ops(&reader)?;
        ops.read(kind)
    }

    /// Wait for a tag, then erase its data area
    pub fn erase(&self, timeout: Duration) -> Result<TagInfo> {
        let (reader, atr) = self.wait_for_card_event(timeout)?;
        let kind = detect::detect(&atr);

        let mut ops = self.open_ops(&reader)?;
        let uid = ops.uid()?;
        info!(%kind, uid = %hex::encode(&uid), "Erasing tag");

        ops.erase(kind)?;
        Ok(TagInfo {
            reader,
            uid,
            kind,
            atr,
        })
    }

    /// Open tag operations on the given reader
    fn open_ops(&self, reader: &str) -> Result<TagOps<PcscTransport>> {
        let transport = self
            .manager
            .open_reader_with_config(reader, self.config.clone())?;
        Ok(TagOps::new(transport))
    }

    /// Block until a card lands on an eligible reader, or the timeout elapses
    fn wait_for_card_event(&self, timeout: Duration) -> Result<(String, Vec<u8>)> {
        let mut monitor = self.manager.monitor()?;
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(Error::Timeout);
            }

            let event = match monitor.wait_for_card(remaining) {
                Ok(event) => event,
                Err(PcscError::WaitTimeout) => return Err(Error::Timeout),
                Err(e) => return Err(e.into()),
            };

            if let CardEvent::Inserted { reader, atr } = event {
                // Ignore cards on readers outside the configured one
                if let Some(only) = &self.reader {
                    if only != &reader {
                        debug!(%reader, "Ignoring card on other reader");
                        continue;
                    }
                }
                return Ok((reader, atr));
            }
        }
    }
}
