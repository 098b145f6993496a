//! Error type for tag operations

use taplink_ndef::NdefError;
use taplink_transport_pcsc::PcscError;

/// Result type for tag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tag operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Core command/response/transport errors
    #[error(transparent)]
    Core(#[from] taplink_core::Error),

    /// PC/SC reader errors
    #[error(transparent)]
    Transport(#[from] PcscError),

    /// NDEF codec errors
    #[error(transparent)]
    Ndef(#[from] NdefError),

    /// No tag was presented before the timeout elapsed
    #[error("Timed out waiting for a tag")]
    Timeout,

    /// MIFARE Classic authentication failed
    #[error("Authentication failed at block {0}")]
    AuthenticationFailed(u8),

    /// Encoded message does not fit the tag's data area
    #[error("Message too large for tag: {size} bytes exceeds capacity of {capacity} bytes")]
    MessageTooLarge {
        /// Size of the TLV-wrapped message
        size: usize,
        /// Data area capacity of the tag
        capacity: usize,
    },

    /// Raw page write fallback could not write any page
    #[error("No pages could be written")]
    NoPagesWritten,
}
