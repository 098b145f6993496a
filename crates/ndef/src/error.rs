//! Error types for NDEF encoding and decoding

/// Errors produced by the NDEF codec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdefError {
    /// Record payload does not fit in a short record
    #[error("Payload too long for a short record: {0} bytes")]
    PayloadTooLong(usize),

    /// Message does not fit in a short TLV
    #[error("Message too long for a short TLV: {0} bytes")]
    MessageTooLong(usize),

    /// Input ended before a complete structure was read
    #[error("Truncated input: {0}")]
    Truncated(&'static str),

    /// No NDEF Message TLV found in the data area
    #[error("No NDEF message TLV found")]
    NoNdefTlv,

    /// Message contained no records
    #[error("Empty NDEF message")]
    EmptyMessage,

    /// Record payload is not valid for its record type
    #[error("Invalid record payload: {0}")]
    InvalidPayload(&'static str),

    /// Text could not be decoded as UTF-8
    #[error("Invalid UTF-8 in record payload")]
    InvalidUtf8,
}

impl From<std::str::Utf8Error> for NdefError {
    fn from(_: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8
    }
}
