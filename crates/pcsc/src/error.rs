//! Error types for PC/SC transport

use std::fmt;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    NoReadersAvailable,

    /// Reader not found
    ReaderNotFound(String),

    /// No card present in reader
    NoCard(String),

    /// Timed out waiting for a card
    WaitTimeout,

    /// Other error
    Other(String),
}

impl fmt::Display for PcscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pcsc(e) => write!(f, "PC/SC error: {}", e),
            Self::NoReadersAvailable => write!(f, "No readers available"),
            Self::ReaderNotFound(r) => write!(f, "Reader not found: {}", r),
            Self::NoCard(r) => write!(f, "No card present in reader: {}", r),
            Self::WaitTimeout => write!(f, "Timed out waiting for a card"),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<PcscError> for taplink_core::Error {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(pcsc::Error::Timeout) | PcscError::WaitTimeout => Self::Timeout,
            PcscError::Pcsc(_) => Self::TransmissionError,
            PcscError::NoReadersAvailable | PcscError::ReaderNotFound(_) => Self::ConnectionError,
            PcscError::NoCard(_) => Self::DeviceError,
            PcscError::Other(msg) => Self::Message(msg),
        }
    }
}
