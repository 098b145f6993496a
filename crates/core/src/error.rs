//! Core error type for tag operations
//!
//! All error variants shared by the workspace are consolidated here so that
//! transport implementations and tag operations can bubble a single type up
//! through the call stack.

use crate::response::status::StatusWord;

/// Result type alias using the core [`Error`]
pub type Result<T> = core::result::Result<T, Error>;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    //
    // Transport related errors
    //
    /// Failed to connect to the reader
    #[error("Connection error: failed to connect to reader")]
    ConnectionError,

    /// Failed to transmit data
    #[error("Transmission error: failed to transmit data")]
    TransmissionError,

    /// Reader or card error at the device level
    #[error("Device error")]
    DeviceError,

    /// Operation timed out
    #[error("Operation timed out")]
    Timeout,

    //
    // Response related errors
    //
    /// Parse error when processing response
    #[error("Parse error: {0}")]
    ParseError(&'static str),

    /// Status error from response
    #[error("Status error {status}, message: {message:?}")]
    StatusError {
        /// Status word that caused the error
        status: StatusWord,
        /// Optional error message
        message: Option<&'static str>,
    },

    //
    // Command related errors
    //
    /// Invalid command length
    #[error("Invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Invalid command data
    #[error("Invalid command data: {0}")]
    InvalidCommandData(&'static str),

    //
    // General errors
    //
    /// Context error with message and source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },

    /// Other error with static message
    #[error("{0}")]
    Other(&'static str),

    /// Generic dynamic error with string message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Create a new error with context information
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a new error with a static message
    pub const fn other(message: &'static str) -> Self {
        Self::Other(message)
    }

    /// Create a new error with a dynamic message
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self::Message(message.into())
    }

    /// Create a new status error
    pub const fn status(sw1: u8, sw2: u8) -> Self {
        Self::StatusError {
            status: StatusWord::new(sw1, sw2),
            message: None,
        }
    }

    /// Create a new status error with a message
    pub const fn status_with_message(sw1: u8, sw2: u8, message: &'static str) -> Self {
        Self::StatusError {
            status: StatusWord::new(sw1, sw2),
            message: Some(message),
        }
    }

    /// Create a new parse error
    pub const fn parse(message: &'static str) -> Self {
        Self::ParseError(message)
    }
}

/// Extension trait for Result with core errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, context: S) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<S: Into<String>>(self, context: S) -> Self {
        self.map_err(|e| e.with_context(context))
    }
}
