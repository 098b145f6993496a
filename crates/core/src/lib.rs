//! Core traits and types for contactless tag operations
//!
//! This crate provides the foundational types for talking to contactless
//! storage tags through a reader: command and response framing, status word
//! interpretation, and the transport abstraction the rest of the workspace
//! builds on.
//!
//! ## Overview
//!
//! PC/SC readers expose storage-card operations (read a page, write a block,
//! authenticate a sector) as APDU-shaped commands, so the wire unit here is
//! the classic CLA/INS/P1/P2 header with optional data and expected length.
//! This crate provides abstractions for:
//!
//! - Creating and parsing commands and responses
//! - Interpreting status words returned by the reader
//! - Communicating with tags through different transport layers
//! - Error handling shared across the workspace

#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod command;
pub mod response;
pub mod transport;

// Core error types
mod error;
pub use error::{Error, Result, ResultExt};

// Re-exports for common types
pub use command::Command;
pub use response::Response;
pub use response::status::StatusWord;
pub use transport::CardTransport;

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        Bytes, BytesMut, Command, Error, Response, Result, ResultExt, StatusWord,
        transport::CardTransport,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test the basic types are re-exported correctly
    #[test]
    fn test_reexports() {
        let cmd = Command::new(0xFF, 0xCA, 0x00, 0x00);
        assert_eq!(cmd.cla, 0xFF);
        assert_eq!(cmd.ins, 0xCA);

        let resp = Response::success(Bytes::from_static(&[0x04, 0xA1, 0xB2]));
        assert!(resp.is_success());
        assert_eq!(resp.payload().as_ref(), &[0x04, 0xA1, 0xB2]);
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
    }
}
