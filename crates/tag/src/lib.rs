//! NFC tag detection and URI read/write dispatch
//!
//! This crate is the heart of the taplink toolkit: it decides, per presented
//! tag, whether the page-addressed Type 2 path or the block-addressed MIFARE
//! Classic path applies, and writes or reads a profile URL accordingly.
//!
//! Two entry levels are provided:
//!
//! - [`TagOps`] works over any [`CardTransport`](taplink_core::CardTransport)
//!   that already has a tag in the field.
//! - [`TagWriter`] adds reader discovery and the wait-for-tag loop on top,
//!   for the common "place a card on the reader" flow.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use taplink::TagWriter;
//!
//! # fn main() -> Result<(), taplink::Error> {
//! let writer = TagWriter::new()?;
//! let (tag, outcome) = writer.write_uri(
//!     "https://cards.example.com/u/jane",
//!     Duration::from_secs(15),
//! )?;
//! println!("{tag}: {outcome}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod commands;
mod constants;
pub mod detect;
mod error;
mod mifare;
mod ops;
mod type2;
mod types;
mod writer;

pub use constants::*;
pub use error::{Error, Result};
pub use ops::TagOps;
pub use types::{TagContent, TagInfo, TagKind, Type2Subtype, WriteOutcome};
pub use writer::TagWriter;
