//! NDEF message codec
//!
//! This crate implements the subset of the NFC Data Exchange Format needed
//! to put a URI on a tag and read it back: URI and Text records, the
//! short-record message framing, and the Type 2 tag TLV structure that wraps
//! an encoded message on page-addressed tags.
//!
//! # Examples
//!
//! ```
//! use taplink_ndef::{Record, UriRecord, message, tlv};
//!
//! let record = Record::Uri(UriRecord::new("https://example.com/card/jane"));
//! let encoded = message::encode(&[record])?;
//!
//! // Wrap for a Type 2 tag: NDEF Message TLV, terminator, page padding
//! let wrapped = tlv::wrap(&encoded)?;
//! assert_eq!(wrapped.len() % 4, 0);
//!
//! let records = message::decode(tlv::unwrap(&wrapped)?)?;
//! assert_eq!(records.len(), 1);
//! # Ok::<(), taplink_ndef::NdefError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

mod error;
pub mod message;
mod record;
pub mod tlv;

pub use error::NdefError;
pub use record::{Record, TextRecord, UriRecord};
