//! PC/SC transport implementation for contactless tag operations
//!
//! This crate provides an implementation of the `CardTransport` trait from
//! `taplink-core` using the PC/SC API, plus reader enumeration and a
//! monitor for waiting on card insertion with a timeout.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use taplink_core::prelude::*;
//! use taplink_transport_pcsc::PcscDeviceManager;
//!
//! // Create a PC/SC device manager
//! let manager = PcscDeviceManager::new()?;
//!
//! // List available readers
//! let readers = manager.list_readers()?;
//! if readers.is_empty() {
//!     println!("No readers found");
//!     return Ok(());
//! }
//!
//! // Connect to the first reader
//! let reader = &readers[0];
//! println!("Connecting to reader: {}", reader.name());
//!
//! let mut transport = manager.open_reader(reader.name())?;
//!
//! // Fetch the tag UID
//! let uid_cmd = Command::new_with_le(0xFF, 0xCA, 0x00, 0x00, 0x00);
//! let response = transport.send(&uid_cmd)?;
//! println!("UID: {}", hex::encode(response.payload()));
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Core modules
mod config;
mod error;
mod event;
mod manager;
mod monitor;
mod reader;
mod transport;

// Public exports
pub use config::{ConnectStrategy, PcscConfig, ShareMode};
pub use error::PcscError;
pub use event::{
    CardEvent, CardEventHandler, CardEventReceiver, CardEventSender, ReaderEvent,
    card_event_channel,
};
pub use manager::PcscDeviceManager;
pub use monitor::PcscMonitor;
pub use reader::PcscReader;
pub use transport::PcscTransport;

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols};
