//! Pseudo-APDU builders for contactless storage operations
//!
//! These are the PC/SC 2.01 part 3 commands a reader translates into the
//! tag's native page/block operations.

use taplink_core::{Bytes, Command};

use crate::constants::MIFARE_KEY_SLOT;

/// MIFARE Classic key type used for authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Key A
    A,
    /// Key B
    B,
}

impl KeyType {
    const fn code(self) -> u8 {
        match self {
            Self::A => 0x60,
            Self::B => 0x61,
        }
    }
}

/// GET DATA: fetch the UID of the connected tag
pub fn get_uid() -> Command {
    Command::new_with_le(0xFF, 0xCA, 0x00, 0x00, 0x00)
}

/// READ BINARY: read `length` bytes starting at a page/block address
pub fn read_binary(address: u8, length: u8) -> Command {
    Command::new_with_le(0xFF, 0xB0, 0x00, address, length)
}

/// UPDATE BINARY: write data starting at a page/block address
///
/// Type 2 tags take one 4-byte page per command, MIFARE Classic one
/// 16-byte block.
pub fn update_binary(address: u8, data: impl Into<Bytes>) -> Command {
    Command::new_with_data(0xFF, 0xD6, 0x00, address, data)
}

/// LOAD KEYS: load an authentication key into a volatile reader key slot
pub fn load_key(key: &[u8; 6]) -> Command {
    Command::new_with_data(0xFF, 0x82, 0x00, MIFARE_KEY_SLOT, key.to_vec())
}

/// GENERAL AUTHENTICATE: authenticate a block with a previously loaded key
pub fn authenticate(block: u8, key_type: KeyType) -> Command {
    Command::new_with_data(
        0xFF,
        0x86,
        0x00,
        0x00,
        vec![0x01, 0x00, block, key_type.code(), MIFARE_KEY_SLOT],
    )
}
