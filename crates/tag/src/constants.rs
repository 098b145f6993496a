//! Constants for tag memory layout and authentication

/// Factory transport key A used by unprovisioned MIFARE Classic sectors
pub const MIFARE_DEFAULT_KEY: [u8; 6] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// Data blocks the URL is stored in on MIFARE Classic tags
pub const MIFARE_URL_BLOCKS: [u8; 3] = [4, 5, 6];

/// MIFARE Classic block size in bytes
pub const MIFARE_BLOCK_SIZE: usize = 16;

/// Volatile reader key slot used for authentication
pub const MIFARE_KEY_SLOT: u8 = 0x00;

/// Page holding the capability container of a Type 2 tag
pub const TYPE2_CC_PAGE: u8 = 3;

/// Capability container magic byte
pub const TYPE2_CC_MAGIC: u8 = 0xE1;

/// First user page of the Type 2 data area
pub const TYPE2_DATA_PAGE: u8 = 4;

/// Data area size assumed when the capability container is unreadable.
/// Covers the 12 user pages every Type 2 tag has.
pub const TYPE2_FALLBACK_DATA_SIZE: usize = 48;
