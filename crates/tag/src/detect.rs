//! Tag kind detection from the reader ATR
//!
//! PC/SC readers synthesize an ATR for contactless storage cards (PC/SC
//! 2.01 part 3): after the application identifier `A0 00 00 03 06` follow a
//! standard byte and a two-byte card name. That pair is the whole decision
//! table between page-addressed Type 2 tags and block-addressed MIFARE
//! Classic tags.

use crate::types::{TagKind, Type2Subtype};

/// Registered application identifier of the PC/SC workgroup, present in
/// every storage-card ATR
const STORAGE_CARD_RID: [u8; 5] = [0xA0, 0x00, 0x00, 0x03, 0x06];

/// Standard byte for ISO 14443-A part 3 storage cards
const STANDARD_ISO14443A_PART3: u8 = 0x03;

/// Detect the tag kind from a reader ATR.
///
/// Anything that does not carry a storage-card name the dispatch knows maps
/// to [`TagKind::Unknown`], which downstream defaults to the page-addressed
/// path.
pub fn detect(atr: &[u8]) -> TagKind {
    let Some(name) = storage_card_name(atr) else {
        return TagKind::Unknown;
    };

    match name {
        0x0001 => TagKind::MifareClassic1k,
        0x0002 => TagKind::MifareClassic4k,
        0x0026 => TagKind::MifareMini,
        0x0003 => TagKind::Type2(Type2Subtype::Ultralight),
        0x003A => TagKind::Type2(Type2Subtype::UltralightC),
        _ => TagKind::Unknown,
    }
}

/// Extract the two-byte storage card name from an ATR, if present
fn storage_card_name(atr: &[u8]) -> Option<u16> {
    let rid_at = atr
        .windows(STORAGE_CARD_RID.len())
        .position(|window| window == STORAGE_CARD_RID)?;

    // RID is followed by the standard byte and the card name
    let rest = &atr[rid_at + STORAGE_CARD_RID.len()..];
    let &[standard, name_hi, name_lo, ..] = rest else {
        return None;
    };

    if standard != STANDARD_ISO14443A_PART3 {
        return None;
    }

    Some(u16::from_be_bytes([name_hi, name_lo]))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ATRs as produced by ACS readers for common tags
    const ATR_MIFARE_CLASSIC_1K: &[u8] = &[
        0x3B, 0x8F, 0x80, 0x01, 0x80, 0x4F, 0x0C, 0xA0, 0x00, 0x00, 0x03, 0x06, 0x03, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00, 0x6A,
    ];
    const ATR_MIFARE_CLASSIC_4K: &[u8] = &[
        0x3B, 0x8F, 0x80, 0x01, 0x80, 0x4F, 0x0C, 0xA0, 0x00, 0x00, 0x03, 0x06, 0x03, 0x00, 0x02,
        0x00, 0x00, 0x00, 0x00, 0x69,
    ];
    const ATR_NTAG: &[u8] = &[
        0x3B, 0x8F, 0x80, 0x01, 0x80, 0x4F, 0x0C, 0xA0, 0x00, 0x00, 0x03, 0x06, 0x03, 0x00, 0x03,
        0x00, 0x00, 0x00, 0x00, 0x68,
    ];
    const ATR_ULTRALIGHT_C: &[u8] = &[
        0x3B, 0x8F, 0x80, 0x01, 0x80, 0x4F, 0x0C, 0xA0, 0x00, 0x00, 0x03, 0x06, 0x03, 0x00, 0x3A,
        0x00, 0x00, 0x00, 0x00, 0x51,
    ];
    // ISO 14443-4 card (e.g. DESFire): no storage-card RID
    const ATR_ISO14443_4: &[u8] = &[0x3B, 0x81, 0x80, 0x01, 0x80, 0x80];

    #[test]
    fn test_detect_mifare_classic() {
        assert_eq!(detect(ATR_MIFARE_CLASSIC_1K), TagKind::MifareClassic1k);
        assert_eq!(detect(ATR_MIFARE_CLASSIC_4K), TagKind::MifareClassic4k);
        assert!(detect(ATR_MIFARE_CLASSIC_1K).is_mifare_classic());
    }

    #[test]
    fn test_detect_type2() {
        assert_eq!(detect(ATR_NTAG), TagKind::Type2(Type2Subtype::Ultralight));
        assert_eq!(
            detect(ATR_ULTRALIGHT_C),
            TagKind::Type2(Type2Subtype::UltralightC)
        );
        assert!(detect(ATR_NTAG).is_type2());
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect(ATR_ISO14443_4), TagKind::Unknown);
        assert_eq!(detect(&[]), TagKind::Unknown);
        assert_eq!(detect(&[0x3B, 0x8F]), TagKind::Unknown);

        // Storage RID present but truncated before the card name
        assert_eq!(
            detect(&[0x80, 0x4F, 0x0C, 0xA0, 0x00, 0x00, 0x03, 0x06, 0x03]),
            TagKind::Unknown
        );

        // FeliCa standard byte instead of ISO 14443-A part 3
        assert_eq!(
            detect(&[0xA0, 0x00, 0x00, 0x03, 0x06, 0x11, 0x00, 0x3B]),
            TagKind::Unknown
        );
    }
}
