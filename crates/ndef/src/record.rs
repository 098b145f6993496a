//! NDEF record model
//!
//! Only the two record types the toolkit actually puts on (or expects back
//! from) a tag are modeled: well-known URI records and well-known Text
//! records. Anything else is skipped by the message decoder.

use crate::NdefError;

/// URI identifier codes from the NFC Forum URI record type definition.
///
/// The first payload byte of a "U" record selects one of these prefixes;
/// the rest of the payload is the remainder of the URI.
pub(crate) const URI_PREFIXES: &[&str] = &[
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// A single NDEF record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Well-known URI record ("U")
    Uri(UriRecord),
    /// Well-known Text record ("T")
    Text(TextRecord),
}

/// Well-known URI record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriRecord {
    uri: String,
}

impl UriRecord {
    /// Create a new URI record
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// The full URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Split the URI into its identifier code and remainder.
    ///
    /// Picks the longest matching prefix from the abbreviation table; code 0
    /// (no abbreviation) when nothing matches.
    pub(crate) fn abbreviate(&self) -> (u8, &str) {
        let mut best: (u8, &str) = (0, &self.uri);
        let mut best_len = 0;

        // Entry 0 is the empty prefix and must not win over real ones
        for (code, prefix) in URI_PREFIXES.iter().enumerate().skip(1) {
            if prefix.len() > best_len && self.uri.starts_with(prefix) {
                best = (code as u8, &self.uri[prefix.len()..]);
                best_len = prefix.len();
            }
        }

        best
    }

    /// Rebuild a URI from an identifier code and remainder
    pub(crate) fn from_parts(code: u8, rest: &str) -> Result<Self, NdefError> {
        let prefix = URI_PREFIXES
            .get(code as usize)
            .ok_or(NdefError::InvalidPayload("unknown URI identifier code"))?;
        Ok(Self::new(format!("{prefix}{rest}")))
    }
}

/// Well-known Text record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    language: String,
    text: String,
}

impl TextRecord {
    /// Create a new text record with the given IANA language code
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }

    /// The IANA language code (e.g. "en")
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The text content
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_picks_longest_prefix() {
        let record = UriRecord::new("https://www.example.com/");
        // Must pick 0x02 (https://www.), not 0x04 (https://)
        assert_eq!(record.abbreviate(), (0x02, "example.com/"));

        let record = UriRecord::new("https://card.example.com/u/jane");
        assert_eq!(record.abbreviate(), (0x04, "card.example.com/u/jane"));

        let record = UriRecord::new("geo:52.52,13.40");
        assert_eq!(record.abbreviate(), (0x00, "geo:52.52,13.40"));
    }

    #[test]
    fn test_from_parts() {
        let record = UriRecord::from_parts(0x04, "example.com").unwrap();
        assert_eq!(record.uri(), "https://example.com");

        assert!(UriRecord::from_parts(0xFF, "x").is_err());
    }

    #[test]
    fn test_abbreviation_roundtrip() {
        for uri in [
            "http://www.example.com",
            "https://www.example.com",
            "http://example.com",
            "https://example.com/card/jane",
            "tel:+4915112345678",
            "mailto:jane@example.com",
            "urn:nfc:sn:example",
            "geo:0,0",
        ] {
            let record = UriRecord::new(uri);
            let (code, rest) = record.abbreviate();
            assert_eq!(UriRecord::from_parts(code, rest).unwrap().uri(), uri);
        }
    }
}
