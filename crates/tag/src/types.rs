//! Tag model types

use std::fmt;

use taplink_core::Bytes;

/// Subtype of a page-addressed Type 2 tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type2Subtype {
    /// MIFARE Ultralight and the NTAG family (readers report both under the
    /// same storage-card name)
    Ultralight,
    /// MIFARE Ultralight C
    UltralightC,
}

/// Kind of tag, derived from the reader's storage-card ATR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// MIFARE Classic 1K (block-addressed, key-authenticated)
    MifareClassic1k,
    /// MIFARE Classic 4K (block-addressed, key-authenticated)
    MifareClassic4k,
    /// MIFARE Mini (block-addressed, key-authenticated)
    MifareMini,
    /// Type 2 tag (page-addressed, NDEF-capable)
    Type2(Type2Subtype),
    /// Anything else; treated as page-addressed by the dispatch
    Unknown,
}

impl TagKind {
    /// Whether this is a block-addressed MIFARE Classic family tag
    pub const fn is_mifare_classic(&self) -> bool {
        matches!(
            self,
            Self::MifareClassic1k | Self::MifareClassic4k | Self::MifareMini
        )
    }

    /// Whether this is a page-addressed Type 2 tag
    pub const fn is_type2(&self) -> bool {
        matches!(self, Self::Type2(_))
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MifareClassic1k => write!(f, "MIFARE Classic 1K"),
            Self::MifareClassic4k => write!(f, "MIFARE Classic 4K"),
            Self::MifareMini => write!(f, "MIFARE Mini"),
            Self::Type2(Type2Subtype::Ultralight) => write!(f, "Type 2 (NTAG/Ultralight)"),
            Self::Type2(Type2Subtype::UltralightC) => write!(f, "Type 2 (Ultralight C)"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A tag presented to a reader
#[derive(Debug, Clone)]
pub struct TagInfo {
    /// Name of the reader the tag was presented to
    pub reader: String,
    /// Tag UID
    pub uid: Bytes,
    /// Detected tag kind
    pub kind: TagKind,
    /// Raw ATR the detection was derived from
    pub atr: Vec<u8>,
}

impl fmt::Display for TagInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (UID {})", self.kind, hex::encode(&self.uid))
    }
}

/// Contents read back from a tag
#[derive(Debug, Clone)]
pub struct TagContent {
    /// Tag UID
    pub uid: Bytes,
    /// Detected tag kind
    pub kind: TagKind,
    /// Whether a valid NDEF message was found
    pub ndef: bool,
    /// URI stored on the tag, if any
    pub uri: Option<String>,
    /// Text stored on the tag, if any
    pub text: Option<String>,
}

/// How a write ended up on the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// NDEF message written through the capability container path
    Ndef {
        /// Number of pages written
        pages: usize,
    },
    /// Raw page writes without a valid capability container
    RawPages {
        /// Number of pages that were written
        written: usize,
        /// Number of pages that were attempted
        attempted: usize,
    },
    /// Raw URL bytes written to MIFARE Classic data blocks
    MifareBlocks {
        /// Number of blocks written
        blocks: usize,
    },
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ndef { pages } => write!(f, "written via NDEF ({pages} pages)"),
            Self::RawPages { written, attempted } => {
                write!(f, "written via raw pages ({written}/{attempted} pages)")
            }
            Self::MifareBlocks { blocks } => {
                write!(f, "written to MIFARE Classic ({blocks} blocks)")
            }
        }
    }
}
