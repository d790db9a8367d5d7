//! Raw framed records and the record kind catalogue
//!
//! Every record on the wire is a 4-byte header followed by a payload:
//!
//! ```text
//! offset 0: length   u16 LE  (payload byte count)
//! offset 2: type     u8
//! offset 3: subtype  u8
//! offset 4: payload  `length` bytes
//! ```

use crate::error::{Result, StdfError};

/// Size of the fixed record header in bytes
pub const HEADER_LEN: usize = 4;

/// Record kinds keyed by `(type, subtype)`
///
/// The catalogue is closed: anything not listed is carried as
/// [`RecordKind::Other`] with its raw tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    /// FAR (0x000A)
    FileAttributes,
    /// MIR (0x010A)
    MasterInfo,
    /// MRR (0x0114)
    MasterResults,
    /// PCR (0x011E)
    PartCount,
    /// PTR (0x0F05)
    ParametricTest,
    /// FTR (0x0F14)
    FunctionalTest,
    /// PIR (0x050A)
    PartInfo,
    /// PRR (0x0514)
    PartResults,
    /// Any tag outside the catalogue
    Other { rec_type: u8, rec_sub: u8 },
}

impl RecordKind {
    /// Resolve a header's type/subtype pair to a kind
    pub fn from_header(rec_type: u8, rec_sub: u8) -> Self {
        match (rec_type, rec_sub) {
            (0x00, 0x0A) => Self::FileAttributes,
            (0x01, 0x0A) => Self::MasterInfo,
            (0x01, 0x14) => Self::MasterResults,
            (0x01, 0x1E) => Self::PartCount,
            (0x0F, 0x05) => Self::ParametricTest,
            (0x0F, 0x14) => Self::FunctionalTest,
            (0x05, 0x0A) => Self::PartInfo,
            (0x05, 0x14) => Self::PartResults,
            (rec_type, rec_sub) => Self::Other { rec_type, rec_sub },
        }
    }

    /// The `(type, subtype)` pair written in a record header
    pub fn tag(self) -> (u8, u8) {
        match self {
            Self::FileAttributes => (0x00, 0x0A),
            Self::MasterInfo => (0x01, 0x0A),
            Self::MasterResults => (0x01, 0x14),
            Self::PartCount => (0x01, 0x1E),
            Self::ParametricTest => (0x0F, 0x05),
            Self::FunctionalTest => (0x0F, 0x14),
            Self::PartInfo => (0x05, 0x0A),
            Self::PartResults => (0x05, 0x14),
            Self::Other { rec_type, rec_sub } => (rec_type, rec_sub),
        }
    }

    /// Composite key `type << 8 | subtype`
    pub fn code(self) -> u16 {
        let (rec_type, rec_sub) = self.tag();
        (u16::from(rec_type) << 8) | u16::from(rec_sub)
    }

    /// Conventional three-letter abbreviation ("???" outside the catalogue)
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::FileAttributes => "FAR",
            Self::MasterInfo => "MIR",
            Self::MasterResults => "MRR",
            Self::PartCount => "PCR",
            Self::ParametricTest => "PTR",
            Self::FunctionalTest => "FTR",
            Self::PartInfo => "PIR",
            Self::PartResults => "PRR",
            Self::Other { .. } => "???",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:04X})", self.abbrev(), self.code())
    }
}

/// One framed record exactly as read from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub rec_type: u8,
    pub rec_sub: u8,
    /// Payload length declared in the header
    pub length: u16,
    /// Payload bytes; shorter than `length` when the stream ended early
    pub payload: Vec<u8>,
}

impl RawRecord {
    pub fn kind(&self) -> RecordKind {
        RecordKind::from_header(self.rec_type, self.rec_sub)
    }

    /// True when the stream ended before the declared payload was complete
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < usize::from(self.length)
    }

    /// Encode a record of `kind` carrying `payload` into wire bytes
    pub fn encode(kind: RecordKind, payload: &[u8]) -> Result<Vec<u8>> {
        let length = u16::try_from(payload.len())
            .map_err(|_| StdfError::PayloadTooLarge { len: payload.len() })?;
        let (rec_type, rec_sub) = kind.tag();

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.push(rec_type);
        bytes.push(rec_sub);
        bytes.extend_from_slice(payload);
        Ok(bytes)
    }
}
