//! Record decoder
//!
//! Interprets a [`RawRecord`] according to its [`RecordKind`]. Only two kinds
//! carry data this crate uses:
//!
//! - MIR: `setup_time` (u32 LE, offset 0) and `start_time` (u32 LE, offset 4)
//! - PTR: `test_num` (u32 LE, offset 0) and `result` (f32 LE, offset 4)
//!
//! Every other kind is counted and skipped. Malformed content is never an
//! error: the outcome is [`DecodeOutcome::Skipped`] with a reason.

use crate::record::{RawRecord, RecordKind};
use serde::Serialize;

/// Unit reported for every parametric result
pub const RESULT_UNIT: &str = "V";
/// Lower specification limit applied to every parametric result
pub const LOW_LIMIT: f64 = 0.0;
/// Upper specification limit applied to every parametric result
pub const HIGH_LIMIT: f64 = 5.0;

/// Minimum payload for a MIR
const MIR_MIN_LEN: usize = 8;
/// Minimum payload for a PTR
const PTR_MIN_LEN: usize = 8;

/// Header timestamps carried by a MIR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfoUpdate {
    pub setup_time: u32,
    pub start_time: u32,
}

/// One parametric measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub test_num: u32,
    pub test_name: String,
    pub result: f64,
    pub unit: String,
    pub low_limit: f64,
    pub high_limit: f64,
    pub pass_fail: bool,
}

impl TestResult {
    /// Build a result against the fixed limits, deriving `pass_fail`
    pub fn new(test_num: u32, result: f64) -> Self {
        Self {
            test_num,
            test_name: format!("Test_{}", test_num),
            result,
            unit: RESULT_UNIT.to_string(),
            low_limit: LOW_LIMIT,
            high_limit: HIGH_LIMIT,
            pass_fail: (LOW_LIMIT..=HIGH_LIMIT).contains(&result),
        }
    }
}

/// Value extracted from a recognized record
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    FileInfo(FileInfoUpdate),
    TestResult(TestResult),
}

/// Why a record produced no value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Kind has no decoder; counted but not interpreted
    Unrecognized(RecordKind),
    /// Payload too short for the kind's fixed fields
    ShortPayload {
        kind: RecordKind,
        required: usize,
        actual: usize,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrecognized(kind) => write!(f, "{} not decoded", kind),
            Self::ShortPayload {
                kind,
                required,
                actual,
            } => write!(
                f,
                "{} payload has {} bytes, needs {}",
                kind, actual, required
            ),
        }
    }
}

/// Outcome of decoding one record
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Decoded(Decoded),
    Skipped(SkipReason),
}

type DecodeFn = fn(&[u8]) -> Option<Decoded>;

/// Decoder table: the decode function and minimum payload for each kind
fn decoder_for(kind: RecordKind) -> Option<(DecodeFn, usize)> {
    match kind {
        RecordKind::MasterInfo => Some((decode_master_info, MIR_MIN_LEN)),
        RecordKind::ParametricTest => Some((decode_parametric_test, PTR_MIN_LEN)),
        RecordKind::FileAttributes
        | RecordKind::MasterResults
        | RecordKind::PartCount
        | RecordKind::FunctionalTest
        | RecordKind::PartInfo
        | RecordKind::PartResults
        | RecordKind::Other { .. } => None,
    }
}

/// Decode a single raw record
pub fn decode(record: &RawRecord) -> DecodeOutcome {
    let kind = record.kind();
    let Some((decode_fn, required)) = decoder_for(kind) else {
        return DecodeOutcome::Skipped(SkipReason::Unrecognized(kind));
    };

    let short = DecodeOutcome::Skipped(SkipReason::ShortPayload {
        kind,
        required,
        actual: record.payload.len(),
    });
    if record.payload.len() < required {
        return short;
    }

    match decode_fn(&record.payload) {
        Some(value) => DecodeOutcome::Decoded(value),
        None => short,
    }
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

fn read_f32(data: &[u8], offset: usize) -> Option<f32> {
    read_u32(data, offset).map(f32::from_bits)
}

fn decode_master_info(data: &[u8]) -> Option<Decoded> {
    Some(Decoded::FileInfo(FileInfoUpdate {
        setup_time: read_u32(data, 0)?,
        start_time: read_u32(data, 4)?,
    }))
}

fn decode_parametric_test(data: &[u8]) -> Option<Decoded> {
    let test_num = read_u32(data, 0)?;
    let result = read_f32(data, 4)?;
    Some(Decoded::TestResult(TestResult::new(
        test_num,
        f64::from(result),
    )))
}
