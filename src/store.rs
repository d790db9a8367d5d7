//! Test result store
//!
//! Owns everything produced by one decode pass: the raw records in arrival
//! order, the decoded test results in encounter order, the file header info
//! and the decode diagnostics. A store is filled once and then only read.

use crate::decoder::{decode, DecodeOutcome, Decoded, FileInfoUpdate, SkipReason, TestResult};
use crate::error::{Result, StdfError};
use crate::reader::RecordReader;
use crate::record::{RawRecord, RecordKind};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// File-level header info; `None` means no MIR has been seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub setup_time: Option<u32>,
    pub start_time: Option<u32>,
}

impl FileInfo {
    /// Last MIR wins
    fn apply(&mut self, update: FileInfoUpdate) {
        self.setup_time = Some(update.setup_time);
        self.start_time = Some(update.start_time);
    }
}

/// Counters describing what a decode pass saw and dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeDiagnostics {
    /// Every record seen, by kind
    pub records_by_kind: BTreeMap<RecordKind, usize>,
    /// Records of a decoded kind dropped for a short payload
    pub short_payloads: usize,
    /// Records of a kind with no decoder
    pub unrecognized: usize,
    /// Records whose payload was cut off by end of stream
    pub truncated: usize,
}

/// Pass/fail totals for a store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseSummary {
    pub total_records: usize,
    pub total_tests: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub yield_rate: f64,
}

/// Accumulator for a single decode pass
#[derive(Debug, Default)]
pub struct TestResultStore {
    records: Vec<RawRecord>,
    results: Vec<TestResult>,
    file_info: FileInfo,
    diagnostics: DecodeDiagnostics,
}

impl TestResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and decode a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StdfError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            records = store.records.len(),
            results = store.results.len(),
            "Decoded record stream"
        );
        Ok(store)
    }

    /// Decode an entire stream into a fresh store
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut store = Self::new();
        decode_into(reader, &mut store)?;
        Ok(store)
    }

    /// Decode an in-memory buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// Decode one record and keep it
    pub fn ingest(&mut self, record: RawRecord) {
        let kind = record.kind();
        *self.diagnostics.records_by_kind.entry(kind).or_insert(0) += 1;
        if record.is_truncated() {
            self.diagnostics.truncated += 1;
        }

        match decode(&record) {
            DecodeOutcome::Decoded(Decoded::FileInfo(update)) => self.file_info.apply(update),
            DecodeOutcome::Decoded(Decoded::TestResult(result)) => self.results.push(result),
            DecodeOutcome::Skipped(reason @ SkipReason::ShortPayload { .. }) => {
                tracing::debug!(%reason, "Record skipped");
                self.diagnostics.short_payloads += 1;
            }
            DecodeOutcome::Skipped(SkipReason::Unrecognized(_)) => {
                self.diagnostics.unrecognized += 1;
            }
        }

        self.records.push(record);
    }

    /// Raw records in arrival order
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Decoded results in encounter order
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn file_info(&self) -> FileInfo {
        self.file_info
    }

    pub fn diagnostics(&self) -> &DecodeDiagnostics {
        &self.diagnostics
    }

    /// Pass/fail totals and yield over all results
    pub fn summary(&self) -> ParseSummary {
        let total_tests = self.results.len();
        let pass_count = self.results.iter().filter(|r| r.pass_fail).count();
        let yield_rate = if total_tests > 0 {
            pass_count as f64 / total_tests as f64 * 100.0
        } else {
            0.0
        };

        ParseSummary {
            total_records: self.records.len(),
            total_tests,
            pass_count,
            fail_count: total_tests - pass_count,
            yield_rate,
        }
    }
}

/// Decode every record of `reader` into `store`
pub fn decode_into<R: Read>(reader: R, store: &mut TestResultStore) -> Result<()> {
    for record in RecordReader::new(reader) {
        store.ingest(record?);
    }
    Ok(())
}
