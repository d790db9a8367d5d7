//! Synthetic record stream generator
//!
//! Produces small, well-formed files for fixtures and demos: FAR, MIR, one
//! PTR per test number with a result drawn from `[1.0, 4.0)`, then MRR.

use crate::error::{Result, StdfError};
use crate::record::{RawRecord, RecordKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// FAR cpu_type for the generated files
const CPU_TYPE: u8 = 2;
/// FAR format version
const STDF_VERSION: u8 = 4;

const RESULT_RANGE: std::ops::Range<f32> = 1.0..4.0;

/// Seedable generator of sample record streams
pub struct SampleGenerator {
    rng: StdRng,
    timestamp: u32,
}

impl SampleGenerator {
    /// Generator seeded from entropy, stamped with the current time
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            timestamp: unix_now(),
        }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            timestamp: unix_now(),
        }
    }

    /// Fix the MIR/MRR timestamps instead of using the clock
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Build a complete stream with `num_tests` parametric records
    pub fn generate(&mut self, num_tests: u32) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();

        bytes.extend(RawRecord::encode(
            RecordKind::FileAttributes,
            &[CPU_TYPE, STDF_VERSION],
        )?);
        bytes.extend(self.master_info()?);
        for test_num in 1..=num_tests {
            bytes.extend(self.parametric_test(test_num)?);
        }
        bytes.extend(self.master_results()?);

        Ok(bytes)
    }

    /// Generate a stream and write it to `path`
    pub fn write_to(&mut self, path: impl AsRef<Path>, num_tests: u32) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.generate(num_tests)?;
        std::fs::write(path, &bytes).map_err(|source| StdfError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            tests = num_tests,
            bytes = bytes.len(),
            "Generated sample file"
        );
        Ok(())
    }

    /// setup_time, start_time, stat_num, mode_cod
    fn master_info(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(10);
        payload.extend_from_slice(&self.timestamp.to_le_bytes());
        payload.extend_from_slice(&self.timestamp.to_le_bytes());
        payload.push(1);
        payload.push(b'P');
        RawRecord::encode(RecordKind::MasterInfo, &payload)
    }

    /// test_num, result, head_num, site_num, test_flg
    fn parametric_test(&mut self, test_num: u32) -> Result<Vec<u8>> {
        let result: f32 = self.rng.gen_range(RESULT_RANGE);

        let mut payload = Vec::with_capacity(11);
        payload.extend_from_slice(&test_num.to_le_bytes());
        payload.extend_from_slice(&result.to_le_bytes());
        payload.extend_from_slice(&[1, 1, 0]);
        RawRecord::encode(RecordKind::ParametricTest, &payload)
    }

    /// finish_time, disp_cod
    fn master_results(&self) -> Result<Vec<u8>> {
        let mut payload = self.timestamp.to_le_bytes().to_vec();
        payload.push(b'A');
        RawRecord::encode(RecordKind::MasterResults, &payload)
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TestResultStore;

    #[test]
    fn test_generate_record_layout() {
        let bytes = SampleGenerator::with_seed(7).generate(5).unwrap();
        let store = TestResultStore::from_bytes(&bytes).unwrap();

        let kinds: Vec<_> = store.records().iter().map(|r| r.kind()).collect();
        assert_eq!(kinds.len(), 8);
        assert_eq!(kinds[0], RecordKind::FileAttributes);
        assert_eq!(kinds[1], RecordKind::MasterInfo);
        assert!(kinds[2..7].iter().all(|k| *k == RecordKind::ParametricTest));
        assert_eq!(kinds[7], RecordKind::MasterResults);
    }

    #[test]
    fn test_generated_results_decode_in_range() {
        let bytes = SampleGenerator::with_seed(11).generate(50).unwrap();
        let store = TestResultStore::from_bytes(&bytes).unwrap();

        assert_eq!(store.results().len(), 50);
        for (i, result) in store.results().iter().enumerate() {
            assert_eq!(result.test_num, i as u32 + 1);
            assert!(result.result >= 1.0 && result.result < 4.0);
            assert!(result.pass_fail);
        }
        assert_eq!(store.summary().yield_rate, 100.0);
    }

    #[test]
    fn test_fixed_timestamp_populates_file_info() {
        let bytes = SampleGenerator::with_seed(1)
            .with_timestamp(1_700_000_000)
            .generate(1)
            .unwrap();
        let info = TestResultStore::from_bytes(&bytes).unwrap().file_info();
        assert_eq!(info.setup_time, Some(1_700_000_000));
        assert_eq!(info.start_time, Some(1_700_000_000));
    }

    #[test]
    fn test_same_seed_same_results() {
        let a = SampleGenerator::with_seed(42).with_timestamp(0).generate(10).unwrap();
        let b = SampleGenerator::with_seed(42).with_timestamp(0).generate(10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_tests() {
        let bytes = SampleGenerator::with_seed(3).generate(0).unwrap();
        let store = TestResultStore::from_bytes(&bytes).unwrap();
        assert_eq!(store.records().len(), 3);
        assert!(store.results().is_empty());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.stdf");
        SampleGenerator::with_seed(5).write_to(&path, 4).unwrap();

        let store = TestResultStore::from_path(&path).unwrap();
        assert_eq!(store.results().len(), 4);
    }
}
