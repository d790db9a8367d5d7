//! Statistics engine over a decoded [`TestResultStore`]
//!
//! Every query is a pure read of the store and recomputes from scratch:
//! - per-test summaries (count, mean, median, sample stddev, min, max)
//! - sigma outlier detection within each test group
//! - process capability (Cpk) for one test number
//! - failing results and yield rate
//!
//! Groups are keyed by `test_num` and visited in ascending order; members of
//! a group keep store order.
//!
//! # References
//!
//! Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//! Chapter 8 (process capability).

use crate::decoder::TestResult;
use crate::store::TestResultStore;
use serde::Serialize;
use std::collections::BTreeMap;
use u_numflow::stats;

/// Default outlier threshold in standard deviations
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Smallest group evaluated for outliers
const MIN_OUTLIER_GROUP: usize = 3;

/// Smallest group for which Cpk is computed
const MIN_CPK_SAMPLES: usize = 2;

/// Descriptive statistics for one test number
///
/// A group holding any non-finite result has no defined statistics: every
/// field but `count` is NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample (n-1) standard deviation; 0.0 for a single sample
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

impl TestSummary {
    /// Summarize a non-empty slice of values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let Some(mean) = stats::mean(values) else {
            return Some(Self::undefined(count));
        };

        let stdev = if count < 2 {
            0.0
        } else {
            stats::std_dev(values).unwrap_or(f64::NAN)
        };

        Some(Self {
            count,
            mean,
            median: stats::median(values).unwrap_or(f64::NAN),
            stdev,
            min: stats::min(values).unwrap_or(f64::NAN),
            max: stats::max(values).unwrap_or(f64::NAN),
        })
    }

    fn undefined(count: usize) -> Self {
        Self {
            count,
            mean: f64::NAN,
            median: f64::NAN,
            stdev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Mean and sample stddev of a group, `None` below two values or when any
/// value is non-finite
fn mean_and_stdev(values: &[f64]) -> Option<(f64, f64)> {
    Some((stats::mean(values)?, stats::std_dev(values)?))
}

/// Read-only analyzer borrowing a populated store
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    store: &'a TestResultStore,
}

impl<'a> Analyzer<'a> {
    pub fn new(store: &'a TestResultStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a TestResultStore {
        self.store
    }

    /// Partition results by test number, members in store order
    pub fn group_by_test(&self) -> BTreeMap<u32, Vec<&'a TestResult>> {
        let mut groups: BTreeMap<u32, Vec<&'a TestResult>> = BTreeMap::new();
        for result in self.store.results() {
            groups.entry(result.test_num).or_default().push(result);
        }
        groups
    }

    /// Descriptive statistics for every test number
    pub fn analyze_by_test(&self) -> BTreeMap<u32, TestSummary> {
        self.group_by_test()
            .into_iter()
            .filter_map(|(test_num, group)| {
                let values = result_values(&group);
                TestSummary::from_values(&values).map(|summary| (test_num, summary))
            })
            .collect()
    }

    /// Results deviating from their group mean by more than `sigma` stddevs
    ///
    /// Groups with fewer than three members are never evaluated.
    pub fn find_outliers(&self, sigma: f64) -> Vec<&'a TestResult> {
        let mut outliers = Vec::new();

        for (test_num, group) in self.group_by_test() {
            if group.len() < MIN_OUTLIER_GROUP {
                continue;
            }

            let values = result_values(&group);
            let Some((mean, stdev)) = mean_and_stdev(&values) else {
                continue;
            };

            let flagged = group
                .into_iter()
                .filter(|r| (r.result - mean).abs() > sigma * stdev);
            let before = outliers.len();
            outliers.extend(flagged);

            if outliers.len() > before {
                tracing::debug!(
                    test_num,
                    flagged = outliers.len() - before,
                    mean,
                    stdev,
                    sigma,
                    "Outliers in test group"
                );
            }
        }

        outliers
    }

    /// Process capability index for one test number
    ///
    /// Returns 0.0 when the test has fewer than two samples, zero spread or a
    /// non-finite result.
    /// Limits come from the group's first sample.
    pub fn calculate_cpk(&self, test_num: u32) -> f64 {
        let group: Vec<&TestResult> = self
            .store
            .results()
            .iter()
            .filter(|r| r.test_num == test_num)
            .collect();

        if group.len() < MIN_CPK_SAMPLES {
            return 0.0;
        }

        let values = result_values(&group);
        let Some((mean, stdev)) = mean_and_stdev(&values) else {
            return 0.0;
        };
        if stdev == 0.0 {
            return 0.0;
        }

        let usl = group[0].high_limit;
        let lsl = group[0].low_limit;
        let cpu = (usl - mean) / (3.0 * stdev);
        let cpl = (mean - lsl) / (3.0 * stdev);

        cpu.min(cpl)
    }

    /// Results outside their limits, in store order
    pub fn failing_tests(&self) -> Vec<&'a TestResult> {
        self.store.results().iter().filter(|r| !r.pass_fail).collect()
    }

    /// Percentage of passing results, 0.0 when there are none
    pub fn yield_rate(&self) -> f64 {
        self.store.summary().yield_rate
    }
}

fn result_values(group: &[&TestResult]) -> Vec<f64> {
    group.iter().map(|r| r.result).collect()
}
