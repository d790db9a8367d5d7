//! JSON output format for parse summaries and analysis reports

use crate::analysis::{Analyzer, TestSummary};
use crate::decoder::TestResult;
use crate::store::{FileInfo, ParseSummary, TestResultStore};
use serde::Serialize;

/// Record count for one kind
#[derive(Debug, Clone, Serialize)]
pub struct JsonRecordCount {
    /// Three-letter abbreviation ("???" for kinds outside the catalogue)
    pub kind: String,
    /// `type << 8 | subtype`
    pub code: u16,
    pub count: usize,
}

/// Decode diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct JsonDiagnostics {
    pub records: Vec<JsonRecordCount>,
    pub short_payloads: usize,
    pub unrecognized: usize,
    pub truncated: usize,
}

/// Output of the `parse` command
#[derive(Debug, Clone, Serialize)]
pub struct JsonParseOutput {
    pub file: String,
    pub file_info: FileInfo,
    pub statistics: ParseSummary,
    pub diagnostics: JsonDiagnostics,
}

/// Per-test statistics with capability index
#[derive(Debug, Clone, Serialize)]
pub struct JsonTestStatistics {
    pub test_num: u32,
    #[serde(flatten)]
    pub summary: TestSummary,
    pub cpk: f64,
}

/// Output of the `analyze` command
#[derive(Debug, Clone, Serialize)]
pub struct JsonAnalysisOutput {
    pub file: String,
    pub total_tests: usize,
    pub yield_rate: f64,
    pub sigma: f64,
    pub tests: Vec<JsonTestStatistics>,
    pub failing: Vec<TestResult>,
    pub outliers: Vec<TestResult>,
    pub diagnostics: JsonDiagnostics,
}

impl JsonDiagnostics {
    pub fn from_store(store: &TestResultStore) -> Self {
        let diag = store.diagnostics();
        Self {
            records: diag
                .records_by_kind
                .iter()
                .map(|(kind, count)| JsonRecordCount {
                    kind: kind.abbrev().to_string(),
                    code: kind.code(),
                    count: *count,
                })
                .collect(),
            short_payloads: diag.short_payloads,
            unrecognized: diag.unrecognized,
            truncated: diag.truncated,
        }
    }
}

impl JsonParseOutput {
    pub fn new(file: impl Into<String>, store: &TestResultStore) -> Self {
        Self {
            file: file.into(),
            file_info: store.file_info(),
            statistics: store.summary(),
            diagnostics: JsonDiagnostics::from_store(store),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl JsonAnalysisOutput {
    pub fn new(file: impl Into<String>, analyzer: &Analyzer<'_>, sigma: f64) -> Self {
        let store = analyzer.store();
        let tests = analyzer
            .analyze_by_test()
            .into_iter()
            .map(|(test_num, summary)| JsonTestStatistics {
                test_num,
                summary,
                cpk: analyzer.calculate_cpk(test_num),
            })
            .collect();

        Self {
            file: file.into(),
            total_tests: store.results().len(),
            yield_rate: analyzer.yield_rate(),
            sigma,
            tests,
            failing: analyzer.failing_tests().into_iter().cloned().collect(),
            outliers: analyzer.find_outliers(sigma).into_iter().cloned().collect(),
            diagnostics: JsonDiagnostics::from_store(store),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
