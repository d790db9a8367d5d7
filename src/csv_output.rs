//! CSV export of decoded test results
//!
//! One row per result in store order, for spreadsheet analysis.

use crate::decoder::TestResult;

const HEADER: &str = "Test Number,Test Name,Result,Unit,Low Limit,High Limit,Pass/Fail";

/// CSV output formatter for test results
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<String>,
}

impl CsvOutput {
    /// Create an empty CSV formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter pre-filled with `results`
    pub fn from_results(results: &[TestResult]) -> Self {
        let mut output = Self::new();
        for result in results {
            output.add_result(result);
        }
        output
    }

    /// Add a result row
    pub fn add_result(&mut self, result: &TestResult) {
        self.rows.push(Self::format_result(result));
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Float columns always carry a decimal point (`5.0`, not `5`)
    fn format_result(result: &TestResult) -> String {
        let fields = [
            result.test_num.to_string(),
            Self::escape_field(&result.test_name),
            format!("{:?}", result.result),
            Self::escape_field(&result.unit),
            format!("{:?}", result.low_limit),
            format!("{:?}", result.high_limit),
            if result.pass_fail { "PASS" } else { "FAIL" }.to_string(),
        ];
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::with_capacity(HEADER.len() + 1 + self.rows.len() * 40);
        output.push_str(HEADER);
        output.push('\n');

        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }

        output
    }
}
