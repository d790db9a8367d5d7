//! Human-readable summary and analysis reports

use crate::analysis::Analyzer;
use crate::store::TestResultStore;

/// Short pass/fail summary of a decoded file
pub fn summary_text(source: &str, store: &TestResultStore) -> String {
    let summary = store.summary();
    let rule = "=".repeat(50);

    let mut out = String::new();
    out.push('\n');
    out.push_str("STDF File Analysis Summary\n");
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("File: {}\n", source));
    out.push_str(&format!("Total Records: {}\n", summary.total_records));
    out.push_str(&format!("Total Tests: {}\n", summary.total_tests));
    out.push_str(&format!("Pass Count: {}\n", summary.pass_count));
    out.push_str(&format!("Fail Count: {}\n", summary.fail_count));
    out.push_str(&format!("Yield Rate: {:.2}%\n", summary.yield_rate));
    out.push_str(&format!("{}\n", rule));
    out
}

/// Full analysis report: per-test statistics, Cpk, failures and outliers
pub fn analysis_report(source: &str, analyzer: &Analyzer<'_>, sigma: f64) -> String {
    let store = analyzer.store();
    let analysis = analyzer.analyze_by_test();
    let failing = analyzer.failing_tests();
    let outliers = analyzer.find_outliers(sigma);
    let heavy = "=".repeat(60);
    let light = "-".repeat(60);

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{}\n", heavy));
    out.push_str("STDF Data Analysis Report\n");
    out.push_str(&format!("{}\n", heavy));
    out.push('\n');
    out.push_str(&format!("File: {}\n", source));
    out.push_str(&format!("Total Tests: {}\n", store.results().len()));
    out.push_str(&format!("Unique Test Numbers: {}\n", analysis.len()));
    out.push_str(&format!("Yield Rate: {:.2}%\n", analyzer.yield_rate()));
    out.push('\n');
    out.push_str("Test Statistics:\n");
    out.push_str(&format!("{}\n", light));

    for (test_num, stats) in &analysis {
        let cpk = analyzer.calculate_cpk(*test_num);
        out.push('\n');
        out.push_str(&format!("Test #{}:\n", test_num));
        out.push_str(&format!("  Count:    {}\n", stats.count));
        out.push_str(&format!("  Mean:     {:.4}\n", stats.mean));
        out.push_str(&format!("  Median:   {:.4}\n", stats.median));
        out.push_str(&format!("  Std Dev:  {:.4}\n", stats.stdev));
        out.push_str(&format!("  Min:      {:.4}\n", stats.min));
        out.push_str(&format!("  Max:      {:.4}\n", stats.max));
        out.push_str(&format!("  Cpk:      {:.2}\n", cpk));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", light));
    out.push_str(&format!("Failing Tests: {}\n", failing.len()));
    out.push_str(&format!("Outliers Detected: {} (>{}σ)\n", outliers.len(), sigma));
    out.push_str(&format!("{}\n", light));

    out.push_str(&record_breakdown(store));
    out
}

/// Record counts by kind plus skip counters
fn record_breakdown(store: &TestResultStore) -> String {
    let diag = store.diagnostics();
    let mut out = String::new();

    out.push('\n');
    out.push_str("Records by Kind:\n");
    for (kind, count) in &diag.records_by_kind {
        out.push_str(&format!("  {:<14} {:>9}\n", kind.to_string(), count));
    }
    out.push_str(&format!("Skipped (short payload): {}\n", diag.short_payloads));
    out.push_str(&format!("Not decoded:             {}\n", diag.unrecognized));
    if diag.truncated > 0 {
        out.push_str(&format!("⚠️  Truncated records:     {}\n", diag.truncated));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SampleGenerator;

    fn sample_store(tests: u32) -> TestResultStore {
        let bytes = SampleGenerator::with_seed(9).generate(tests).unwrap();
        TestResultStore::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_summary_text_fields() {
        let store = sample_store(10);
        let text = summary_text("lot7.stdf", &store);

        assert!(text.contains("STDF File Analysis Summary"));
        assert!(text.contains("File: lot7.stdf"));
        assert!(text.contains("Total Records: 13"));
        assert!(text.contains("Total Tests: 10"));
        assert!(text.contains("Yield Rate: 100.00%"));
    }

    #[test]
    fn test_summary_text_empty_store() {
        let text = summary_text("empty.stdf", &TestResultStore::new());
        assert!(text.contains("Total Tests: 0"));
        assert!(text.contains("Yield Rate: 0.00%"));
    }

    #[test]
    fn test_analysis_report_sections() {
        let store = sample_store(3);
        let analyzer = Analyzer::new(&store);
        let report = analysis_report("lot7.stdf", &analyzer, 3.0);

        assert!(report.contains("STDF Data Analysis Report"));
        assert!(report.contains("Test Statistics"));
        assert!(report.contains("Unique Test Numbers: 3"));
        assert!(report.contains("Test #1:"));
        assert!(report.contains("Test #3:"));
        assert!(report.contains("Cpk:      0.00"));
        assert!(report.contains("Failing Tests: 0"));
        assert!(report.contains("Outliers Detected: 0"));
        assert!(report.contains("PTR (0x0F05)"));
    }

    #[test]
    fn test_analysis_report_tests_in_ascending_order() {
        let store = sample_store(12);
        let report = analysis_report("x", &Analyzer::new(&store), 3.0);
        let pos2 = report.find("Test #2:").unwrap();
        let pos10 = report.find("Test #10:").unwrap();
        assert!(pos2 < pos10);
    }
}
