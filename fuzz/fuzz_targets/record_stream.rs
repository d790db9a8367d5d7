#![no_main]

use libfuzzer_sys::fuzz_target;
use stdfscope::analysis::Analyzer;
use stdfscope::store::TestResultStore;

fuzz_target!(|data: &[u8]| {
    // In-memory streams never fail; malformed records are skipped
    let store = TestResultStore::from_bytes(data).expect("in-memory decode");

    let analyzer = Analyzer::new(&store);
    let _ = analyzer.analyze_by_test();
    let _ = analyzer.find_outliers(3.0);
    let _ = analyzer.yield_rate();
});
