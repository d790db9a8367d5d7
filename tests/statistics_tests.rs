//! Statistics engine behavior on decoded stores

mod utils;

use stdfscope::analysis::{Analyzer, DEFAULT_SIGMA};
use stdfscope::generator::SampleGenerator;
use stdfscope::store::TestResultStore;
use utils::ptr_stream;

fn store(data: &[(u32, f32)]) -> TestResultStore {
    TestResultStore::from_bytes(&ptr_stream(data)).unwrap()
}

#[test]
fn test_every_single_sample_group_has_zero_stdev() {
    let store = store(&[(1, 0.5), (2, 4.5), (3, 2.0), (4, 9.0)]);
    for (test_num, summary) in Analyzer::new(&store).analyze_by_test() {
        assert_eq!(summary.count, 1, "test {}", test_num);
        assert_eq!(summary.stdev, 0.0, "test {}", test_num);
        assert_eq!(summary.min, summary.max);
    }
}

#[test]
fn test_groups_of_one_or_two_never_produce_outliers() {
    let store = store(&[
        (1, 0.0),
        (2, -100.0),
        (2, 100.0),
        (3, 1.0),
        (3, 1.0),
        (3, 1.0),
    ]);
    let analyzer = Analyzer::new(&store);

    for sigma in [0.001, 0.5, 1.0, DEFAULT_SIGMA] {
        assert!(analyzer.find_outliers(sigma).is_empty(), "sigma {}", sigma);
    }
}

#[test]
fn test_outliers_in_group_then_member_order() {
    let mut data = Vec::new();
    for _ in 0..10 {
        data.push((9, 1.0));
        data.push((4, 1.0));
    }
    data.push((9, 50.0));
    data.push((4, -50.0));
    let store = store(&data);

    let outliers = Analyzer::new(&store).find_outliers(2.0);
    let flagged: Vec<_> = outliers.iter().map(|r| (r.test_num, r.result)).collect();
    assert_eq!(flagged, vec![(4, -50.0), (9, 50.0)]);
}

#[test]
fn test_lower_sigma_flags_more() {
    let store = store(&[(1, 1.0), (1, 1.1), (1, 0.9), (1, 1.0), (1, 1.5), (1, 0.4)]);
    let analyzer = Analyzer::new(&store);
    assert!(analyzer.find_outliers(1.0).len() >= analyzer.find_outliers(3.0).len());
    assert!(!analyzer.find_outliers(1.0).is_empty());
}

#[test]
fn test_cpk_degenerate_cases() {
    let store = store(&[(1, 2.0), (2, 3.0), (2, 3.0), (2, 3.0)]);
    let analyzer = Analyzer::new(&store);

    assert_eq!(analyzer.calculate_cpk(1), 0.0);
    assert_eq!(analyzer.calculate_cpk(2), 0.0);
    assert_eq!(analyzer.calculate_cpk(404), 0.0);
}

#[test]
fn test_cpk_negative_when_mean_outside_limits() {
    let store = store(&[(1, 6.0), (1, 7.0), (1, 8.0)]);
    assert!(Analyzer::new(&store).calculate_cpk(1) < 0.0);
}

#[test]
fn test_cpk_uses_only_requested_test() {
    let store = store(&[(1, 2.0), (1, 3.0), (2, 0.1), (2, 4.9)]);
    let analyzer = Analyzer::new(&store);
    // mean 2.5, stdev sqrt(0.5)
    let expected = 2.5 / (3.0 * 0.5f64.sqrt());
    assert!((analyzer.calculate_cpk(1) - expected).abs() < 1e-9);
}

#[test]
fn test_failing_tests_and_yield() {
    let store = store(&[(1, 5.5), (2, 2.0), (3, -0.5), (4, 5.0), (5, 0.0)]);
    let analyzer = Analyzer::new(&store);

    let failing: Vec<_> = analyzer.failing_tests().iter().map(|r| r.test_num).collect();
    assert_eq!(failing, vec![1, 3]);
    assert!((analyzer.yield_rate() - 60.0).abs() < 1e-12);
}

#[test]
fn test_empty_store_queries() {
    let store = TestResultStore::new();
    let analyzer = Analyzer::new(&store);

    assert_eq!(analyzer.yield_rate(), 0.0);
    assert!(analyzer.analyze_by_test().is_empty());
    assert!(analyzer.find_outliers(DEFAULT_SIGMA).is_empty());
    assert!(analyzer.failing_tests().is_empty());
    assert_eq!(analyzer.calculate_cpk(1), 0.0);
}

#[test]
fn test_queries_are_repeatable() {
    let bytes = SampleGenerator::with_seed(99).generate(30).unwrap();
    let store = TestResultStore::from_bytes(&bytes).unwrap();
    let analyzer = Analyzer::new(&store);

    assert_eq!(analyzer.analyze_by_test(), analyzer.analyze_by_test());
    assert_eq!(analyzer.find_outliers(1.0), analyzer.find_outliers(1.0));
    assert_eq!(analyzer.yield_rate(), analyzer.yield_rate());
}

#[test]
fn test_concurrent_read_only_queries() {
    let bytes = SampleGenerator::with_seed(5).generate(40).unwrap();
    let store = TestResultStore::from_bytes(&bytes).unwrap();
    let expected = Analyzer::new(&store).analyze_by_test();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| Analyzer::new(&store).analyze_by_test()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
