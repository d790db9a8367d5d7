//! stdfscope - decoder and yield analyzer for semiconductor test data
//!
//! This library splits a length-prefixed binary record stream into framed
//! records, decodes the header-info and parametric-test records into
//! measurements, and computes per-test statistics, process capability (Cpk),
//! sigma outliers and yield.
//!
//! # Example
//!
//! ```
//! use stdfscope::analysis::Analyzer;
//! use stdfscope::generator::SampleGenerator;
//! use stdfscope::store::TestResultStore;
//!
//! # fn main() -> stdfscope::error::Result<()> {
//! let bytes = SampleGenerator::with_seed(1).generate(10)?;
//! let store = TestResultStore::from_bytes(&bytes)?;
//! let analyzer = Analyzer::new(&store);
//!
//! assert_eq!(store.results().len(), 10);
//! assert_eq!(analyzer.yield_rate(), 100.0);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod decoder;
pub mod error;
pub mod generator;
pub mod json_output;
pub mod reader;
pub mod record;
pub mod report;
pub mod store;
