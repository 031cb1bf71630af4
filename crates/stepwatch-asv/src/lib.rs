//! airspeed velocity (asv) integration
//!
//! Reads asv result directories into benchmark samples, picks the next
//! commit to benchmark, and turns an annotated table into per-commit
//! regression reports.
//!
//! # Example
//!
//! ```rust,ignore
//! use stepwatch_asv::{load_results_dir, RegressionReport, ReportLinks, ReportOptions};
//! use stepwatch_changepoint::detect_table;
//! use stepwatch_core::DetectorParameters;
//!
//! let samples = load_results_dir("asv-runner", "asvrunner")?;
//! let annotated = detect_table(&samples, &DetectorParameters::default())?;
//! let report = RegressionReport::build(&annotated, ReportOptions::default())?;
//! for issue in report.render_markdown(&ReportLinks::new(compare, dashboard)) {
//!     println!("{}\n{}", issue.title, issue.body);
//! }
//! ```

mod error;
pub mod ingest;
pub mod report;
pub mod schedule;

pub use error::{Error, Result};
pub use ingest::{load_results_dir, parse_result_file, BenchmarkIndex};
pub use report::{
    commit_range, format_duration, format_severity, CommitRegressions, FlaggedBenchmark,
    RegressionReport, RenderedIssue, ReportLinks, ReportOptions,
};
pub use schedule::{benchmarked_commits, next_commit_to_run, parse_commit_list, parse_oneline_log};
