//! Benchmark regression detection
//!
//! Flags the commits at which a benchmark's performance stepped to a worse
//! level and stayed there. This crate re-exports the workspace members:
//!
//! - [`changepoint`]: the windowed detector and the table pipeline
//! - [`asv`]: airspeed velocity ingestion, commit scheduling and reports
//! - [`polars`]: the `DataFrame` extension trait (feature `polars`)
//!
//! # Example
//!
//! ```rust
//! use stepwatch::prelude::*;
//!
//! let rows: Vec<BenchmarkSample> = (0..42)
//!     .map(|i| {
//!         let result = if i < 21 { 10.0 } else { 30.0 };
//!         BenchmarkSample::new(i, format!("{i:07x}"), "time_sort", "", Some(result))
//!     })
//!     .collect();
//!
//! let annotated = detect_table(&rows, &DetectorParameters::default()).unwrap();
//! let flagged: Vec<_> = annotated.iter().filter(|r| r.is_regression()).collect();
//! assert_eq!(flagged.len(), 1);
//! assert_eq!(flagged[0].commit_id, "0000015");
//! ```

pub use stepwatch_core::*;

pub use stepwatch_asv as asv;
pub use stepwatch_changepoint as changepoint;
#[cfg(feature = "polars")]
pub use stepwatch_polars as polars;

pub use stepwatch_changepoint::{detect_table, detect_table_with, WindowedRegressionDetector};

/// Commonly used items
pub mod prelude {
    pub use stepwatch_changepoint::{
        detect_table, detect_table_with, SeriesAnnotator, SimpleDetector,
        WindowedRegressionDetector,
    };
    pub use stepwatch_core::prelude::*;
    #[cfg(feature = "polars")]
    pub use stepwatch_polars::RegressionDetectExt;
}
