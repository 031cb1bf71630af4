//! Core types for benchmark regression detection
//!
//! This crate holds what every stepwatch crate shares: the benchmark
//! sample data model, the detector parameters, the error type, and the
//! execution engines used to fan work out over independent series.
//!
//! # Example
//!
//! ```rust
//! use stepwatch_core::{BenchmarkSample, DetectorParameters, Direction};
//!
//! let params = DetectorParameters::default()
//!     .with_window_size(11)
//!     .with_direction(Direction::HigherIsWorse);
//! params.validate().unwrap();
//!
//! let sample = BenchmarkSample::new(0, "abc123", "groupby.Sum", "n=10", Some(0.25));
//! assert_eq!(sample.series_key().to_string(), "groupby.Sum(n=10)");
//! ```

pub mod error;
pub mod execution;
pub mod params;
pub mod types;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{auto_engine, sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use params::{DetectorParameters, Direction, DEFAULT_TOLERANCE, DEFAULT_WINDOW_SIZE};
pub use types::{AnnotatedSample, BenchmarkSample, RegressionAnnotation, SeriesKey};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{
        AnnotatedSample, BenchmarkSample, DetectorParameters, Direction, ExecutionEngine,
        RegressionAnnotation, Result, SequentialEngine,
    };
}
