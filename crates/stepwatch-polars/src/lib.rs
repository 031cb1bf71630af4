//! Polars integration for benchmark regression detection
//!
//! A single extension trait turns a benchmark table held in a Polars
//! `DataFrame` into the annotated table produced by the windowed detector.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use stepwatch_core::DetectorParameters;
//! use stepwatch_polars::RegressionDetectExt;
//!
//! let df = df![
//!     "date" => (0..42i64).collect::<Vec<_>>(),
//!     "commit_id" => (0..42).map(|i| format!("{i:07x}")).collect::<Vec<_>>(),
//!     "name" => vec!["time_join"; 42],
//!     "params" => vec![""; 42],
//!     "result" => (0..42).map(|i| if i < 21 { 10.0 } else { 30.0 }).collect::<Vec<_>>(),
//! ]?;
//!
//! let annotated = df.detect_regressions(&DetectorParameters::default())?;
//! ```

mod config;
mod error;
mod methods;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use methods::{frame_from_annotated, samples_from_frame};
pub use traits::*;

pub use polars::prelude::{DataFrame, DataType};
pub use stepwatch_core::{DetectorParameters, Direction};
