//! Windowed changepoint detection of benchmark regressions
//!
//! This crate flags the points in a benchmark history where performance
//! stepped to a worse level and stayed there, as opposed to transient noise.
//! Every `(name, params)` series is handled independently.
//!
//! # Algorithm
//!
//! - **Extremum tracking**: centered sliding-window max and min of the
//!   results ("established worst" and "established best").
//! - **Transition detection**: a regression candidate is any position whose
//!   best case, scaled by the tolerance, is still worse than the worst case
//!   seen a full window earlier. Runs of candidates collapse to their first
//!   position, which then shifts back by half a window to land on the commit
//!   that introduced the step.
//! - **Change quantification**: relative and absolute change from the
//!   previous sample, attached to every row.
//!
//! ## Usage
//!
//! ```rust
//! use stepwatch_changepoint::{SimpleDetector, WindowedRegressionDetector};
//!
//! // 21 fast runs followed by 21 slow ones
//! let data: Vec<f64> = (0..42).map(|i| if i < 21 { 10.0 } else { 30.0 }).collect();
//!
//! let detector = WindowedRegressionDetector::default();
//! let result = detector.detect_simple(&data).unwrap();
//!
//! assert_eq!(result.changepoints()[0].index, 21);
//! ```

pub mod change;
pub mod detector;
pub mod extremum;
pub mod table;
pub mod traits;
pub mod transition;
pub mod types;

pub use detector::WindowedRegressionDetector;

pub use traits::{
    ChangePointDetectorProperties, ConfigurableDetector, SeriesAnnotator, SimpleDetector,
};

pub use change::{quantify, Change};
pub use extremum::{centered_max, centered_min, track, Envelope, Extremum, SlidingExtremum};
pub use transition::{candidates, detect_transitions, onsets, realign};

pub use table::{
    annotate_series, annotate_table, detect_table, detect_table_with, partition_series, Series,
};
pub use types::{ChangePoint, ChangePointResult};
