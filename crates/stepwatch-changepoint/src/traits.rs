//! Core traits for regression detection
//!
//! A detector works on one series at a time: a slice of results already
//! stripped of missing values and ordered by date. The table pipeline in
//! [`crate::table`] handles partitioning and reassembly, so anything that
//! implements [`SeriesAnnotator`] can be plugged into it.

use crate::types::ChangePointResult;
use stepwatch_core::{RegressionAnnotation, Result};

/// Properties of a changepoint detector
pub trait ChangePointDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Get the minimum series length at which a detection is possible
    ///
    /// Shorter series are not an error; they simply never produce a flag.
    fn minimum_sample_size(&self) -> usize;
}

/// Per-sample annotation of a single ordered series
pub trait SeriesAnnotator: ChangePointDetectorProperties {
    /// Annotate every position of `series`, returning one entry per value
    fn annotate(&self, series: &[f64]) -> Result<Vec<RegressionAnnotation>>;
}

/// Trait for simple detectors that don't need external estimators
pub trait SimpleDetector: ChangePointDetectorProperties {
    /// Detect regression onsets in an ordered series
    fn detect_simple(&self, series: &[f64]) -> Result<ChangePointResult>;
}

/// Configuration access for detectors
pub trait ConfigurableDetector: Sized {
    type Parameters;

    /// Build a detector, validating the parameters
    fn with_parameters(params: Self::Parameters) -> Result<Self>;
    fn parameters(&self) -> &Self::Parameters;
    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()>;
}
