//! Data model shared by the detector and its collaborators

use serde::{Deserialize, Serialize};
use std::fmt;

/// One benchmark measurement
///
/// `date` is a timestamp in microseconds since the Unix epoch. A `None` (or
/// NaN) `result` marks a benchmark that failed or did not run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    /// Timestamp of the measured commit, microseconds since the epoch
    pub date: i64,
    /// Opaque identity of the measured code version
    pub commit_id: String,
    /// Benchmark identifier
    pub name: String,
    /// Rendered parameter combination, empty for parameterless benchmarks
    pub params: String,
    /// Measured value, larger is slower by default
    pub result: Option<f64>,
}

impl BenchmarkSample {
    /// Create a new sample
    pub fn new(
        date: i64,
        commit_id: impl Into<String>,
        name: impl Into<String>,
        params: impl Into<String>,
        result: Option<f64>,
    ) -> Self {
        Self {
            date,
            commit_id: commit_id.into(),
            name: name.into(),
            params: params.into(),
            result,
        }
    }

    /// The usable result, treating NaN like a missing value
    pub fn valid_result(&self) -> Option<f64> {
        self.result.filter(|r| !r.is_nan())
    }

    /// Key of the series this sample belongs to
    pub fn series_key(&self) -> SeriesKey<'_> {
        SeriesKey {
            name: &self.name,
            params: &self.params,
        }
    }
}

/// Identity of a series: all samples sharing a benchmark name and params
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey<'a> {
    pub name: &'a str,
    pub params: &'a str,
}

impl fmt::Display for SeriesKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.params)
        }
    }
}

/// Derived columns attached to every retained sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegressionAnnotation {
    /// Worst value in the centered window (max when higher is worse)
    pub established_worst: Option<f64>,
    /// Best value in the centered window (min when higher is worse)
    pub established_best: Option<f64>,
    /// Whether a regression episode starts at this sample
    pub is_regression: bool,
    /// Relative change from the previous sample of the series
    pub pct_change: Option<f64>,
    /// Absolute change from the previous sample of the series
    pub abs_change: Option<f64>,
}

/// A sample with a present result and its regression annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSample {
    pub date: i64,
    pub commit_id: String,
    pub name: String,
    pub params: String,
    pub result: f64,
    #[serde(flatten)]
    pub annotation: RegressionAnnotation,
}

impl AnnotatedSample {
    /// Attach an annotation to a sample whose result is known to be present
    pub fn new(sample: &BenchmarkSample, result: f64, annotation: RegressionAnnotation) -> Self {
        Self {
            date: sample.date,
            commit_id: sample.commit_id.clone(),
            name: sample.name.clone(),
            params: sample.params.clone(),
            result,
            annotation,
        }
    }

    /// Key of the series this sample belongs to
    pub fn series_key(&self) -> SeriesKey<'_> {
        SeriesKey {
            name: &self.name,
            params: &self.params,
        }
    }

    /// Shorthand for `annotation.is_regression`
    pub fn is_regression(&self) -> bool {
        self.annotation.is_regression
    }
}

impl fmt::Display for AnnotatedSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} = {}",
            self.series_key(),
            self.commit_id,
            self.result
        )?;
        if self.annotation.is_regression {
            write!(f, " [regression")?;
            if let Some(pct) = self.annotation.pct_change {
                write!(f, " {:+.3}%", pct * 100.0)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
