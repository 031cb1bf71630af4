//! Types used for changepoint detection

use std::fmt;

/// Represents a detected regression onset within one series
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePoint {
    /// Position in the series where the regression started
    pub index: usize,
    /// Relative change from the previous sample
    pub pct_change: Option<f64>,
    /// Absolute change from the previous sample
    pub abs_change: Option<f64>,
}

impl ChangePoint {
    /// Create a new changepoint
    pub fn new(index: usize, pct_change: Option<f64>, abs_change: Option<f64>) -> Self {
        Self {
            index,
            pct_change,
            abs_change,
        }
    }
}

impl fmt::Display for ChangePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.pct_change, self.abs_change) {
            (Some(pct), Some(abs)) => write!(
                f,
                "ChangePoint {{ index: {}, pct_change: {:.3}, abs_change: {:.3} }}",
                self.index, pct, abs
            ),
            _ => write!(f, "ChangePoint {{ index: {} }}", self.index),
        }
    }
}

/// Result of changepoint detection over one series
#[derive(Debug, Clone)]
pub struct ChangePointResult {
    /// List of detected changepoints
    changepoints: Vec<ChangePoint>,
    /// Algorithm used for detection
    algorithm: String,
    /// Total number of data points analyzed
    sample_size: usize,
}

impl ChangePointResult {
    /// Create a new changepoint result
    pub fn new(changepoints: Vec<ChangePoint>, algorithm: String, sample_size: usize) -> Self {
        Self {
            changepoints,
            algorithm,
            sample_size,
        }
    }

    /// Get the detected changepoints
    pub fn changepoints(&self) -> &[ChangePoint] {
        &self.changepoints
    }

    /// Get the number of detected changepoints
    pub fn count(&self) -> usize {
        self.changepoints.len()
    }

    /// Check if any changepoints were detected
    pub fn has_changepoints(&self) -> bool {
        !self.changepoints.is_empty()
    }

    /// Get the algorithm name used for detection
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Get the sample size that was analyzed
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Get the changepoint with the largest relative change
    pub fn most_severe(&self) -> Option<&ChangePoint> {
        self.changepoints
            .iter()
            .filter(|cp| cp.pct_change.is_some_and(|p| !p.is_nan()))
            .max_by(|a, b| {
                let a = a.pct_change.unwrap_or(f64::NEG_INFINITY);
                let b = b.pct_change.unwrap_or(f64::NEG_INFINITY);
                a.total_cmp(&b)
            })
    }
}

impl fmt::Display for ChangePointResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ChangePoint Detection Result:")?;
        writeln!(f, "  Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Sample size: {}", self.sample_size)?;
        writeln!(f, "  Changepoints detected: {}", self.count())?;

        if !self.changepoints.is_empty() {
            writeln!(f, "  Detected changepoints:")?;
            for cp in &self.changepoints {
                writeln!(f, "    {}", cp)?;
            }
        }

        Ok(())
    }
}
