//! Detector configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default size of the centered extremum window and the lookback distance
pub const DEFAULT_WINDOW_SIZE: usize = 21;

/// Default fraction applied to the current best case
pub const DEFAULT_TOLERANCE: f64 = 0.95;

/// Which way a benchmark result gets worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger results are slower, e.g. wall-clock time or peak memory
    #[default]
    HigherIsWorse,
    /// Larger results are faster, e.g. throughput
    HigherIsBetter,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::HigherIsWorse => write!(f, "higher is worse"),
            Direction::HigherIsBetter => write!(f, "higher is better"),
        }
    }
}

/// Parameters for windowed regression detection
///
/// Missing fields deserialize to their defaults, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParameters {
    /// Size of the centered window, also the lookback distance (odd)
    pub window_size: usize,

    /// Fraction of the current best case the lagged worst case must beat
    pub tolerance: f64,

    /// Comparison direction
    pub direction: Direction,
}

impl Default for DetectorParameters {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            direction: Direction::HigherIsWorse,
        }
    }
}

impl DetectorParameters {
    /// Create validated parameters
    pub fn new(window_size: usize, tolerance: f64) -> Result<Self> {
        let params = Self {
            window_size,
            tolerance,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Half the window, rounded down: the centering lag
    pub fn half_window(&self) -> usize {
        self.window_size / 2
    }

    /// Check that the window is a positive odd integer and the tolerance
    /// lies in (0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size % 2 == 0 {
            return Err(Error::invalid_window(self.window_size));
        }
        if !(self.tolerance > 0.0 && self.tolerance <= 1.0) {
            return Err(Error::invalid_tolerance(self.tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = DetectorParameters::default();
        assert_eq!(params.window_size, 21);
        assert_eq!(params.tolerance, 0.95);
        assert_eq!(params.direction, Direction::HigherIsWorse);
        assert_eq!(params.half_window(), 10);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_window_validation() {
        assert!(DetectorParameters::new(0, 0.95).is_err());
        assert!(DetectorParameters::new(20, 0.95).is_err());
        assert!(DetectorParameters::new(1, 0.95).is_ok());
        assert!(DetectorParameters::new(5, 0.95).is_ok());
    }

    #[test]
    fn test_tolerance_validation() {
        assert!(DetectorParameters::new(21, 0.0).is_err());
        assert!(DetectorParameters::new(21, -0.5).is_err());
        assert!(DetectorParameters::new(21, 1.0001).is_err());
        assert!(DetectorParameters::new(21, f64::NAN).is_err());
        assert!(DetectorParameters::new(21, 1.0).is_ok());
        assert!(DetectorParameters::new(21, 1e-9).is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let params: DetectorParameters =
            serde_json::from_str(r#"{"window_size": 11, "direction": "higher_is_better"}"#).unwrap();
        assert_eq!(params.window_size, 11);
        assert_eq!(params.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(params.direction, Direction::HigherIsBetter);

        let params: DetectorParameters = serde_json::from_str(r#"{"tolerance": 0.9}"#).unwrap();
        assert_eq!(params.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(params.direction, Direction::HigherIsWorse);
        assert!(params.validate().is_ok());

        let params: DetectorParameters = serde_json::from_str(r#"{"window_size": 10}"#).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::HigherIsWorse.to_string(), "higher is worse");
        assert_eq!(Direction::HigherIsBetter.to_string(), "higher is better");
    }
}
