//! Windowed regression detector
//!
//! Runs the extremum tracker, the transition detector and the change
//! quantifier over one series and zips their outputs into per-sample
//! annotations.

use crate::change::quantify;
use crate::extremum::track;
use crate::traits::{
    ChangePointDetectorProperties, ConfigurableDetector, SeriesAnnotator, SimpleDetector,
};
use crate::transition::detect_transitions;
use crate::types::{ChangePoint, ChangePointResult};
use stepwatch_core::{DetectorParameters, RegressionAnnotation, Result};

/// Step-regression detector over centered extremum windows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedRegressionDetector {
    params: DetectorParameters,
}

impl WindowedRegressionDetector {
    /// Create a detector, rejecting invalid parameters
    pub fn new(params: DetectorParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Create a detector with the default window and tolerance
    pub fn default_parameters() -> Self {
        Self {
            params: DetectorParameters::default(),
        }
    }
}

impl ChangePointDetectorProperties for WindowedRegressionDetector {
    fn algorithm_name(&self) -> &'static str {
        "WindowedExtremum"
    }

    fn minimum_sample_size(&self) -> usize {
        // The lagged worst case needs W + W/2 positions behind it and the
        // current best case W/2 ahead of it.
        2 * self.params.window_size
    }
}

impl SeriesAnnotator for WindowedRegressionDetector {
    fn annotate(&self, series: &[f64]) -> Result<Vec<RegressionAnnotation>> {
        let envelope = track(series, &self.params);
        let flags = detect_transitions(&envelope, &self.params)?;
        let changes = quantify(series);

        Ok(envelope
            .worst
            .iter()
            .zip(&envelope.best)
            .zip(flags.iter().zip(&changes))
            .map(|((&worst, &best), (&is_regression, change))| RegressionAnnotation {
                established_worst: worst,
                established_best: best,
                is_regression,
                pct_change: change.pct,
                abs_change: change.abs,
            })
            .collect())
    }
}

impl SimpleDetector for WindowedRegressionDetector {
    fn detect_simple(&self, series: &[f64]) -> Result<ChangePointResult> {
        let changepoints = self
            .annotate(series)?
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_regression)
            .map(|(i, a)| ChangePoint::new(i, a.pct_change, a.abs_change))
            .collect();

        Ok(ChangePointResult::new(
            changepoints,
            self.algorithm_name().to_string(),
            series.len(),
        ))
    }
}

impl ConfigurableDetector for WindowedRegressionDetector {
    type Parameters = DetectorParameters;

    fn with_parameters(params: Self::Parameters) -> Result<Self> {
        Self::new(params)
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }
}

impl Default for WindowedRegressionDetector {
    fn default() -> Self {
        Self::default_parameters()
    }
}
