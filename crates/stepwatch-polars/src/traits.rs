//! Extension trait for regression detection on Polars DataFrames

use crate::{ColumnNames, Result};
use polars::prelude::*;
use stepwatch_core::DetectorParameters;

/// Extension trait for benchmark regression detection on Polars DataFrames
pub trait RegressionDetectExt {
    /// Annotate a benchmark table using the default column names
    ///
    /// # Arguments
    /// * `params` - Window size, tolerance and direction
    ///
    /// # Returns
    /// The input rows minus those with a missing result, sorted by
    /// `(name, params, date)`, with the derived regression columns appended
    fn detect_regressions(&self, params: &DetectorParameters) -> Result<DataFrame> {
        self.detect_regressions_with_columns(&ColumnNames::default(), params)
    }

    /// Annotate a benchmark table whose columns are named differently
    ///
    /// # Arguments
    /// * `columns` - Mapping from the detector's fields to column names
    /// * `params` - Window size, tolerance and direction
    fn detect_regressions_with_columns(
        &self,
        columns: &ColumnNames,
        params: &DetectorParameters,
    ) -> Result<DataFrame>;
}
