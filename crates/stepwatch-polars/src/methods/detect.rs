//! Regression detection over DataFrames

use super::frame::{frame_from_annotated, samples_from_frame};
use crate::{ColumnNames, Error, RegressionDetectExt, Result};
use polars::prelude::*;
use stepwatch_changepoint::detect_table;
use stepwatch_core::DetectorParameters;
use tracing::{debug, instrument};

impl RegressionDetectExt for DataFrame {
    #[instrument(skip_all, fields(rows = self.height(), window = params.window_size))]
    fn detect_regressions_with_columns(
        &self,
        columns: &ColumnNames,
        params: &DetectorParameters,
    ) -> Result<DataFrame> {
        params.validate()?;

        for column in columns.inputs() {
            if self.column(column).is_err() {
                return Err(Error::InvalidColumn(format!(
                    "missing required column '{column}'"
                )));
            }
        }
        let date_dtype = self.column(&columns.date)?.dtype().clone();

        let samples = samples_from_frame(self, columns)?;
        let annotated = detect_table(&samples, params)?;
        debug!(
            rows_in = samples.len(),
            rows_out = annotated.len(),
            "converted annotated rows back to a DataFrame"
        );

        frame_from_annotated(&annotated, columns, &date_dtype)
    }
}
