//! Conversion between benchmark DataFrames and sample rows

use crate::{ColumnNames, Error, Result};
use polars::prelude::*;
use stepwatch_core::{AnnotatedSample, BenchmarkSample};

fn require<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column> {
    df.column(column)
        .map_err(|_| Error::InvalidColumn(format!("missing required column '{column}'")))
}

fn mismatch(column: &Column, expected: &str) -> Error {
    Error::TypeMismatch {
        column: column.name().to_string(),
        expected: expected.to_string(),
        got: column.dtype().to_string(),
    }
}

fn is_integer(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn missing(column: &Column, row: usize) -> Error {
    stepwatch_core::Error::missing_value(column.name().as_str(), row).into()
}

/// Physical timestamps of a Date, Datetime or integer column
fn date_values(column: &Column) -> Result<Vec<i64>> {
    match column.dtype() {
        DataType::Date | DataType::Datetime(_, _) => {}
        dtype if is_integer(dtype) => {}
        _ => return Err(mismatch(column, "Date, Datetime or integer")),
    }

    let physical = column.cast(&DataType::Int64)?;
    physical
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| value.ok_or_else(|| missing(column, row)))
        .collect()
}

fn result_values(column: &Column) -> Result<Vec<Option<f64>>> {
    match column.dtype() {
        DataType::Float64 => Ok(column.f64()?.into_iter().collect()),
        DataType::Float32 => {
            let float_column = column.cast(&DataType::Float64)?;
            Ok(float_column.f64()?.into_iter().collect())
        }
        dtype if is_integer(dtype) => {
            let float_column = column.cast(&DataType::Float64)?;
            Ok(float_column.f64()?.into_iter().collect())
        }
        _ => Err(mismatch(column, "float or integer")),
    }
}

/// String cells, failing on null unless a fallback is given
fn string_values(column: &Column, null_as: Option<&str>) -> Result<Vec<String>> {
    match (column.dtype(), null_as) {
        (DataType::String, _) => {}
        (DataType::Null, Some(fallback)) => {
            return Ok(vec![fallback.to_string(); column.len()]);
        }
        _ => return Err(mismatch(column, "String")),
    }

    column
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match (value, null_as) {
            (Some(v), _) => Ok(v.to_string()),
            (None, Some(fallback)) => Ok(fallback.to_string()),
            (None, None) => Err(missing(column, row)),
        })
        .collect()
}

/// Read a benchmark DataFrame into sample rows
///
/// `date` may be a `Date`, `Datetime` or any integer column and is carried
/// as its physical value widened to `i64`. `result` may be any float or integer column; null
/// results are kept as `None` for the pipeline to drop. A null `params`
/// cell reads as the empty string. Nulls in `date`, `commit_id` or `name`
/// are rejected.
pub fn samples_from_frame(df: &DataFrame, columns: &ColumnNames) -> Result<Vec<BenchmarkSample>> {
    let dates = date_values(require(df, &columns.date)?)?;
    let commits = string_values(require(df, &columns.commit_id)?, None)?;
    let names = string_values(require(df, &columns.name)?, None)?;
    let params = string_values(require(df, &columns.params)?, Some(""))?;
    let results = result_values(require(df, &columns.result)?)?;

    Ok(dates
        .into_iter()
        .zip(commits)
        .zip(names)
        .zip(params)
        .zip(results)
        .map(|((((date, commit_id), name), params), result)| BenchmarkSample {
            date,
            commit_id,
            name,
            params,
            result,
        })
        .collect())
}

fn string_column<'a>(name: &str, values: impl Iterator<Item = &'a str>) -> Column {
    Series::new(PlSmallStr::from(name), values.collect::<Vec<&str>>()).into()
}

fn float_column(name: &str, values: impl Iterator<Item = Option<f64>>) -> Column {
    Series::new(PlSmallStr::from(name), values.collect::<Vec<Option<f64>>>()).into()
}

/// Build the output DataFrame from annotated rows
///
/// The date column is cast back to `date_dtype` through its physical type,
/// so a `Datetime` input yields a `Datetime` output with the same unit and
/// time zone and a `Date` input stays a `Date`.
pub fn frame_from_annotated(
    rows: &[AnnotatedSample],
    columns: &ColumnNames,
    date_dtype: &DataType,
) -> Result<DataFrame> {
    let dates: Vec<i64> = rows.iter().map(|r| r.date).collect();
    let date = Series::new(PlSmallStr::from(columns.date.as_str()), dates)
        .cast(&date_dtype.to_physical())?
        .cast(date_dtype)?;

    let df = DataFrame::new(vec![
        date.into(),
        string_column(&columns.commit_id, rows.iter().map(|r| r.commit_id.as_str())),
        string_column(&columns.name, rows.iter().map(|r| r.name.as_str())),
        string_column(&columns.params, rows.iter().map(|r| r.params.as_str())),
        Series::new(
            PlSmallStr::from(columns.result.as_str()),
            rows.iter().map(|r| r.result).collect::<Vec<f64>>(),
        )
        .into(),
        float_column("established_worst", rows.iter().map(|r| r.annotation.established_worst)),
        float_column("established_best", rows.iter().map(|r| r.annotation.established_best)),
        Series::new(
            PlSmallStr::from("is_regression"),
            rows.iter().map(|r| r.annotation.is_regression).collect::<Vec<bool>>(),
        )
        .into(),
        float_column("pct_change", rows.iter().map(|r| r.annotation.pct_change)),
        float_column("abs_change", rows.iter().map(|r| r.annotation.abs_change)),
    ])?;
    Ok(df)
}
