//! Common test utilities for stepwatch-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// One day in microseconds
pub const DAY: i64 = 86_400_000_000;

/// Build a single-series benchmark table with one sample per day
pub fn series_df(name: &str, params: &str, values: &[Option<f64>]) -> DataFrame {
    let n = values.len();
    df![
        "date" => (0..n as i64).map(|i| i * DAY).collect::<Vec<_>>(),
        "commit_id" => (0..n).map(|i| format!("{name}-{i:04}")).collect::<Vec<_>>(),
        "name" => vec![name; n],
        "params" => vec![params; n],
        "result" => values,
    ]
    .unwrap()
}

/// A step from `low` to `high` after `before` samples
pub fn step(before: usize, low: f64, after: usize, high: f64) -> Vec<Option<f64>> {
    let mut values = vec![Some(low); before];
    values.extend(std::iter::repeat(Some(high)).take(after));
    values
}

/// Row positions flagged as regressions
pub fn flagged(df: &DataFrame) -> Vec<usize> {
    df.column("is_regression")
        .unwrap()
        .bool()
        .unwrap()
        .into_iter()
        .enumerate()
        .filter(|(_, flag)| flag.unwrap_or(false))
        .map(|(i, _)| i)
        .collect()
}

/// Extract a float column with its nulls
pub fn floats(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column).unwrap().f64().unwrap().into_iter().collect()
}

/// Extract a string column, nulls rendered as "<null>"
pub fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or("<null>").to_string())
        .collect()
}
