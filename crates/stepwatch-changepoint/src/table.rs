//! Table-level regression detection
//!
//! Partitions a table of benchmark samples into independent series keyed by
//! `(name, params)`, runs a [`SeriesAnnotator`] over each, and reassembles
//! one annotated row per retained sample, sorted by `(name, params, date)`.
//! Samples with a missing result are dropped before any series is built.

use crate::detector::WindowedRegressionDetector;
use crate::traits::SeriesAnnotator;
use stepwatch_core::{
    auto_engine, AnnotatedSample, BenchmarkSample, DetectorParameters, ExecutionEngine, Result,
    SeriesKey,
};
use tracing::{debug, instrument, trace};

/// One series: retained samples of a single `(name, params)` key in date order
#[derive(Debug, Clone)]
pub struct Series<'a> {
    key: SeriesKey<'a>,
    samples: Vec<&'a BenchmarkSample>,
    values: Vec<f64>,
}

impl<'a> Series<'a> {
    pub fn key(&self) -> SeriesKey<'a> {
        self.key
    }

    /// Samples in date order, ties kept in input order
    pub fn samples(&self) -> &[&'a BenchmarkSample] {
        &self.samples
    }

    /// Results aligned with [`Series::samples`]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split a table into date-ordered series, dropping missing results
///
/// Series come back ordered by key. The sort is stable, so samples with the
/// same date keep their input order.
pub fn partition_series(samples: &[BenchmarkSample]) -> Vec<Series<'_>> {
    let mut retained: Vec<(&BenchmarkSample, f64)> = samples
        .iter()
        .filter_map(|s| s.valid_result().map(|r| (s, r)))
        .collect();
    retained.sort_by(|(a, _), (b, _)| {
        a.series_key()
            .cmp(&b.series_key())
            .then(a.date.cmp(&b.date))
    });

    retained
        .chunk_by(|(a, _), (b, _)| a.series_key() == b.series_key())
        .map(|group| Series {
            key: group[0].0.series_key(),
            samples: group.iter().map(|&(s, _)| s).collect(),
            values: group.iter().map(|&(_, r)| r).collect(),
        })
        .collect()
}

/// Annotate one series
pub fn annotate_series<D: SeriesAnnotator>(
    series: &Series<'_>,
    detector: &D,
) -> Result<Vec<AnnotatedSample>> {
    let annotations = detector.annotate(series.values())?;
    let rows: Vec<AnnotatedSample> = series
        .samples()
        .iter()
        .zip(series.values())
        .zip(annotations)
        .map(|((sample, &result), annotation)| AnnotatedSample::new(sample, result, annotation))
        .collect();

    let flagged = rows.iter().filter(|r| r.is_regression()).count();
    if flagged > 0 {
        trace!(series = %series.key(), samples = series.len(), flagged, "regressions in series");
    }
    Ok(rows)
}

/// Annotate a whole table with any series annotator and execution engine
#[instrument(skip_all, fields(rows = samples.len(), algorithm = detector.algorithm_name()))]
pub fn annotate_table<D, E>(
    samples: &[BenchmarkSample],
    detector: &D,
    engine: &E,
) -> Result<Vec<AnnotatedSample>>
where
    D: SeriesAnnotator + Sync,
    E: ExecutionEngine,
{
    let series = partition_series(samples);
    let retained: usize = series.iter().map(Series::len).sum();
    debug!(
        series = series.len(),
        dropped = samples.len() - retained,
        parallel = engine.is_parallel(),
        "partitioned benchmark table"
    );

    let per_series = engine.execute_batch(series.len(), |i| annotate_series(&series[i], detector));

    let mut out = Vec::with_capacity(retained);
    for rows in per_series {
        out.extend(rows?);
    }

    debug!(
        rows = out.len(),
        regressions = out.iter().filter(|r| r.is_regression()).count(),
        "annotated benchmark table"
    );
    Ok(out)
}

/// Detect regressions over a whole table with the windowed detector
///
/// Uses the engine selected by the enabled features.
pub fn detect_table(
    samples: &[BenchmarkSample],
    params: &DetectorParameters,
) -> Result<Vec<AnnotatedSample>> {
    detect_table_with(samples, params, &auto_engine())
}

/// Detect regressions over a whole table on an explicit engine
pub fn detect_table_with<E: ExecutionEngine>(
    samples: &[BenchmarkSample],
    params: &DetectorParameters,
    engine: &E,
) -> Result<Vec<AnnotatedSample>> {
    let detector = WindowedRegressionDetector::new(*params)?;
    annotate_table(samples, &detector, engine)
}
