//! Ingestion of airspeed velocity (asv) result files
//!
//! An asv results directory holds a `benchmarks.json` describing every
//! benchmark and one subdirectory per machine with one JSON file per
//! measured commit. Each benchmark's results are laid out over the
//! cartesian product of its parameter values.

use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use stepwatch_core::BenchmarkSample;
use tracing::{debug, instrument, trace};

/// Parameter names of every known benchmark, read from `benchmarks.json`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkIndex {
    param_names: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct BenchmarkEntry {
    #[serde(default)]
    param_names: Vec<String>,
}

impl BenchmarkIndex {
    /// Parse the contents of an asv `benchmarks.json`
    pub fn from_json(json: &str) -> Result<Self> {
        let document: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let mut param_names = BTreeMap::new();
        for (name, entry) in document {
            if name == "version" {
                continue;
            }
            let entry: BenchmarkEntry = serde_json::from_value(entry)?;
            param_names.insert(name, entry.param_names);
        }
        Ok(Self { param_names })
    }

    pub fn insert(&mut self, name: impl Into<String>, param_names: Vec<String>) {
        self.param_names.insert(name.into(), param_names);
    }

    pub fn param_names(&self, benchmark: &str) -> Option<&[String]> {
        self.param_names.get(benchmark).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.param_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.param_names.is_empty()
    }
}

#[derive(Deserialize)]
struct ResultFile {
    commit_hash: String,
    /// Milliseconds since the epoch
    date: i64,
    result_columns: Vec<String>,
    results: BTreeMap<String, Vec<Value>>,
}

/// Render one parameter value the way asv stores it
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Row-major cartesian product of the parameter value lists
fn combinations(names: &[String], values: &[Vec<String>]) -> Vec<String> {
    let mut rendered = vec![Vec::new()];
    for (name, choices) in names.iter().zip(values) {
        rendered = rendered
            .into_iter()
            .flat_map(|prefix: Vec<String>| {
                choices.iter().map(move |choice| {
                    let mut next = prefix.clone();
                    next.push(format!("{name}={choice}"));
                    next
                })
            })
            .collect();
    }
    rendered.into_iter().map(|parts| parts.join(", ")).collect()
}

fn parse_benchmark(
    index: &BenchmarkIndex,
    name: &str,
    columns: &[String],
    row: Vec<Value>,
) -> Result<Vec<(String, Option<f64>)>> {
    let param_names = index
        .param_names(name)
        .ok_or_else(|| Error::UnknownBenchmark(name.to_string()))?;
    let fields: BTreeMap<&str, Value> = columns.iter().map(String::as_str).zip(row).collect();

    let param_values: Vec<Vec<String>> = match fields.get("params") {
        Some(Value::Array(lists)) => lists
            .iter()
            .map(|list| match list {
                Value::Array(values) => Ok(values.iter().map(render_value).collect()),
                other => Err(Error::InvalidInput(format!(
                    "{name}: parameter values must be a list, got {other}"
                ))),
            })
            .collect::<Result<_>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "{name}: params must be a list, got {other}"
            )))
        }
    };
    if param_values.len() != param_names.len() {
        return Err(Error::InvalidInput(format!(
            "{name}: {} parameter names but {} value lists",
            param_names.len(),
            param_values.len()
        )));
    }
    let params = combinations(param_names, &param_values);

    let results: Vec<Option<f64>> = match fields.get("result") {
        Some(Value::Array(values)) => values.iter().map(Value::as_f64).collect(),
        Some(Value::Number(n)) => vec![n.as_f64()],
        // A benchmark that failed outright has no result array
        Some(Value::Null) | None => vec![None; params.len()],
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "{name}: result must be a list, got {other}"
            )))
        }
    };
    if results.len() != params.len() {
        return Err(Error::InvalidInput(format!(
            "{name}: {} results for {} parameter combinations",
            results.len(),
            params.len()
        )));
    }

    Ok(params.into_iter().zip(results).collect())
}

/// Parse one asv result file into benchmark samples
///
/// Every benchmark contributes one sample per parameter combination, with
/// params rendered as `"k1=v1, k2=v2"`. `null` results become `None`.
pub fn parse_result_file(index: &BenchmarkIndex, json: &str) -> Result<Vec<BenchmarkSample>> {
    let file: ResultFile = serde_json::from_str(json)?;
    let date = file
        .date
        .checked_mul(1000)
        .ok_or_else(|| Error::InvalidInput(format!("date {} out of range", file.date)))?;

    let mut samples = Vec::new();
    for (name, row) in file.results {
        let rows = parse_benchmark(index, &name, &file.result_columns, row)?;
        trace!(benchmark = %name, rows = rows.len(), "parsed benchmark results");
        samples.extend(rows.into_iter().map(|(params, result)| {
            BenchmarkSample::new(date, file.commit_hash.as_str(), name.as_str(), params, result)
        }));
    }
    Ok(samples)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

/// Load the result files one machine recorded under `<root>/results`
///
/// Reads `results/benchmarks.json`, then each `*.json` file (except
/// `machine.json`) in `results/<machine>`, in sorted path order. Other
/// machines are never read.
#[instrument(skip_all, fields(root = %root.as_ref().display(), machine = %machine))]
pub fn load_results_dir(root: impl AsRef<Path>, machine: &str) -> Result<Vec<BenchmarkSample>> {
    let results_dir = root.as_ref().join("results");
    let index_path = results_dir.join("benchmarks.json");
    let index = fs::read_to_string(&index_path)
        .map_err(Error::from)
        .and_then(|json| BenchmarkIndex::from_json(&json))
        .map_err(|e| e.in_file(&index_path))?;

    let mut samples = Vec::new();
    let mut files = 0usize;
    let machine_dir = results_dir.join(machine);
    for path in sorted_entries(&machine_dir).map_err(|e| e.in_file(&machine_dir))? {
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let is_machine = path.file_name().is_some_and(|f| f == "machine.json");
        if !is_json || is_machine {
            continue;
        }
        let rows = fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|json| parse_result_file(&index, &json))
            .map_err(|e| e.in_file(&path))?;
        samples.extend(rows);
        files += 1;
    }

    debug!(
        benchmarks = index.len(),
        files,
        samples = samples.len(),
        "loaded asv results"
    );
    Ok(samples)
}
