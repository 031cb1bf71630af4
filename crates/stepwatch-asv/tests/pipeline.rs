//! From an asv results directory to rendered regression issues

use approx::assert_relative_eq;
use std::fs;
use std::path::Path;
use stepwatch_asv::{
    benchmarked_commits, load_results_dir, next_commit_to_run, Error, RegressionReport,
    ReportLinks, ReportOptions,
};
use stepwatch_changepoint::detect_table;
use stepwatch_core::{BenchmarkSample, DetectorParameters};

const DAY_MS: i64 = 86_400_000;

fn sha(i: usize) -> String {
    format!("{i:040x}")
}

fn write_index(root: &Path) {
    let results = root.join("results");
    fs::create_dir_all(&results).unwrap();
    fs::write(
        results.join("benchmarks.json"),
        r#"{
            "version": 2,
            "io.time_read": {"param_names": [], "unit": "seconds"},
            "join.time_merge": {"param_names": ["how"], "unit": "seconds"}
        }"#,
    )
    .unwrap();
}

/// Write one asv result file for commit `i` on `machine`
fn write_commit(root: &Path, machine: &str, i: usize, read: &str, left: f64) {
    let dir = root.join("results").join(machine);
    fs::create_dir_all(&dir).unwrap();
    let json = format!(
        r#"{{
            "commit_hash": "{}",
            "date": {},
            "result_columns": ["result", "params", "version"],
            "results": {{
                "io.time_read": [{read}, [], "v1"],
                "join.time_merge": [[{left}, 0.5], [["'left'", "'inner'"]], "v1"]
            }}
        }}"#,
        sha(i),
        1_700_000_000_000 + i as i64 * DAY_MS,
    );
    fs::write(dir.join(format!("{}-env.json", sha(i))), json).unwrap();
}

/// Write an asv layout with 44 commits on `runner`: `time_read` triples at
/// commit 21, the `how='left'` merge doubles at commit 21, everything else
/// stays flat
fn write_results(root: &Path) {
    write_index(root);
    let machine = root.join("results").join("runner");
    fs::create_dir_all(&machine).unwrap();
    fs::write(machine.join("machine.json"), r#"{"machine": "runner", "version": 1}"#).unwrap();
    fs::write(machine.join("notes.txt"), "not a result file").unwrap();

    for i in 0..44 {
        let read = if i < 21 { 0.010 } else { 0.030 };
        let left = if i < 21 { 1.0 } else { 2.0 };
        let read = if i == 30 { "null".to_string() } else { format!("[{read}]") };
        write_commit(root, "runner", i, &read, left);
    }
}

fn history(name: &str, params: &str, values: impl IntoIterator<Item = f64>) -> Vec<BenchmarkSample> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| BenchmarkSample::new(i as i64, sha(i), name, params, Some(v)))
        .collect()
}

#[test]
fn test_results_dir_to_report() {
    let dir = tempfile::tempdir().unwrap();
    write_results(dir.path());

    let samples = load_results_dir(dir.path(), "runner").unwrap();
    assert_eq!(samples.len(), 44 * 3);
    assert_eq!(samples.iter().filter(|s| s.result.is_none()).count(), 1);

    let annotated = detect_table(&samples, &DetectorParameters::default()).unwrap();
    assert_eq!(annotated.len(), 44 * 3 - 1);

    let report = RegressionReport::build(&annotated, ReportOptions::default()).unwrap();
    assert_eq!(report.commits.len(), 1);

    let commit = &report.commits[0];
    assert_eq!(commit.commit_id, sha(21));
    assert_eq!(commit.commit_range, format!("{}...{}", sha(20), sha(21)));

    let flagged: Vec<(&str, &str)> = commit
        .benchmarks
        .iter()
        .map(|b| (b.name.as_str(), b.params.as_str()))
        .collect();
    assert_eq!(
        flagged,
        vec![("io.time_read", ""), ("join.time_merge", "how='left'")]
    );
    assert_relative_eq!(commit.benchmarks[0].pct_change.unwrap(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(commit.benchmarks[1].pct_change.unwrap(), 1.0);

    let links = ReportLinks::new(
        "https://github.com/org/project/compare/",
        "https://org.github.io/asv-runner/#",
    );
    let issues = report.render_markdown(&links);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, format!("Commit {}", sha(21)));
    assert!(issues[0]
        .body
        .contains(" - [ ] [io.time_read](https://org.github.io/asv-runner/#io.time_read) - 200.000% (20.000ms)\n"));
    assert!(issues[0]
        .body
        .contains("#join.time_merge?p-how=%27left%27) - 100.000% (1.000s)\n"));
}

#[test]
fn test_only_requested_machine_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    write_index(dir.path());
    for i in 0..40 {
        write_commit(dir.path(), "fast", i, "[1.0]", 1.0);
    }
    for i in 40..80 {
        write_commit(dir.path(), "slow", i, "[3.0]", 3.0);
    }

    let fast = load_results_dir(dir.path(), "fast").unwrap();
    assert_eq!(fast.len(), 40 * 3);
    assert!(fast.iter().all(|s| s.commit_id < sha(40)));

    let annotated = detect_table(&fast, &DetectorParameters::default()).unwrap();
    assert!(annotated.iter().all(|r| !r.annotation.is_regression));

    let slow = load_results_dir(dir.path(), "slow").unwrap();
    assert_eq!(slow.len(), 40 * 3);
    assert!(slow.iter().all(|s| s.commit_id >= sha(40)));
    assert!(slow.iter().all(|s| s.result != Some(1.0)));
}

#[test]
fn test_unknown_machine_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    write_results(dir.path());

    let err = load_results_dir(dir.path(), "retired").unwrap_err();
    match err {
        Error::File { path, source } => {
            assert_eq!(path, dir.path().join("results").join("retired"));
            assert!(matches!(*source, Error::Io(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_annotated_rows_to_report() {
    let mut rows = history("time_sort", "", (0..50).map(|i| if i < 25 { 0.5 } else { 0.8 }));
    rows.extend(history("time_copy", "n=10", (0..50).map(|_| 0.1)));

    let params = DetectorParameters::default().with_window_size(11);
    let annotated = detect_table(&rows, &params).unwrap();
    assert_eq!(annotated.len(), 100);

    let report = RegressionReport::build(&annotated, ReportOptions::default()).unwrap();
    assert_eq!(report.commits.len(), 1);
    assert_eq!(report.commits[0].commit_id, sha(25));

    let links = ReportLinks::new("https://example.com/compare/", "https://example.com/#");
    let issues = report.render_markdown(&links);
    assert!(issues[0].body.contains("time_sort"));
    assert!(!issues[0].body.contains("time_copy"));
    assert!(issues[0].body.contains("60.000% (300.000ms)"));
}

#[test]
fn test_next_commit_from_loaded_results() {
    let dir = tempfile::tempdir().unwrap();
    write_results(dir.path());
    let samples = load_results_dir(dir.path(), "runner").unwrap();

    let existing = benchmarked_commits(&samples);
    let recent = vec!["f".repeat(40), sha(43), sha(42)];
    assert_eq!(next_commit_to_run(&existing, &recent), Some(recent[0].as_str()));
    assert_eq!(next_commit_to_run(&existing, &recent[1..]), None);
}

#[test]
fn test_missing_index_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("results")).unwrap();

    let err = load_results_dir(dir.path(), "runner").unwrap_err();
    assert!(matches!(err, Error::File { .. }));
    assert!(err.to_string().contains("benchmarks.json"));
}

#[test]
fn test_malformed_result_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    write_results(dir.path());
    let bad = dir.path().join("results").join("runner").join("zzz.json");
    fs::write(&bad, "{ not json").unwrap();

    let err = load_results_dir(dir.path(), "runner").unwrap_err();
    match err {
        Error::File { path, source } => {
            assert_eq!(path, bad);
            assert!(matches!(*source, Error::Json(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}
