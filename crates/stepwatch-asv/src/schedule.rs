//! Choosing the next commit to benchmark

use std::collections::BTreeSet;
use stepwatch_core::BenchmarkSample;

/// Commit ids from `git log --oneline --no-abbrev-commit` output, newest first
pub fn parse_oneline_log(log: &str) -> Vec<String> {
    log.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_once(' ').map_or(line, |(sha, _)| sha).to_string())
        .collect()
}

/// Commit ids listed one per line, as in a list of already benchmarked commits
pub fn parse_commit_list(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Commits that already have at least one sample
pub fn benchmarked_commits(samples: &[BenchmarkSample]) -> BTreeSet<String> {
    samples.iter().map(|s| s.commit_id.clone()).collect()
}

/// The newest commit in `recent` that has not been benchmarked yet
///
/// `recent` is ordered newest first. Returns `None` when every recent
/// commit already has results.
pub fn next_commit_to_run<'a, S: AsRef<str>>(
    existing: &BTreeSet<String>,
    recent: &'a [S],
) -> Option<&'a str> {
    recent
        .iter()
        .map(|commit| -> &str { commit.as_ref() })
        .find(|commit| !existing.contains(*commit))
}
