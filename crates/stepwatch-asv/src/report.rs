//! Regression reports for benchmark dashboards
//!
//! Groups flagged rows by the commit that introduced them and renders one
//! Markdown issue per commit, linking the commit range and the dashboard
//! page of every regressed benchmark.

use crate::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stepwatch_core::AnnotatedSample;
use tracing::debug;

/// Characters left unescaped in dashboard links
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b':')
    .remove(b'?')
    .remove(b'=')
    .remove(b'&')
    .remove(b'#')
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

const SKIPPED_COMMITS_NOTE: &str = "Subsequent benchmarks may have skipped some commits. \
The link above lists the commits that are between the two benchmark runs where the \
regression was identified.";

/// Distinct commits in order of their earliest date
fn commits_by_date(rows: &[AnnotatedSample]) -> Vec<&str> {
    let mut ordered: Vec<&AnnotatedSample> = rows.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .map(|r| r.commit_id.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

/// Range `"{previous}...{commit}"` from the previous benchmarked commit
pub fn commit_range(rows: &[AnnotatedSample], commit: &str) -> Result<String> {
    let commits = commits_by_date(rows);
    let position = commits
        .iter()
        .position(|&c| c == commit)
        .ok_or_else(|| Error::UnknownCommit(commit.to_string()))?;
    match position.checked_sub(1) {
        Some(previous) => Ok(format!("{}...{commit}", commits[previous])),
        None => Err(Error::NoPredecessor(commit.to_string())),
    }
}

/// Human readable duration with three decimals
pub fn format_duration(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let magnitude = seconds.abs();
    if magnitude >= 1.0 {
        format!("{sign}{magnitude:.3}s")
    } else if magnitude >= 1e-3 {
        format!("{sign}{:.3}ms", magnitude * 1e3)
    } else if magnitude >= 1e-6 {
        format!("{sign}{:.3}us", magnitude * 1e6)
    } else {
        format!("{sign}{:.3}ns", magnitude * 1e9)
    }
}

/// Relative and absolute change, e.g. `"50.000% (1.500ms)"`
pub fn format_severity(pct_change: f64, abs_change: f64) -> String {
    format!("{:.3}% ({})", pct_change * 100.0, format_duration(abs_change))
}

/// Report settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Most recent regressed commits to report
    pub max_commits: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { max_commits: 40 }
    }
}

impl ReportOptions {
    pub fn with_max_commits(mut self, max_commits: usize) -> Self {
        self.max_commits = max_commits;
        self
    }
}

/// Base URLs used when rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLinks {
    /// Prefix of a commit comparison, e.g. `https://github.com/org/repo/compare/`
    pub compare_url: String,
    /// Prefix of a benchmark dashboard page, e.g. `https://org.github.io/asv/#`
    pub dashboard_url: String,
}

impl ReportLinks {
    pub fn new(compare_url: impl Into<String>, dashboard_url: impl Into<String>) -> Self {
        Self {
            compare_url: compare_url.into(),
            dashboard_url: dashboard_url.into(),
        }
    }

    /// Dashboard link for a benchmark, selecting its parameter combination
    pub fn benchmark_url(&self, name: &str, params: &str) -> String {
        let mut url = format!("{}{name}", self.dashboard_url);
        if !params.is_empty() {
            url.push_str("?p-");
            url.push_str(&params.split(", ").collect::<Vec<_>>().join("&p-"));
        }
        utf8_percent_encode(&url, URL_SAFE).to_string()
    }
}

/// One flagged benchmark series at a commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedBenchmark {
    pub name: String,
    pub params: String,
    pub pct_change: Option<f64>,
    pub abs_change: Option<f64>,
}

impl FlaggedBenchmark {
    pub fn severity(&self) -> String {
        match (self.pct_change, self.abs_change) {
            (Some(pct), Some(abs)) => format_severity(pct, abs),
            _ => "n/a".to_string(),
        }
    }
}

/// All regressions introduced by one commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRegressions {
    pub commit_id: String,
    pub date: i64,
    /// `"{previous}...{commit}"`
    pub commit_range: String,
    pub benchmarks: Vec<FlaggedBenchmark>,
}

/// Rendered issue text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIssue {
    pub title: String,
    pub body: String,
}

impl CommitRegressions {
    pub fn title(&self) -> String {
        format!("Commit {}", self.commit_id)
    }

    /// Render the issue body as a Markdown checklist
    ///
    /// Parameterless benchmarks get a single item carrying the severity;
    /// parameterized ones get a parent item with one sub-item per flagged
    /// parameter combination.
    pub fn render_markdown(&self, links: &ReportLinks) -> RenderedIssue {
        let mut body = format!(
            "[Commit Range]({}{})\n\n{SKIPPED_COMMITS_NOTE}\n\n",
            links.compare_url, self.commit_range
        );

        let mut previous: Option<&str> = None;
        for benchmark in &self.benchmarks {
            let url = links.benchmark_url(&benchmark.name, "");
            if benchmark.params.is_empty() {
                body.push_str(&format!(
                    " - [ ] [{}]({url}) - {}\n",
                    benchmark.name,
                    benchmark.severity()
                ));
                previous = None;
                continue;
            }
            if previous != Some(benchmark.name.as_str()) {
                body.push_str(&format!(" - [ ] [{}]({url})\n", benchmark.name));
            }
            body.push_str(&format!(
                "   - [ ] [{}]({}) - {}\n",
                benchmark.params,
                links.benchmark_url(&benchmark.name, &benchmark.params),
                benchmark.severity()
            ));
            previous = Some(benchmark.name.as_str());
        }
        body.push('\n');

        RenderedIssue {
            title: self.title(),
            body,
        }
    }
}

/// Regressions grouped by the commit that introduced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Regressed commits, oldest first
    pub commits: Vec<CommitRegressions>,
    /// Older regressed commits left out by `max_commits`
    pub omitted: usize,
}

impl RegressionReport {
    /// Build a report from an annotated table
    pub fn build(rows: &[AnnotatedSample], options: ReportOptions) -> Result<Self> {
        let flagged: Vec<&AnnotatedSample> = rows.iter().filter(|r| r.is_regression()).collect();

        let mut first_flag: Vec<&AnnotatedSample> = Vec::new();
        let mut seen = HashSet::new();
        for &row in &flagged {
            if seen.insert(row.commit_id.as_str()) {
                first_flag.push(row);
            }
        }
        first_flag.sort_by_key(|r| r.date);

        let omitted = first_flag.len().saturating_sub(options.max_commits);
        let commits = first_flag[omitted..]
            .iter()
            .map(|head| {
                let benchmarks = flagged
                    .iter()
                    .filter(|r| r.commit_id == head.commit_id)
                    .map(|r| FlaggedBenchmark {
                        name: r.name.clone(),
                        params: r.params.clone(),
                        pct_change: r.annotation.pct_change,
                        abs_change: r.annotation.abs_change,
                    })
                    .collect();
                Ok(CommitRegressions {
                    commit_id: head.commit_id.clone(),
                    date: head.date,
                    commit_range: commit_range(rows, &head.commit_id)?,
                    benchmarks,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            flagged = flagged.len(),
            commits = commits.len(),
            omitted,
            "built regression report"
        );
        Ok(Self { commits, omitted })
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Render one issue per regressed commit
    pub fn render_markdown(&self, links: &ReportLinks) -> Vec<RenderedIssue> {
        self.commits
            .iter()
            .map(|commit| commit.render_markdown(links))
            .collect()
    }
}
