//! Data models: upstream wire types and the gate report
//!
//! Wire types mirror the SonarQube `api/issues/search` payload with every
//! field defaulted, since the server omits fields freely. Report types are
//! what the gate writes out; field order here is the JSON key order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One issue as returned by the upstream search endpoint. Transient;
/// consumed once per run by the triage filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIssue {
    pub key: String,
    pub rule: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub severity: Option<String>,
    pub message: String,
    pub component: String,
    pub line: Option<i64>,
    #[serde(rename = "textRange")]
    pub text_range: Option<TextRange>,
    pub status: String,
    pub effort: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextRange {
    #[serde(rename = "startLine")]
    pub start_line: Option<i64>,
}

/// Paging metadata. The server is the source of truth for the total
/// count, re-read on every page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Paging {
    pub total: Option<u64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u64>,
}

/// One page of the issue search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchPage {
    pub issues: Vec<RawIssue>,
    pub paging: Option<Paging>,
}

/// A filtered, normalized issue eligible for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub key: String,
    pub rule: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Canonical upstream severity string (e.g. "MAJOR").
    pub severity: String,
    pub message: String,
    /// Normalized file path.
    pub file: String,
    /// 1-based line, 0 when unresolved (file-level issue).
    pub line: u32,
    pub status: String,
    pub effort: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub project_key: String,
    pub severity_threshold: String,
    pub changed_files: usize,
    pub findings: usize,
    /// Counts per severity name; BTreeMap keeps key order sorted.
    pub severity_counts: BTreeMap<String, usize>,
}

/// The full gate report, written as both JSON and Markdown.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn new(
        project_key: &str,
        severity_threshold: &str,
        changed_files: usize,
        findings: Vec<Finding>,
    ) -> Self {
        let mut severity_counts: BTreeMap<String, usize> = BTreeMap::new();
        for finding in &findings {
            *severity_counts.entry(finding.severity.clone()).or_default() += 1;
        }
        Report {
            summary: ReportSummary {
                project_key: project_key.to_string(),
                severity_threshold: severity_threshold.to_string(),
                changed_files,
                findings: findings.len(),
                severity_counts,
            },
            findings,
        }
    }
}
