//! Triage filter: changed-set membership plus severity gate
//!
//! Reduces the raw upstream issue list to the findings that gate the
//! build, with a total deterministic ordering so repeated runs over
//! identical data produce byte-identical reports.

use crate::models::{Finding, RawIssue};
use crate::paths;
use crate::severity::Severity;
use std::collections::HashSet;

/// Extract and normalize the file path of an issue.
///
/// Component identifiers look like `projectKey:src/a.py`; everything
/// after the first `:` is the in-repo path. Components without a
/// delimiter are used as-is.
fn issue_file(issue: &RawIssue) -> String {
    let component = match issue.component.split_once(':') {
        Some((_, path)) => path,
        None => issue.component.as_str(),
    };
    paths::normalize(component)
}

/// Extract the 1-based line of an issue, 0 when unresolved.
///
/// Prefers the explicit `line` field, falls back to the text range
/// start line; either must be positive to count.
fn issue_line(issue: &RawIssue) -> u32 {
    if let Some(line) = issue.line {
        if line > 0 {
            return line as u32;
        }
    }
    if let Some(range) = &issue.text_range {
        if let Some(start) = range.start_line {
            if start > 0 {
                return start as u32;
            }
        }
    }
    0
}

/// Keep issues on changed files at or above the threshold rank, in
/// deterministic order: severity rank descending, then file, line, and
/// issue key ascending. Ties break down to the unique key, so the order
/// is total.
pub fn filter_issues(
    raw_issues: &[RawIssue],
    changed_files: &HashSet<String>,
    threshold_rank: u8,
) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Vec::new();

    for issue in raw_issues {
        // Missing severity defaults to INFO, matching the upstream UI.
        let severity = issue.severity.as_deref().unwrap_or("INFO");
        if Severity::rank_of(severity) < threshold_rank {
            continue;
        }
        let file = issue_file(issue);
        if !changed_files.contains(&file) {
            continue;
        }

        findings.push(Finding {
            key: issue.key.clone(),
            rule: issue.rule.clone(),
            issue_type: issue.issue_type.clone(),
            severity: severity.to_string(),
            message: issue.message.clone(),
            line: issue_line(issue),
            file,
            status: issue.status.clone(),
            effort: issue.effort.clone(),
            tags: issue.tags.clone(),
        });
    }

    findings.sort_by(|a, b| {
        Severity::rank_of(&b.severity)
            .cmp(&Severity::rank_of(&a.severity))
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line))
            .then_with(|| a.key.cmp(&b.key))
    });

    findings
}
