//! Markdown reporter
//!
//! A header block with the run parameters, then a findings table (or a
//! one-line all-clear). Message cells are escaped so issue text cannot
//! break the table structure. No timestamps: identical inputs must
//! produce byte-identical reports for stable CI diffs.

use crate::models::{Finding, Report};

/// Render the report as Markdown.
pub fn render(report: &Report) -> String {
    let mut md = String::new();

    md.push_str("# SonarQube Findings (Changed Files)\n\n");
    md.push_str(&format!("- Project: `{}`\n", report.summary.project_key));
    md.push_str(&format!(
        "- Severity threshold: `{}`\n",
        report.summary.severity_threshold
    ));
    md.push_str(&format!(
        "- Changed files scanned: `{}`\n",
        report.summary.changed_files
    ));
    md.push_str(&format!("- Findings: `{}`\n\n", report.summary.findings));

    if report.findings.is_empty() {
        md.push_str("No findings at or above the selected threshold on changed files.\n");
        return md;
    }

    md.push_str("| Severity | File | Line | Rule | Message |\n");
    md.push_str("|---|---|---:|---|---|\n");
    for finding in &report.findings {
        md.push_str(&render_row(finding));
    }
    md
}

fn render_row(finding: &Finding) -> String {
    // Line 0 means file-level; its cell is left blank.
    let line = if finding.line > 0 {
        finding.line.to_string()
    } else {
        String::new()
    };
    let message = escape_cell(&finding.message);
    format!(
        "| {} | `{}` | {} | `{}` | {} |\n",
        finding.severity, finding.file, line, finding.rule, message
    )
}

/// Escape literal pipes and collapse newlines so a message cannot
/// corrupt the table's column structure.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
