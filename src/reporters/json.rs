//! JSON reporter
//!
//! Pretty-printed (2-space indent) with a trailing newline. Key order is
//! stable: struct field order for the summary, sorted severity names for
//! the counts, filter order for the findings.

use crate::models::Report;
use anyhow::Result;

/// Render the report as JSON.
pub fn render(report: &Report) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
