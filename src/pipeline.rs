//! Pipeline driver
//!
//! Composes threshold resolution, changed-file loading, paginated fetch,
//! triage filtering, and report emission. No output file is written
//! unless the pipeline succeeds through filtering, so a half-run never
//! leaves stale reports behind.

use crate::client::{Credentials, SonarClient};
use crate::error::{GateError, GateResult};
use crate::filter;
use crate::models::Report;
use crate::paths;
use crate::reporters;
use crate::severity;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct GateConfig {
    pub host_url: String,
    pub project_key: String,
    pub changed_files: PathBuf,
    pub severity_threshold: String,
    pub output_json: PathBuf,
    pub output_md: PathBuf,
    pub credentials: Credentials,
}

/// Whether the run gated the build. Operational failures are a separate
/// channel (exit 1 at the binary boundary), never folded into these, so
/// callers can always tell "no issues" from "couldn't check".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Clean,
    GateTripped,
}

impl GateOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            GateOutcome::Clean => 0,
            GateOutcome::GateTripped => 3,
        }
    }
}

pub fn run(config: &GateConfig) -> Result<GateOutcome> {
    // Resolve the threshold before any I/O so misconfiguration is cheap.
    let threshold = severity::resolve_threshold(&config.severity_threshold)?;
    let threshold_token = config.severity_threshold.trim().to_lowercase();

    let changed_files = load_changed_files(&config.changed_files)?;
    info!(changed_files = changed_files.len(), "loaded changed-file set");

    let client = SonarClient::new(&config.host_url, &config.project_key, &config.credentials);
    let raw_issues = client.fetch_all()?;
    info!(raw_issues = raw_issues.len(), "fetched issues from upstream");

    let findings = filter::filter_issues(&raw_issues, &changed_files, threshold.rank());
    info!(
        findings = findings.len(),
        threshold = %threshold,
        "filtered to changed files at threshold"
    );

    let report = Report::new(
        &config.project_key,
        &threshold_token,
        changed_files.len(),
        findings,
    );

    write_report(&config.output_json, &reporters::json::render(&report)?)?;
    write_report(&config.output_md, &reporters::markdown::render(&report))?;

    if report.findings.is_empty() {
        Ok(GateOutcome::Clean)
    } else {
        Ok(GateOutcome::GateTripped)
    }
}

/// Load the newline-delimited changed-file list into a normalized set.
/// Blank lines are skipped; every entry goes through the same
/// normalization as issue component paths.
fn load_changed_files(path: &Path) -> GateResult<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|source| GateError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(paths::normalize)
        .collect())
}

fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create output directory {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("cannot write report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_exit_codes() {
        assert_eq!(GateOutcome::Clean.exit_code(), 0);
        assert_eq!(GateOutcome::GateTripped.exit_code(), 3);
    }

    #[test]
    fn test_load_changed_files_normalizes_and_skips_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "./src/a.py").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "src\\b.py  ").unwrap();
        writeln!(file, "src/a.py").unwrap(); // duplicate after normalization

        let files = load_changed_files(file.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains("src/a.py"));
        assert!(files.contains("src/b.py"));
    }

    #[test]
    fn test_load_changed_files_missing_is_config_error() {
        let err = load_changed_files(Path::new("/nonexistent/changed.txt")).unwrap_err();
        assert!(matches!(err, GateError::Config { .. }));
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.md");
        write_report(&path, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
