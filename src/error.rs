//! Error taxonomy for the gate pipeline
//!
//! Every variant is fatal: this tool makes a single best-effort pass and
//! prefers failing loudly over gating a build on an incomplete issue set.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error(
        "invalid severity threshold '{0}' \
         (expected blocker|high|medium|low|info; aliases: critical|major|minor|all)"
    )]
    InvalidThreshold(String),

    #[error("cannot reach SonarQube at {host}")]
    UpstreamUnavailable {
        host: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("SonarQube API error {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("cannot read changed-file list {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type GateResult<T> = Result<T, GateError>;
