//! Output reporters for the gate report
//!
//! Two fixed artifacts per run:
//! - `json` - machine-readable, stable key order, for downstream tooling
//! - `markdown` - human-readable table, for PR comments and CI logs

pub mod json;
pub mod markdown;
