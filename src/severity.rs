//! Severity model and threshold resolution
//!
//! SonarQube severities form a fixed five-level ordinal scale. The gate
//! threshold is given by a user-facing token (UI names plus API/legacy
//! aliases) and resolved to a canonical severity before any network I/O,
//! so a misconfigured pipeline fails fast.

use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};

/// Canonical issue severities, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    /// Numeric rank, 1 (INFO) through 5 (BLOCKER).
    pub fn rank(self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Minor => 2,
            Severity::Major => 3,
            Severity::Critical => 4,
            Severity::Blocker => 5,
        }
    }

    /// Rank of an upstream severity string. Unknown strings rank 0,
    /// below every threshold, so unrecognized upstream values are
    /// filtered out rather than crashing the run.
    pub fn rank_of(severity: &str) -> u8 {
        match severity {
            "INFO" => 1,
            "MINOR" => 2,
            "MAJOR" => 3,
            "CRITICAL" => 4,
            "BLOCKER" => 5,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
            Severity::Blocker => "BLOCKER",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a user-facing threshold token to its canonical severity.
///
/// Accepts the software-quality UI names (info, low, medium, high,
/// blocker), the API/legacy aliases (minor, major, critical), and "all"
/// as a backward-compatible alias for the lowest severity. The token is
/// lower-cased and trimmed before lookup; anything else is rejected.
pub fn resolve_threshold(token: &str) -> GateResult<Severity> {
    match token.trim().to_lowercase().as_str() {
        "info" => Ok(Severity::Info),
        "low" | "minor" => Ok(Severity::Minor),
        "medium" | "major" => Ok(Severity::Major),
        "high" | "critical" => Ok(Severity::Critical),
        "blocker" => Ok(Severity::Blocker),
        // "all" means no real floor, i.e. the lowest severity.
        "all" => Ok(Severity::Info),
        _ => Err(GateError::InvalidThreshold(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_total_and_strictly_increasing() {
        let all = [
            Severity::Info,
            Severity::Minor,
            Severity::Major,
            Severity::Critical,
            Severity::Blocker,
        ];
        for pair in all.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Severity::Info.rank(), 1);
        assert_eq!(Severity::Blocker.rank(), 5);
    }

    #[test]
    fn test_every_alias_resolves() {
        let table = [
            ("info", Severity::Info),
            ("low", Severity::Minor),
            ("minor", Severity::Minor),
            ("medium", Severity::Major),
            ("major", Severity::Major),
            ("high", Severity::Critical),
            ("critical", Severity::Critical),
            ("blocker", Severity::Blocker),
            ("all", Severity::Info),
        ];
        for (token, expected) in table {
            assert_eq!(resolve_threshold(token).unwrap(), expected, "token {token}");
        }
    }

    #[test]
    fn test_resolution_trims_and_lowercases() {
        assert_eq!(resolve_threshold("  HIGH ").unwrap(), Severity::Critical);
        assert_eq!(resolve_threshold("Medium").unwrap(), Severity::Major);
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = resolve_threshold("urgent").unwrap_err();
        assert!(err.to_string().contains("invalid severity threshold"));
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn test_rank_of_unknown_upstream_severity_is_zero() {
        assert_eq!(Severity::rank_of("WHATEVER"), 0);
        assert_eq!(Severity::rank_of(""), 0);
        // Upstream strings are canonical uppercase; anything else is unknown.
        assert_eq!(Severity::rank_of("major"), 0);
        assert_eq!(Severity::rank_of("MAJOR"), 3);
    }
}
