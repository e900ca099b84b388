//! CLI surface

use crate::client::Credentials;
use crate::pipeline::GateConfig;
use clap::Parser;
use std::path::PathBuf;

/// Sonargate - SonarQube severity gate for changed files
#[derive(Parser, Debug)]
#[command(name = "sonargate")]
#[command(
    version,
    about = "Gate a build on SonarQube issues touching the files you changed",
    after_help = "\
Exit codes:
  0   no findings at or above the threshold
  3   gate tripped (findings on changed files)
  1   operational failure (bad threshold, unreachable host, upstream error)

Examples:
  sonargate --host-url https://sonar.example.com --project-key my-app \\
            --changed-files changed.txt \\
            --output-json findings.json --output-md findings.md
  sonargate ... --severity-threshold medium --token $SONAR_TOKEN
  git diff --name-only origin/main | tee changed.txt  # typical input"
)]
pub struct Cli {
    /// SonarQube server URL, e.g. https://sonar.example.com
    #[arg(long)]
    pub host_url: String,

    /// Project key on the server
    #[arg(long)]
    pub project_key: String,

    /// Newline-delimited file of changed paths (blank lines ignored)
    #[arg(long)]
    pub changed_files: PathBuf,

    /// Minimum severity to report: blocker|high|medium|low|info
    /// (aliases: critical|major|minor|all)
    #[arg(long, default_value = "high")]
    pub severity_threshold: String,

    /// Where to write the JSON report
    #[arg(long)]
    pub output_json: PathBuf,

    /// Where to write the Markdown report
    #[arg(long)]
    pub output_md: PathBuf,

    /// Authentication token (preferred; sent as Basic auth user)
    #[arg(long, env = "SONAR_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Username for Basic auth (ignored when a token is given)
    #[arg(long, default_value = "")]
    pub user: String,

    /// Password for Basic auth
    #[arg(long, env = "SONAR_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,
}

impl Cli {
    pub fn into_config(self) -> GateConfig {
        GateConfig {
            host_url: self.host_url,
            project_key: self.project_key,
            changed_files: self.changed_files,
            severity_threshold: self.severity_threshold,
            output_json: self.output_json,
            output_md: self.output_md,
            credentials: Credentials {
                token: self.token,
                user: self.user,
                password: self.password,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_required_flags() {
        let cli = Cli::try_parse_from([
            "sonargate",
            "--host-url",
            "https://sonar.example.com",
            "--project-key",
            "my-app",
            "--changed-files",
            "changed.txt",
            "--output-json",
            "out.json",
            "--output-md",
            "out.md",
        ])
        .unwrap();
        assert_eq!(cli.severity_threshold, "high"); // default
        assert_eq!(cli.project_key, "my-app");
    }

    #[test]
    fn test_cli_rejects_missing_required_flags() {
        assert!(Cli::try_parse_from(["sonargate", "--host-url", "x"]).is_err());
    }
}
