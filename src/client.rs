//! SonarQube Web API client — sync HTTP via ureq (no async runtime needed)
//!
//! Drives paginated retrieval of `api/issues/search` into a flat issue
//! list. Only issues requiring action (OPEN, CONFIRMED, REOPENED) are
//! requested. Pages are fetched strictly one at a time; the server's
//! paging metadata is re-read on every response and is the sole
//! termination authority.

use crate::error::{GateError, GateResult};
use crate::models::{RawIssue, SearchPage};
use base64::Engine;
use tracing::debug;

const PAGE_SIZE: u64 = 500;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Credentials for the upstream server. A token takes precedence over a
/// user/password pair; with neither, requests carry no Authorization
/// header.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub token: String,
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Basic auth header value, following the SonarQube convention of
    /// sending a token as the user part with an empty password.
    pub fn basic_auth_header(&self) -> Option<String> {
        let raw = if !self.token.is_empty() {
            format!("{}:", self.token)
        } else if !self.user.is_empty() || !self.password.is_empty() {
            format!("{}:{}", self.user, self.password)
        } else {
            return None;
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(raw);
        Some(format!("Basic {encoded}"))
    }
}

pub struct SonarClient {
    agent: ureq::Agent,
    host_url: String,
    project_key: String,
    auth_header: Option<String>,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // We map status codes to GateError ourselves
        .timeout_global(Some(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build()
        .new_agent()
}

impl SonarClient {
    pub fn new(host_url: &str, project_key: &str, credentials: &Credentials) -> Self {
        Self {
            agent: make_agent(),
            host_url: host_url.trim_end_matches('/').to_string(),
            project_key: project_key.to_string(),
            auth_header: credentials.basic_auth_header(),
        }
    }

    /// Fetch every page of open issues for the project.
    pub fn fetch_all(&self) -> GateResult<Vec<RawIssue>> {
        fetch_paginated(|page| self.fetch_page(page))
    }

    fn fetch_page(&self, page: u64) -> GateResult<SearchPage> {
        let url = format!("{}/api/issues/search", self.host_url);
        let mut request = self
            .agent
            .get(&url)
            .query("projectKeys", &self.project_key)
            .query("statuses", "OPEN,CONFIRMED,REOPENED")
            .query("ps", PAGE_SIZE.to_string())
            .query("p", page.to_string())
            .header("Accept", "application/json");
        if let Some(auth) = &self.auth_header {
            request = request.header("Authorization", auth);
        }

        let response = request.call().map_err(|e| GateError::UpstreamUnavailable {
            host: self.host_url.clone(),
            source: Box::new(e),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.into_body().read_to_string().unwrap_or_default();
            return Err(GateError::UpstreamError { status, body });
        }

        response
            .into_body()
            .read_json()
            .map_err(|e| GateError::UpstreamError {
                status,
                body: format!("malformed JSON payload: {e}"),
            })
    }
}

/// Accumulate pages until `page * pageSize >= total` per the paging
/// metadata of each response. Factored over the page fetcher so the
/// termination logic is testable without a network.
pub(crate) fn fetch_paginated<F>(mut fetch_page: F) -> GateResult<Vec<RawIssue>>
where
    F: FnMut(u64) -> GateResult<SearchPage>,
{
    let mut issues: Vec<RawIssue> = Vec::new();
    let mut page: u64 = 1;

    loop {
        let batch = fetch_page(page)?;
        let fetched = batch.issues.len();
        issues.extend(batch.issues);

        let (total, page_size) = match &batch.paging {
            Some(paging) => (
                paging.total.unwrap_or(issues.len() as u64),
                paging.page_size.unwrap_or(PAGE_SIZE),
            ),
            None => (issues.len() as u64, PAGE_SIZE),
        };
        debug!(page, fetched, total, "fetched issue page");

        // A zero page size would never terminate; treat it as exhausted.
        if page_size == 0 || page * page_size >= total {
            break;
        }
        page += 1;
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Paging;

    fn page_of(count: usize, total: u64, page_size: u64) -> SearchPage {
        SearchPage {
            issues: vec![RawIssue::default(); count],
            paging: Some(Paging {
                total: Some(total),
                page_size: Some(page_size),
            }),
        }
    }

    #[test]
    fn test_pagination_terminates_on_server_total() {
        // total=1200, pageSize=500: exactly 3 pages, all issues kept.
        let mut requested = Vec::new();
        let issues = fetch_paginated(|page| {
            requested.push(page);
            let count = if page < 3 { 500 } else { 200 };
            Ok(page_of(count, 1200, 500))
        })
        .unwrap();
        assert_eq!(requested, [1, 2, 3]);
        assert_eq!(issues.len(), 1200);
    }

    #[test]
    fn test_single_page_when_total_fits() {
        let issues = fetch_paginated(|_| Ok(page_of(12, 12, 500))).unwrap();
        assert_eq!(issues.len(), 12);
    }

    #[test]
    fn test_total_is_reread_per_response() {
        // The total shrinks between responses; the later value governs.
        let issues = fetch_paginated(|page| {
            if page == 1 {
                Ok(page_of(500, 1500, 500))
            } else {
                Ok(page_of(100, 600, 500))
            }
        })
        .unwrap();
        assert_eq!(issues.len(), 600);
    }

    #[test]
    fn test_missing_paging_metadata_stops_after_first_page() {
        let issues = fetch_paginated(|_| {
            Ok(SearchPage {
                issues: vec![RawIssue::default(); 3],
                paging: None,
            })
        })
        .unwrap();
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_fetch_error_propagates_without_partial_results() {
        let result = fetch_paginated(|page| {
            if page == 1 {
                Ok(page_of(500, 1000, 500))
            } else {
                Err(GateError::UpstreamError {
                    status: 503,
                    body: "down".to_string(),
                })
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_token_auth_header() {
        let creds = Credentials {
            token: "squ_abc".to_string(),
            ..Default::default()
        };
        // base64("squ_abc:")
        assert_eq!(
            creds.basic_auth_header().unwrap(),
            format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD.encode("squ_abc:")
            )
        );
    }

    #[test]
    fn test_user_password_auth_header() {
        let creds = Credentials {
            user: "ci".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert_eq!(
            creds.basic_auth_header().unwrap(),
            format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD.encode("ci:hunter2")
            )
        );
    }

    #[test]
    fn test_no_credentials_means_no_header() {
        assert!(Credentials::default().basic_auth_header().is_none());
    }
}
