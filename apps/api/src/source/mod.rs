//! Job source collaborator: queries the Adzuna search API by free-text role
//! and location and normalizes raw postings into [`JobPosting`]s.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::job::{JobPosting, WorkMode};

const ADZUNA_SEARCH_URL: &str = "https://api.adzuna.com/v1/api/jobs/in/search/1";
const RESULTS_PER_PAGE: u32 = 50;
const DEFAULT_CONTRACT_TYPE: &str = "full_time";

/// Query-by-role-and-location contract the handlers depend on. Kept as a
/// trait so tests can stub the upstream without network access.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, what: &str, place: &str) -> Result<Vec<JobPosting>, AppError>;
}

// ── Wire types (Adzuna response shape) ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawPosting>,
}

#[derive(Debug, Deserialize)]
struct RawPosting {
    id: String,
    title: String,
    company: RawCompany,
    location: RawLocation,
    description: String,
    contract_type: Option<String>,
    created: Option<String>,
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct RawCompany {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    display_name: String,
}

// ── Client ──────────────────────────────────────────────────────────────────

pub struct AdzunaClient {
    client: reqwest::Client,
    app_id: String,
    app_key: String,
}

impl AdzunaClient {
    pub fn new(app_id: String, app_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("Failed to build HTTP client"),
            app_id,
            app_key,
        }
    }
}

#[async_trait]
impl JobSource for AdzunaClient {
    async fn search(&self, what: &str, place: &str) -> Result<Vec<JobPosting>, AppError> {
        let per_page = RESULTS_PER_PAGE.to_string();
        let response = self
            .client
            .get(ADZUNA_SEARCH_URL)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("results_per_page", per_page.as_str()),
                ("what", what),
                ("where", place),
            ])
            .send()
            .await
            .map_err(|e| AppError::JobSource(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::JobSource(format!(
                "search returned {status}: {body}"
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::JobSource(format!("malformed response: {e}")))?;

        let postings: Vec<JobPosting> = search.results.into_iter().map(normalize).collect();
        debug!("job source returned {} postings for what={what} where={place}", postings.len());
        Ok(postings)
    }
}

/// Normalizes one raw posting: contract type defaults when the source omits
/// it, work mode is derived from the location text, and an unparseable
/// creation time degrades to "unknown" rather than failing the page.
fn normalize(raw: RawPosting) -> JobPosting {
    let posted_at = raw.created.as_deref().and_then(parse_created);
    JobPosting {
        work_mode: WorkMode::from_location(&raw.location.display_name),
        id: raw.id,
        title: raw.title,
        company: raw.company.display_name,
        location: raw.location.display_name,
        description: raw.description,
        contract_type: raw
            .contract_type
            .unwrap_or_else(|| DEFAULT_CONTRACT_TYPE.to_string()),
        posted_at,
        apply_url: raw.redirect_url,
    }
}

fn parse_created(created: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(created) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("unparseable posting timestamp {created:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(location: &str, contract_type: Option<&str>, created: Option<&str>) -> RawPosting {
        RawPosting {
            id: "123".to_string(),
            title: "Backend Developer".to_string(),
            company: RawCompany {
                display_name: "Acme".to_string(),
            },
            location: RawLocation {
                display_name: location.to_string(),
            },
            description: "Ship features".to_string(),
            contract_type: contract_type.map(str::to_string),
            created: created.map(str::to_string),
            redirect_url: "https://example.com/apply/123".to_string(),
        }
    }

    #[test]
    fn test_normalize_defaults_contract_type() {
        let posting = normalize(raw("Pune, India", None, None));
        assert_eq!(posting.contract_type, "full_time");
        let explicit = normalize(raw("Pune, India", Some("contract"), None));
        assert_eq!(explicit.contract_type, "contract");
    }

    #[test]
    fn test_normalize_derives_work_mode_from_location_only() {
        assert_eq!(
            normalize(raw("Remote, India", None, None)).work_mode,
            WorkMode::Remote
        );
        // "remote" in the description does not count; the rule is location-only.
        let mut on_site = raw("Delhi", None, None);
        on_site.description = "Remote friendly".to_string();
        assert_eq!(normalize(on_site).work_mode, WorkMode::OnSite);
    }

    #[test]
    fn test_normalize_tolerates_bad_timestamp() {
        let posting = normalize(raw("Pune", None, Some("not-a-date")));
        assert!(posting.posted_at.is_none());
        let dated = normalize(raw("Pune", None, Some("2026-08-01T10:00:00Z")));
        assert!(dated.posted_at.is_some());
    }

    #[test]
    fn test_search_response_deserializes_source_shape() {
        let search: SearchResponse = serde_json::from_str(
            r#"{
                "results": [{
                    "id": "42",
                    "title": "Data Scientist",
                    "company": {"display_name": "Initech"},
                    "location": {"display_name": "Bengaluru", "area": ["India", "Karnataka"]},
                    "description": "Models and pipelines",
                    "contract_type": "permanent",
                    "created": "2026-07-30T08:00:00Z",
                    "redirect_url": "https://example.com/42",
                    "salary_min": 100000
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(search.results.len(), 1);
        let posting = normalize(search.results.into_iter().next().unwrap());
        assert_eq!(posting.id, "42");
        assert_eq!(posting.company, "Initech");
    }
}
