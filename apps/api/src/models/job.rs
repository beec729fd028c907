use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the work happens, as derived from the posting's location text.
///
/// The job source exposes no explicit remote flag, so a posting is `Remote`
/// iff its location contains "remote" case-insensitively. The heuristic is
/// approximate and intentionally limited to the location field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkMode {
    Remote,
    OnSite,
}

impl WorkMode {
    /// Wire form used by filter criteria ("remote" / "on-site").
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Remote => "remote",
            WorkMode::OnSite => "on-site",
        }
    }

    pub fn from_location(location: &str) -> Self {
        if location.to_lowercase().contains("remote") {
            WorkMode::Remote
        } else {
            WorkMode::OnSite
        }
    }
}

/// A job listing normalized from the external source. Immutable once fetched;
/// never persisted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub contract_type: String,
    pub work_mode: WorkMode,
    pub posted_at: Option<DateTime<Utc>>,
    pub apply_url: String,
}

/// A posting plus its resume-match verdict. `score` is 0 when scoring failed
/// for this posting; the explanation then describes the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub score: u8,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_mode_from_location_remote_marker() {
        assert_eq!(WorkMode::from_location("Remote (EU)"), WorkMode::Remote);
        assert_eq!(WorkMode::from_location("fully REMOTE"), WorkMode::Remote);
    }

    #[test]
    fn test_work_mode_from_location_on_site() {
        assert_eq!(WorkMode::from_location("Bangalore, India"), WorkMode::OnSite);
        assert_eq!(WorkMode::from_location(""), WorkMode::OnSite);
    }

    #[test]
    fn test_work_mode_serde_wire_form() {
        assert_eq!(serde_json::to_string(&WorkMode::Remote).unwrap(), r#""remote""#);
        assert_eq!(serde_json::to_string(&WorkMode::OnSite).unwrap(), r#""on-site""#);
    }

    #[test]
    fn test_scored_job_serializes_flattened() {
        let job = ScoredJob {
            posting: JobPosting {
                id: "j1".to_string(),
                title: "Rust Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                description: "Build services".to_string(),
                contract_type: "full_time".to_string(),
                work_mode: WorkMode::Remote,
                posted_at: None,
                apply_url: "https://example.com/j1".to_string(),
            },
            score: 88,
            explanation: "Strong overlap".to_string(),
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["id"], "j1");
        assert_eq!(value["score"], 88);
        assert_eq!(value["work_mode"], "remote");
    }
}
