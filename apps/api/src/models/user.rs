use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of one application event. The wire forms are fixed; "Applied
/// Earlier" keeps its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    #[serde(rename = "Applied Earlier")]
    AppliedEarlier,
    Interview,
    Offer,
    Rejected,
}

/// One entry in a user's application history. The history is append-only;
/// entries for the same job are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub job_id: String,
    pub status: ApplicationStatus,
    pub timestamp: DateTime<Utc>,
}

/// Everything persisted for one user. Both fields default so a record
/// written before a field existed still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

/// Derives the authoritative current status for a job from the history:
/// the entry with the latest timestamp wins, and on equal timestamps the
/// later-appended entry wins.
pub fn current_status(applications: &[Application], job_id: &str) -> Option<ApplicationStatus> {
    let mut latest: Option<&Application> = None;
    for app in applications.iter().filter(|a| a.job_id == job_id) {
        match latest {
            Some(cur) if app.timestamp < cur.timestamp => {}
            _ => latest = Some(app),
        }
    }
    latest.map(|a| a.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn entry(job_id: &str, status: ApplicationStatus, secs: i64) -> Application {
        Application {
            job_id: job_id.to_string(),
            status,
            timestamp: at(secs),
        }
    }

    #[test]
    fn test_status_serde_applied_earlier_keeps_space() {
        let json = serde_json::to_string(&ApplicationStatus::AppliedEarlier).unwrap();
        assert_eq!(json, r#""Applied Earlier""#);
        let back: ApplicationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ApplicationStatus::AppliedEarlier);
    }

    #[test]
    fn test_current_status_latest_timestamp_wins() {
        let history = vec![
            entry("job1", ApplicationStatus::Applied, 100),
            entry("job1", ApplicationStatus::Interview, 200),
        ];
        assert_eq!(history.len(), 2); // both entries retained
        assert_eq!(
            current_status(&history, "job1"),
            Some(ApplicationStatus::Interview)
        );
    }

    #[test]
    fn test_current_status_equal_timestamps_later_entry_wins() {
        let history = vec![
            entry("job1", ApplicationStatus::Applied, 100),
            entry("job1", ApplicationStatus::Rejected, 100),
        ];
        assert_eq!(
            current_status(&history, "job1"),
            Some(ApplicationStatus::Rejected)
        );
    }

    #[test]
    fn test_current_status_ignores_other_jobs() {
        let history = vec![
            entry("job1", ApplicationStatus::Applied, 100),
            entry("job2", ApplicationStatus::Offer, 500),
        ];
        assert_eq!(
            current_status(&history, "job1"),
            Some(ApplicationStatus::Applied)
        );
        assert_eq!(current_status(&history, "job3"), None);
    }

    #[test]
    fn test_user_record_missing_applications_defaults_empty() {
        let record: UserRecord =
            serde_json::from_str(r#"{"resume_text": "Rust developer"}"#).unwrap();
        assert_eq!(record.resume_text.as_deref(), Some("Rust developer"));
        assert!(record.applications.is_empty());

        let bare: UserRecord = serde_json::from_str("{}").unwrap();
        assert!(bare.resume_text.is_none());
        assert!(bare.applications.is_empty());
    }
}
