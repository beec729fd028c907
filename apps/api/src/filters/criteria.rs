use serde::{Deserialize, Serialize};

/// Relative window on a posting's creation time, anchored at evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePosted {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "24h")]
    Last24h,
    #[serde(rename = "week")]
    LastWeek,
    #[serde(rename = "month")]
    LastMonth,
}

/// Match-score tier. High ⇒ score > 70; medium ⇒ 40 ≤ score ≤ 70.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    #[default]
    All,
    High,
    Medium,
}

impl ScoreTier {
    pub fn admits(&self, score: u8) -> bool {
        match self {
            ScoreTier::All => true,
            ScoreTier::High => score > 70,
            ScoreTier::Medium => (40..=70).contains(&score),
        }
    }
}

/// The active set of user-selected constraints. Every field has a neutral
/// default; `FilterCriteria::default()` constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub title: String,
    pub skills: Vec<String>,
    pub date_posted: DatePosted,
    pub job_types: Vec<String>,
    pub work_modes: Vec<String>,
    pub location: String,
    pub match_score: ScoreTier,
}

/// A partial criteria update: only the present keys are merged, shallowly.
/// `clear` is the marker the assistant uses to request a full reset instead
/// of a merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterUpdate {
    pub title: Option<String>,
    pub skills: Option<Vec<String>>,
    pub date_posted: Option<DatePosted>,
    pub job_types: Option<Vec<String>>,
    pub work_modes: Option<Vec<String>>,
    pub location: Option<String>,
    pub match_score: Option<ScoreTier>,
    pub clear: bool,
}

impl FilterUpdate {
    pub fn is_clear(&self) -> bool {
        self.clear
    }
}

impl FilterCriteria {
    /// Shallow per-key merge: each key present in the update replaces the
    /// current value wholesale, absent keys are untouched.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(date_posted) = update.date_posted {
            self.date_posted = date_posted;
        }
        if let Some(job_types) = update.job_types {
            self.job_types = job_types;
        }
        if let Some(work_modes) = update.work_modes {
            self.work_modes = work_modes;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(match_score) = update.match_score {
            self.match_score = match_score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constrains_nothing() {
        let criteria = FilterCriteria::default();
        assert!(criteria.title.is_empty());
        assert!(criteria.skills.is_empty());
        assert_eq!(criteria.date_posted, DatePosted::Any);
        assert_eq!(criteria.match_score, ScoreTier::All);
    }

    #[test]
    fn test_merge_replaces_only_present_keys() {
        let mut criteria = FilterCriteria {
            title: "engineer".to_string(),
            location: "berlin".to_string(),
            ..Default::default()
        };
        criteria.merge(FilterUpdate {
            title: Some("developer".to_string()),
            work_modes: Some(vec!["remote".to_string()]),
            ..Default::default()
        });
        assert_eq!(criteria.title, "developer");
        assert_eq!(criteria.work_modes, vec!["remote".to_string()]);
        // untouched keys survive
        assert_eq!(criteria.location, "berlin");
    }

    #[test]
    fn test_merge_can_empty_a_set() {
        let mut criteria = FilterCriteria {
            skills: vec!["React".to_string()],
            ..Default::default()
        };
        criteria.merge(FilterUpdate {
            skills: Some(vec![]),
            ..Default::default()
        });
        assert!(criteria.skills.is_empty());
    }

    #[test]
    fn test_update_deserializes_wire_forms() {
        let update: FilterUpdate = serde_json::from_str(
            r#"{"date_posted": "24h", "match_score": "high", "clear": false}"#,
        )
        .unwrap();
        assert_eq!(update.date_posted, Some(DatePosted::Last24h));
        assert_eq!(update.match_score, Some(ScoreTier::High));
        assert!(!update.is_clear());
    }

    #[test]
    fn test_clear_marker() {
        let update: FilterUpdate = serde_json::from_str(r#"{"clear": true}"#).unwrap();
        assert!(update.is_clear());
    }

    #[test]
    fn test_score_tier_boundaries() {
        assert!(ScoreTier::High.admits(71));
        assert!(!ScoreTier::High.admits(70));
        assert!(ScoreTier::Medium.admits(40));
        assert!(ScoreTier::Medium.admits(70));
        assert!(!ScoreTier::Medium.admits(71));
        assert!(!ScoreTier::Medium.admits(39));
        assert!(ScoreTier::All.admits(0));
    }
}
