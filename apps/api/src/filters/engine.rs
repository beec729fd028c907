//! The pure filtering engine: AND-composes the active criteria over a scored
//! job list. It narrows, never reorders: output preserves the relative order
//! of the input, so applying the same criteria twice is a fixpoint.

use chrono::{DateTime, Duration, Utc};

use crate::filters::criteria::{DatePosted, FilterCriteria};
use crate::models::job::ScoredJob;

/// How many jobs the "best matches" view surfaces.
const BEST_MATCHES_LIMIT: usize = 8;

/// Applies `criteria` to `jobs`, anchored at the current time.
pub fn apply_filters(jobs: &[ScoredJob], criteria: &FilterCriteria) -> Vec<ScoredJob> {
    apply_filters_at(jobs, criteria, Utc::now())
}

/// Same as [`apply_filters`] with an explicit evaluation time, so the
/// date-posted window is deterministic under test.
pub fn apply_filters_at(
    jobs: &[ScoredJob],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<ScoredJob> {
    jobs.iter()
        .filter(|job| admits(job, criteria, now))
        .cloned()
        .collect()
}

/// The "best matches" view: positive scores only, descending, top 8.
/// Derived fresh from the current filtered set on every call, never cached.
pub fn best_matches(jobs: &[ScoredJob]) -> Vec<ScoredJob> {
    let mut best: Vec<ScoredJob> = jobs.iter().filter(|j| j.score > 0).cloned().collect();
    best.sort_by(|a, b| b.score.cmp(&a.score));
    best.truncate(BEST_MATCHES_LIMIT);
    best
}

fn admits(job: &ScoredJob, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    let posting = &job.posting;

    if !criteria.title.is_empty()
        && !contains_ci(&posting.title, &criteria.title)
    {
        return false;
    }

    // Any selected skill may match title or description (OR within the set).
    if !criteria.skills.is_empty()
        && !criteria.skills.iter().any(|skill| {
            contains_ci(&posting.title, skill) || contains_ci(&posting.description, skill)
        })
    {
        return false;
    }

    if let Some(window) = posting_window(criteria.date_posted) {
        match posting.posted_at {
            Some(posted_at) if posted_at >= now - window => {}
            // Unknown posting time cannot satisfy a bounded window.
            _ => return false,
        }
    }

    if !criteria.job_types.is_empty()
        && !criteria.job_types.iter().any(|t| t == &posting.contract_type)
    {
        return false;
    }

    if !criteria.work_modes.is_empty()
        && !criteria
            .work_modes
            .iter()
            .any(|m| m == posting.work_mode.as_str())
    {
        return false;
    }

    if !criteria.location.is_empty()
        && !contains_ci(&posting.location, &criteria.location)
    {
        return false;
    }

    criteria.match_score.admits(job.score)
}

fn posting_window(date_posted: DatePosted) -> Option<Duration> {
    match date_posted {
        DatePosted::Any => None,
        DatePosted::Last24h => Some(Duration::hours(24)),
        DatePosted::LastWeek => Some(Duration::days(7)),
        DatePosted::LastMonth => Some(Duration::days(30)),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
