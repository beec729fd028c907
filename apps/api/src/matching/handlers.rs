//! Axum route handler for the job feed.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::engine::rank_jobs;
use crate::models::job::ScoredJob;
use crate::state::AppState;

const DEFAULT_WHAT: &str = "developer";
const DEFAULT_WHERE: &str = "india";

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub what: Option<String>,
    #[serde(rename = "where")]
    pub place: Option<String>,
    pub user_id: Option<String>,
}

/// GET /jobs?what&where&user_id
///
/// Fetches a page of postings, scores each against the user's stored resume,
/// and returns the ranked list. No resume (or no user) scores against the
/// empty resume rather than failing. An upstream fetch failure surfaces as an
/// error; a partial list is never presented as complete.
pub async fn handle_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<Vec<ScoredJob>>, AppError> {
    let what = query.what.as_deref().unwrap_or(DEFAULT_WHAT);
    let place = query.place.as_deref().unwrap_or(DEFAULT_WHERE);

    let postings = state.job_source.search(what, place).await?;

    let resume_text = match &query.user_id {
        Some(user_id) => state.store.resume_text(user_id).await?,
        None => String::new(),
    };

    let ranked = rank_jobs(state.scorer.as_ref(), &resume_text, postings).await;
    Ok(Json(ranked))
}
