//! The matching engine: fans the scorer out over a batch of postings,
//! collects whatever succeeded, and produces a ranked list. A per-posting
//! failure degrades that posting to score 0 instead of aborting the batch;
//! no posting is ever dropped.

use std::time::Duration;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::warn;

use crate::matching::scorer::{MatchScorer, MatchVerdict};
use crate::models::job::{JobPosting, ScoredJob};

/// Bounded wait per scoring call. The LLM client retries internally; this is
/// the hard ceiling for one posting.
const SCORE_TIMEOUT: Duration = Duration::from_secs(30);

/// Scores every posting against the resume concurrently and returns them
/// ranked: descending by score, ties keeping input order (stable sort), so
/// the list is deterministic across re-renders.
///
/// `resume_text` may be empty; the scorer contract still yields a verdict.
pub async fn rank_jobs(
    scorer: &dyn MatchScorer,
    resume_text: &str,
    postings: Vec<JobPosting>,
) -> Vec<ScoredJob> {
    let futures = postings.into_iter().map(|posting| async move {
        let verdict = match timeout(SCORE_TIMEOUT, scorer.score(resume_text, &posting)).await {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(e)) => {
                warn!(job_id = %posting.id, "scoring failed: {e}");
                failure_verdict("scoring failed")
            }
            Err(_) => {
                warn!(job_id = %posting.id, "scoring timed out after {}s", SCORE_TIMEOUT.as_secs());
                failure_verdict("scoring timed out")
            }
        };
        ScoredJob {
            posting,
            score: verdict.score,
            explanation: verdict.explanation,
        }
    });

    let mut scored: Vec<ScoredJob> = join_all(futures).await;
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn failure_verdict(reason: &str) -> MatchVerdict {
    MatchVerdict {
        score: 0,
        explanation: format!("Match score unavailable: {reason}."),
    }
}
