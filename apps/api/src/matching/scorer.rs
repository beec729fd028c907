//! Match scorer: pluggable, trait-based judgement of one resume against one
//! posting. The default backend asks the LLM; tests substitute scripted
//! scorers. `AppState` holds an `Arc<dyn MatchScorer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::models::job::JobPosting;

/// A validated scoring result: score already clamped to 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub score: u8,
    pub explanation: String,
}

/// Wire shape of the collaborator's answer. The score arrives as an
/// unconstrained number; anything non-numeric fails deserialization and is
/// handled by the caller as a per-item failure.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    score: f64,
    #[serde(default)]
    explanation: String,
}

impl MatchVerdict {
    /// Out-of-range scores are clamped, not rejected.
    fn from_raw(raw: RawVerdict) -> Self {
        Self {
            score: raw.score.clamp(0.0, 100.0).round() as u8,
            explanation: raw.explanation,
        }
    }
}

/// The scorer contract: (resume text, posting) → verdict. Must tolerate an
/// empty resume; a low score is the expected answer, not an error.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        posting: &JobPosting,
    ) -> Result<MatchVerdict, AppError>;
}

/// LLM-backed scorer. One call per posting; validation and clamping happen
/// here so the engine only ever sees well-formed verdicts.
pub struct LlmMatchScorer {
    llm: LlmClient,
}

impl LlmMatchScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(
        &self,
        resume_text: &str,
        posting: &JobPosting,
    ) -> Result<MatchVerdict, AppError> {
        let prompt = MATCH_PROMPT_TEMPLATE
            .replace("{job_title}", &posting.title)
            .replace("{job_description}", &posting.description)
            .replace("{resume}", resume_text);

        let raw: RawVerdict = self
            .llm
            .call_json(&prompt, MATCH_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("match scoring failed: {e}")))?;

        Ok(MatchVerdict::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_clamps_out_of_range_scores() {
        let high = MatchVerdict::from_raw(RawVerdict {
            score: 150.0,
            explanation: String::new(),
        });
        assert_eq!(high.score, 100);

        let low = MatchVerdict::from_raw(RawVerdict {
            score: -3.0,
            explanation: String::new(),
        });
        assert_eq!(low.score, 0);

        let fractional = MatchVerdict::from_raw(RawVerdict {
            score: 62.4,
            explanation: String::new(),
        });
        assert_eq!(fractional.score, 62);
    }

    #[test]
    fn test_raw_verdict_rejects_non_numeric_score() {
        let result: Result<RawVerdict, _> =
            serde_json::from_str(r#"{"score": "eighty", "explanation": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_verdict_defaults_missing_explanation() {
        let raw: RawVerdict = serde_json::from_str(r#"{"score": 55}"#).unwrap();
        let verdict = MatchVerdict::from_raw(raw);
        assert_eq!(verdict.score, 55);
        assert!(verdict.explanation.is_empty());
    }
}
