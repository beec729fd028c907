//! Chat assistant collaborator: classifies a user utterance against the
//! running transcript into an intent and, for filter intents, a partial
//! criteria update. The router never fails: anything malformed degrades to
//! an apology reply so the transcript keeps flowing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filters::criteria::FilterUpdate;
use crate::llm_client::LlmClient;
use crate::models::chat::ChatMessage;

pub mod handlers;
pub mod prompts;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Search,
    Filter,
    Help,
}

/// The router's answer. `filter_payload` is present only for filter intents;
/// its `clear` marker requests a full criteria reset instead of a merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_payload: Option<FilterUpdate>,
    pub reply_text: String,
}

const APOLOGY_TEXT: &str = "Sorry, I couldn't work out what to do with that. \
    Try \"show remote React jobs\" or \"clear all filters\".";

impl AssistantReply {
    /// The degraded reply used whenever classification fails.
    pub fn apology() -> Self {
        Self {
            intent: Intent::Help,
            filter_payload: None,
            reply_text: APOLOGY_TEXT.to_string(),
        }
    }
}

#[async_trait]
pub trait IntentRouter: Send + Sync {
    async fn route(&self, history: &[ChatMessage], utterance: &str) -> AssistantReply;
}

// ── Wire types ──────────────────────────────────────────────────────────────

/// Tolerant shape for the LLM's answer; every field optional so partial
/// output still parses and can be judged below.
#[derive(Debug, Deserialize)]
struct RawReply {
    intent: Option<String>,
    #[serde(default)]
    filter_payload: Option<FilterUpdate>,
    reply_text: Option<String>,
}

fn parse_intent(raw: &str) -> Option<Intent> {
    match raw.trim().to_lowercase().as_str() {
        "search" => Some(Intent::Search),
        "filter" => Some(Intent::Filter),
        "help" => Some(Intent::Help),
        _ => None,
    }
}

fn default_reply(intent: Intent) -> &'static str {
    match intent {
        Intent::Search => "Refreshing your job feed.",
        Intent::Filter => "Done, I've updated your filters.",
        Intent::Help => APOLOGY_TEXT,
    }
}

fn interpret(raw: RawReply) -> AssistantReply {
    let intent = match raw.intent.as_deref().and_then(parse_intent) {
        Some(intent) => intent,
        None => return AssistantReply::apology(),
    };
    let reply_text = match raw.reply_text {
        Some(text) if !text.trim().is_empty() => text,
        _ => default_reply(intent).to_string(),
    };
    AssistantReply {
        intent,
        // Payloads only make sense on filter intents.
        filter_payload: if intent == Intent::Filter {
            raw.filter_payload
        } else {
            None
        },
        reply_text,
    }
}

// ── LLM-backed router ───────────────────────────────────────────────────────

pub struct LlmIntentRouter {
    llm: LlmClient,
}

impl LlmIntentRouter {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IntentRouter for LlmIntentRouter {
    async fn route(&self, history: &[ChatMessage], utterance: &str) -> AssistantReply {
        let prompt = prompts::build_route_prompt(history, utterance);
        match self
            .llm
            .call_json::<RawReply>(&prompt, prompts::ASSISTANT_SYSTEM)
            .await
        {
            Ok(raw) => interpret(raw),
            Err(e) => {
                warn!("assistant classification failed: {e}");
                AssistantReply::apology()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_interpret_filter_intent_with_payload() {
        let reply = interpret(raw(
            r#"{
                "intent": "filter",
                "filter_payload": {"work_modes": ["remote"], "skills": ["React"]},
                "reply_text": "Showing remote React jobs."
            }"#,
        ));
        assert_eq!(reply.intent, Intent::Filter);
        let payload = reply.filter_payload.unwrap();
        assert_eq!(payload.work_modes.unwrap(), vec!["remote".to_string()]);
        assert_eq!(reply.reply_text, "Showing remote React jobs.");
    }

    #[test]
    fn test_interpret_clear_marker_passes_through() {
        let reply = interpret(raw(
            r#"{"intent": "filter", "filter_payload": {"clear": true}, "reply_text": "Cleared."}"#,
        ));
        assert!(reply.filter_payload.unwrap().is_clear());
    }

    #[test]
    fn test_intent_less_reply_degrades_to_apology() {
        let reply = interpret(raw(r#"{"reply_text": "hello"}"#));
        assert_eq!(reply.intent, Intent::Help);
        assert!(reply.reply_text.contains("Sorry"));
        assert!(reply.filter_payload.is_none());
    }

    #[test]
    fn test_unknown_intent_degrades_to_apology() {
        let reply = interpret(raw(r#"{"intent": "purchase", "reply_text": "ok"}"#));
        assert_eq!(reply.intent, Intent::Help);
        assert!(reply.reply_text.contains("Sorry"));
    }

    #[test]
    fn test_missing_reply_text_gets_intent_default() {
        let reply = interpret(raw(r#"{"intent": "search"}"#));
        assert_eq!(reply.intent, Intent::Search);
        assert!(!reply.reply_text.is_empty());
    }

    #[test]
    fn test_payload_dropped_on_non_filter_intent() {
        let reply = interpret(raw(
            r#"{"intent": "help", "filter_payload": {"clear": true}, "reply_text": "hi"}"#,
        ));
        assert!(reply.filter_payload.is_none());
    }
}
