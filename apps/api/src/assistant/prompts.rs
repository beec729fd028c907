// Prompt constants and builders for the assistant intent router.

use crate::models::chat::{ChatMessage, ChatRole};

/// System prompt for intent classification. Enforces JSON-only output.
pub const ASSISTANT_SYSTEM: &str = "You are the chat assistant of a job-search \
    product. You classify the user's latest message and adjust search filters. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const ROUTE_PROMPT_TEMPLATE: &str = r#"Classify the user's latest message into exactly one intent and reply.

Intents:
- "search": the user wants the job feed refreshed or a new role/location searched.
- "filter": the user wants the visible jobs narrowed, widened, or reset.
- "help": anything else — questions, small talk, unclear requests.

Return a JSON object with this EXACT schema:
{
  "intent": "search" | "filter" | "help",
  "filter_payload": {
    "title": "frontend developer",
    "skills": ["React"],
    "date_posted": "any" | "24h" | "week" | "month",
    "job_types": ["full_time", "part_time", "contract", "internship"],
    "work_modes": ["remote", "on-site"],
    "location": "Pune",
    "match_score": "all" | "high" | "medium",
    "clear": false
  },
  "reply_text": "One short, friendly sentence telling the user what you did."
}

Rules:
- "filter_payload" only for intent "filter"; include ONLY the keys the user asked to change.
- If the user asks to reset or clear filters, return {"clear": true} as the whole payload.
- Never invent filter keys beyond the schema above.

CONVERSATION SO FAR:
{history}

LATEST USER MESSAGE:
{utterance}"#;

/// Renders the transcript and the new utterance into the routing prompt.
pub fn build_route_prompt(history: &[ChatMessage], utterance: &str) -> String {
    let rendered: String = history
        .iter()
        .map(|m| {
            let speaker = match m.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            format!("{speaker}: {}\n", m.content)
        })
        .collect();
    let rendered = if rendered.is_empty() {
        "(empty)".to_string()
    } else {
        rendered
    };
    ROUTE_PROMPT_TEMPLATE
        .replace("{history}", &rendered)
        .replace("{utterance}", utterance)
}
