// Resume-to-job matching: one scorer call per posting, fanned out
// concurrently, merged into a ranked list. All LLM calls go through
// llm_client; no direct Anthropic calls here.

pub mod engine;
pub mod handlers;
pub mod prompts;
pub mod scorer;
