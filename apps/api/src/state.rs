use std::sync::Arc;

use crate::assistant::IntentRouter;
use crate::config::Config;
use crate::matching::scorer::MatchScorer;
use crate::source::JobSource;
use crate::store::JsonStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Collaborators are trait objects so tests can swap them.
#[derive(Clone)]
pub struct AppState {
    pub job_source: Arc<dyn JobSource>,
    /// Pluggable resume-to-job scorer. Default: LlmMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub assistant: Arc<dyn IntentRouter>,
    pub store: Arc<JsonStore>,
    pub config: Config,
}
