//! Client session core: the single source of truth behind the UI.
//!
//! All mutation goes through [`reduce`] with a closed set of [`Action`]s;
//! no field is written from outside, so concurrent re-renders always read a
//! consistent snapshot. Whenever jobs or criteria change, the filtered view
//! is re-derived in the same transition; stale derived data is never
//! observable next to fresh criteria.
//!
//! In-flight job fetches are generation-tagged: every filter-changing action
//! bumps `filter_generation`, and a [`Action::SetJobs`] carrying an older
//! generation is dropped, so a superseded response cannot stomp fresher
//! state.

use chrono::{DateTime, Utc};

use crate::assistant::AssistantReply;
use crate::filters::{apply_filters_at, FilterCriteria, FilterUpdate};
use crate::models::chat::ChatMessage;
use crate::models::job::ScoredJob;
use crate::models::user::{Application, ApplicationStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub resume_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    /// Ranked jobs as last fetched; the cache the filtered view derives from.
    pub jobs: Vec<ScoredJob>,
    pub filtered_jobs: Vec<ScoredJob>,
    pub applications: Vec<Application>,
    pub filters: FilterCriteria,
    /// Bumped by every filter-changing action; tags in-flight fetches.
    pub filter_generation: u64,
    pub loading: bool,
    pub chat_open: bool,
    pub chat_messages: Vec<ChatMessage>,
    pub popup_job: Option<ScoredJob>,
}

impl SessionState {
    pub fn has_resume(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.resume_text.is_some())
            .unwrap_or(false)
    }
}

/// The closed set of session transitions. Every variant is total: when its
/// precondition is unmet it reduces to a no-op, never a panic.
#[derive(Debug, Clone)]
pub enum Action {
    SetUser(Option<SessionUser>),
    /// Requires a user; no-op otherwise.
    SetResume(String),
    /// Replaces the job cache. Ignored when `generation` is older than the
    /// session's current filter generation (superseded fetch).
    SetJobs {
        jobs: Vec<ScoredJob>,
        generation: u64,
    },
    SetApplications(Vec<Application>),
    UpdateFilters(FilterUpdate),
    ClearFilters,
    /// Requires a user; appends to the history, never rewrites it.
    RecordApplication {
        job_id: String,
        status: ApplicationStatus,
        timestamp: DateTime<Utc>,
    },
    SetLoading(bool),
    AppendChatMessage(ChatMessage),
    ToggleChat,
    ShowPopup(ScoredJob),
    HidePopup,
}

/// Applies one transition, anchored at the current time.
pub fn reduce(state: SessionState, action: Action) -> SessionState {
    reduce_at(state, action, Utc::now())
}

/// Pure transition function; `now` anchors the date-posted window so
/// derivations are deterministic under test.
pub fn reduce_at(mut state: SessionState, action: Action, now: DateTime<Utc>) -> SessionState {
    match action {
        Action::SetUser(user) => {
            state.user = user;
        }
        Action::SetResume(text) => {
            if let Some(user) = state.user.as_mut() {
                user.resume_text = Some(text);
            }
        }
        Action::SetJobs { jobs, generation } => {
            if generation < state.filter_generation {
                // A newer filter change superseded this fetch.
                return state;
            }
            state.jobs = jobs;
            state.filtered_jobs = apply_filters_at(&state.jobs, &state.filters, now);
        }
        Action::SetApplications(applications) => {
            state.applications = applications;
        }
        Action::UpdateFilters(update) => {
            state.filters.merge(update);
            state.filter_generation += 1;
            state.filtered_jobs = apply_filters_at(&state.jobs, &state.filters, now);
        }
        Action::ClearFilters => {
            state.filters = FilterCriteria::default();
            state.filter_generation += 1;
            state.filtered_jobs = apply_filters_at(&state.jobs, &state.filters, now);
        }
        Action::RecordApplication {
            job_id,
            status,
            timestamp,
        } => {
            if state.user.is_none() {
                return state;
            }
            state.applications.push(Application {
                job_id,
                status,
                timestamp,
            });
        }
        Action::SetLoading(loading) => {
            state.loading = loading;
        }
        Action::AppendChatMessage(message) => {
            state.chat_messages.push(message);
        }
        Action::ToggleChat => {
            state.chat_open = !state.chat_open;
        }
        Action::ShowPopup(job) => {
            state.popup_job = Some(job);
        }
        Action::HidePopup => {
            state.popup_job = None;
        }
    }
    state
}

/// Applies an assistant reply per the router contract: the reply text joins
/// the transcript, and a filter payload mutates the criteria: `clear`
/// resets, anything else merges. Returns the new state and whether a job
/// re-fetch is due (true after any filter mutation).
pub fn apply_assistant_reply(state: SessionState, reply: &AssistantReply) -> (SessionState, bool) {
    apply_assistant_reply_at(state, reply, Utc::now())
}

pub fn apply_assistant_reply_at(
    state: SessionState,
    reply: &AssistantReply,
    now: DateTime<Utc>,
) -> (SessionState, bool) {
    let mut state = reduce_at(
        state,
        Action::AppendChatMessage(ChatMessage::assistant(reply.reply_text.clone())),
        now,
    );
    let refetch = match &reply.filter_payload {
        Some(payload) if payload.is_clear() => {
            state = reduce_at(state, Action::ClearFilters, now);
            true
        }
        Some(payload) => {
            state = reduce_at(state, Action::UpdateFilters(payload.clone()), now);
            true
        }
        None => false,
    };
    (state, refetch)
}
