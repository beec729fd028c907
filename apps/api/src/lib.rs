//! JobScout: a job-search assistant. Externally sourced postings are scored
//! against an uploaded resume by an LLM, filterable through explicit
//! criteria or a chat assistant, with append-only application tracking.
//!
//! The binary serves the HTTP surface. The [`session`] module is the
//! client-resident state core; the server never calls it.

pub mod assistant;
pub mod config;
pub mod errors;
pub mod filters;
pub mod llm_client;
pub mod matching;
pub mod models;
pub mod profile;
pub mod routes;
pub mod session;
pub mod source;
pub mod state;
pub mod store;
