pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers::handle_assistant;
use crate::matching::handlers::handle_jobs;
use crate::profile::handlers::{handle_applications, handle_apply, handle_upload_resume};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/jobs", get(handle_jobs))
        .route("/upload-resume", post(handle_upload_resume))
        .route("/apply", post(handle_apply))
        .route("/applications/:user_id", get(handle_applications))
        .route("/assistant", post(handle_assistant))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{AssistantReply, IntentRouter};
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::matching::scorer::{MatchScorer, MatchVerdict};
    use crate::models::chat::ChatMessage;
    use crate::models::job::JobPosting;
    use crate::source::JobSource;
    use crate::store::JsonStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct EmptySource;

    #[async_trait]
    impl JobSource for EmptySource {
        async fn search(&self, _what: &str, _place: &str) -> Result<Vec<JobPosting>, AppError> {
            Ok(vec![])
        }
    }

    struct FixedScorer;

    #[async_trait]
    impl MatchScorer for FixedScorer {
        async fn score(
            &self,
            _resume_text: &str,
            _posting: &JobPosting,
        ) -> Result<MatchVerdict, AppError> {
            Ok(MatchVerdict {
                score: 50,
                explanation: "fixed".to_string(),
            })
        }
    }

    struct ApologyRouter;

    #[async_trait]
    impl IntentRouter for ApologyRouter {
        async fn route(&self, _history: &[ChatMessage], _utterance: &str) -> AssistantReply {
            AssistantReply::apology()
        }
    }

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        AppState {
            job_source: Arc::new(EmptySource),
            scorer: Arc::new(FixedScorer),
            assistant: Arc::new(ApologyRouter),
            store: Arc::new(JsonStore::new(dir.path().join("data.json"))),
            config: Config {
                adzuna_app_id: "id".to_string(),
                adzuna_app_key: "key".to_string(),
                anthropic_api_key: "key".to_string(),
                data_path: dir.path().join("data.json"),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobscout-api");
    }

    #[tokio::test]
    async fn test_jobs_endpoint_returns_list() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::get("/jobs?what=rust&where=pune&user_id=u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_apply_then_list_applications() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let response = build_router(state.clone())
            .oneshot(
                Request::post("/apply")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"user_id": "u1", "job_id": "job1", "status": "Applied"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = build_router(state)
            .oneshot(
                Request::get("/applications/u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["status"], "Applied");
    }

    #[tokio::test]
    async fn test_assistant_endpoint_never_5xxs_on_degraded_router() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::post("/assistant")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "do something odd"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["intent"], "help");
    }

    #[tokio::test]
    async fn test_upload_resume_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir));
        let response = app
            .oneshot(
                Request::post("/upload-resume")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"user_id": "u1", "resume_text": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
