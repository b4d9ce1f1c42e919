//! Web API integration tests.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`:
//! page serving, the review endpoint's envelope, and error mapping.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use tower::ServiceExt;

use coderefine::config::AppConfig;
use coderefine::error::{RefineError, Result};
use coderefine::llm::{LLMProvider, ProgressReporter, ReviewReport};
use coderefine::web::routes::create_router;
use coderefine::web::state::AppState;

// ========== Mock LLM provider ==========

#[derive(Debug)]
struct MockWebLLM {
    should_fail: bool,
}

#[async_trait]
impl LLMProvider for MockWebLLM {
    async fn review_code(
        &self,
        _code: &str,
        language: Option<&str>,
        _custom_prompt: Option<&str>,
        _progress: Option<&dyn ProgressReporter>,
    ) -> Result<ReviewReport> {
        if self.should_fail {
            return Err(RefineError::LlmApi {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }

        Ok(ReviewReport {
            bugs: vec![format!("Bug in {} code", language.unwrap_or("?"))],
            improvements: vec!["Add tests".to_string()],
            fixed_code: "fixed()".to_string(),
        })
    }

    fn name(&self) -> &str {
        "MockWebLLM"
    }

    async fn validate(&self) -> Result<()> {
        Ok(())
    }
}

// ========== helpers ==========

fn test_router(should_fail: bool) -> Router {
    let state = AppState::new(
        Arc::new(MockWebLLM { should_fail }),
        AppConfig::default(),
    );
    create_router(state)
}

fn review_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/review")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== tests ==========

#[tokio::test]
async fn test_index_serves_single_page() {
    let response = test_router(false)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("CodeRefine"));
    assert!(page.contains("Analyze Code"));
    assert!(page.contains("Identified Issues"));
    assert!(page.contains("Suggested Improvements"));
    assert!(page.contains("Fixed Code"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_router(false)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "coderefine");
}

#[tokio::test]
async fn test_review_success_envelope() {
    let response = test_router(false)
        .oneshot(review_request(
            r#"{"code":"def f():\n    pass\n","language":"python"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["bugs"][0], "Bug in python code");
    assert_eq!(json["data"]["improvements"][0], "Add tests");
    assert_eq!(json["data"]["fixed_code"], "fixed()");
}

#[tokio::test]
async fn test_review_defaults_language_when_missing() {
    let response = test_router(false)
        .oneshot(review_request(r#"{"code":"print(1)"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // AppConfig::default() says python.
    assert_eq!(json["data"]["bugs"][0], "Bug in python code");
}

#[tokio::test]
async fn test_review_empty_code_rejected() {
    let response = test_router(false)
        .oneshot(review_request(r#"{"code":"   \n"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_review_oversized_code_rejected() {
    let big_code = "x".repeat(300 * 1024);
    let body = serde_json::json!({ "code": big_code }).to_string();

    let response = test_router(false).oneshot(review_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_INPUT");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("byte limit"));
}

#[tokio::test]
async fn test_review_provider_failure_maps_to_bad_gateway() {
    let response = test_router(true)
        .oneshot(review_request(r#"{"code":"print(1)"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "LLM_API_ERROR");
    assert!(json["error"]["suggestion"].is_string());
}
