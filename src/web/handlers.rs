//! Request handlers for the single-page UI and its API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;
use crate::commands::json::ErrorJson;
use crate::error::RefineError;

/// The embedded single-page UI.
const INDEX_PAGE: &str = include_str!("index.html");

/// Serves the single-page UI.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "coderefine",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub language: Option<String>,
}

/// Runs a code review for the browser UI.
///
/// Responses use the same `{success, data, error}` envelope as the CLI's
/// JSON output: `400` for unusable input, `502` when the provider fails.
pub async fn review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Response {
    if request.code.trim().is_empty() {
        let err = RefineError::InvalidInput("code is empty; nothing to review".to_string());
        return error_response(StatusCode::BAD_REQUEST, &err);
    }

    if request.code.len() > state.config.review.max_code_bytes {
        let err = RefineError::InvalidInput(format!(
            "code is {} bytes, exceeding the {} byte limit",
            request.code.len(),
            state.config.review.max_code_bytes
        ));
        return error_response(StatusCode::BAD_REQUEST, &err);
    }

    let language = request
        .language
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(&state.config.review.default_language);

    tracing::debug!(
        "Review request: {} bytes of {} code",
        request.code.len(),
        language
    );

    match state
        .provider
        .review_code(
            &request.code,
            Some(language),
            state.config.review.custom_prompt.as_deref(),
            None,
        )
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": report
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Code review failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, &e)
        }
    }
}

fn error_response(status: StatusCode, err: &RefineError) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": ErrorJson::from_error(err)
        })),
    )
        .into_response()
}
