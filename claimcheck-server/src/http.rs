//! ClaimCheck HTTP REST API
//!
//! Axum-based HTTP server exposing the fact-check engine. Runs alongside the
//! Unix socket IPC server (port 8787 by default).
//!
//! Each endpoint has a thin axum handler delegating to an inner function that
//! is directly testable without axum dispatch.
//!
//! Endpoints:
//! - GET  /health             : health check
//! - GET  /version            : server version info
//! - POST /fact-check         : verify a brief against its case
//! - POST /guidelines/resolve : resolve a single guideline citation
//! - POST /codes/validate     : identify the coding system of a code

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use claimcheck_core::ipc::{ClaimCheckRequest, ClaimCheckResponse};
use claimcheck_core::{Brief, CaseRecord, ClaimCheckConfig, FactChecker};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub checker: FactChecker,
    pub config: ClaimCheckConfig,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/fact-check", post(fact_check_handler))
        .route("/guidelines/resolve", post(resolve_handler))
        .route("/codes/validate", post(validate_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    checker: FactChecker,
    config: ClaimCheckConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState { checker, config });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("ClaimCheck HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct FactCheckRequest {
    pub brief: Option<Brief>,
    pub case: Option<CaseRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub citation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub code: Option<String>,
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }

    fn into_value(self) -> serde_json::Value {
        serde_json::json!({
            "error": self.error,
            "status": self.status,
        })
    }
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner health check: reports the loaded reference data.
pub fn health_inner(checker: &FactChecker, socket_path: &str) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::OK,
        serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "guideline_entries": checker.guidelines().entries().len(),
            "socket": socket_path,
        }),
    )
}

/// Inner version: returns version info (pure, no IO).
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "claimcheck/1",
    })
}

/// Inner fact check: validates the body and calls the IPC router.
pub fn fact_check_inner(
    checker: &FactChecker,
    req: FactCheckRequest,
) -> (StatusCode, serde_json::Value) {
    let (brief, case) = match (req.brief, req.case) {
        (Some(brief), Some(case)) => (brief, case),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("brief and case fields are required").into_value(),
            );
        }
    };

    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("fact_check", %request_id, case_id = ?case.id);
    let _guard = span.enter();

    let response = crate::router::handle_request(ClaimCheckRequest::Check { brief, case }, checker);
    let took_ms = start.elapsed().as_millis() as u64;
    tracing::debug!("Fact check took {}ms", took_ms);

    into_http(response)
}

/// Inner resolve: rejects blank citations.
pub fn resolve_inner(checker: &FactChecker, req: ResolveRequest) -> (StatusCode, serde_json::Value) {
    let citation = match req.citation {
        Some(c) if !c.trim().is_empty() => c,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("citation field is required").into_value(),
            );
        }
    };

    into_http(crate::router::handle_request(
        ClaimCheckRequest::ResolveGuideline { citation },
        checker,
    ))
}

/// Inner validate: rejects blank codes.
pub fn validate_inner(checker: &FactChecker, req: ValidateRequest) -> (StatusCode, serde_json::Value) {
    let code = match req.code {
        Some(c) if !c.trim().is_empty() => c,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("code field is required").into_value(),
            );
        }
    };

    into_http(crate::router::handle_request(
        ClaimCheckRequest::ValidateCode { code },
        checker,
    ))
}

// ============================================================================
// Axum handler wrappers (thin: delegate to inner functions)
// ============================================================================

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(&state.checker, &state.config.service.socket_path);
    (status, Json(body))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn fact_check_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<FactCheckRequest>,
) -> impl IntoResponse {
    let (status, body) = fact_check_inner(&state.checker, req);
    (status, Json(body))
}

pub async fn resolve_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<ResolveRequest>,
) -> impl IntoResponse {
    let (status, body) = resolve_inner(&state.checker, req);
    (status, Json(body))
}

pub async fn validate_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<ValidateRequest>,
) -> impl IntoResponse {
    let (status, body) = validate_inner(&state.checker, req);
    (status, Json(body))
}

// ============================================================================
// Helpers
// ============================================================================

/// Convert an IPC `ClaimCheckResponse` into an HTTP body value, or an error string.
pub fn response_to_http(
    response: ClaimCheckResponse,
) -> std::result::Result<serde_json::Value, String> {
    if response.status == "ok" {
        Ok(response.data.unwrap_or(serde_json::json!({})))
    } else {
        Err(response.error.unwrap_or_else(|| "unknown error".to_string()))
    }
}

fn into_http(response: ClaimCheckResponse) -> (StatusCode, serde_json::Value) {
    match response_to_http(response) {
        Ok(data) => (StatusCode::OK, data),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(e).into_value(),
        ),
    }
}

// ============================================================================
// Unit Tests: call inner functions directly
// ============================================================================
