//! API route handlers for the gateway.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::server::AppState;
use crate::session::Session;

const LOGIN_FAILED_MESSAGE: &str = "일치하는 사번이 없습니다. 시트의 사번을 확인해 주세요.";
const SESSION_EXPIRED_MESSAGE: &str = "로그인이 만료되었습니다. 다시 로그인해 주세요.";

fn require_session(state: &AppState, token: &str) -> Result<Session, Json<Value>> {
    state
        .sessions
        .get(token)
        .ok_or_else(|| Json(json!({"ok": false, "error": SESSION_EXPIRED_MESSAGE})))
}

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "branchdesk-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// System information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = state.assistant.config();
    Json(json!({
        "name": config.identity.name,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "provider": state.assistant.generator_name(),
        "active_sessions": state.sessions.active_count(),
        "retrieval": {
            "low_threshold": config.retrieval.low_threshold,
            "high_threshold": config.retrieval.high_threshold,
            "top_k": config.retrieval.top_k,
        }
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub employee_id: String,
}

/// Employee-id login against the roster sheet.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Json<Value> {
    match state.assistant.login(&req.employee_id).await {
        Some(employee) => {
            let token = state.sessions.create(&employee);
            tracing::info!("🔑 Login: {} ({})", employee.name, employee.employee_id);
            Json(json!({"ok": true, "token": token, "name": employee.name}))
        }
        None => Json(json!({"ok": false, "error": LOGIN_FAILED_MESSAGE})),
    }
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Json<Value> {
    let removed = state.sessions.remove(&req.token);
    Json(json!({"ok": removed}))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub token: String,
    pub message: String,
}

/// Answer one question for a logged-in employee.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<Value> {
    let session = match require_session(&state, &req.token) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let answer = state.assistant.ask(&req.message, &session.name).await;
    Json(json!({"ok": true, "name": session.name, "answer": answer}))
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub token: String,
    pub query: String,
}

/// Ranked guideline candidates for citation display in the client.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<Value> {
    if let Err(resp) = require_session(&state, &req.token) {
        return resp;
    }

    let candidates: Vec<Value> = state
        .assistant
        .search(&req.query)
        .await
        .iter()
        .map(|c| {
            json!({
                "row": c.display_row(),
                "score": c.score,
                "question": c.question,
                "answer": c.answer,
            })
        })
        .collect();
    Json(json!({"ok": true, "candidates": candidates}))
}
