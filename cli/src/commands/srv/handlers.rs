//! # PabloBot HTTP Handlers
//!
//! File: cli/src/commands/srv/handlers.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! | Method | Path                | Response                                   |
//! |--------|---------------------|--------------------------------------------|
//! | GET    | `/`                 | chat page (rendered once at startup)       |
//! | POST   | `/chat`             | `{"reply": ..., "intent": ..., "name"?: ...}` |
//! | GET    | `/health`           | `{"status": "ok"}`                         |
//! | GET    | `/static/script.js` | embedded client script                     |
//!
//! With a static directory configured, `/static/*` comes from that directory
//! and the embedded script is served only when the directory has none.
//!
//! `/chat` never rejects a request: a missing `message`, a non-JSON body or
//! an empty body are all answered as if the message were empty.
//!
use crate::bot::{Intent, Responder};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const SCRIPT_JS: &str = include_str!("../../../assets/script.js");

/// Shared state of the HTTP service.
#[derive(Clone, Debug)]
pub struct AppState {
    pub responder: Responder,
    pub index_html: Arc<String>,
}

/// Body of `POST /chat`.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer of `POST /chat`.
#[derive(Serialize, Debug)]
pub struct ChatResponse {
    pub reply: String,
    pub intent: Intent,
    /// Set when the message introduced the user; the page keeps it in local storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.as_str().to_owned())
}

pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

/// Answers requests the static directory could not serve.
pub async fn static_fallback(uri: Uri) -> Response {
    match uri.path() {
        "/script.js" | "/static/script.js" => script().await.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let message = parse_chat_request(&body).message.unwrap_or_default();
    let reply = state.responder.respond(&message);
    debug!(intent = %reply.intent, "Answered chat request");

    Json(ChatResponse {
        reply: reply.text,
        intent: reply.intent,
        name: reply.name,
    })
}

/// Lenient body parsing: anything unreadable becomes an empty request.
fn parse_chat_request(body: &[u8]) -> ChatRequest {
    if body.iter().all(u8::is_ascii_whitespace) {
        return ChatRequest::default();
    }
    match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Unreadable chat request body, treating as empty message: {}", e);
            ChatRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_request() {
        assert_eq!(
            parse_chat_request(br#"{"message":"hi"}"#).message.as_deref(),
            Some("hi")
        );
        assert_eq!(parse_chat_request(b"{}"), ChatRequest::default());
        assert_eq!(parse_chat_request(b""), ChatRequest::default());
        assert_eq!(parse_chat_request(b"  \n"), ChatRequest::default());
        assert_eq!(parse_chat_request(b"not json"), ChatRequest::default());
        assert_eq!(
            parse_chat_request(br#"{"message":null}"#),
            ChatRequest::default()
        );
        assert_eq!(
            parse_chat_request(br#"{"message":42}"#),
            ChatRequest::default()
        );
    }

    #[test]
    fn test_chat_response_omits_missing_name() {
        let response = ChatResponse {
            reply: "Hello. How may I assist you?".into(),
            intent: Intent::Greeting,
            name: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({ "reply": "Hello. How may I assist you?", "intent": "greeting" })
        );
    }
}
