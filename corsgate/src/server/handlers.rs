//! HTTP handlers and response helpers.

use super::chat::{ChatBackendArc, ChatRequest};
use axum::{
	Json,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

#[derive(Clone, Debug)]
pub struct ChatHandlerState {
	pub backend: ChatBackendArc,
}

/// Liveness probe.
pub async fn serve_healthz() -> Response {
	ok_json(&json!({ "status": "healthy" }))
}

/// Readiness probe. The server is ready as soon as it is listening.
pub async fn serve_readyz() -> Response {
	ok_json(&json!({ "status": "ready" }))
}

pub async fn serve_chat(
	State(state): State<ChatHandlerState>,
	payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
	let request = match payload {
		Ok(Json(request)) => request,
		Err(rejection) => return error_json(rejection.status(), &rejection.body_text()),
	};

	if request.ask.trim().is_empty() {
		return error_json(StatusCode::BAD_REQUEST, "field 'ask' must not be empty");
	}

	match state.backend.answer(&request).await {
		Ok(response) => ok_json(&response),
		Err(err) => {
			log::error!("chat backend failed: {err:#}");
			error_json(StatusCode::INTERNAL_SERVER_ERROR, "chat backend failed")
		}
	}
}

pub fn ok_json<T: Serialize>(value: &T) -> Response {
	(StatusCode::OK, Json(value)).into_response()
}

pub fn error_json(status: StatusCode, message: &str) -> Response {
	(status, Json(json!({ "error": message }))).into_response()
}

pub fn ok_not_found() -> Response {
	error_json(StatusCode::NOT_FOUND, "Not Found")
}
