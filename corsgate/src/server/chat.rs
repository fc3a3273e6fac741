//! The backend behind `POST /api/chat`.
//!
//! The server only owns the HTTP surface; what answers a question is injected as a
//! [`ChatBackend`]. [`EchoBackend`] is the default and is what the tests run against.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
	pub ask: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatResponse {
	pub analysis: String,
}

#[async_trait]
pub trait ChatBackend: Debug + Send + Sync {
	async fn answer(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

pub type ChatBackendArc = Arc<dyn ChatBackend>;

/// Answers every question with the question itself.
#[derive(Debug, Default, Clone)]
pub struct EchoBackend;

#[async_trait]
impl ChatBackend for EchoBackend {
	async fn answer(&self, request: &ChatRequest) -> Result<ChatResponse> {
		Ok(ChatResponse {
			analysis: request.ask.trim().to_string(),
		})
	}
}
