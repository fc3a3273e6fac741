//! server implementation

mod api_server;
pub mod chat;
pub mod cors;
mod handlers;
mod routes;

pub use api_server::ApiServer;
pub use chat::{ChatBackend, ChatBackendArc, ChatRequest, ChatResponse, EchoBackend};
