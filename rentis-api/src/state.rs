use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use rentis_flow::{FlowController, SessionContext};

use crate::error::AppError;

/// Header carrying the opaque session token.
pub const SESSION_HEADER: &str = "x-rentis-session";

/// Per-client contexts keyed by opaque token. No expiry; lifecycle is
/// tied to the token the client holds.
pub type SessionMap = Arc<RwLock<HashMap<Uuid, SessionContext>>>;

#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<FlowController>,
    pub sessions: SessionMap,
}

impl AppState {
    pub fn new(flow: Arc<FlowController>) -> Self {
        Self {
            flow,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Pull the session token out of the request headers.
pub fn session_token(headers: &HeaderMap) -> Result<Uuid, AppError> {
    let raw = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing session token".to_string()))?;

    Uuid::parse_str(raw)
        .map_err(|_| AppError::AuthenticationError("Malformed session token".to_string()))
}
