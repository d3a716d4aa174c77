use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use rentis_flow::SessionContext;

use crate::error::AppError;
use crate::state::{session_token, AppState};

#[derive(Debug, Serialize)]
struct SessionResponse {
    token: Uuid,
}

#[derive(Debug, Serialize)]
struct StateResponse {
    state: rentis_flow::FlowState,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/session", post(create_session))
        .route("/v1/logout", post(logout))
}

/// Mint a fresh anonymous session.
async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let token = Uuid::new_v4();
    state
        .sessions
        .write()
        .await
        .insert(token, SessionContext::default());

    tracing::debug!(%token, "session created");
    Json(SessionResponse { token })
}

/// Clear the whole per-client context, returning to Anonymous. The token
/// itself stays valid.
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StateResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    state.flow.logout(ctx);
    Ok(Json(StateResponse { state: ctx.state() }))
}
