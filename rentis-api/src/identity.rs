use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use rentis_core::model::{NewRenter, Renter};
use rentis_flow::IdentifyOutcome;

use crate::error::AppError;
use crate::state::{session_token, AppState};

#[derive(Debug, Deserialize)]
struct IdentifyRequest {
    phone: String,
}

#[derive(Debug, Serialize)]
struct IdentifyResponse {
    status: &'static str,
    ticketed: bool,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    renter_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/identify", post(identify))
        .route("/v1/register", post(register))
        .route("/v1/me", get(me))
}

async fn identify(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<IdentifyRequest>,
) -> Result<Json<IdentifyResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    let outcome = state.flow.identify(ctx, &req.phone).await?;
    let response = match outcome {
        IdentifyOutcome::Resumed { ticketed } => IdentifyResponse {
            status: "resumed",
            ticketed,
        },
        IdentifyOutcome::NeedsRegistration => IdentifyResponse {
            status: "needs_registration",
            ticketed: false,
        },
    };
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewRenter>,
) -> Result<Json<RegisterResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    let renter_id = state.flow.register(ctx, &req).await?;
    Ok(Json(RegisterResponse { renter_id }))
}

async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Renter>, AppError> {
    let token = session_token(&headers)?;
    let sessions = state.sessions.read().await;
    let ctx = sessions
        .get(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    match state.flow.current_renter(ctx).await? {
        Some(renter) => Ok(Json(renter)),
        None => Err(AppError::NotFoundError("Renter not found".to_string())),
    }
}
