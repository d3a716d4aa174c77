use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use rentis_catalog::RentalSelection;
use rentis_core::model::Booking;
use rentis_flow::FlowState;

use crate::error::AppError;
use crate::state::{session_token, AppState};

#[derive(Debug, Deserialize)]
struct DraftRequest {
    category: String,
    vehicle: String,
    selection: RentalSelection,
}

#[derive(Debug, Serialize)]
struct DraftResponse {
    category: String,
    vehicle: String,
    descriptor: String,
    price: i64,
}

#[derive(Debug, Deserialize)]
struct CommitRequest {
    payment_method: String,
}

#[derive(Debug, Serialize)]
struct CommitResponse {
    booking_code: String,
}

#[derive(Debug, Serialize)]
struct FinishResponse {
    state: FlowState,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings/draft", post(start_draft))
        .route("/v1/bookings/commit", post(commit_booking))
        .route("/v1/bookings/confirmation", get(get_confirmation))
        .route("/v1/bookings/finish", post(finish_booking))
}

async fn start_draft(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    let draft = state
        .flow
        .start_booking_draft(ctx, &req.category, &req.vehicle, req.selection)
        .await?;

    Ok(Json(DraftResponse {
        category: draft.category_key,
        vehicle: draft.vehicle_name,
        descriptor: draft.rental_descriptor,
        price: draft.price,
    }))
}

async fn commit_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CommitRequest>,
) -> Result<Json<CommitResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    let booking_code = state.flow.commit_booking(ctx, &req.payment_method).await?;
    Ok(Json(CommitResponse { booking_code }))
}

async fn get_confirmation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Booking>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    match state.flow.get_confirmation(ctx).await? {
        Some(booking) => Ok(Json(booking)),
        None => Err(AppError::NotFoundError("Booking not found".to_string())),
    }
}

async fn finish_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<FinishResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    state.flow.finish_booking(ctx)?;
    Ok(Json(FinishResponse { state: ctx.state() }))
}
