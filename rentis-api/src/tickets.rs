use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::{session_token, AppState};

#[derive(Debug, Deserialize)]
struct PurchaseTicketRequest {
    payment_method: String,
}

#[derive(Debug, Serialize)]
struct PurchaseTicketResponse {
    ticket_code: String,
    amount: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/tickets", post(purchase_ticket))
}

async fn purchase_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PurchaseTicketRequest>,
) -> Result<Json<PurchaseTicketResponse>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.write().await;
    let ctx = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::AuthenticationError("Unknown session token".to_string()))?;

    let ticket_code = state
        .flow
        .purchase_entry_ticket(ctx, &req.payment_method)
        .await?;

    Ok(Json(PurchaseTicketResponse {
        ticket_code,
        amount: state.flow.entry_ticket_amount(),
    }))
}
