use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use rentis_flow::{FlowError, RequiredStep};

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    /// Workflow precondition not met; carries the step the client is
    /// routed to. Not a failure, so it never aborts the session.
    RedirectError(RequiredStep),
    ValidationError(String),
    NotFoundError(String),
    InternalServerError(String),
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Redirect(step) => AppError::RedirectError(step),
            FlowError::Catalog(e) => AppError::ValidationError(e.to_string()),
            FlowError::Pricing(e) => AppError::ValidationError(e.to_string()),
            FlowError::Validation(msg) => AppError::ValidationError(msg),
            FlowError::Store(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RedirectError(step) => {
                let body = Json(json!({
                    "redirect_to": step.as_str(),
                }));
                (StatusCode::CONFLICT, body).into_response()
            }
            AppError::AuthenticationError(msg) => error_body(StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => error_body(StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    let body = Json(json!({
        "error": message,
    }));
    (status, body).into_response()
}
