use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/catalog", get(list_catalog))
}

/// The full catalog in display order. Ungated; browsing needs no session.
async fn list_catalog(State(state): State<AppState>) -> Json<Value> {
    let categories: Vec<Value> = state
        .flow
        .list_catalog()
        .iter()
        .map(|c| {
            json!({
                "key": c.key,
                "display_name": c.display_name,
                "rate_card": c.rate_card,
                "vehicles": c.vehicles,
            })
        })
        .collect();

    Json(json!({ "categories": categories }))
}
