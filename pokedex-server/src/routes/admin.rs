//! Destructive resets. No server-side confirmation; the panel is
//! expected to prompt before calling these.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DropResponse {
    pub dropped: bool,
}

/// POST /admin/drop-collection - empty the collection, keep the database
async fn drop_collection(State(state): State<AppState>) -> Result<Json<DropResponse>, ApiError> {
    state.store().drop_collection().await?;
    Ok(Json(DropResponse { dropped: true }))
}

/// POST /admin/drop-database - remove the collection and its container
async fn drop_database(State(state): State<AppState>) -> Result<Json<DropResponse>, ApiError> {
    state.store().drop_database().await?;
    Ok(Json(DropResponse { dropped: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/drop-collection", post(drop_collection))
        .route("/admin/drop-database", post(drop_database))
}
