//! Import panel: pull a range of identifiers from the catalog.
//!
//! The call blocks until the batch finishes; per-identifier failures
//! are aggregated into the report rather than failing the request.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use pokedex_core::{import_range, ImportReport};

use crate::error::ApiError;
use crate::state::AppState;

/// Import request: inclusive identifier range
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub start: u32,
    pub end: u32,
}

/// Import response mirroring the batch report
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub inserted: u64,
    pub existing: u64,
    pub failed: u64,
    pub failed_ids: Vec<u32>,
}

impl From<ImportReport> for ImportResponse {
    fn from(r: ImportReport) -> Self {
        Self {
            inserted: r.inserted,
            existing: r.existing,
            failed: r.failed(),
            failed_ids: r.failed_ids,
        }
    }
}

/// POST /import - fetch and insert every identifier in [start, end]
async fn run_import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let delay = state.catalog().config().request_delay;
    let report = import_range(state.catalog(), state.store(), req.start, req.end, delay).await?;
    Ok(Json(report.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/import", post(run_import))
}
