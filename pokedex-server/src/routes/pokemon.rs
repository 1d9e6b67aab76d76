//! Search, update, and delete panels.
//!
//! The query-string surface keeps the admin panel's sentinel
//! convention: a numeric filter of 0 means "unset". The core API is
//! Option-typed; the mapping happens here and only here.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pokedex_core::record::now_rfc3339;
use pokedex_core::{PokemonRecord, SearchCriteria, SearchPage, SortDirection, SortField};

use crate::error::ApiError;
use crate::state::AppState;

fn default_limit() -> i64 {
    10
}

fn default_page() -> u64 {
    1
}

/// Search panel query string
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name_contains: Option<String>,
    /// 0 = no filter (panel sentinel)
    pub pokemon_id: Option<u32>,
    #[serde(rename = "type")]
    pub type_is: Option<String>,
    /// 0 = no lower bound (panel sentinel)
    pub min_weight: Option<i64>,
    /// 0 = no upper bound (panel sentinel)
    pub max_weight: Option<i64>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub dir: SortDirection,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: u64,
}

impl SearchParams {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            name_contains: self.name_contains.clone(),
            pokemon_id: self.pokemon_id.filter(|&id| id != 0),
            type_is: self.type_is.clone(),
            min_weight: self.min_weight.filter(|&w| w != 0),
            max_weight: self.max_weight.filter(|&w| w != 0),
        }
    }
}

/// Search response: one page plus the filter that produced it
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: u64,
    pub page: u64,
    pub per_page: i64,
    pub results: Vec<PokemonRecord>,
    pub query: Document,
}

/// GET /pokemon - filtered, sorted, paginated search
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let page = SearchPage::for_page(params.page, params.limit);
    let outcome = state
        .store()
        .search(&params.criteria(), params.sort, params.dir, page)
        .await?;

    Ok(Json(SearchResponse {
        total: outcome.total,
        page: params.page.max(1),
        per_page: page.limit,
        results: outcome.results,
        query: outcome.query,
    }))
}

/// Matched/modified counts
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub matched: u64,
    pub modified: u64,
}

/// Fields the update panel may touch; the unique-indexed `name` and
/// `pokemon_id` are deliberately not in this set
fn editable(field: &str, value: &Value) -> Result<Bson, ApiError> {
    match field {
        "weight" | "height" | "base_experience" => value
            .as_i64()
            .map(Bson::Int64)
            .ok_or_else(|| ApiError::validation(format!("field '{field}' must be an integer"))),
        "updated_at" => value
            .as_str()
            .map(|s| Bson::String(s.to_string()))
            .ok_or_else(|| ApiError::validation("field 'updated_at' must be a string".to_string())),
        _ => Err(ApiError::validation(format!(
            "field '{field}' is not editable"
        ))),
    }
}

/// PATCH /pokemon/{name} - $set the given fields on one record
///
/// `updated_at` is stamped with the current UTC time unless the body
/// supplies its own value.
async fn update_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<UpdateResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::validation("no fields to update"));
    }

    let mut fields = Document::new();
    for (key, value) in &body {
        fields.insert(key.clone(), editable(key, value)?);
    }
    if !fields.contains_key("updated_at") {
        fields.insert("updated_at", now_rfc3339());
    }

    let name = name.trim().to_lowercase();
    let outcome = state.store().update_by_name(&name, fields).await?;
    if outcome.matched == 0 {
        return Err(ApiError::NotFound {
            resource: "pokemon",
            id: name,
        });
    }

    Ok(Json(UpdateResponse {
        matched: outcome.matched,
        modified: outcome.modified,
    }))
}

/// Deleted-count response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// DELETE /pokemon/{name} - remove one record; deleted is 0 or 1
async fn delete_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let name = name.trim().to_lowercase();
    let deleted = state.store().delete_by_name(&name).await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteByTypeParams {
    #[serde(rename = "type")]
    pub type_name: String,
}

/// DELETE /pokemon?type=fire - remove every record with that type
async fn delete_by_type(
    State(state): State<AppState>,
    Query(params): Query<DeleteByTypeParams>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let type_name = params.type_name.trim().to_lowercase();
    if type_name.is_empty() {
        return Err(ApiError::validation("type must not be empty"));
    }
    let deleted = state.store().delete_by_type(&type_name).await?;
    Ok(Json(DeleteResponse { deleted }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pokemon", get(search).delete(delete_by_type))
        .route(
            "/pokemon/{name}",
            patch(update_pokemon).delete(delete_by_name),
        )
}
