use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::Ingredient;
use crate::error::ApiError;

/// Request body for POST and PATCH. Both fields are optional: a missing
/// `title` defaults to the empty string, a missing `recipe` to the empty
/// sequence on create; on update a missing field keeps its stored value.
#[derive(Debug, Deserialize)]
pub struct DrinkPayload {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// GET /drinks - public summary listing (id + title only)
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = state.store.list().await?;
    let summaries: Vec<_> = drinks.iter().map(|drink| drink.summary()).collect();

    Ok(Json(json!({
        "success": true,
        "drinks": summaries,
    })))
}

/// GET /drinks-detail - full listing, guarded by `get:drinks-detail`
pub async fn list_detail(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = state.store.list().await?;

    Ok(Json(json!({
        "success": true,
        "drinks": drinks,
    })))
}

/// POST /drinks - insert a new drink, guarded by `post:drinks`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;

    let title = payload.title.unwrap_or_default();
    let recipe = payload.recipe.unwrap_or_default();
    let drink = state.store.create(title, recipe).await?;
    tracing::info!(id = drink.id, "drink created");

    Ok(Json(json!({
        "success": true,
        "drinks": [drink],
    })))
}

/// PATCH /drinks/{id} - partial update, guarded by `patch:drinks`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;

    let drink = state.store.update(id, payload.title, payload.recipe).await?;

    Ok(Json(json!({
        "success": true,
        "drinks": [drink],
    })))
}

/// DELETE /drinks/{id} - remove a drink, guarded by `delete:drinks`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.store.delete(id).await?;
    tracing::info!(id = deleted, "drink deleted");

    Ok(Json(json!({
        "success": true,
        "delete": deleted,
    })))
}
