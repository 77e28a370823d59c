use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::model::{parse_date, EntryPatch, FoodEntry, NewEntry};
use crate::{
    auth::extractors::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry).get(list_entries))
        .route("/entries/date/:date", get(list_entries_by_date))
        .route("/entries/:id", put(update_entry).delete(delete_entry))
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let body = body.validate()?;
    let entry = state.entries.create(user_id, body).await?;

    info!(%user_id, entry_id = %entry.id, date = %entry.date, "entry created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/entries/{}", entry.id))],
        Json(entry),
    ))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<FoodEntry>>> {
    let entries = state.entries.list_by_owner(user_id).await?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn list_entries_by_date(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> AppResult<Json<Vec<FoodEntry>>> {
    let date = parse_date(&date)?;
    let entries = state.entries.list_by_owner_and_date(user_id, date).await?;
    Ok(Json(entries))
}

#[instrument(skip(state, id, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EntryPatch>, JsonRejection>,
) -> AppResult<Json<FoodEntry>> {
    let id = entry_id(id)?;
    let Json(patch) = payload?;
    let patch = patch.validate()?;

    match state.entries.update(user_id, id, patch).await? {
        Some(entry) => {
            info!(%user_id, entry_id = %id, "entry updated");
            Ok(Json(entry))
        }
        None => {
            warn!(%user_id, entry_id = %id, "update of missing or foreign entry");
            Err(entry_not_found())
        }
    }
}

#[instrument(skip(state, id))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<serde_json::Value>> {
    let id = entry_id(id)?;
    if !state.entries.delete(user_id, id).await? {
        warn!(%user_id, entry_id = %id, "delete of missing or foreign entry");
        return Err(entry_not_found());
    }

    info!(%user_id, entry_id = %id, "entry deleted");
    Ok(Json(json!({ "success": true })))
}

/// An id that does not parse cannot name an entry the caller owns.
fn entry_id(id: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    id.map(|Path(id)| id).map_err(|_| entry_not_found())
}

fn entry_not_found() -> AppError {
    AppError::not_found("Entry not found")
}
