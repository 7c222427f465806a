//! Handlers for `/competitions` endpoints.
//!
//! | Method   | Path                  | Notes |
//! |----------|-----------------------|-------|
//! | `GET`    | `/competitions`       | Newest end period first |
//! | `POST`   | `/competitions`       | Body: partial record; returns 201 |
//! | `GET`    | `/competitions/{key}` | `key` is a numeric id or an exact name |
//! | `PUT`    | `/competitions/{key}` | Body: partial record, merged into the stored row |
//! | `DELETE` | `/competitions/{key}` | Body: `{"password":"..."}`; returns 204 |
//!
//! Successful responses wrap their payload as `{"data": ...}`.

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use mierda_core::{
  competition::{CompetitionKey, CompetitionRecord},
  patch::CompetitionPatch,
  store::CompetitionStore,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppState, auth::verify_delete_password, error::ApiError};

/// Response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
  pub data: T,
}

fn not_found(key: &CompetitionKey) -> ApiError {
  ApiError::NotFound(format!("competition {key}"))
}

/// Classify the `{key}` segment. Runs after the store check so a missing
/// connection string is reported first.
fn parse_key(path: Result<Path<String>, PathRejection>) -> Result<CompetitionKey, ApiError> {
  let Path(raw) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  Ok(CompetitionKey::classify(&raw))
}

fn payload(body: Result<Json<Value>, JsonRejection>) -> Result<CompetitionPatch, ApiError> {
  let Json(value) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  Ok(CompetitionPatch::parse(&value)?)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /competitions`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Data<Vec<CompetitionRecord>>>, ApiError>
where
  S: CompetitionStore,
{
  let store = state.store()?;
  let records = store.list().await.map_err(ApiError::store::<S>)?;
  Ok(Json(Data { data: records }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /competitions/{key}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Data<CompetitionRecord>>, ApiError>
where
  S: CompetitionStore,
{
  let store = state.store()?;
  let key = parse_key(path)?;
  let record = store
    .get(key.clone())
    .await
    .map_err(ApiError::store::<S>)?
    .ok_or_else(|| not_found(&key))?;
  Ok(Json(Data { data: record }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /competitions`: returns 201 with the stored record.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CompetitionStore,
{
  let store = state.store()?;
  let patch = payload(body)?;
  let record = store.create(patch).await.map_err(ApiError::store::<S>)?;
  Ok((StatusCode::CREATED, Json(Data { data: record })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /competitions/{key}`: returns the record as re-read after the write.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Data<CompetitionRecord>>, ApiError>
where
  S: CompetitionStore,
{
  let store = state.store()?;
  let patch = payload(body)?;
  let key = parse_key(path)?;
  let record = store
    .update(key.clone(), patch)
    .await
    .map_err(ApiError::store::<S>)?
    .ok_or_else(|| not_found(&key))?;
  Ok(Json(Data { data: record }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DeleteBody {
  pub password: Option<String>,
}

/// `DELETE /competitions/{key}`: body: `{"password":"..."}`.
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  path: Result<Path<String>, PathRejection>,
  body: Result<Json<DeleteBody>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
  S: CompetitionStore,
{
  let store = state.store()?;
  let body = body.map(|Json(b)| b).unwrap_or_default();
  verify_delete_password(
    body.password.as_deref(),
    state.delete_password_hash.as_deref(),
  )?;

  let key = parse_key(path)?;
  if !store.delete(key.clone()).await.map_err(ApiError::store::<S>)? {
    return Err(not_found(&key));
  }
  Ok(StatusCode::NO_CONTENT)
}
