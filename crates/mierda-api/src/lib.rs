//! JSON REST API for the FC Mierda competition records.
//!
//! Exposes an axum [`Router`] backed by any
//! [`mierda_core::store::CompetitionStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", mierda_api::api_router(state))
//! ```

pub mod auth;
pub mod competitions;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use mierda_core::store::CompetitionStore;

pub use error::ApiError;

/// Environment variable holding the connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S> {
  /// `None` when no connection string is configured. Every route then
  /// answers `500 {"error": "DATABASE_URL not set"}` before doing anything
  /// else.
  pub store:                Option<Arc<S>>,
  /// argon2 PHC string for the delete password. Deletes are refused when
  /// unset.
  pub delete_password_hash: Option<Arc<str>>,
}

impl<S> AppState<S> {
  fn store(&self) -> Result<&S, ApiError> {
    self
      .store
      .as_deref()
      .ok_or(ApiError::Configuration(DATABASE_URL_VAR))
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: CompetitionStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/competitions",
      get(competitions::list::<S>).post(competitions::create::<S>),
    )
    .route(
      "/competitions/{key}",
      get(competitions::get_one::<S>)
        .put(competitions::update::<S>)
        .delete(competitions::delete_one::<S>),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use mierda_core::{
    competition::DEFAULT_ORGANISATION,
    schema::{OpponentsType, OrganisationColumn},
  };
  use mierda_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tempfile::TempDir;
  use tower::ServiceExt as _;

  struct Harness {
    _dir:  TempDir,
    state: AppState<SqliteStore>,
  }

  async fn harness(opponents: OpponentsType) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("api.db").to_str().unwrap());
    store
      .create_table(OrganisationColumn::Uk, opponents)
      .await
      .unwrap();

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"letmein", &salt)
      .unwrap()
      .to_string();

    Harness {
      _dir:  dir,
      state: AppState {
        store:                Some(Arc::new(store)),
        delete_password_hash: Some(hash.into()),
      },
    }
  }

  async fn send(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(state)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_connection_string_is_500_on_every_route() {
    let state: AppState<SqliteStore> = AppState {
      store:                None,
      delete_password_hash: None,
    };
    for (method, uri, body) in [
      ("GET", "/competitions", None),
      ("GET", "/competitions/1", None),
      ("GET", "/competitions/%FF", None),
      ("PUT", "/competitions/%FF", Some(json!({}))),
      ("POST", "/competitions", Some(json!({}))),
      ("PUT", "/competitions/1", Some(json!("not an object"))),
      ("DELETE", "/competitions/1", None),
    ] {
      let (status, json) = send(state.clone(), method, uri, body).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(json, json!({ "error": "DATABASE_URL not set" }));
    }
  }

  // ── Storage failures ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn storage_failure_is_500_with_driver_message() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("no-table.db").to_str().unwrap());
    let state = AppState {
      store:                Some(Arc::new(store)),
      delete_password_hash: None,
    };

    for (method, uri, body) in [
      ("GET", "/competitions", None),
      ("GET", "/competitions/1", None),
      ("PUT", "/competitions/1", Some(json!({ "competition_name": "Spring League" }))),
    ] {
      let (status, json) = send(state.clone(), method, uri, body).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(json, json!({ "error": "no such table: competition" }));
    }
  }

  // ── Create / get ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_then_get_round_trip() {
    let h = harness(OpponentsType::Json).await;

    let (status, created) = send(
      h.state.clone(),
      "POST",
      "/competitions",
      Some(json!({ "competition_name": "Division 3" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) =
      send(h.state.clone(), "GET", &format!("/competitions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["competition_name"], "Division 3");
    assert_eq!(fetched["data"]["organisation"], DEFAULT_ORGANISATION);
    assert_eq!(fetched["data"]["opponents"], json!([]));
    assert_eq!(fetched["data"]["competition_champion"], Value::Null);
  }

  #[tokio::test]
  async fn get_by_name_and_unknown_key() {
    let h = harness(OpponentsType::Json).await;
    send(
      h.state.clone(),
      "POST",
      "/competitions",
      Some(json!({ "competition_name": "Spring League 2025" })),
    )
    .await;

    let (status, fetched) = send(
      h.state.clone(),
      "GET",
      "/competitions/Spring%20League%202025",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["competition_name"], "Spring League 2025");

    let (status, json) = send(h.state, "GET", "/competitions/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": "not found: competition 42" }));
  }

  #[tokio::test]
  async fn undecodable_key_is_400() {
    let h = harness(OpponentsType::Json).await;
    let (status, json) = send(h.state, "GET", "/competitions/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_with_native_array_keeps_embedded_comma() {
    let h = harness(OpponentsType::NativeArray).await;
    let (_, created) = send(
      h.state.clone(),
      "POST",
      "/competitions",
      Some(json!({ "competition_name": "Spring League" })),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, updated) = send(
      h.state.clone(),
      "PUT",
      &format!("/competitions/{id}"),
      Some(json!({
        "competition_name": "Spring League",
        "opponents": ["Team A", "Team B, Inc"],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["opponents"], json!(["Team A", "Team B, Inc"]));

    let (_, fetched) = send(h.state, "GET", &format!("/competitions/{id}"), None).await;
    assert_eq!(fetched["data"]["opponents"], json!(["Team A", "Team B, Inc"]));
  }

  #[tokio::test]
  async fn put_validation_failure_writes_nothing() {
    let h = harness(OpponentsType::Json).await;
    let (_, created) = send(
      h.state.clone(),
      "POST",
      "/competitions",
      Some(json!({ "competition_name": "Spring League", "total_teams": 8 })),
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, json) = send(
      h.state.clone(),
      "PUT",
      &format!("/competitions/{id}"),
      Some(json!({ "competition_name": "", "total_teams": "nine" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      json["error"],
      "competition_name is required; total_teams must be a number or null"
    );

    let (_, fetched) = send(h.state, "GET", &format!("/competitions/{id}"), None).await;
    assert_eq!(fetched["data"]["total_teams"], 8);
  }

  #[tokio::test]
  async fn put_unknown_key_is_404() {
    let h = harness(OpponentsType::Json).await;
    let (status, _) = send(
      h.state,
      "PUT",
      "/competitions/Autumn%20League",
      Some(json!({ "competition_name": "Autumn League" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn malformed_json_is_400() {
    let h = harness(OpponentsType::Json).await;
    let req = Request::builder()
      .method("POST")
      .uri("/competitions")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = api_router(h.state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_wraps_records_in_data() {
    let h = harness(OpponentsType::Json).await;
    for name in ["A", "B"] {
      send(
        h.state.clone(),
        "POST",
        "/competitions",
        Some(json!({ "competition_name": name })),
      )
      .await;
    }
    let (status, json) = send(h.state, "GET", "/competitions", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = json["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["competition_name"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(names, vec!["B", "A"]);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_requires_password() {
    let h = harness(OpponentsType::Json).await;
    let (_, created) = send(
      h.state.clone(),
      "POST",
      "/competitions",
      Some(json!({ "competition_name": "Spring League" })),
    )
    .await;
    let uri = format!("/competitions/{}", created["data"]["id"]);

    let (status, _) = send(h.state.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
      h.state.clone(),
      "DELETE",
      &uri,
      Some(json!({ "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
      h.state.clone(),
      "DELETE",
      &uri,
      Some(json!({ "password": "letmein" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(h.state, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
