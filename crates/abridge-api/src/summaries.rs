//! Handlers for `/summaries` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/summaries/` | Body: [`CreateBody`]; returns 201 + stored record |
//! | `GET`    | `/summaries` | All records, newest first |
//! | `GET`    | `/summaries/:id` | 404 if not found |
//! | `PUT`    | `/summaries/:id` | Body: [`UpdateBody`]; re-summarizes when `text` is given |
//! | `DELETE` | `/summaries/:id` | Hard delete; returns a confirmation message |

use abridge_core::{
  provider::{Summarizer, SummaryLength},
  store::SummaryStore,
  summary::{self, DEFAULT_TITLE, NewSummary, Summary, SummaryUpdate},
};
use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

fn not_found(id: i64) -> ApiError { ApiError::NotFound(format!("summary {id} not found")) }

fn bad_body(rejection: JsonRejection) -> ApiError {
  ApiError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
}

fn bad_id(rejection: PathRejection) -> ApiError {
  ApiError::BadRequest(format!("invalid summary id: {}", rejection.body_text()))
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(de).map(Some)
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /summaries/`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  /// Kept loose so a non-string `text` reads as "no text" rather than a
  /// deserialisation failure.
  pub text:       Option<Value>,
  pub max_length: Option<u32>,
  pub min_length: Option<u32>,
  /// Absent or `null` both fall back to [`DEFAULT_TITLE`].
  pub title:      Option<String>,
}

/// `POST /summaries/`: returns 201 + the stored [`Summary`].
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  payload: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  let Json(body) = payload.map_err(bad_body)?;
  let text = match body.text {
    Some(Value::String(text)) => text,
    _ => return Err(ApiError::BadRequest("No text provided".into())),
  };

  let length = SummaryLength::resolve(body.max_length, body.min_length)?;
  summary::check_title(body.title.as_deref())?;

  let content = summary::summarize_content(state.provider.as_ref(), text, length)
    .await
    .inspect_err(|e| tracing::warn!(error = %e, "summarization failed"))?;

  let record = state
    .store
    .create(NewSummary {
      content,
      title: Some(body.title.unwrap_or_else(|| DEFAULT_TITLE.to_owned())),
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = record.id, ratio = record.compression_ratio, "summary created");
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /summaries`
pub async fn list<S, P>(
  State(state): State<AppState<S, P>>,
) -> Result<Json<Vec<Summary>>, ApiError>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  let records = state.store.list().await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /summaries/:id`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Summary>, ApiError>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  let Path(id) = id.map_err(bad_id)?;
  let record = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(record))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /summaries/:id`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub text:       Option<String>,
  /// `null` clears the title; absent leaves it alone.
  #[serde(default, deserialize_with = "present")]
  pub title:      Option<Option<String>>,
  pub max_length: Option<u32>,
  pub min_length: Option<u32>,
}

/// `PUT /summaries/:id`
///
/// The provider runs before anything is written. If it fails, the record is
/// left exactly as it was, title included.
pub async fn update<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
  payload: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Json<Summary>, ApiError>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  let Path(id) = id.map_err(bad_id)?;
  state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;

  let Json(body) = payload.map_err(bad_body)?;
  if let Some(title) = &body.title {
    summary::check_title(title.as_deref())?;
  }

  let content = match body.text {
    Some(text) => {
      let length = SummaryLength::resolve(body.max_length, body.min_length)?;
      let content = summary::summarize_content(state.provider.as_ref(), text, length)
        .await
        .inspect_err(|e| tracing::warn!(id, error = %e, "re-summarization failed"))?;
      Some(content)
    }
    None => None,
  };

  let record = state
    .store
    .update(id, SummaryUpdate { content, title: body.title })
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;

  tracing::info!(id, "summary updated");
  Ok(Json(record))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /summaries/:id`, body: `{"message": "..."}`.
pub async fn delete_one<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: SummaryStore + 'static,
  P: Summarizer + 'static,
{
  let Path(id) = id.map_err(bad_id)?;
  if !state.store.delete(id).await.map_err(ApiError::store)? {
    return Err(not_found(id));
  }
  tracing::info!(id, "summary deleted");
  Ok(Json(json!({ "message": "Summary deleted successfully" })))
}
