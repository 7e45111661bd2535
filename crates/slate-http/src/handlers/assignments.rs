//! Handlers for `/assignments` — multipart create and update, JSON reads.
//!
//! Create expects fields `title`, `class`, `dueDate` and the file part
//! `questionPaper`. Update accepts any subset of the same fields; an
//! empty update is a 400.

use axum::{
  Json,
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use slate_core::{
  assignment::Assignment, engine::assignment::AssignmentChanges,
};
use uuid::Uuid;

use crate::{
  AppState, Stores, auth::Caller, error::ApiError, upload::UploadForm,
};

pub async fn create<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
  let mut form = UploadForm::read(multipart).await?;
  let title = form.require_text("title")?;
  let class_id = form.require_uuid("class")?;
  let due_date = form.require_datetime("dueDate")?;
  let paper = form.require_file("questionPaper")?;

  let assignment = state
    .assignments
    .create(title, class_id, due_date, paper, Utc::now())
    .await?;
  Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn list<S: Stores>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
  Ok(Json(state.assignments.list().await?))
}

pub async fn get_one<S: Stores>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Assignment>, ApiError> {
  Ok(Json(state.assignments.get(id).await?))
}

pub async fn update<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  multipart: Multipart,
) -> Result<Json<Assignment>, ApiError> {
  let mut form = UploadForm::read(multipart).await?;
  let changes = AssignmentChanges {
    title:    form.text("title"),
    due_date: form.datetime("dueDate")?,
  };
  let paper = form.take_file("questionPaper");

  let assignment =
    state.assignments.update(id, changes, paper, Utc::now()).await?;
  Ok(Json(assignment))
}

pub async fn delete<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  state.assignments.delete(id).await?;
  Ok(Json(json!({ "deleted": true })))
}
