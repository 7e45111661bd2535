//! Handlers for `/answers` — due-date-gated submission and resubmission.
//!
//! Submit expects fields `assignment`, `student` and the file part
//! `answerPaper`; resubmit only `answerPaper`. Listing is keyed by the
//! assignment id and joins in each submitting student.

use axum::{
  Json,
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use slate_core::answer::{Answer, AnswerView};
use uuid::Uuid;

use crate::{
  AppState, Stores, auth::Caller, error::ApiError, upload::UploadForm,
};

pub async fn submit<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
  let mut form = UploadForm::read(multipart).await?;
  let assignment_id = form.require_uuid("assignment")?;
  let student_id = form.require_uuid("student")?;
  let paper = form.require_file("answerPaper")?;

  let answer = state
    .submissions
    .submit(assignment_id, student_id, paper, Utc::now())
    .await?;
  Ok((StatusCode::CREATED, Json(answer)))
}

pub async fn resubmit<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  multipart: Multipart,
) -> Result<Json<Answer>, ApiError> {
  let mut form = UploadForm::read(multipart).await?;
  let paper = form.require_file("answerPaper")?;

  let answer = state.submissions.resubmit(id, paper, Utc::now()).await?;
  Ok(Json(answer))
}

/// `GET /answers/:assignment_id` — all answers for an assignment.
pub async fn list<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(assignment_id): Path<Uuid>,
) -> Result<Json<Vec<AnswerView>>, ApiError> {
  Ok(Json(state.submissions.list(assignment_id).await?))
}
