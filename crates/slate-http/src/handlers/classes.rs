//! Handlers for `/classes` — class CRUD and roster membership.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/classes` | bearer |
//! | `GET`   | `/classes` | open |
//! | `GET`   | `/classes/:id` | bearer, 404 if not found |
//! | `DELETE`| `/classes/:id` | bearer, owner only |
//! | `PATCH` | `/classes/:id/add-student(s)` | bearer, owner only |
//! | `PATCH` | `/classes/:id/remove-student(s)` | bearer, owner only |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use slate_core::class::{Class, NewClass};
use uuid::Uuid;

use crate::{AppState, Stores, auth::Caller, error::ApiError};

// ─── Create / read / delete ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub subject: String,
  pub teacher: Uuid,
  #[serde(default)]
  pub students: Vec<Uuid>,
}

pub async fn create<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let class = state
    .roster
    .create(NewClass {
      subject:     body.subject,
      teacher_id:  body.teacher,
      student_ids: body.students,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(class)))
}

pub async fn list<S: Stores>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Class>>, ApiError> {
  Ok(Json(state.roster.list().await?))
}

pub async fn get_one<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Class>, ApiError> {
  Ok(Json(state.roster.get(id).await?))
}

pub async fn delete<S: Stores>(
  caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  state.roster.delete(id, caller.id).await?;
  Ok(Json(json!({ "deleted": true })))
}

// ─── Membership ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SingleStudentBody {
  pub student: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ManyStudentsBody {
  pub students: Vec<Uuid>,
}

pub async fn add_student<S: Stores>(
  caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SingleStudentBody>,
) -> Result<Json<Class>, ApiError> {
  let class =
    state.roster.add_students(id, vec![body.student], caller.id).await?;
  Ok(Json(class))
}

pub async fn add_students<S: Stores>(
  caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ManyStudentsBody>,
) -> Result<Json<Class>, ApiError> {
  let class = state.roster.add_students(id, body.students, caller.id).await?;
  Ok(Json(class))
}

pub async fn remove_student<S: Stores>(
  caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SingleStudentBody>,
) -> Result<Json<Class>, ApiError> {
  let class =
    state.roster.remove_students(id, vec![body.student], caller.id).await?;
  Ok(Json(class))
}

pub async fn remove_students<S: Stores>(
  caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ManyStudentsBody>,
) -> Result<Json<Class>, ApiError> {
  let class =
    state.roster.remove_students(id, body.students, caller.id).await?;
  Ok(Json(class))
}
