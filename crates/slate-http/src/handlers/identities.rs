//! Handlers for `/students/*` and `/teachers/*` — signup, login, and
//! identity reads. The two roles share all logic; each route is a thin
//! role-fixing wrapper.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use slate_core::{
  Error as CoreError,
  identity::{Identity, NewIdentity, Role},
  store::IdentityStore,
};
use uuid::Uuid;

use crate::{
  AppState, Stores,
  auth::{self, Caller},
  error::{ApiError, store_err},
};

// ─── Signup ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

pub async fn student_signup<S: Stores>(
  State(state): State<AppState<S>>,
  Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, ApiError> {
  signup(state, Role::Student, body).await
}

pub async fn teacher_signup<S: Stores>(
  State(state): State<AppState<S>>,
  Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, ApiError> {
  signup(state, Role::Teacher, body).await
}

async fn signup<S: Stores>(
  state: AppState<S>,
  role: Role,
  body: SignupBody,
) -> Result<impl IntoResponse, ApiError> {
  let existing = state
    .store
    .find_identity_by_email(role, &body.email)
    .await
    .map_err(store_err)?;
  if existing.is_some() {
    return Err(CoreError::DuplicateEmail(body.email).into());
  }

  let identity = state
    .store
    .create_identity(NewIdentity {
      role,
      name: body.name,
      email: body.email,
      password_hash: auth::hash_password(&body.password)?,
    })
    .await
    .map_err(store_err)?;

  tracing::info!(role = role.as_str(), id = %identity.id, "identity created");
  Ok((StatusCode::CREATED, Json(identity)))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

pub async fn student_login<S: Stores>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
  login(state, Role::Student, body).await
}

pub async fn teacher_login<S: Stores>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
  login(state, Role::Teacher, body).await
}

/// Missing account and wrong password both collapse to the same 401 so
/// the response does not reveal which emails are registered.
async fn login<S: Stores>(
  state: AppState<S>,
  role: Role,
  body: LoginBody,
) -> Result<impl IntoResponse, ApiError> {
  let identity = state
    .store
    .find_identity_by_email(role, &body.email)
    .await
    .map_err(store_err)?
    .ok_or(CoreError::AuthFailed)?;

  if !auth::verify_password(&body.password, &identity.password_hash) {
    return Err(CoreError::AuthFailed.into());
  }

  let token =
    auth::issue_token(&state.auth, identity.id, &identity.email, Utc::now())?;
  Ok(Json(json!({ "token": token })))
}

// ─── Reads and delete ────────────────────────────────────────────────────────

pub async fn list_students<S: Stores>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Identity>>, ApiError> {
  list(state, Role::Student).await
}

pub async fn list_teachers<S: Stores>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Identity>>, ApiError> {
  list(state, Role::Teacher).await
}

async fn list<S: Stores>(
  state: AppState<S>,
  role: Role,
) -> Result<Json<Vec<Identity>>, ApiError> {
  Ok(Json(state.store.list_identities(role).await.map_err(store_err)?))
}

pub async fn get_student<S: Stores>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Identity>, ApiError> {
  get_one(state, Role::Student, id).await
}

pub async fn get_teacher<S: Stores>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Identity>, ApiError> {
  get_one(state, Role::Teacher, id).await
}

async fn get_one<S: Stores>(
  state: AppState<S>,
  role: Role,
  id: Uuid,
) -> Result<Json<Identity>, ApiError> {
  let identity = state
    .store
    .find_identity(role, id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", role.as_str())))?;
  Ok(Json(identity))
}

pub async fn delete_student<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  delete_one(state, Role::Student, id).await
}

pub async fn delete_teacher<S: Stores>(
  _caller: Caller,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  delete_one(state, Role::Teacher, id).await
}

async fn delete_one<S: Stores>(
  state: AppState<S>,
  role: Role,
  id: Uuid,
) -> Result<impl IntoResponse, ApiError> {
  if !state.store.delete_identity(role, id).await.map_err(store_err)? {
    return Err(ApiError::NotFound(format!(
      "{} {id} not found",
      role.as_str()
    )));
  }
  Ok(Json(json!({ "deleted": true })))
}
