//! HTTP layer for Slate.
//!
//! Exposes an axum [`Router`] over the identity, roster, assignment and
//! submission operations, backed by any store implementing the
//! `slate-core` storage ports. Uploaded papers are kept on the local
//! filesystem and served read-only under `/uploads`.

pub mod artifacts;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod upload;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, patch, post},
};
use serde::Deserialize;
use slate_core::{
  artifact::MAX_UPLOAD_BYTES,
  engine::{AssignmentEngine, RosterEngine, SubmissionEngine},
  store::{AnswerStore, AssignmentStore, ClassStore, IdentityStore},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use artifacts::FsArtifactStore;
use auth::AuthKeys;
use handlers::{answers, assignments, classes, identities};

/// Everything the HTTP layer needs from one backend.
pub trait Stores:
  IdentityStore
  + ClassStore
  + AssignmentStore
  + AnswerStore
  + Send
  + Sync
  + 'static
{
}

impl<T> Stores for T where
  T: IdentityStore
    + ClassStore
    + AssignmentStore
    + AnswerStore
    + Send
    + Sync
    + 'static
{
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` (with
/// `SLATE_*` environment overrides).
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub base_url:    String,
  pub store_path:  PathBuf,
  pub uploads_dir: PathBuf,
  pub jwt_secret:  String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: Stores> {
  pub store:       Arc<S>,
  pub roster:      RosterEngine<S>,
  pub assignments: AssignmentEngine<S, FsArtifactStore>,
  pub submissions: SubmissionEngine<S, S, S, FsArtifactStore>,
  pub auth:        Arc<AuthKeys>,
  pub config:      Arc<ServerConfig>,
}

impl<S: Stores> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:       self.store.clone(),
      roster:      self.roster.clone(),
      assignments: self.assignments.clone(),
      submissions: self.submissions.clone(),
      auth:        self.auth.clone(),
      config:      self.config.clone(),
    }
  }
}

impl<S: Stores> AppState<S> {
  pub fn new(store: S, artifacts: FsArtifactStore, config: ServerConfig) -> Self {
    let store = Arc::new(store);
    let artifacts = Arc::new(artifacts);
    Self {
      roster:      RosterEngine::new(store.clone()),
      assignments: AssignmentEngine::new(store.clone(), artifacts.clone()),
      submissions: SubmissionEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        artifacts,
      ),
      auth:        Arc::new(AuthKeys::from_secret(&config.jwt_secret)),
      config:      Arc::new(config),
      store,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the server.
///
/// The body limit sits above the upload ceiling so that the multipart
/// reader, not the transport, produces the over-limit error.
pub fn router<S: Stores>(state: AppState<S>) -> Router {
  let uploads = ServeDir::new(state.config.uploads_dir.clone());

  Router::new()
    // Identities
    .route("/students/signup", post(identities::student_signup::<S>))
    .route("/students/login",  post(identities::student_login::<S>))
    .route("/students",        get(identities::list_students::<S>))
    .route("/students/{id}",   get(identities::get_student::<S>)
                                 .delete(identities::delete_student::<S>))
    .route("/teachers/signup", post(identities::teacher_signup::<S>))
    .route("/teachers/login",  post(identities::teacher_login::<S>))
    .route("/teachers",        get(identities::list_teachers::<S>))
    .route("/teachers/{id}",   get(identities::get_teacher::<S>)
                                 .delete(identities::delete_teacher::<S>))
    // Classes
    .route("/classes",      post(classes::create::<S>).get(classes::list::<S>))
    .route("/classes/{id}", get(classes::get_one::<S>).delete(classes::delete::<S>))
    .route("/classes/{id}/add-student",     patch(classes::add_student::<S>))
    .route("/classes/{id}/add-students",    patch(classes::add_students::<S>))
    .route("/classes/{id}/remove-student",  patch(classes::remove_student::<S>))
    .route("/classes/{id}/remove-students", patch(classes::remove_students::<S>))
    // Assignments
    .route("/assignments",      post(assignments::create::<S>)
                                  .get(assignments::list::<S>))
    .route("/assignments/{id}", get(assignments::get_one::<S>)
                                  .patch(assignments::update::<S>)
                                  .delete(assignments::delete::<S>))
    // Answers
    .route("/answers",      post(answers::submit::<S>))
    .route("/answers/{id}", get(answers::list::<S>).patch(answers::resubmit::<S>))
    // Static uploads
    .nest_service("/uploads", uploads)
    .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use chrono::{Duration, Utc};
  use serde_json::{Value, json};
  use slate_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  const BOUNDARY: &str = "x-test-boundary-7MA4YWxkTrZu0gW";

  struct TestApp {
    state:    AppState<SqliteStore>,
    _uploads: tempfile::TempDir,
  }

  async fn make_app() -> TestApp {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let uploads = tempfile::tempdir().unwrap();
    let artifacts = FsArtifactStore::open(uploads.path()).await.unwrap();
    let config = ServerConfig {
      host:        "127.0.0.1".to_string(),
      port:        3000,
      base_url:    "http://localhost:3000".to_string(),
      store_path:  PathBuf::from(":memory:"),
      uploads_dir: uploads.path().to_path_buf(),
      jwt_secret:  "test-secret".to_string(),
    };
    TestApp {
      state:    AppState::new(store, artifacts, config),
      _uploads: uploads,
    }
  }

  async fn send_json(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    token:  Option<&str>,
    body:   Value,
  ) -> Response {
    let mut builder = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn send_multipart(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    token:  Option<&str>,
    fields: &[(&str, String)],
    files:  &[(&str, &str, &str, &[u8])],
  ) -> Response {
    let mut body = Vec::new();
    for (name, value) in fields {
      body.extend_from_slice(
        format!(
          "--{BOUNDARY}\r\nContent-Disposition: form-data; \
           name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .as_bytes(),
      );
    }
    for (name, filename, content_type, data) in files {
      body.extend_from_slice(
        format!(
          "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
           filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
      );
      body.extend_from_slice(data);
      body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
      header::CONTENT_TYPE,
      format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(t) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = builder.body(Body::from(body)).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  /// Sign up and log in an identity; returns `(id, bearer token)`.
  async fn identity(
    state: AppState<SqliteStore>,
    kind:  &str,
    email: &str,
  ) -> (Uuid, String) {
    let resp = send_json(
      state.clone(),
      "POST",
      &format!("/{kind}/signup"),
      None,
      json!({ "name": "Test User", "email": email, "password": "pw" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id: Uuid =
      json_body(resp).await["id"].as_str().unwrap().parse().unwrap();

    let resp = send_json(
      state,
      "POST",
      &format!("/{kind}/login"),
      None,
      json!({ "email": email, "password": "pw" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let token = json_body(resp).await["token"].as_str().unwrap().to_string();
    (id, token)
  }

  async fn make_class(
    state:   AppState<SqliteStore>,
    token:   &str,
    teacher: Uuid,
  ) -> Uuid {
    let resp = send_json(
      state,
      "POST",
      "/classes",
      Some(token),
      json!({ "subject": "algebra", "teacher": teacher }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await["class_id"].as_str().unwrap().parse().unwrap()
  }

  async fn make_assignment(
    state:    AppState<SqliteStore>,
    token:    &str,
    class:    Uuid,
    due_date: chrono::DateTime<Utc>,
  ) -> Value {
    let resp = send_multipart(
      state,
      "POST",
      "/assignments",
      Some(token),
      &[
        ("title", "midterm".to_string()),
        ("class", class.to_string()),
        ("dueDate", due_date.to_rfc3339()),
      ],
      &[("questionPaper", "q.pdf", "application/pdf", b"%PDF-1.4 q")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
  }

  // ── Identities ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn signup_returns_201_without_password_hash() {
    let app = make_app().await;
    let resp = send_json(
      app.state.clone(),
      "POST",
      "/students/signup",
      None,
      json!({ "name": "Alice", "email": "alice@example.com", "password": "pw" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password_hash").is_none(), "hash leaked: {body}");
  }

  #[tokio::test]
  async fn duplicate_signup_returns_409() {
    let app = make_app().await;
    let body =
      json!({ "name": "Alice", "email": "alice@example.com", "password": "pw" });
    let first =
      send_json(app.state.clone(), "POST", "/students/signup", None, body.clone())
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second =
      send_json(app.state.clone(), "POST", "/students/signup", None, body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn same_email_across_roles_is_allowed() {
    let app = make_app().await;
    let body =
      json!({ "name": "Alice", "email": "alice@example.com", "password": "pw" });
    let student =
      send_json(app.state.clone(), "POST", "/students/signup", None, body.clone())
        .await;
    let teacher =
      send_json(app.state.clone(), "POST", "/teachers/signup", None, body).await;
    assert_eq!(student.status(), StatusCode::CREATED);
    assert_eq!(teacher.status(), StatusCode::CREATED);
  }

  #[tokio::test]
  async fn login_with_wrong_password_returns_401() {
    let app = make_app().await;
    identity(app.state.clone(), "students", "alice@example.com").await;

    let resp = send_json(
      app.state.clone(),
      "POST",
      "/students/login",
      None,
      json!({ "email": "alice@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn login_with_unknown_email_returns_401() {
    let app = make_app().await;
    let resp = send_json(
      app.state.clone(),
      "POST",
      "/students/login",
      None,
      json!({ "email": "nobody@example.com", "password": "pw" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn delete_requires_bearer_token() {
    let app = make_app().await;
    let (id, token) =
      identity(app.state.clone(), "students", "alice@example.com").await;

    let unauthed =
      send_json(app.state.clone(), "DELETE", &format!("/students/{id}"), None, json!({}))
        .await;
    assert_eq!(unauthed.status(), StatusCode::UNAUTHORIZED);

    let authed = send_json(
      app.state.clone(),
      "DELETE",
      &format!("/students/{id}"),
      Some(&token),
      json!({}),
    )
    .await;
    assert_eq!(authed.status(), StatusCode::OK);

    let gone =
      send_json(app.state.clone(), "GET", &format!("/students/{id}"), None, json!({}))
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn garbage_token_returns_401() {
    let app = make_app().await;
    let resp = send_json(
      app.state.clone(),
      "POST",
      "/classes",
      Some("not-a-jwt"),
      json!({ "subject": "algebra", "teacher": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── Classes ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn owner_membership_flow() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let student = Uuid::new_v4();

    // add once
    let resp = send_json(
      app.state.clone(),
      "PATCH",
      &format!("/classes/{class}/add-student"),
      Some(&token),
      json!({ "student": student }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["student_ids"], json!([student]));

    // adding again is a no-op
    let resp = send_json(
      app.state.clone(),
      "PATCH",
      &format!("/classes/{class}/add-student"),
      Some(&token),
      json!({ "student": student }),
    )
    .await;
    assert_eq!(json_body(resp).await["student_ids"], json!([student]));

    // remove
    let resp = send_json(
      app.state.clone(),
      "PATCH",
      &format!("/classes/{class}/remove-student"),
      Some(&token),
      json!({ "student": student }),
    )
    .await;
    assert_eq!(json_body(resp).await["student_ids"], json!([]));
  }

  #[tokio::test]
  async fn bulk_membership_routes() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

    let resp = send_json(
      app.state.clone(),
      "PATCH",
      &format!("/classes/{class}/add-students"),
      Some(&token),
      json!({ "students": [a, b] }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["student_ids"].as_array().unwrap().len(), 2);

    let resp = send_json(
      app.state.clone(),
      "PATCH",
      &format!("/classes/{class}/remove-students"),
      Some(&token),
      json!({ "students": [a, b] }),
    )
    .await;
    assert_eq!(json_body(resp).await["student_ids"], json!([]));
  }

  #[tokio::test]
  async fn non_owner_mutation_returns_403() {
    let app = make_app().await;
    let (teacher_a, token_a) =
      identity(app.state.clone(), "teachers", "a@example.com").await;
    let (_, token_b) =
      identity(app.state.clone(), "teachers", "b@example.com").await;
    let class = make_class(app.state.clone(), &token_a, teacher_a).await;

    let resp = send_json(
      app.state.clone(),
      "PATCH",
      &format!("/classes/{class}/add-student"),
      Some(&token_b),
      json!({ "student": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send_json(
      app.state.clone(),
      "DELETE",
      &format!("/classes/{class}"),
      Some(&token_b),
      json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // the owner still can
    let resp = send_json(
      app.state.clone(),
      "DELETE",
      &format!("/classes/{class}"),
      Some(&token_a),
      json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn class_list_is_open_and_get_requires_token() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;

    let list = send_json(app.state.clone(), "GET", "/classes", None, json!({})).await;
    assert_eq!(list.status(), StatusCode::OK);
    assert_eq!(json_body(list).await.as_array().unwrap().len(), 1);

    let get_unauthed =
      send_json(app.state.clone(), "GET", &format!("/classes/{class}"), None, json!({}))
        .await;
    assert_eq!(get_unauthed.status(), StatusCode::UNAUTHORIZED);

    let get_authed = send_json(
      app.state.clone(),
      "GET",
      &format!("/classes/{class}"),
      Some(&token),
      json!({}),
    )
    .await;
    assert_eq!(get_authed.status(), StatusCode::OK);
  }

  // ── Assignments ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn assignment_create_and_open_reads() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let created = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() + Duration::hours(1),
    )
    .await;

    let id = created["assignment_id"].as_str().unwrap();
    let resp =
      send_json(app.state.clone(), "GET", &format!("/assignments/{id}"), None, json!({}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["title"], "midterm");
  }

  #[tokio::test]
  async fn assignment_rejects_wrong_content_type() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;

    let resp = send_multipart(
      app.state.clone(),
      "POST",
      "/assignments",
      Some(&token),
      &[
        ("title", "midterm".to_string()),
        ("class", class.to_string()),
        ("dueDate", (Utc::now() + Duration::hours(1)).to_rfc3339()),
      ],
      &[("questionPaper", "q.png", "image/png", b"not a pdf")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn assignment_empty_patch_returns_400() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let created = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() + Duration::hours(1),
    )
    .await;
    let id = created["assignment_id"].as_str().unwrap();

    let resp = send_multipart(
      app.state.clone(),
      "PATCH",
      &format!("/assignments/{id}"),
      Some(&token),
      &[],
      &[],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn assignment_file_replacement_leaves_exactly_one_file() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let created = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() + Duration::hours(1),
    )
    .await;
    let id = created["assignment_id"].as_str().unwrap();

    let resp = send_multipart(
      app.state.clone(),
      "PATCH",
      &format!("/assignments/{id}"),
      Some(&token),
      &[],
      &[("questionPaper", "q2.pdf", "application/pdf", b"%PDF-1.4 v2")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let dir = app._uploads.path().join("assignments");
    let count = std::fs::read_dir(dir).unwrap().count();
    assert_eq!(count, 1, "old question paper not cleaned up");
  }

  #[tokio::test]
  async fn uploaded_paper_is_served_statically() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let created = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() + Duration::hours(1),
    )
    .await;

    let file_name = created["question_paper"]["file_name"].as_str().unwrap();
    let resp = send_json(
      app.state.clone(),
      "GET",
      &format!("/uploads/assignments/{file_name}"),
      None,
      json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── Answers ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submission_flow_with_due_date_gate() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let (student, student_token) =
      identity(app.state.clone(), "students", "s@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;

    let open = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() + Duration::hours(1),
    )
    .await;
    let open_id = open["assignment_id"].as_str().unwrap();

    let resp = send_multipart(
      app.state.clone(),
      "POST",
      "/answers",
      Some(&student_token),
      &[
        ("assignment", open_id.to_string()),
        ("student", student.to_string()),
      ],
      &[("answerPaper", "a.pdf", "application/pdf", b"%PDF-1.4 a")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // listing joins the student in
    let resp = send_json(
      app.state.clone(),
      "GET",
      &format!("/answers/{open_id}"),
      Some(&token),
      json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = json_body(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["student"]["email"], "s@example.com");

    // a closed assignment rejects the same submission
    let closed = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() - Duration::hours(1),
    )
    .await;
    let closed_id = closed["assignment_id"].as_str().unwrap();

    let resp = send_multipart(
      app.state.clone(),
      "POST",
      "/answers",
      Some(&student_token),
      &[
        ("assignment", closed_id.to_string()),
        ("student", student.to_string()),
      ],
      &[("answerPaper", "a.pdf", "application/pdf", b"%PDF-1.4 a")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn resubmission_replaces_the_answer_record() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let (student, student_token) =
      identity(app.state.clone(), "students", "s@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let assignment = make_assignment(
      app.state.clone(),
      &token,
      class,
      Utc::now() + Duration::hours(1),
    )
    .await;
    let assignment_id = assignment["assignment_id"].as_str().unwrap();

    let resp = send_multipart(
      app.state.clone(),
      "POST",
      "/answers",
      Some(&student_token),
      &[
        ("assignment", assignment_id.to_string()),
        ("student", student.to_string()),
      ],
      &[("answerPaper", "a1.pdf", "application/pdf", b"%PDF-1.4 v1")],
    )
    .await;
    let submitted = json_body(resp).await;
    let answer_id = submitted["answer_id"].as_str().unwrap();
    let first_paper = submitted["answer_paper"]["file_name"].as_str().unwrap();

    let resp = send_multipart(
      app.state.clone(),
      "PATCH",
      &format!("/answers/{answer_id}"),
      Some(&student_token),
      &[],
      &[("answerPaper", "a2.pdf", "application/pdf", b"%PDF-1.4 v2")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced = json_body(resp).await;
    assert_ne!(replaced["answer_paper"]["file_name"].as_str().unwrap(), first_paper);

    // still exactly one record for the assignment
    let resp = send_json(
      app.state.clone(),
      "GET",
      &format!("/answers/{assignment_id}"),
      Some(&token),
      json!({}),
    )
    .await;
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn oversized_upload_returns_413() {
    let app = make_app().await;
    let (teacher, token) =
      identity(app.state.clone(), "teachers", "t@example.com").await;
    let class = make_class(app.state.clone(), &token, teacher).await;
    let too_big = vec![0u8; MAX_UPLOAD_BYTES + 1];

    let resp = send_multipart(
      app.state.clone(),
      "POST",
      "/assignments",
      Some(&token),
      &[
        ("title", "midterm".to_string()),
        ("class", class.to_string()),
        ("dueDate", (Utc::now() + Duration::hours(1)).to_rfc3339()),
      ],
      &[("questionPaper", "q.pdf", "application/pdf", &too_big)],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
  }

  #[tokio::test]
  async fn answers_require_bearer_token() {
    let app = make_app().await;
    let resp = send_multipart(
      app.state.clone(),
      "POST",
      "/answers",
      None,
      &[],
      &[("answerPaper", "a.pdf", "application/pdf", b"%PDF-1.4")],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
