//! Storage ports implemented by persistence backends.
//!
//! One trait per entity type, injected explicitly into each engine at
//! construction. Higher layers depend on these abstractions, not on any
//! concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  answer::{Answer, NewAnswer},
  artifact::ArtifactRef,
  assignment::{Assignment, AssignmentPatch, NewAssignment},
  class::{Class, NewClass},
  identity::{Identity, NewIdentity, Role},
};

// ─── Identities ──────────────────────────────────────────────────────────────

pub trait IdentityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new identity. Email uniqueness per role is enforced by
  /// the backend; the caller is expected to have checked first so it
  /// can surface a domain error rather than a constraint violation.
  fn create_identity(
    &self,
    new: NewIdentity,
  ) -> impl Future<Output = Result<Identity, Self::Error>> + Send + '_;

  fn find_identity(
    &self,
    role: Role,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  fn find_identity_by_email<'a>(
    &'a self,
    role: Role,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + 'a;

  fn list_identities(
    &self,
    role: Role,
  ) -> impl Future<Output = Result<Vec<Identity>, Self::Error>> + Send + '_;

  /// Returns `false` when no record with that id existed.
  fn delete_identity(
    &self,
    role: Role,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Classes ─────────────────────────────────────────────────────────────────

pub trait ClassStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn insert_class(
    &self,
    new: NewClass,
  ) -> impl Future<Output = Result<Class, Self::Error>> + Send + '_;

  fn find_class(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Class>, Self::Error>> + Send + '_;

  fn list_classes(&self)
  -> impl Future<Output = Result<Vec<Class>, Self::Error>> + Send + '_;

  fn delete_class(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Set-union membership update: adding an existing member is a no-op.
  /// Each id is applied as one atomic statement, so concurrent callers
  /// cannot lose each other's additions. Returns the updated class, or
  /// `None` if it does not exist.
  fn add_students(
    &self,
    class_id: Uuid,
    student_ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<Option<Class>, Self::Error>> + Send + '_;

  /// Set-difference membership update: removing a non-member is a no-op.
  fn remove_students(
    &self,
    class_id: Uuid,
    student_ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<Option<Class>, Self::Error>> + Send + '_;
}

// ─── Assignments ─────────────────────────────────────────────────────────────

pub trait AssignmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn insert_assignment(
    &self,
    new: NewAssignment,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  fn find_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  fn list_assignments(
    &self,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  /// Apply the non-`None` fields of `patch`. Returns the updated record,
  /// or `None` if it does not exist.
  fn update_assignment(
    &self,
    id: Uuid,
    patch: AssignmentPatch,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  fn delete_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Answers ─────────────────────────────────────────────────────────────────

pub trait AnswerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn insert_answer(
    &self,
    new: NewAnswer,
  ) -> impl Future<Output = Result<Answer, Self::Error>> + Send + '_;

  fn find_answer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Answer>, Self::Error>> + Send + '_;

  fn list_answers_by_assignment(
    &self,
    assignment_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Answer>, Self::Error>> + Send + '_;

  /// Overwrite the paper reference and upload date of an existing
  /// answer. Returns the updated record, or `None` if it does not exist.
  fn replace_answer_paper(
    &self,
    id: Uuid,
    paper: ArtifactRef,
    upload_date: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<Answer>, Self::Error>> + Send + '_;
}

// ─── Artifacts ───────────────────────────────────────────────────────────────

/// Durable storage for uploaded papers, addressed by generated names.
pub trait ArtifactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Write `data` under the artifact's path. Names are generated to be
  /// unique, so save never overwrites an unrelated file.
  fn save<'a>(
    &'a self,
    artifact: &'a ArtifactRef,
    data: &'a [u8],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete the artifact if it is present. Returns `Ok(false)` when the
  /// file was already gone — a missing artifact is never an error.
  fn remove<'a>(
    &'a self,
    artifact: &'a ArtifactRef,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
