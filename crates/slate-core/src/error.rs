//! Error types for `slate-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("an account with email {0} already exists")]
  DuplicateEmail(String),

  #[error("auth failed")]
  AuthFailed,

  #[error("class not found: {0}")]
  ClassNotFound(Uuid),

  #[error("assignment not found: {0}")]
  AssignmentNotFound(Uuid),

  #[error("answer not found: {0}")]
  AnswerNotFound(Uuid),

  #[error("caller is not the owning teacher of class {0}")]
  Forbidden(Uuid),

  #[error("submission window closed at {due}")]
  PastDueDate { due: DateTime<Utc> },

  #[error("no recognised fields provided in update")]
  NoFieldsProvided,

  #[error("validation error: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("artifact storage error: {0}")]
  Artifact(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
    Error::Store(Box::new(err))
  }

  pub fn artifact<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
    Error::Artifact(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
