//! Answer — a student's submission against an assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::ArtifactRef;

/// One submission attempt. Nothing ties an answer uniquely to its
/// (assignment, student) pair: every create inserts a new record, and
/// resubmission replaces the paper in place on an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
  pub answer_id:     Uuid,
  pub assignment_id: Uuid,
  pub student_id:    Uuid,
  pub upload_date:   DateTime<Utc>,
  pub answer_paper:  ArtifactRef,
}

/// Input for [`crate::store::AnswerStore::insert_answer`].
#[derive(Debug, Clone)]
pub struct NewAnswer {
  pub assignment_id: Uuid,
  pub student_id:    Uuid,
  pub upload_date:   DateTime<Utc>,
  pub answer_paper:  ArtifactRef,
}

/// The submitting student, joined into answer listings.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRef {
  pub id:    Uuid,
  pub name:  String,
  pub email: String,
}

/// An answer with its student identity and the parent assignment's
/// due date joined in.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerView {
  #[serde(flatten)]
  pub answer:   Answer,
  /// `None` when the referenced student no longer exists.
  pub student:  Option<StudentRef>,
  pub due_date: DateTime<Utc>,
}
