//! Assignment — a question paper with a submission deadline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::ArtifactRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
  pub assignment_id:  Uuid,
  pub title:          String,
  pub class_id:       Uuid,
  pub question_paper: ArtifactRef,
  pub due_date:       DateTime<Utc>,
}

impl Assignment {
  /// The submission window is the interval up to and including the
  /// due-date instant itself: a submission exactly at `due_date` is
  /// accepted, one instant later is not.
  pub fn window_open_at(&self, now: DateTime<Utc>) -> bool {
    now <= self.due_date
  }
}

/// Input for [`crate::store::AssignmentStore::insert_assignment`].
/// The question paper has already been written to artifact storage.
#[derive(Debug, Clone)]
pub struct NewAssignment {
  pub title:          String,
  pub class_id:       Uuid,
  pub question_paper: ArtifactRef,
  pub due_date:       DateTime<Utc>,
}

/// A partial update as persisted by the store. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct AssignmentPatch {
  pub title:          Option<String>,
  pub due_date:       Option<DateTime<Utc>>,
  pub question_paper: Option<ArtifactRef>,
}

impl AssignmentPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none() && self.due_date.is_none() && self.question_paper.is_none()
  }
}
