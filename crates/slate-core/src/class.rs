//! Class — a teacher-owned roster of students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A class roster. `teacher_id` never changes after creation and is the
/// sole authorizer of roster mutations. `student_ids` has set semantics;
/// the store enforces uniqueness, ordering is not meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
  pub class_id:    Uuid,
  pub subject:     String,
  pub teacher_id:  Uuid,
  pub student_ids: Vec<Uuid>,
  pub created_at:  DateTime<Utc>,
}

impl Class {
  /// The ownership predicate checked before every roster mutation.
  pub fn is_owned_by(&self, caller: Uuid) -> bool { self.teacher_id == caller }
}

/// Input for [`crate::store::ClassStore::insert_class`].
#[derive(Debug, Clone)]
pub struct NewClass {
  pub subject:     String,
  pub teacher_id:  Uuid,
  pub student_ids: Vec<Uuid>,
}
