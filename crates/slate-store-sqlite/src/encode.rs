//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings, roles as their lowercase names. Artifact file
//! names are stored bare; the owning table implies the artifact kind.

use chrono::{DateTime, Utc};
use slate_core::{
  answer::Answer,
  artifact::{ArtifactKind, ArtifactRef},
  assignment::Assignment,
  identity::{Identity, Role},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ─────────────────────────────────────────────────────────────────────

pub fn encode_role(role: Role) -> &'static str { role.as_str() }

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "student" => Ok(Role::Student),
    "teacher" => Ok(Role::Teacher),
    other => Err(Error::InvalidRole(other.to_string())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `identities` row.
pub struct RawIdentity {
  pub id:            String,
  pub role:          String,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub created_at:    String,
}

impl RawIdentity {
  pub fn into_identity(self) -> Result<Identity> {
    Ok(Identity {
      id:            decode_uuid(&self.id)?,
      role:          decode_role(&self.role)?,
      name:          self.name,
      email:         self.email,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `assignments` row.
pub struct RawAssignment {
  pub assignment_id:  String,
  pub title:          String,
  pub class_id:       String,
  pub question_paper: String,
  pub due_date:       String,
}

impl RawAssignment {
  pub fn into_assignment(self) -> Result<Assignment> {
    Ok(Assignment {
      assignment_id: decode_uuid(&self.assignment_id)?,
      title:         self.title,
      class_id:      decode_uuid(&self.class_id)?,
      question_paper: ArtifactRef {
        kind:      ArtifactKind::QuestionPaper,
        file_name: self.question_paper,
      },
      due_date: decode_dt(&self.due_date)?,
    })
  }
}

/// Raw strings read directly from an `answers` row.
pub struct RawAnswer {
  pub answer_id:     String,
  pub assignment_id: String,
  pub student_id:    String,
  pub upload_date:   String,
  pub answer_paper:  String,
}

impl RawAnswer {
  pub fn into_answer(self) -> Result<Answer> {
    Ok(Answer {
      answer_id:     decode_uuid(&self.answer_id)?,
      assignment_id: decode_uuid(&self.assignment_id)?,
      student_id:    decode_uuid(&self.student_id)?,
      upload_date:   decode_dt(&self.upload_date)?,
      answer_paper:  ArtifactRef {
        kind:      ArtifactKind::AnswerPaper,
        file_name: self.answer_paper,
      },
    })
  }
}
