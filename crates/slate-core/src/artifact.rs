//! Uploaded document handling — artifact references and the upload policy.
//!
//! An artifact is an uploaded file (question paper or answer paper) stored
//! outside the record store and referenced by a generated file name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upload size ceiling, enforced before anything touches disk.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// The only content types accepted for uploaded papers.
const ALLOWED_CONTENT_TYPES: &[&str] = &[
  "application/pdf",
  "application/msword",
  "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

// ─── Artifact references ─────────────────────────────────────────────────────

/// Which collection an artifact belongs to; determines its subdirectory
/// under the uploads root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
  QuestionPaper,
  AnswerPaper,
}

impl ArtifactKind {
  pub fn dir(self) -> &'static str {
    match self {
      ArtifactKind::QuestionPaper => "assignments",
      ArtifactKind::AnswerPaper => "answers",
    }
  }
}

/// An opaque handle to a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
  pub kind:      ArtifactKind,
  pub file_name: String,
}

impl ArtifactRef {
  /// Path relative to the uploads root, e.g. `assignments/<file>`.
  pub fn relative_path(&self) -> String {
    format!("{}/{}", self.kind.dir(), self.file_name)
  }
}

// ─── Uploads ─────────────────────────────────────────────────────────────────

/// A file as received from the transport, already bounded by the body limit.
#[derive(Debug, Clone)]
pub struct Upload {
  pub file_name:    String,
  pub content_type: String,
  pub data:         Vec<u8>,
}

impl Upload {
  /// Enforce the content-type allow-list and the size ceiling.
  pub fn validate(&self) -> Result<()> {
    if !ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
      return Err(Error::Validation(format!(
        "unsupported content type '{}': expected pdf, doc, or docx",
        self.content_type
      )));
    }
    if self.data.len() > MAX_UPLOAD_BYTES {
      return Err(Error::Validation(format!(
        "file exceeds the {} byte upload limit",
        MAX_UPLOAD_BYTES
      )));
    }
    Ok(())
  }

  /// Collision-resistant stored name: the upload instant (nanosecond
  /// precision, `:` never appears) followed by the sanitised original name.
  pub fn storage_name(&self, now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y-%m-%dT%H-%M-%S%.9fZ");
    format!("{stamp}-{}", sanitize_file_name(&self.file_name))
  }
}

/// Keep alphanumerics, `.`, `-` and `_`; everything else (including path
/// separators) becomes `-`.
fn sanitize_file_name(name: &str) -> String {
  let cleaned: String = name
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
        c
      } else {
        '-'
      }
    })
    .collect();
  if cleaned.is_empty() { "upload".to_string() } else { cleaned }
}
