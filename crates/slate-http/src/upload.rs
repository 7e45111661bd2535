//! Multipart form decoding shared by the assignment and answer handlers.
//!
//! Text fields and file fields are collected up front; handlers then
//! pull out what they need by name. Field names follow the wire format
//! of the original clients (`title`, `class`, `dueDate`, `questionPaper`,
//! `assignment`, `student`, `answerPaper`).

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use slate_core::artifact::{MAX_UPLOAD_BYTES, Upload};
use uuid::Uuid;

use crate::error::ApiError;

pub struct UploadForm {
  text:  HashMap<String, String>,
  files: HashMap<String, Upload>,
}

impl UploadForm {
  /// Drain a multipart body into memory. File parts over the upload
  /// ceiling are rejected here, before any handler logic runs.
  pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
    let mut text = HashMap::new();
    let mut files = HashMap::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
      ApiError::BadRequest(format!("malformed multipart body: {e}"))
    })? {
      let Some(name) = field.name().map(str::to_string) else {
        continue;
      };

      if let Some(file_name) = field.file_name().map(str::to_string) {
        let content_type = field
          .content_type()
          .unwrap_or("application/octet-stream")
          .to_string();
        let data = field.bytes().await.map_err(|e| {
          ApiError::BadRequest(format!("failed to read field '{name}': {e}"))
        })?;
        if data.len() > MAX_UPLOAD_BYTES {
          return Err(ApiError::PayloadTooLarge);
        }
        files.insert(name, Upload { file_name, content_type, data: data.to_vec() });
      } else {
        let value = field.text().await.map_err(|e| {
          ApiError::BadRequest(format!("failed to read field '{name}': {e}"))
        })?;
        text.insert(name, value);
      }
    }

    Ok(Self { text, files })
  }

  pub fn text(&self, name: &str) -> Option<String> {
    self.text.get(name).cloned()
  }

  pub fn require_text(&self, name: &str) -> Result<String, ApiError> {
    self
      .text(name)
      .ok_or_else(|| ApiError::BadRequest(format!("missing field '{name}'")))
  }

  pub fn require_uuid(&self, name: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(&self.require_text(name)?).map_err(|_| {
      ApiError::BadRequest(format!("field '{name}' is not a valid id"))
    })
  }

  /// RFC 3339 timestamp field, e.g. `2024-01-10T00:00:00Z`.
  pub fn datetime(&self, name: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    match self.text(name) {
      None => Ok(None),
      Some(raw) => DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| {
          ApiError::BadRequest(format!(
            "field '{name}' is not an RFC 3339 timestamp"
          ))
        }),
    }
  }

  pub fn require_datetime(&self, name: &str) -> Result<DateTime<Utc>, ApiError> {
    self
      .datetime(name)?
      .ok_or_else(|| ApiError::BadRequest(format!("missing field '{name}'")))
  }

  pub fn take_file(&mut self, name: &str) -> Option<Upload> {
    self.files.remove(name)
  }

  pub fn require_file(&mut self, name: &str) -> Result<Upload, ApiError> {
    self
      .take_file(name)
      .ok_or_else(|| ApiError::BadRequest(format!("missing file '{name}'")))
  }
}
