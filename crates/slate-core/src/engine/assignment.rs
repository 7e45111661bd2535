//! Assignment engine — record CRUD paired with question-paper artifact
//! lifecycle (store on create, replace-and-delete on update, delete on
//! removal).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  artifact::{ArtifactKind, ArtifactRef, Upload},
  assignment::{Assignment, AssignmentPatch, NewAssignment},
  error::{Error, Result},
  store::{ArtifactStore, AssignmentStore},
};

/// Caller-supplied field changes for an update; the paper replacement
/// travels separately as an [`Upload`].
#[derive(Debug, Clone, Default)]
pub struct AssignmentChanges {
  pub title:    Option<String>,
  pub due_date: Option<DateTime<Utc>>,
}

pub struct AssignmentEngine<A, F> {
  assignments: Arc<A>,
  artifacts:   Arc<F>,
}

impl<A, F> Clone for AssignmentEngine<A, F> {
  fn clone(&self) -> Self {
    Self {
      assignments: self.assignments.clone(),
      artifacts:   self.artifacts.clone(),
    }
  }
}

impl<A: AssignmentStore, F: ArtifactStore> AssignmentEngine<A, F> {
  pub fn new(assignments: Arc<A>, artifacts: Arc<F>) -> Self {
    Self { assignments, artifacts }
  }

  pub async fn create(
    &self,
    title: String,
    class_id: Uuid,
    due_date: DateTime<Utc>,
    upload: Upload,
    now: DateTime<Utc>,
  ) -> Result<Assignment> {
    if title.trim().is_empty() {
      return Err(Error::Validation("title must not be empty".to_string()));
    }
    upload.validate()?;

    let paper = ArtifactRef {
      kind:      ArtifactKind::QuestionPaper,
      file_name: upload.storage_name(now),
    };
    self
      .artifacts
      .save(&paper, &upload.data)
      .await
      .map_err(Error::artifact)?;

    self
      .assignments
      .insert_assignment(NewAssignment { title, class_id, question_paper: paper, due_date })
      .await
      .map_err(Error::store)
  }

  pub async fn get(&self, assignment_id: Uuid) -> Result<Assignment> {
    self
      .assignments
      .find_assignment(assignment_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AssignmentNotFound(assignment_id))
  }

  pub async fn list(&self) -> Result<Vec<Assignment>> {
    self.assignments.list_assignments().await.map_err(Error::store)
  }

  /// Apply any subset of `{title, due_date, paper}`. A new paper
  /// supersedes the current one: the old artifact is removed first
  /// (a failed removal is logged and does not block the update), then
  /// the new reference is persisted.
  pub async fn update(
    &self,
    assignment_id: Uuid,
    changes: AssignmentChanges,
    upload: Option<Upload>,
    now: DateTime<Utc>,
  ) -> Result<Assignment> {
    if changes.title.is_none() && changes.due_date.is_none() && upload.is_none() {
      return Err(Error::NoFieldsProvided);
    }

    let current = self.get(assignment_id).await?;

    let mut patch = AssignmentPatch {
      title:          changes.title,
      due_date:       changes.due_date,
      question_paper: None,
    };

    if let Some(upload) = upload {
      upload.validate()?;

      if let Err(e) = self.artifacts.remove(&current.question_paper).await {
        tracing::warn!(
          assignment_id = %assignment_id,
          file = %current.question_paper.file_name,
          error = %e,
          "failed to remove superseded question paper"
        );
      }

      let paper = ArtifactRef {
        kind:      ArtifactKind::QuestionPaper,
        file_name: upload.storage_name(now),
      };
      self
        .artifacts
        .save(&paper, &upload.data)
        .await
        .map_err(Error::artifact)?;
      patch.question_paper = Some(paper);
    }

    self
      .assignments
      .update_assignment(assignment_id, patch)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AssignmentNotFound(assignment_id))
  }

  /// Remove the question paper, then the record. A paper already gone
  /// from disk is fine; a filesystem failure while deleting an existing
  /// one aborts the whole operation.
  pub async fn delete(&self, assignment_id: Uuid) -> Result<()> {
    let current = self.get(assignment_id).await?;

    self
      .artifacts
      .remove(&current.question_paper)
      .await
      .map_err(Error::artifact)?;

    self
      .assignments
      .delete_assignment(assignment_id)
      .await
      .map_err(Error::store)?;
    Ok(())
  }
}
