//! Submission engine — due-date-gated creation and replacement of
//! student answers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  answer::{Answer, AnswerView, NewAnswer, StudentRef},
  artifact::{ArtifactKind, ArtifactRef, Upload},
  error::{Error, Result},
  identity::Role,
  store::{AnswerStore, ArtifactStore, AssignmentStore, IdentityStore},
};

pub struct SubmissionEngine<N, A, I, F> {
  answers:     Arc<N>,
  assignments: Arc<A>,
  identities:  Arc<I>,
  artifacts:   Arc<F>,
}

impl<N, A, I, F> Clone for SubmissionEngine<N, A, I, F> {
  fn clone(&self) -> Self {
    Self {
      answers:     self.answers.clone(),
      assignments: self.assignments.clone(),
      identities:  self.identities.clone(),
      artifacts:   self.artifacts.clone(),
    }
  }
}

impl<N, A, I, F> SubmissionEngine<N, A, I, F>
where
  N: AnswerStore,
  A: AssignmentStore,
  I: IdentityStore,
  F: ArtifactStore,
{
  pub fn new(
    answers: Arc<N>,
    assignments: Arc<A>,
    identities: Arc<I>,
    artifacts: Arc<F>,
  ) -> Self {
    Self { answers, assignments, identities, artifacts }
  }

  /// Submit an answer paper. Rejected with [`Error::PastDueDate`] when
  /// `now` is past the parent assignment's due date; a submission at the
  /// exact due-date instant is accepted. Always inserts a new record —
  /// nothing prevents a student from submitting twice against the same
  /// assignment.
  pub async fn submit(
    &self,
    assignment_id: Uuid,
    student_id: Uuid,
    upload: Upload,
    now: DateTime<Utc>,
  ) -> Result<Answer> {
    let assignment = self
      .assignments
      .find_assignment(assignment_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AssignmentNotFound(assignment_id))?;

    if !assignment.window_open_at(now) {
      return Err(Error::PastDueDate { due: assignment.due_date });
    }
    upload.validate()?;

    let paper = ArtifactRef {
      kind:      ArtifactKind::AnswerPaper,
      file_name: upload.storage_name(now),
    };
    self
      .artifacts
      .save(&paper, &upload.data)
      .await
      .map_err(Error::artifact)?;

    self
      .answers
      .insert_answer(NewAnswer {
        assignment_id,
        student_id,
        upload_date:  now,
        answer_paper: paper,
      })
      .await
      .map_err(Error::store)
  }

  /// Replace the paper of an existing answer, under the same due-date
  /// gate as [`submit`](Self::submit). The superseded paper stays on
  /// disk — only assignment updates clean up old artifacts (see
  /// DESIGN.md).
  pub async fn resubmit(
    &self,
    answer_id: Uuid,
    upload: Upload,
    now: DateTime<Utc>,
  ) -> Result<Answer> {
    let answer = self
      .answers
      .find_answer(answer_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AnswerNotFound(answer_id))?;

    let assignment = self
      .assignments
      .find_assignment(answer.assignment_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AssignmentNotFound(answer.assignment_id))?;

    if !assignment.window_open_at(now) {
      return Err(Error::PastDueDate { due: assignment.due_date });
    }
    upload.validate()?;

    let paper = ArtifactRef {
      kind:      ArtifactKind::AnswerPaper,
      file_name: upload.storage_name(now),
    };
    self
      .artifacts
      .save(&paper, &upload.data)
      .await
      .map_err(Error::artifact)?;

    self
      .answers
      .replace_answer_paper(answer_id, paper, now)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AnswerNotFound(answer_id))
  }

  /// All answers for an assignment, with the submitting student and the
  /// assignment's due date joined in.
  pub async fn list(&self, assignment_id: Uuid) -> Result<Vec<AnswerView>> {
    let assignment = self
      .assignments
      .find_assignment(assignment_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AssignmentNotFound(assignment_id))?;

    let answers = self
      .answers
      .list_answers_by_assignment(assignment_id)
      .await
      .map_err(Error::store)?;

    let mut views = Vec::with_capacity(answers.len());
    for answer in answers {
      let student = self
        .identities
        .find_identity(Role::Student, answer.student_id)
        .await
        .map_err(Error::store)?
        .map(|s| StudentRef { id: s.id, name: s.name, email: s.email });

      views.push(AnswerView { answer, student, due_date: assignment.due_date });
    }
    Ok(views)
  }
}
