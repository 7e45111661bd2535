//! [`SqliteStore`] — the SQLite implementation of every storage port.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use slate_core::{
  answer::{Answer, NewAnswer},
  artifact::ArtifactRef,
  assignment::{Assignment, AssignmentPatch, NewAssignment},
  class::{Class, NewClass},
  identity::{Identity, NewIdentity, Role},
  store::{AnswerStore, AssignmentStore, ClassStore, IdentityStore},
};

use crate::{
  Error, Result,
  encode::{
    RawAnswer, RawAssignment, RawIdentity, decode_dt, decode_uuid, encode_dt,
    encode_role, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Slate record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read a class row together with its membership set.
  async fn read_class(&self, class_id: Uuid) -> Result<Option<Class>> {
    let id_str = encode_uuid(class_id);

    let raw: Option<(String, String, String, Vec<String>)> = self
      .conn
      .call(move |conn| {
        let row: Option<(String, String, String)> = conn
          .query_row(
            "SELECT subject, teacher_id, created_at FROM classes WHERE class_id = ?1",
            rusqlite::params![id_str],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
          )
          .optional()?;

        let Some((subject, teacher_id, created_at)) = row else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT student_id FROM class_students WHERE class_id = ?1",
        )?;
        let students = stmt
          .query_map(rusqlite::params![id_str], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(Some((subject, teacher_id, created_at, students)))
      })
      .await?;

    let Some((subject, teacher_id, created_at, students)) = raw else {
      return Ok(None);
    };

    Ok(Some(Class {
      class_id,
      subject,
      teacher_id: decode_uuid(&teacher_id)?,
      student_ids: students
        .iter()
        .map(|s| decode_uuid(s))
        .collect::<Result<Vec<_>>>()?,
      created_at: decode_dt(&created_at)?,
    }))
  }
}

/// Caller-supplied id lists may carry duplicates; membership is a set.
fn dedup_ids(mut ids: Vec<Uuid>) -> Vec<Uuid> {
  ids.sort();
  ids.dedup();
  ids
}

// ─── IdentityStore impl ──────────────────────────────────────────────────────

impl IdentityStore for SqliteStore {
  type Error = Error;

  async fn create_identity(&self, new: NewIdentity) -> Result<Identity> {
    let identity = Identity {
      id:            Uuid::new_v4(),
      role:          new.role,
      name:          new.name,
      email:         new.email,
      password_hash: new.password_hash,
      created_at:    Utc::now(),
    };

    let id_str    = encode_uuid(identity.id);
    let role_str  = encode_role(identity.role).to_owned();
    let name      = identity.name.clone();
    let email     = identity.email.clone();
    let hash      = identity.password_hash.clone();
    let at_str    = encode_dt(identity.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO identities (id, role, name, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, role_str, name, email, hash, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(identity)
  }

  async fn find_identity(&self, role: Role, id: Uuid) -> Result<Option<Identity>> {
    let id_str   = encode_uuid(id);
    let role_str = encode_role(role).to_owned();

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, role, name, email, password_hash, created_at
             FROM identities WHERE id = ?1 AND role = ?2",
            rusqlite::params![id_str, role_str],
            |row| {
              Ok(RawIdentity {
                id:            row.get(0)?,
                role:          row.get(1)?,
                name:          row.get(2)?,
                email:         row.get(3)?,
                password_hash: row.get(4)?,
                created_at:    row.get(5)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  async fn find_identity_by_email(
    &self,
    role: Role,
    email: &str,
  ) -> Result<Option<Identity>> {
    let role_str  = encode_role(role).to_owned();
    let email_str = email.to_owned();

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, role, name, email, password_hash, created_at
             FROM identities WHERE role = ?1 AND email = ?2",
            rusqlite::params![role_str, email_str],
            |row| {
              Ok(RawIdentity {
                id:            row.get(0)?,
                role:          row.get(1)?,
                name:          row.get(2)?,
                email:         row.get(3)?,
                password_hash: row.get(4)?,
                created_at:    row.get(5)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  async fn list_identities(&self, role: Role) -> Result<Vec<Identity>> {
    let role_str = encode_role(role).to_owned();

    let raws: Vec<RawIdentity> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, role, name, email, password_hash, created_at
           FROM identities WHERE role = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![role_str], |row| {
            Ok(RawIdentity {
              id:            row.get(0)?,
              role:          row.get(1)?,
              name:          row.get(2)?,
              email:         row.get(3)?,
              password_hash: row.get(4)?,
              created_at:    row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIdentity::into_identity).collect()
  }

  async fn delete_identity(&self, role: Role, id: Uuid) -> Result<bool> {
    let id_str   = encode_uuid(id);
    let role_str = encode_role(role).to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM identities WHERE id = ?1 AND role = ?2",
          rusqlite::params![id_str, role_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}

// ─── ClassStore impl ─────────────────────────────────────────────────────────

impl ClassStore for SqliteStore {
  type Error = Error;

  async fn insert_class(&self, new: NewClass) -> Result<Class> {
    let class = Class {
      class_id:    Uuid::new_v4(),
      subject:     new.subject,
      teacher_id:  new.teacher_id,
      student_ids: dedup_ids(new.student_ids),
      created_at:  Utc::now(),
    };

    let id_str      = encode_uuid(class.class_id);
    let subject     = class.subject.clone();
    let teacher_str = encode_uuid(class.teacher_id);
    let at_str      = encode_dt(class.created_at);
    let student_strs: Vec<String> =
      class.student_ids.iter().map(|s| encode_uuid(*s)).collect();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO classes (class_id, subject, teacher_id, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, subject, teacher_str, at_str],
        )?;
        for student in &student_strs {
          conn.execute(
            "INSERT OR IGNORE INTO class_students (class_id, student_id) VALUES (?1, ?2)",
            rusqlite::params![id_str, student],
          )?;
        }
        Ok(())
      })
      .await?;

    Ok(class)
  }

  async fn find_class(&self, id: Uuid) -> Result<Option<Class>> {
    self.read_class(id).await
  }

  async fn list_classes(&self) -> Result<Vec<Class>> {
    let ids: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT class_id FROM classes")?;
        let rows = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    let mut classes = Vec::with_capacity(ids.len());
    for id in ids {
      if let Some(class) = self.read_class(decode_uuid(&id)?).await? {
        classes.push(class);
      }
    }
    Ok(classes)
  }

  async fn delete_class(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        // Membership rows go with the class via ON DELETE CASCADE.
        Ok(conn.execute(
          "DELETE FROM classes WHERE class_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn add_students(
    &self,
    class_id: Uuid,
    student_ids: Vec<Uuid>,
  ) -> Result<Option<Class>> {
    let id_str = encode_uuid(class_id);
    let student_strs: Vec<String> =
      student_ids.iter().map(|s| encode_uuid(*s)).collect();

    let exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM classes WHERE class_id = ?1",
            rusqlite::params![id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          for student in &student_strs {
            conn.execute(
              "INSERT OR IGNORE INTO class_students (class_id, student_id) VALUES (?1, ?2)",
              rusqlite::params![id_str, student],
            )?;
          }
        }
        Ok(exists)
      })
      .await?;

    if !exists {
      return Ok(None);
    }
    self.read_class(class_id).await
  }

  async fn remove_students(
    &self,
    class_id: Uuid,
    student_ids: Vec<Uuid>,
  ) -> Result<Option<Class>> {
    let id_str = encode_uuid(class_id);
    let student_strs: Vec<String> =
      student_ids.iter().map(|s| encode_uuid(*s)).collect();

    let exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM classes WHERE class_id = ?1",
            rusqlite::params![id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          for student in &student_strs {
            conn.execute(
              "DELETE FROM class_students WHERE class_id = ?1 AND student_id = ?2",
              rusqlite::params![id_str, student],
            )?;
          }
        }
        Ok(exists)
      })
      .await?;

    if !exists {
      return Ok(None);
    }
    self.read_class(class_id).await
  }
}

// ─── AssignmentStore impl ────────────────────────────────────────────────────

impl AssignmentStore for SqliteStore {
  type Error = Error;

  async fn insert_assignment(&self, new: NewAssignment) -> Result<Assignment> {
    let assignment = Assignment {
      assignment_id:  Uuid::new_v4(),
      title:          new.title,
      class_id:       new.class_id,
      question_paper: new.question_paper,
      due_date:       new.due_date,
    };

    let id_str    = encode_uuid(assignment.assignment_id);
    let title     = assignment.title.clone();
    let class_str = encode_uuid(assignment.class_id);
    let paper     = assignment.question_paper.file_name.clone();
    let due_str   = encode_dt(assignment.due_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assignments (assignment_id, title, class_id, question_paper, due_date)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, title, class_str, paper, due_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(assignment)
  }

  async fn find_assignment(&self, id: Uuid) -> Result<Option<Assignment>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT assignment_id, title, class_id, question_paper, due_date
             FROM assignments WHERE assignment_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawAssignment {
                assignment_id:  row.get(0)?,
                title:          row.get(1)?,
                class_id:       row.get(2)?,
                question_paper: row.get(3)?,
                due_date:       row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn list_assignments(&self) -> Result<Vec<Assignment>> {
    let raws: Vec<RawAssignment> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT assignment_id, title, class_id, question_paper, due_date
           FROM assignments",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAssignment {
              assignment_id:  row.get(0)?,
              title:          row.get(1)?,
              class_id:       row.get(2)?,
              question_paper: row.get(3)?,
              due_date:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }

  async fn update_assignment(
    &self,
    id: Uuid,
    patch: AssignmentPatch,
  ) -> Result<Option<Assignment>> {
    let Some(current) = self.find_assignment(id).await? else {
      return Ok(None);
    };

    let updated = Assignment {
      assignment_id:  id,
      title:          patch.title.unwrap_or(current.title),
      class_id:       current.class_id,
      question_paper: patch.question_paper.unwrap_or(current.question_paper),
      due_date:       patch.due_date.unwrap_or(current.due_date),
    };

    let id_str  = encode_uuid(id);
    let title   = updated.title.clone();
    let paper   = updated.question_paper.file_name.clone();
    let due_str = encode_dt(updated.due_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE assignments SET title = ?2, question_paper = ?3, due_date = ?4
           WHERE assignment_id = ?1",
          rusqlite::params![id_str, title, paper, due_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(updated))
  }

  async fn delete_assignment(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM assignments WHERE assignment_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}

// ─── AnswerStore impl ────────────────────────────────────────────────────────

impl AnswerStore for SqliteStore {
  type Error = Error;

  async fn insert_answer(&self, new: NewAnswer) -> Result<Answer> {
    let answer = Answer {
      answer_id:     Uuid::new_v4(),
      assignment_id: new.assignment_id,
      student_id:    new.student_id,
      upload_date:   new.upload_date,
      answer_paper:  new.answer_paper,
    };

    let id_str         = encode_uuid(answer.answer_id);
    let assignment_str = encode_uuid(answer.assignment_id);
    let student_str    = encode_uuid(answer.student_id);
    let at_str         = encode_dt(answer.upload_date);
    let paper          = answer.answer_paper.file_name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO answers (answer_id, assignment_id, student_id, upload_date, answer_paper)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, assignment_str, student_str, at_str, paper],
        )?;
        Ok(())
      })
      .await?;

    Ok(answer)
  }

  async fn find_answer(&self, id: Uuid) -> Result<Option<Answer>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAnswer> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT answer_id, assignment_id, student_id, upload_date, answer_paper
             FROM answers WHERE answer_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawAnswer {
                answer_id:     row.get(0)?,
                assignment_id: row.get(1)?,
                student_id:    row.get(2)?,
                upload_date:   row.get(3)?,
                answer_paper:  row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAnswer::into_answer).transpose()
  }

  async fn list_answers_by_assignment(
    &self,
    assignment_id: Uuid,
  ) -> Result<Vec<Answer>> {
    let assignment_str = encode_uuid(assignment_id);

    let raws: Vec<RawAnswer> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT answer_id, assignment_id, student_id, upload_date, answer_paper
           FROM answers WHERE assignment_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![assignment_str], |row| {
            Ok(RawAnswer {
              answer_id:     row.get(0)?,
              assignment_id: row.get(1)?,
              student_id:    row.get(2)?,
              upload_date:   row.get(3)?,
              answer_paper:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnswer::into_answer).collect()
  }

  async fn replace_answer_paper(
    &self,
    id: Uuid,
    paper: ArtifactRef,
    upload_date: DateTime<Utc>,
  ) -> Result<Option<Answer>> {
    let id_str    = encode_uuid(id);
    let paper_str = paper.file_name.clone();
    let at_str    = encode_dt(upload_date);

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE answers SET answer_paper = ?2, upload_date = ?3 WHERE answer_id = ?1",
          rusqlite::params![id_str, paper_str, at_str],
        )?)
      })
      .await?;

    if updated == 0 {
      return Ok(None);
    }
    self.find_answer(id).await
  }
}
