//! Roster engine — class CRUD with teacher-ownership authorization.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  class::{Class, NewClass},
  error::{Error, Result},
  store::ClassStore,
};

pub struct RosterEngine<C> {
  classes: Arc<C>,
}

impl<C> Clone for RosterEngine<C> {
  fn clone(&self) -> Self {
    Self { classes: self.classes.clone() }
  }
}

impl<C: ClassStore> RosterEngine<C> {
  pub fn new(classes: Arc<C>) -> Self {
    Self { classes }
  }

  /// Create a class. The caller is trusted to supply a real teacher id;
  /// no check ties the authenticated caller to `new.teacher_id`
  /// (see DESIGN.md).
  pub async fn create(&self, new: NewClass) -> Result<Class> {
    self.classes.insert_class(new).await.map_err(Error::store)
  }

  pub async fn get(&self, class_id: Uuid) -> Result<Class> {
    self
      .classes
      .find_class(class_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ClassNotFound(class_id))
  }

  pub async fn list(&self) -> Result<Vec<Class>> {
    self.classes.list_classes().await.map_err(Error::store)
  }

  pub async fn delete(&self, class_id: Uuid, caller: Uuid) -> Result<()> {
    self.load_owned(class_id, caller).await?;
    self.classes.delete_class(class_id).await.map_err(Error::store)?;
    Ok(())
  }

  /// Idempotent set union: re-adding existing members is a no-op.
  pub async fn add_students(
    &self,
    class_id: Uuid,
    student_ids: Vec<Uuid>,
    caller: Uuid,
  ) -> Result<Class> {
    self.load_owned(class_id, caller).await?;
    self
      .classes
      .add_students(class_id, student_ids)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ClassNotFound(class_id))
  }

  /// Idempotent set difference: removing non-members is a no-op.
  pub async fn remove_students(
    &self,
    class_id: Uuid,
    student_ids: Vec<Uuid>,
    caller: Uuid,
  ) -> Result<Class> {
    self.load_owned(class_id, caller).await?;
    self
      .classes
      .remove_students(class_id, student_ids)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ClassNotFound(class_id))
  }

  /// The shared authorization gate: load the class (404 if absent), then
  /// require the caller to be the owning teacher. Every mutating roster
  /// operation goes through here.
  async fn load_owned(&self, class_id: Uuid, caller: Uuid) -> Result<Class> {
    let class = self.get(class_id).await?;
    if !class.is_owned_by(caller) {
      return Err(Error::Forbidden(class_id));
    }
    Ok(class)
  }
}
