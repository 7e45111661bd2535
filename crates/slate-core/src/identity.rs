//! Identity records — students and teachers.
//!
//! Students and teachers share a shape but live in role-partitioned
//! namespaces: email uniqueness is per role, and lookups always name
//! the role they search in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role an identity signed up under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Teacher,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Student => "student",
      Role::Teacher => "teacher",
    }
  }
}

/// A credential record. Immutable except deletion.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
  pub id:         Uuid,
  pub role:       Role,
  pub name:       String,
  pub email:      String,
  /// Argon2 PHC string. Never serialised into responses.
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

/// Input for [`crate::store::IdentityStore::create_identity`].
/// The password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewIdentity {
  pub role:          Role,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}
