//! JWT bearer-token auth: token issuance, the handler-side extractor,
//! and argon2 password helpers.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, Stores, error::ApiError};

/// Token lifetime; the original issues day-long sessions.
const TOKEN_TTL_HOURS: i64 = 24;

/// HS256 key pair derived from the configured secret.
pub struct AuthKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
}

impl AuthKeys {
  pub fn from_secret(secret: &str) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  pub sub:   Uuid,
  pub email: String,
  pub exp:   i64,
}

/// Sign a bearer token for an authenticated identity.
pub fn issue_token(
  keys: &AuthKeys,
  id: Uuid,
  email: &str,
  now: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
  let claims = Claims {
    sub:   id,
    email: email.to_string(),
    exp:   (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
  };
  encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
}

/// The authenticated caller, extracted from the `Authorization: Bearer`
/// header. Any failure along the way is a 401.
pub struct Caller {
  pub id:    Uuid,
  pub email: String,
}

impl<S: Stores> FromRequestParts<AppState<S>> for Caller {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let header_val = parts
      .headers
      .get(axum::http::header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(ApiError::Unauthorized)?;

    let token = header_val
      .strip_prefix("Bearer ")
      .ok_or(ApiError::Unauthorized)?;

    let data = decode::<Claims>(
      token,
      &state.auth.decoding,
      &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    Ok(Caller { id: data.claims.sub, email: data.claims.email })
  }
}

// ─── Password hashing ────────────────────────────────────────────────────────

/// One-way salted hash, stored as an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))?
      .to_string(),
  )
}

/// Verify a password against a stored PHC string. A malformed stored
/// hash counts as a mismatch.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}
