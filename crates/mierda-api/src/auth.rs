//! Password check guarding deletes.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::ApiError;

/// Verify `password` against an argon2 PHC string, e.g. `$argon2id$v=19$…`.
///
/// With no hash configured every attempt is refused.
pub fn verify_delete_password(
  password: Option<&str>,
  password_hash: Option<&str>,
) -> Result<(), ApiError> {
  let (Some(password), Some(password_hash)) = (password, password_hash) else {
    return Err(ApiError::Unauthorized);
  };

  let parsed_hash = PasswordHash::new(password_hash).map_err(|e| {
    tracing::warn!(error = %e, "configured delete password hash is not a PHC string");
    ApiError::Unauthorized
  })?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)
}
