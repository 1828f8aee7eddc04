//! bcrypt password hashing and verification.

use tracing::warn;

use crate::error::{Result, ServerError};

/// Check `password` against a stored bcrypt hash.
///
/// bcrypt is deliberately slow, so the comparison runs on the blocking pool.
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;
    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!("Stored password hash could not be parsed: {}", e);
            Ok(false)
        }
    }
}

/// Hash a password for provisioning an admin record.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| ServerError::internal(format!("Failed to hash password: {}", e)))
}
