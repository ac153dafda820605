use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// Hash a plaintext credential with a random salt. Two calls with the same
/// input produce different digests.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Verify a plaintext credential against a stored digest. Returns
/// `Ok(false)` on a mismatch; an `Err` means the digest itself is
/// malformed, which indicates a corrupted record rather than a bad caller.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, AppError> {
    verify(password, digest)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

/// Hash on the blocking pool so the bcrypt work factor does not stall the
/// request-handling executor.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
}

/// Blocking-pool variant of [`verify_password`].
pub async fn verify_password_blocking(password: String, digest: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Verification task failed: {}", e)))?
}
