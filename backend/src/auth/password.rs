//! Password hashing using bcrypt
//!
//! Hashing happens exactly once per plaintext credential, at registration;
//! stored hashes are never re-hashed. Verification failure is a plain
//! `false`, indistinguishable from a wrong password.

use anyhow::Result;

/// Work factor for bcrypt. Deliberately expensive.
const HASH_COST: u32 = 12;

/// Password hashing service
///
/// bcrypt generates a random salt per hash and compares in constant time.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    ///
    /// CPU-intensive; in async contexts use `hash_async`.
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, HASH_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on the blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Errors only on a malformed hash; a wrong password is `Ok(false)`.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
