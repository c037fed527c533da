use tokio::task;

use crate::error::ServiceError;

/// bcrypt is CPU-bound, so hashing runs on the blocking pool.
pub async fn hash(password: &str, cost: u32) -> Result<String, ServiceError> {
    let password = password.to_string();
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify(password: &str, password_hash: &str) -> bool {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    task::spawn_blocking(move || bcrypt::verify(password, &password_hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_only_the_hashed_password() {
        let hashed = hash("correct horse", 4).await.unwrap();
        assert_ne!(hashed, "correct horse");
        assert!(verify("correct horse", &hashed).await);
        assert!(!verify("battery staple", &hashed).await);
    }

    #[tokio::test]
    async fn garbage_hash_never_verifies() {
        assert!(!verify("anything", "not-a-bcrypt-hash").await);
    }
}
