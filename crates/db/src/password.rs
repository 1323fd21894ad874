use tokio::task;

use crate::DbError;

/// Hash a password with bcrypt at the given cost.
///
/// bcrypt is CPU-bound, so the work runs on a blocking thread.
pub async fn hash(password: &str, cost: u32) -> Result<String, DbError> {
    let password = password.to_string();

    Ok(task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// Verify a password against a stored bcrypt hash.
pub async fn verify(password: &str, hash: &str) -> Result<bool, DbError> {
    let password = password.to_string();
    let hash = hash.to_string();

    Ok(task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify() {
        let hashed = hash("admin", 8).await.unwrap();

        assert_ne!(hashed, "admin");
        assert!(hashed.starts_with("$2b$08$"));
        assert!(verify("admin", &hashed).await.unwrap());
        assert!(!verify("not-admin", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let first = hash("admin", 4).await.unwrap();
        let second = hash("admin", 4).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let result = verify("admin", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(DbError::Hash(_))));
    }
}
