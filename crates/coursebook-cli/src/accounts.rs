use anyhow::{Context, bail};
use coursebook_core::hash_password_blocking;
use coursebook_db::{StoreError, UserStore};
use coursebook_models::{NewUser, Role, UserRecord};

/// Creates a teacher account. Registration over HTTP can also grant the
/// teacher role; this path exists for bootstrapping a fresh deployment.
pub async fn create_teacher(
    users: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<UserRecord> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("username, email and password are all required");
    }

    let password_hash = hash_password_blocking(password.to_string())
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))?;

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        role: Role::Teacher,
    };

    match users.create(new_user).await {
        Ok(user) => Ok(user),
        Err(StoreError::UniqueViolation(_)) => {
            bail!("a user with that email or username already exists")
        }
        Err(e) => Err(e).context("Failed to create teacher"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_core::verify_password;
    use coursebook_db::MemoryStore;

    #[tokio::test]
    async fn test_create_teacher() {
        let store = MemoryStore::new();
        let user = create_teacher(&store, "prof", "prof@example.com", "chalkdust")
            .await
            .unwrap();

        assert_eq!(user.role, Role::Teacher);
        assert!(verify_password("chalkdust", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_teacher_duplicate() {
        let store = MemoryStore::new();
        create_teacher(&store, "prof", "prof@example.com", "pw")
            .await
            .unwrap();

        let err = create_teacher(&store, "prof", "other@example.com", "pw")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_create_teacher_requires_fields() {
        let store = MemoryStore::new();
        assert!(create_teacher(&store, " ", "a@example.com", "pw").await.is_err());
    }
}
