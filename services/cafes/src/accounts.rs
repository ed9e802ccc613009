//! Registration and credential checks

use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    forms::{Credentials, Registration},
    models::{NewUser, User},
    password,
    repositories::UserRepository,
};

/// Create an account for a new email address
pub async fn register(users: &UserRepository, registration: &Registration) -> AppResult<User> {
    if users.find_by_email(&registration.email).await?.is_some() {
        info!("Registration refused, email already in use");
        return Err(AppError::DuplicateAccount);
    }

    let password_hash = password::hash_password(&registration.password)?;
    let new_user = NewUser {
        email: registration.email.clone(),
        name: registration.name.clone(),
        password_hash,
    };

    match users.create(&new_user).await {
        Ok(user) => {
            info!("Registered user {}", user.id);
            Ok(user)
        }
        // Lost a race with a concurrent registration for the same email
        Err(e) if e.is_unique_violation() => Err(AppError::DuplicateAccount),
        Err(e) => Err(e.into()),
    }
}

/// Check an email/password pair
pub async fn authenticate(users: &UserRepository, credentials: &Credentials) -> AppResult<User> {
    let Some(user) = users.find_by_email(&credentials.email).await? else {
        warn!("Login attempt for unknown account");
        return Err(AppError::UnknownAccount);
    };

    if !password::verify_password(&user.password, &credentials.password)? {
        warn!("Invalid password for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::memory_pool;

    fn registration(email: &str, name: &str, password: &str) -> Registration {
        Registration {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let users = UserRepository::new(memory_pool().await);

        let ann = register(&users, &registration("a@x.com", "Ann", "pw123"))
            .await
            .unwrap();
        assert_ne!(ann.password, "pw123");

        let err = authenticate(&users, &credentials("a@x.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        let err = authenticate(&users, &credentials("b@x.com", "pw123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownAccount));

        let user = authenticate(&users, &credentials("a@x.com", "pw123"))
            .await
            .unwrap();
        assert_eq!(user.id, ann.id);
    }

    #[tokio::test]
    async fn test_duplicate_registration_creates_nothing() {
        let pool = memory_pool().await;
        let users = UserRepository::new(pool.clone());

        register(&users, &registration("a@x.com", "Ann", "pw123"))
            .await
            .unwrap();
        let err = register(&users, &registration("a@x.com", "Another Ann", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateAccount));

        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        // The original password still works
        authenticate(&users, &credentials("a@x.com", "pw123"))
            .await
            .unwrap();
    }
}
