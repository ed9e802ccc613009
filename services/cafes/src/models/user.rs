//! User model and related functionality

use serde::Serialize;
use sqlx::FromRow;

/// User entity
///
/// `password` holds the Argon2 PHC string, never the plaintext.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
