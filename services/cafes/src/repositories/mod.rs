//! Repositories for database operations

pub mod cafe;
pub mod user;

pub use cafe::CafeRepository;
pub use user::UserRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use common::database::{DatabaseConfig, init_pool};
    use sqlx::SqlitePool;

    /// Fresh in-memory database with the schema applied
    pub async fn memory_pool() -> SqlitePool {
        let pool = init_pool(&DatabaseConfig::new("sqlite::memory:", 1))
            .await
            .expect("in-memory pool");
        crate::database::init_schema(&pool)
            .await
            .expect("schema");
        pool
    }
}
