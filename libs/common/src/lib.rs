//! Shared storage plumbing for the cafes workspace
//!
//! Opens the SQLite pool and classifies database failures so services can
//! tell a duplicate row apart from a broken connection.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("sqlite:cafes.db?mode=rwc", 5);
//!     let pool = init_pool(&config).await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
