//! Cafe directory models

pub mod cafe;
pub mod user;

// Re-export for convenience
pub use cafe::{Cafe, CafeFields};
pub use user::{NewUser, User};
