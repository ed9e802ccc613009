//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::{
    middleware::AdminList,
    repositories::{CafeRepository, UserRepository},
    session::SessionService,
    settings::Settings,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub user_repository: UserRepository,
    pub cafe_repository: CafeRepository,
    pub session_service: SessionService,
    pub admins: AdminList,
}

impl AppState {
    /// Wire repositories and services around an open pool
    pub fn new(pool: SqlitePool, settings: &Settings) -> Self {
        AppState {
            user_repository: UserRepository::new(pool.clone()),
            cafe_repository: CafeRepository::new(pool.clone()),
            session_service: SessionService::new(
                &settings.session_secret,
                settings.session_expiry_seconds,
            ),
            admins: AdminList::new(settings.admin_ids.clone()),
            db_pool: pool,
        }
    }
}
