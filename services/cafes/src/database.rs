//! Database bootstrap for the cafe directory
//!
//! Only initial table creation is performed; there are no migrations.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

const CREATE_CAFE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cafe (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(250) NOT NULL UNIQUE,
        map_url VARCHAR(500) NOT NULL,
        img_url VARCHAR(500) NOT NULL,
        location VARCHAR(250) NOT NULL,
        seats VARCHAR(250) NOT NULL,
        has_toilet BOOLEAN NOT NULL,
        has_wifi BOOLEAN NOT NULL,
        has_sockets BOOLEAN NOT NULL,
        can_take_calls BOOLEAN NOT NULL,
        coffee_price VARCHAR(250)
    )
"#;

const CREATE_USER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "user" (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email VARCHAR(250) NOT NULL UNIQUE,
        password VARCHAR(250) NOT NULL,
        name VARCHAR(250) NOT NULL
    )
"#;

/// Create the `cafe` and `user` tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> DatabaseResult<()> {
    for statement in [CREATE_CAFE_TABLE, CREATE_USER_TABLE] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    }

    info!("Database schema ready");
    Ok(())
}
