//! Cafe repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Cafe, CafeFields};

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

/// Cafe repository
#[derive(Clone)]
pub struct CafeRepository {
    pool: SqlitePool,
}

impl CafeRepository {
    /// Create a new cafe repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new cafe
    ///
    /// Fails with `DatabaseError::UniqueViolation` when the name is taken.
    pub async fn create(&self, fields: &CafeFields) -> DatabaseResult<Cafe> {
        info!("Creating new cafe: {}", fields.name);

        let sql = format!(
            r#"
            INSERT INTO cafe (name, map_url, img_url, location, seats,
                              has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {CAFE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Cafe>(&sql)
            .bind(&fields.name)
            .bind(&fields.map_url)
            .bind(&fields.img_url)
            .bind(&fields.location)
            .bind(&fields.seats)
            .bind(fields.has_toilet)
            .bind(fields.has_wifi)
            .bind(fields.has_sockets)
            .bind(fields.can_take_calls)
            .bind(&fields.coffee_price)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    /// Get a cafe by ID
    pub async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<Cafe>> {
        let sql = format!("SELECT {CAFE_COLUMNS} FROM cafe WHERE id = ?");

        sqlx::query_as::<_, Cafe>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    /// Get every cafe in insertion order
    pub async fn get_all(&self) -> DatabaseResult<Vec<Cafe>> {
        let sql = format!("SELECT {CAFE_COLUMNS} FROM cafe ORDER BY id");

        sqlx::query_as::<_, Cafe>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    /// Overwrite every mutable column of a cafe
    ///
    /// Returns `None` when no cafe has the given ID.
    pub async fn update(&self, id: i64, fields: &CafeFields) -> DatabaseResult<Option<Cafe>> {
        info!("Updating cafe {}", id);

        let sql = format!(
            r#"
            UPDATE cafe
            SET name = ?, map_url = ?, img_url = ?, location = ?, seats = ?,
                has_toilet = ?, has_wifi = ?, has_sockets = ?, can_take_calls = ?,
                coffee_price = ?
            WHERE id = ?
            RETURNING {CAFE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Cafe>(&sql)
            .bind(&fields.name)
            .bind(&fields.map_url)
            .bind(&fields.img_url)
            .bind(&fields.location)
            .bind(&fields.seats)
            .bind(fields.has_toilet)
            .bind(fields.has_wifi)
            .bind(fields.has_sockets)
            .bind(fields.can_take_calls)
            .bind(&fields.coffee_price)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    /// Delete a cafe by ID
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Deleting cafe {}", id);

        let result = sqlx::query("DELETE FROM cafe WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(result.rows_affected() > 0)
    }
}
