//! Repository for the `users` table.

use async_trait::async_trait;
use hoard_core::error::CoreError;
use hoard_core::repository::UserRepository;
use hoard_core::types::DbId;
use hoard_core::user::{NewUser, User};
use sqlx::PgPool;

use crate::error::classify;
use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, created_at, updated_at";

/// Provides create / read / delete for users.
#[derive(Debug, Clone)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepo {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let query = format!(
            "INSERT INTO users (username, email)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;
        Ok(User::from(row))
    }

    async fn find(&self, id: DbId) -> Result<Option<User>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(User::from))
    }

    /// The owner foreign key is `ON DELETE RESTRICT`, so deleting a user who
    /// still owns treasures fails with an integrity error.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }
}
