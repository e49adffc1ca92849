//! Repository for the `dragon_treasures` table.

use async_trait::async_trait;
use hoard_core::error::CoreError;
use hoard_core::filter::{Page, RangeFilter, TreasureFilter};
use hoard_core::repository::{TreasureEdit, TreasureRepository};
use hoard_core::treasure::Treasure;
use hoard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::classify;
use crate::models::treasure::TreasureRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, value, cool_factor, plundered_at, \
                       is_published, owned_by_id, created_at, updated_at";

/// A value bound into a dynamically built `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
enum Bind {
    Text(String),
    Int(i64),
    Bool(bool),
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Accumulates `WHERE` conditions with placeholders numbered from `$1`.
#[derive(Debug, Default)]
struct WhereBuilder {
    conditions: Vec<String>,
    binds: Vec<Bind>,
}

impl WhereBuilder {
    fn push(&mut self, column: &str, op: &str, bind: Bind) {
        self.binds.push(bind);
        self.conditions
            .push(format!("{column} {op} ${}", self.binds.len()));
    }

    fn partial(&mut self, column: &str, needle: Option<&str>) {
        if let Some(needle) = needle {
            self.push(column, "ILIKE", Bind::Text(format!("%{}%", escape_like(needle))));
        }
    }

    fn range(&mut self, column: &str, range: &RangeFilter) {
        for (op, bound) in range.bounds() {
            self.push(column, op, Bind::Int(bound));
        }
    }

    /// The clause (empty when nothing is filtered) and its binds in order.
    fn finish(self) -> (String, Vec<Bind>) {
        let clause = if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        };
        (clause, self.binds)
    }
}

fn where_clause(filter: &TreasureFilter) -> (String, Vec<Bind>) {
    let mut builder = WhereBuilder::default();
    builder.partial("name", filter.name.as_deref());
    builder.partial("description", filter.description.as_deref());
    builder.range("value", &filter.value);
    builder.range("cool_factor", &filter.cool_factor);
    if let Some(published) = filter.is_published {
        builder.push("is_published", "=", Bind::Bool(published));
    }
    if let Some(owner) = filter.owned_by {
        builder.push("owned_by_id", "=", Bind::Int(owner));
    }
    builder.finish()
}

/// Provides CRUD operations for treasures.
#[derive(Debug, Clone)]
pub struct TreasureRepo {
    pool: PgPool,
}

impl TreasureRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, treasure: &Treasure) -> Result<TreasureRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO dragon_treasures
                (name, description, value, cool_factor, plundered_at, is_published, owned_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TreasureRow>(&query)
            .bind(treasure.name())
            .bind(treasure.description())
            .bind(treasure.value())
            .bind(treasure.cool_factor())
            .bind(treasure.plundered_at())
            .bind(treasure.is_published())
            .bind(treasure.owned_by())
            .fetch_one(&self.pool)
            .await
    }

    /// Full-row update on `conn`, which may be a transaction.
    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        treasure: &Treasure,
    ) -> Result<Option<TreasureRow>, sqlx::Error> {
        let query = format!(
            "UPDATE dragon_treasures SET
                name = $2,
                description = $3,
                value = $4,
                cool_factor = $5,
                plundered_at = $6,
                is_published = $7,
                owned_by_id = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TreasureRow>(&query)
            .bind(id)
            .bind(treasure.name())
            .bind(treasure.description())
            .bind(treasure.value())
            .bind(treasure.cool_factor())
            .bind(treasure.plundered_at())
            .bind(treasure.is_published())
            .bind(treasure.owned_by())
            .fetch_optional(conn)
            .await
    }

    async fn update_detached(
        &self,
        id: DbId,
        treasure: &Treasure,
    ) -> Result<Option<TreasureRow>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::update(&mut conn, id, treasure).await
    }
}

#[async_trait]
impl TreasureRepository for TreasureRepo {
    async fn find(&self, id: DbId) -> Result<Option<Treasure>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM dragon_treasures WHERE id = $1");
        let row = sqlx::query_as::<_, TreasureRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Treasure::from))
    }

    async fn list(
        &self,
        filter: &TreasureFilter,
        page: Page,
    ) -> Result<Vec<Treasure>, CoreError> {
        let (where_clause, binds) = where_clause(filter);
        let limit_idx = binds.len() + 1;
        let query = format!(
            "SELECT {COLUMNS} FROM dragon_treasures {where_clause} \
             ORDER BY id ASC \
             LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );

        let mut q = sqlx::query_as::<_, TreasureRow>(&query);
        for bind in binds {
            q = match bind {
                Bind::Text(s) => q.bind(s),
                Bind::Int(n) => q.bind(n),
                Bind::Bool(b) => q.bind(b),
            };
        }
        q = q.bind(page.size).bind(page.offset());

        let rows = q.fetch_all(&self.pool).await.map_err(classify)?;
        tracing::debug!(count = rows.len(), page = page.number, "Listed treasures");
        Ok(rows.into_iter().map(Treasure::from).collect())
    }

    async fn count(&self, filter: &TreasureFilter) -> Result<i64, CoreError> {
        let (where_clause, binds) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM dragon_treasures {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for bind in binds {
            q = match bind {
                Bind::Text(s) => q.bind(s),
                Bind::Int(n) => q.bind(n),
                Bind::Bool(b) => q.bind(b),
            };
        }
        q.fetch_one(&self.pool).await.map_err(classify)
    }

    async fn save(&self, treasure: Treasure) -> Result<Option<Treasure>, CoreError> {
        let row = match treasure.id() {
            None => Some(self.insert(&treasure).await),
            Some(id) => self.update_detached(id, &treasure).await.transpose(),
        };
        match row {
            Some(Ok(row)) => Ok(Some(Treasure::from(row))),
            Some(Err(err)) => Err(classify(err)),
            None => Ok(None),
        }
    }

    async fn update_with(
        &self,
        id: DbId,
        edit: TreasureEdit,
    ) -> Result<Option<Treasure>, CoreError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        // The row lock holds off other writers until commit.
        let query = format!("SELECT {COLUMNS} FROM dragon_treasures WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, TreasureRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(classify)?;
        let Some(current) = current else {
            return Ok(None);
        };

        // Dropping `tx` on an error path rolls back.
        let edited = edit(Treasure::from(current))?;
        let row = Self::update(&mut tx, id, &edited)
            .await
            .map_err(classify)?;
        tx.commit().await.map_err(classify)?;

        tracing::debug!(treasure_id = id, "Updated treasure under row lock");
        Ok(row.map(Treasure::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM dragon_treasures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }
}
