//! Row model for the `dragon_treasures` table.

use hoard_core::treasure::Treasure;
use hoard_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `dragon_treasures` table.
#[derive(Debug, Clone, FromRow)]
pub struct TreasureRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub value: i32,
    pub cool_factor: i32,
    pub plundered_at: Option<Timestamp>,
    pub is_published: bool,
    pub owned_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TreasureRow> for Treasure {
    fn from(row: TreasureRow) -> Self {
        let mut treasure = Treasure::new(row.name);
        treasure
            .set_description(row.description)
            .set_value(row.value)
            .set_cool_factor(row.cool_factor)
            .set_plundered_at(row.plundered_at)
            .set_is_published(row.is_published)
            .set_owned_by(row.owned_by_id);
        treasure.with_id(row.id)
    }
}
