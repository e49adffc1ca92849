//! In-process arena store.
//!
//! Rows live in `Vec<Option<_>>` slots indexed by `id - 1`. Deleted rows leave
//! an empty slot, so identifiers are never reused. The store applies the same
//! integrity rules as the PostgreSQL schema (NOT NULL owner, owner foreign
//! key, restrict on owner delete, unique email).

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::filter::{Page, TreasureFilter};
use crate::repository::{TreasureEdit, TreasureRepository, UserRepository};
use crate::treasure::Treasure;
use crate::types::DbId;
use crate::user::{NewUser, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<Option<User>>,
    treasures: Vec<Option<Treasure>>,
}

fn slot(id: DbId) -> Option<usize> {
    usize::try_from(id).ok()?.checked_sub(1)
}

fn next_id(len: usize) -> DbId {
    // Arena length always fits: ids are assigned from it.
    DbId::try_from(len).unwrap_or(DbId::MAX - 1) + 1
}

impl Tables {
    fn user(&self, id: DbId) -> Option<&User> {
        slot(id).and_then(|i| self.users.get(i)).and_then(Option::as_ref)
    }

    fn treasure_slot(&mut self, id: DbId) -> Option<&mut Option<Treasure>> {
        slot(id).and_then(|i| self.treasures.get_mut(i))
    }

    fn matching<'a>(&'a self, filter: &'a TreasureFilter) -> impl Iterator<Item = &'a Treasure> {
        self.treasures
            .iter()
            .flatten()
            .filter(move |t| filter.matches(t))
    }

    fn stored_treasure(&self, id: DbId) -> Option<&Treasure> {
        slot(id)
            .and_then(|i| self.treasures.get(i))
            .and_then(Option::as_ref)
    }

    /// Overwrite an existing row after the owner check.
    fn replace_treasure(&mut self, id: DbId, treasure: Treasure) -> Result<Treasure, CoreError> {
        self.check_owner(&treasure)?;
        if let Some(row) = self.treasure_slot(id) {
            *row = Some(treasure.clone());
        }
        Ok(treasure)
    }

    fn check_owner(&self, treasure: &Treasure) -> Result<(), CoreError> {
        let owner = treasure.owned_by().ok_or_else(|| {
            CoreError::Integrity("owned_by_id must not be null".to_string())
        })?;
        if self.user(owner).is_none() {
            return Err(CoreError::Integrity(format!(
                "owned_by_id {owner} does not reference an existing user"
            )));
        }
        Ok(())
    }
}

/// Arena-backed implementation of both repository traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TreasureRepository for MemoryStore {
    async fn find(&self, id: DbId) -> Result<Option<Treasure>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.stored_treasure(id).cloned())
    }

    async fn list(
        &self,
        filter: &TreasureFilter,
        page: Page,
    ) -> Result<Vec<Treasure>, CoreError> {
        let tables = self.tables.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.size).unwrap_or(0);
        Ok(tables
            .matching(filter)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &TreasureFilter) -> Result<i64, CoreError> {
        let tables = self.tables.read().await;
        let count = tables.matching(filter).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn save(&self, treasure: Treasure) -> Result<Option<Treasure>, CoreError> {
        let mut tables = self.tables.write().await;

        let Some(id) = treasure.id() else {
            tables.check_owner(&treasure)?;
            let id = next_id(tables.treasures.len());
            let stored = treasure.with_id(id);
            tables.treasures.push(Some(stored.clone()));
            tracing::debug!(treasure_id = id, "Inserted treasure into memory store");
            return Ok(Some(stored));
        };

        if tables.stored_treasure(id).is_none() {
            return Ok(None);
        }
        tables.replace_treasure(id, treasure).map(Some)
    }

    async fn update_with(
        &self,
        id: DbId,
        edit: TreasureEdit,
    ) -> Result<Option<Treasure>, CoreError> {
        // The write guard spans read, edit and write.
        let mut tables = self.tables.write().await;
        let Some(current) = tables.stored_treasure(id).cloned() else {
            return Ok(None);
        };
        let edited = edit(current)?.with_id(id);
        tables.replace_treasure(id, edited).map(Some)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .treasure_slot(id)
            .and_then(Option::take)
            .is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .flatten()
            .any(|u| u.email == input.email)
        {
            return Err(CoreError::Conflict(format!(
                "A user with email {} already exists",
                input.email
            )));
        }

        let user = User {
            id: next_id(tables.users.len()),
            username: input.username.clone(),
            email: input.email.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(Some(user.clone()));
        Ok(user)
    }

    async fn find(&self, id: DbId) -> Result<Option<User>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.user(id).cloned())
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .treasures
            .iter()
            .flatten()
            .any(|t| t.owned_by() == Some(id))
        {
            return Err(CoreError::Integrity(format!(
                "user {id} still owns treasures"
            )));
        }
        Ok(slot(id)
            .and_then(|i| tables.users.get_mut(i))
            .and_then(Option::take)
            .is_some())
    }
}
