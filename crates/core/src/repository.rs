//! Persistence seams.
//!
//! Handlers talk to these traits only. `hoard_db` implements them over
//! PostgreSQL and [`crate::memory::MemoryStore`] implements them in process.
//! Both enforce the same store-level rules: a treasure cannot be saved
//! without an existing owner, and a user who still owns treasures cannot be
//! deleted. Violations surface as [`CoreError::Integrity`].

use async_trait::async_trait;

use crate::error::CoreError;
use crate::filter::{Page, TreasureFilter};
use crate::treasure::Treasure;
use crate::types::DbId;
use crate::user::{NewUser, User};

/// Edit applied by [`TreasureRepository::update_with`]: receives the stored
/// treasure and returns the one to write back.
pub type TreasureEdit = Box<dyn FnOnce(Treasure) -> Result<Treasure, CoreError> + Send>;

#[async_trait]
pub trait TreasureRepository: Send + Sync {
    async fn find(&self, id: DbId) -> Result<Option<Treasure>, CoreError>;

    /// One page of treasures matching `filter`, ordered by id.
    async fn list(&self, filter: &TreasureFilter, page: Page)
        -> Result<Vec<Treasure>, CoreError>;

    async fn count(&self, filter: &TreasureFilter) -> Result<i64, CoreError>;

    /// Insert (no id) or update (id set) a treasure, returning the stored row.
    ///
    /// Updating an id that does not exist yields `Ok(None)`.
    async fn save(&self, treasure: Treasure) -> Result<Option<Treasure>, CoreError>;

    /// Read, edit and write back one treasure as a single atomic step.
    ///
    /// Concurrent edits of the same row are serialized, so none is lost. An
    /// error from `edit` leaves the row untouched. Yields `Ok(None)` when no
    /// treasure has this id.
    async fn update_with(
        &self,
        id: DbId,
        edit: TreasureEdit,
    ) -> Result<Option<Treasure>, CoreError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError>;

    async fn find(&self, id: DbId) -> Result<Option<User>, CoreError>;

    /// Returns `true` if a row was removed. Owners of treasures are refused.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}
