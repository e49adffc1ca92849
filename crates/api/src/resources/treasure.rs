//! Wire representations of a treasure.
//!
//! [`TreasureWrite`] is the write profile: the only fields a client can set.
//! [`TreasureRead`] is the read profile: the only fields a client ever sees.
//! Any other key in a request body is ignored.

use hoard_core::error::CoreError;
use hoard_core::treasure::Treasure;
use hoard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::{parse_user_iri, user_iri};

/// Reference to the owning user: an IRI (`/api/v1/users/7`) or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(DbId),
    Iri(String),
}

impl OwnerRef {
    pub fn resolve(&self) -> Result<DbId, CoreError> {
        match self {
            OwnerRef::Id(id) => Ok(*id),
            OwnerRef::Iri(iri) => parse_user_iri(iri).ok_or_else(|| {
                CoreError::Validation(format!("Invalid owner reference '{iri}'"))
            }),
        }
    }
}

/// Inbound body of create, full-update and partial-update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasureWrite {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<i32>,
    pub cool_factor: Option<i32>,
    pub owned_by: Option<OwnerRef>,
}

impl TreasureWrite {
    /// Copy every present field onto `treasure`.
    ///
    /// `description` goes through the newline-to-markup transform.
    pub fn apply(&self, treasure: &mut Treasure) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            treasure.set_name(name.as_str());
        }
        if let Some(description) = &self.description {
            treasure.set_text_description(description);
        }
        if let Some(value) = self.value {
            treasure.set_value(value);
        }
        if let Some(cool_factor) = self.cool_factor {
            treasure.set_cool_factor(cool_factor);
        }
        if let Some(owner) = &self.owned_by {
            treasure.set_owned_by(owner.resolve()?);
        }
        Ok(())
    }

    /// A new, unsaved treasure built from this body.
    pub fn create(&self) -> Result<Treasure, CoreError> {
        let mut treasure = Treasure::default();
        self.apply(&mut treasure)?;
        Ok(treasure)
    }

    /// Full replacement of `existing`: writable fields absent from the body
    /// fall back to their defaults. Identity, plunder time and publication
    /// state are carried over.
    pub fn replace(&self, existing: &Treasure) -> Result<Treasure, CoreError> {
        let mut treasure = Treasure::default();
        treasure
            .set_plundered_at(existing.plundered_at())
            .set_is_published(existing.is_published());
        if let Some(id) = existing.id() {
            treasure = treasure.with_id(id);
        }
        self.apply(&mut treasure)?;
        Ok(treasure)
    }
}

/// Outbound representation of a treasure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasureRead {
    pub id: Option<DbId>,
    pub name: String,
    pub short_description: String,
    pub value: i32,
    pub cool_factor: i32,
    pub plundered_ago: Option<String>,
    pub is_published: bool,
    pub owned_by: Option<String>,
}

impl TreasureRead {
    pub fn new(treasure: &Treasure, now: Timestamp) -> Self {
        Self {
            id: treasure.id(),
            name: treasure.name().to_string(),
            short_description: treasure.short_description(),
            value: treasure.value(),
            cool_factor: treasure.cool_factor(),
            plundered_ago: treasure.plundered_ago(now),
            is_published: treasure.is_published(),
            owned_by: treasure.owned_by().map(user_iri),
        }
    }

    /// Serialize, keeping only `properties` when a selection was requested.
    pub fn render(&self, properties: Option<&[&str]>) -> Value {
        let Ok(Value::Object(fields)) = serde_json::to_value(self) else {
            return Value::Null;
        };
        match properties {
            None => Value::Object(fields),
            Some(selected) => Value::Object(
                fields
                    .into_iter()
                    .filter(|(key, _)| selected.contains(&key.as_str()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}
