//! Collection query model: filters and pagination.
//!
//! Both stores interpret these the same way: partial text filters are
//! case-insensitive substring matches, range bounds are inclusive for
//! `gte`/`lte` and exclusive for `gt`/`lt`, and results come back in id order.

use crate::treasure::Treasure;
use crate::types::DbId;

/// Default page size for collection endpoints.
pub const ITEMS_PER_PAGE: i64 = 10;

/// Upper bound on a caller-supplied page size.
pub const MAX_ITEMS_PER_PAGE: i64 = 100;

/// Numeric range bounds. Unset bounds are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeFilter {
    pub gt: Option<i64>,
    pub gte: Option<i64>,
    pub lt: Option<i64>,
    pub lte: Option<i64>,
}

impl RangeFilter {
    pub fn contains(&self, value: i64) -> bool {
        self.gt.map_or(true, |b| value > b)
            && self.gte.map_or(true, |b| value >= b)
            && self.lt.map_or(true, |b| value < b)
            && self.lte.map_or(true, |b| value <= b)
    }

    /// `(operator, bound)` pairs for every set bound, in a fixed order.
    pub fn bounds(&self) -> Vec<(&'static str, i64)> {
        [
            (">", self.gt),
            (">=", self.gte),
            ("<", self.lt),
            ("<=", self.lte),
        ]
        .into_iter()
        .filter_map(|(op, bound)| bound.map(|b| (op, b)))
        .collect()
    }
}

/// Filters accepted by the treasure collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreasureFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: RangeFilter,
    pub cool_factor: RangeFilter,
    pub is_published: Option<bool>,
    pub owned_by: Option<DbId>,
}

impl TreasureFilter {
    /// Evaluate the filter against an in-memory treasure.
    pub fn matches(&self, treasure: &Treasure) -> bool {
        partial_match(self.name.as_deref(), treasure.name())
            && partial_match(self.description.as_deref(), treasure.description())
            && self.value.contains(i64::from(treasure.value()))
            && self.cool_factor.contains(i64::from(treasure.cool_factor()))
            && self.is_published.map_or(true, |p| treasure.is_published() == p)
            && self.owned_by.map_or(true, |o| treasure.owned_by() == Some(o))
    }
}

fn partial_match(needle: Option<&str>, haystack: &str) -> bool {
    match needle {
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
        None => true,
    }
}

/// A 1-based page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    /// Build a page from caller input, clamping both values into range.
    pub fn new(number: Option<i64>, size: i64) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
            size: size.clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, ITEMS_PER_PAGE)
    }
}
