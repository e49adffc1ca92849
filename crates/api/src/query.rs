//! Query-string parameter types for API handlers.
//!
//! Bracketed filter keys (`value[gte]=10`) arrive either literally or
//! percent-encoded (`value%5Bgte%5D=10`); both decode to the same field.

use hoard_core::filter::{Page, RangeFilter, TreasureFilter};
use hoard_core::profile;
use serde::Deserialize;

/// `?page=&properties=` accepted by every treasure collection.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub properties: Option<String>,
}

/// `?properties=name,value` on single-resource reads.
#[derive(Debug, Default, Deserialize)]
pub struct PropertiesParams {
    pub properties: Option<String>,
}

/// Parse a `properties` selector into read-profile field names.
pub fn selected_properties(properties: Option<&str>) -> Option<Vec<&'static str>> {
    properties.and_then(profile::select_properties)
}

/// Filters and pagination for `GET /treasures`.
#[derive(Debug, Default, Deserialize)]
pub struct TreasureListParams {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "value[gt]")]
    pub value_gt: Option<i64>,
    #[serde(rename = "value[gte]")]
    pub value_gte: Option<i64>,
    #[serde(rename = "value[lt]")]
    pub value_lt: Option<i64>,
    #[serde(rename = "value[lte]")]
    pub value_lte: Option<i64>,
    #[serde(rename = "coolFactor[gt]")]
    pub cool_factor_gt: Option<i64>,
    #[serde(rename = "coolFactor[gte]")]
    pub cool_factor_gte: Option<i64>,
    #[serde(rename = "coolFactor[lt]")]
    pub cool_factor_lt: Option<i64>,
    #[serde(rename = "coolFactor[lte]")]
    pub cool_factor_lte: Option<i64>,
    #[serde(rename = "isPublished")]
    pub is_published: Option<bool>,
    pub page: Option<i64>,
    pub properties: Option<String>,
}

impl TreasureListParams {
    pub fn filter(&self) -> TreasureFilter {
        TreasureFilter {
            name: non_empty(self.name.as_deref()),
            description: non_empty(self.description.as_deref()),
            value: RangeFilter {
                gt: self.value_gt,
                gte: self.value_gte,
                lt: self.value_lt,
                lte: self.value_lte,
            },
            cool_factor: RangeFilter {
                gt: self.cool_factor_gt,
                gte: self.cool_factor_gte,
                lt: self.cool_factor_lt,
                lte: self.cool_factor_lte,
            },
            is_published: self.is_published,
            owned_by: None,
        }
    }

    pub fn page(&self, items_per_page: i64) -> Page {
        Page::new(self.page, items_per_page)
    }
}

/// An empty partial filter (`?name=`) matches everything, so drop it.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
