//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope; collections add a
//! `meta` block describing the page that was returned.

use hoard_core::filter::Page;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Position of a page within a collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub items_per_page: i64,
    pub total_items: i64,
}

/// `{ "data": [...], "meta": {...} }` envelope for paginated collections.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, page: Page, total_items: i64) -> Self {
        Self {
            data,
            meta: PageMeta {
                page: page.number,
                items_per_page: page.size,
                total_items,
            },
        }
    }
}
