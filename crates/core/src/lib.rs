//! Domain layer for the treasure service.
//!
//! Holds the resource model and everything that can be decided without a
//! database: validation, field-visibility profiles, collection filters, the
//! repository seams and an in-memory store implementing them.

pub mod error;
pub mod filter;
pub mod humanize;
pub mod memory;
pub mod profile;
pub mod repository;
pub mod treasure;
pub mod types;
pub mod user;
