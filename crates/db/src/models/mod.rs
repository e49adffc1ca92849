//! Row structs mirroring the database tables.
//!
//! Each submodule holds a `FromRow` struct and its conversion into the
//! `hoard_core` entity.

pub mod treasure;
pub mod user;
