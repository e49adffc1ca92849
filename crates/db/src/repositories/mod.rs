//! sqlx implementations of the `hoard_core` repository traits.

pub mod treasure_repo;
pub mod user_repo;

pub use treasure_repo::TreasureRepo;
pub use user_repo::UserRepo;
