pub mod treasures;
pub mod users;
