//! Request and response bodies, shaped per field-visibility profile.

pub mod treasure;
pub mod user;
