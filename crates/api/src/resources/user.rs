use hoard_core::types::{DbId, Timestamp};
use hoard_core::user::User;
use serde::Serialize;

/// Collection path of the user resource, also the prefix of user IRIs.
pub const USERS_PATH: &str = "/api/v1/users";

/// IRI identifying one user, e.g. `/api/v1/users/7`.
pub fn user_iri(id: DbId) -> String {
    format!("{USERS_PATH}/{id}")
}

/// Extract the user id from an IRI. A bare numeric string is accepted too.
pub fn parse_user_iri(iri: &str) -> Option<DbId> {
    let id = match iri.strip_prefix(USERS_PATH) {
        Some(rest) => rest.strip_prefix('/')?,
        None => iri,
    };
    id.parse().ok().filter(|id| *id > 0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRead {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    /// Link to the treasures this user owns.
    pub treasures: String,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            treasures: format!("{}/treasures", user_iri(user.id)),
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
