//! The owning side of the treasure relationship.
//!
//! Only the shape needed to own treasures is modelled here.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, FieldViolation};
use crate::types::{DbId, Timestamp};

/// A user that can own treasures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Input for registering a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
}

impl NewUser {
    /// Fail with [`CoreError::InvalidFields`] if any constraint is violated.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };
        Err(CoreError::InvalidFields(FieldViolation::from_errors(
            &errors,
            attribute_name,
        )))
    }
}

/// User fields are exposed under their attribute names.
fn attribute_name(attribute: &str) -> &str {
    attribute
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn valid_user_passes() {
        let input = NewUser {
            username: "smaug".into(),
            email: "smaug@lonely.mountain".into(),
        };
        assert!(input.ensure_valid().is_ok());
    }

    #[test]
    fn bad_email_and_empty_username_are_reported() {
        let input = NewUser {
            username: String::new(),
            email: "not-an-email".into(),
        };
        assert_matches!(input.ensure_valid(), Err(CoreError::InvalidFields(v)) => {
            let fields: Vec<&str> = v.iter().map(|f| f.field.as_str()).collect();
            assert_eq!(fields, vec!["email", "username"]);
        });
    }
}
