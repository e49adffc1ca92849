//! The Treasure resource model.
//!
//! Setters never validate. Constraints are declared on the struct and
//! evaluated by [`Treasure::violations`] / [`Treasure::ensure_valid`] at the
//! write boundary, before anything reaches a store.

use std::borrow::Cow;

use chrono::Utc;
use validator::{Validate, ValidationError};

use crate::error::{CoreError, FieldViolation};
use crate::humanize::relative_phrase;
use crate::profile::wire_name;
use crate::types::{DbId, Timestamp};

/// Number of characters kept by [`Treasure::short_description`].
pub const SHORT_DESCRIPTION_CHARS: usize = 40;

/// Appended to a truncated short description.
pub const ELLIPSIS: char = '\u{2026}';

/// Markup substituted for newlines on the text-description write path.
pub const LINE_BREAK: &str = "<br />";

pub const COOL_FACTOR_MAX: i32 = 10;

/// A rare and valuable treasure.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Treasure {
    id: Option<DbId>,

    #[validate(
        custom(function = "not_blank"),
        length(min = 2, max = 50, message = "Describe your loot in 2 to 50 characters")
    )]
    name: String,

    #[validate(custom(function = "not_blank"))]
    description: String,

    /// Estimated value in gold coins.
    #[validate(range(min = 0, message = "Value cannot be negative"))]
    value: i32,

    #[validate(range(min = 0, max = 10, message = "Cool factor must be between 0 and 10"))]
    cool_factor: i32,

    plundered_at: Option<Timestamp>,

    is_published: bool,

    #[validate(required(message = "A treasure must have an owner"))]
    owned_by: Option<DbId>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This value should not be blank")));
    }
    Ok(())
}

impl Default for Treasure {
    fn default() -> Self {
        Self::new("")
    }
}

impl Treasure {
    /// Build an unsaved treasure with defaults: no value, no cool factor,
    /// plundered now, unpublished, no owner.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            value: 0,
            cool_factor: 0,
            plundered_at: Some(Utc::now()),
            is_published: false,
            owned_by: None,
        }
    }

    /// Attach the identity assigned by a store.
    pub fn with_id(mut self, id: DbId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn cool_factor(&self) -> i32 {
        self.cool_factor
    }

    pub fn plundered_at(&self) -> Option<Timestamp> {
        self.plundered_at
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn owned_by(&self) -> Option<DbId> {
        self.owned_by
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Store `description` verbatim.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Store `text` with every newline replaced by [`LINE_BREAK`].
    ///
    /// This is the path taken by API writes. It is one-way: reads never
    /// turn the markup back into newlines.
    pub fn set_text_description(&mut self, text: &str) -> &mut Self {
        self.description = newlines_to_breaks(text);
        self
    }

    pub fn set_value(&mut self, value: i32) -> &mut Self {
        self.value = value;
        self
    }

    pub fn set_cool_factor(&mut self, cool_factor: i32) -> &mut Self {
        self.cool_factor = cool_factor;
        self
    }

    pub fn set_plundered_at(&mut self, plundered_at: Option<Timestamp>) -> &mut Self {
        self.plundered_at = plundered_at;
        self
    }

    pub fn set_is_published(&mut self, is_published: bool) -> &mut Self {
        self.is_published = is_published;
        self
    }

    pub fn set_owned_by(&mut self, owner_id: DbId) -> &mut Self {
        self.owned_by = Some(owner_id);
        self
    }

    /// The description cut to [`SHORT_DESCRIPTION_CHARS`] characters, with
    /// [`ELLIPSIS`] appended when anything was cut.
    pub fn short_description(&self) -> String {
        match self.description.char_indices().nth(SHORT_DESCRIPTION_CHARS) {
            Some((cut, _)) => {
                let mut short = self.description[..cut].to_string();
                short.push(ELLIPSIS);
                short
            }
            None => self.description.clone(),
        }
    }

    /// Human-relative rendering of `plundered_at` as seen from `now`.
    pub fn plundered_ago(&self, now: Timestamp) -> Option<String> {
        self.plundered_at.map(|at| relative_phrase(at, now))
    }

    /// Every constraint violation, keyed by wire field name.
    ///
    /// Sorted by field and rule so callers get a stable list.
    pub fn violations(&self) -> Vec<FieldViolation> {
        let Err(errors) = self.validate() else {
            return Vec::new();
        };

        FieldViolation::from_errors(&errors, wire_name)
    }

    /// Fail with [`CoreError::InvalidFields`] if any constraint is violated.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(violations))
        }
    }
}

/// Replace `\r\n`, `\n\r`, `\n` and `\r` with [`LINE_BREAK`].
pub fn newlines_to_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                let pair = if c == '\r' { '\n' } else { '\r' };
                if chars.peek() == Some(&pair) {
                    chars.next();
                }
                out.push_str(LINE_BREAK);
            }
            other => out.push(other),
        }
    }
    out
}
