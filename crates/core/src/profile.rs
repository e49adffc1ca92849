//! Field-visibility profiles and filter declarations for the Treasure resource.
//!
//! The table below is the single place that says which fields flow in on
//! writes, which flow out on reads, and which ones the collection endpoint
//! can filter on. Serialization and query code consult it instead of
//! re-declaring the lists.

/// A named field-visibility profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Outbound serialization (`treasure:read`).
    Read,
    /// Inbound deserialization (`treasure:write`).
    Write,
}

/// How a write-profile field reaches the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePath {
    /// Plain setter.
    Setter,
    /// Newline-to-markup transform (`set_text_description`).
    TextDescription,
}

/// Filter strategy declared for the collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive substring match.
    Partial,
    /// `gt` / `gte` / `lt` / `lte` bounds.
    Range,
    /// Exact boolean equality.
    Boolean,
}

/// Metadata for one field of the resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Name used on the wire.
    pub name: &'static str,
    /// Name of the Rust attribute (used to translate validator output).
    pub attribute: &'static str,
    /// Backing column, `None` for derived fields.
    pub column: Option<&'static str>,
    pub readable: bool,
    pub write: Option<WritePath>,
    pub filter: Option<FilterKind>,
}

impl FieldSpec {
    pub fn in_profile(&self, profile: Profile) -> bool {
        match profile {
            Profile::Read => self.readable,
            Profile::Write => self.write.is_some(),
        }
    }
}

pub const TREASURE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "id",
        attribute: "id",
        column: Some("id"),
        readable: true,
        write: None,
        filter: None,
    },
    FieldSpec {
        name: "name",
        attribute: "name",
        column: Some("name"),
        readable: true,
        write: Some(WritePath::Setter),
        filter: Some(FilterKind::Partial),
    },
    FieldSpec {
        name: "description",
        attribute: "description",
        column: Some("description"),
        readable: false,
        write: Some(WritePath::TextDescription),
        filter: Some(FilterKind::Partial),
    },
    FieldSpec {
        name: "shortDescription",
        attribute: "short_description",
        column: None,
        readable: true,
        write: None,
        filter: None,
    },
    FieldSpec {
        name: "value",
        attribute: "value",
        column: Some("value"),
        readable: true,
        write: Some(WritePath::Setter),
        filter: Some(FilterKind::Range),
    },
    FieldSpec {
        name: "coolFactor",
        attribute: "cool_factor",
        column: Some("cool_factor"),
        readable: true,
        write: Some(WritePath::Setter),
        filter: Some(FilterKind::Range),
    },
    FieldSpec {
        name: "plunderedAt",
        attribute: "plundered_at",
        column: Some("plundered_at"),
        readable: false,
        write: None,
        filter: None,
    },
    FieldSpec {
        name: "plunderedAgo",
        attribute: "plundered_ago",
        column: None,
        readable: true,
        write: None,
        filter: None,
    },
    FieldSpec {
        name: "isPublished",
        attribute: "is_published",
        column: Some("is_published"),
        readable: true,
        write: None,
        filter: Some(FilterKind::Boolean),
    },
    FieldSpec {
        name: "ownedBy",
        attribute: "owned_by",
        column: Some("owned_by_id"),
        readable: true,
        write: Some(WritePath::Setter),
        filter: None,
    },
];

/// Look up a field by its wire name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    TREASURE_FIELDS.iter().find(|f| f.name == name)
}

/// Wire names of every field in `profile`, in declaration order.
pub fn fields_in(profile: Profile) -> Vec<&'static str> {
    TREASURE_FIELDS
        .iter()
        .filter(|f| f.in_profile(profile))
        .map(|f| f.name)
        .collect()
}

/// Translate a Rust attribute name into its wire name.
///
/// Unknown attributes are returned unchanged.
pub fn wire_name(attribute: &str) -> &str {
    TREASURE_FIELDS
        .iter()
        .find(|f| f.attribute == attribute)
        .map_or(attribute, |f| f.name)
}

/// Parse a comma-separated `properties` selector into read-profile names.
///
/// Names outside the read profile are dropped. Returns `None` when nothing
/// usable was requested, meaning "emit the full read profile".
pub fn select_properties(selector: &str) -> Option<Vec<&'static str>> {
    let selected: Vec<&'static str> = selector
        .split(',')
        .map(str::trim)
        .filter_map(field)
        .filter(|f| f.readable)
        .map(|f| f.name)
        .collect();

    if selected.is_empty() {
        None
    } else {
        Some(selected)
    }
}
