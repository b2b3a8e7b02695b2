//! Roles, stored profile records, and the canonical embedding text.
//!
//! - [`Role`] decides which table and similarity procedure a request uses.
//! - [`normalize`] builds the deterministic text that gets embedded and shown to
//!   the re-ranker.
//! - [`fields`] resolves identifier/score fields from loosely shaped JSON.

pub mod fields;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use normalize::{build_embedding_text, format_attribute};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Role-scoped attribute map of a stored profile (one row, column → value).
pub type Attributes = Map<String, Value>;

/// Columns never carried into a [`Profile`]; the raw vector is large and useless downstream.
const DROPPED_COLUMNS: &[&str] = &["embedding"];

const ORGANIZER_SCHEMA: &[&str] = &[
    "organization_name",
    "event_name",
    "event_type",
    "country",
    "city",
    "industries",
    "topics",
    "target_audience",
    "audience_size",
    "event_format",
    "languages",
    "budget_range",
    "event_description",
];

const SPEAKER_SCHEMA: &[&str] = &[
    "full_name",
    "headline",
    "country",
    "city",
    "industries",
    "topics",
    "expertise",
    "years_experience",
    "speaking_formats",
    "languages",
    "audience_types",
    "fee_range",
    "bio",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role '{0}': expected 'organizer' or 'speaker'")]
pub struct UnknownRole(pub String);

/// Which side of the marketplace a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Organizer,
    Speaker,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Organizer => "organizer",
            Role::Speaker => "speaker",
        }
    }

    /// The role on the other side of a match.
    pub fn opposite(self) -> Role {
        match self {
            Role::Organizer => Role::Speaker,
            Role::Speaker => Role::Organizer,
        }
    }

    /// Profile table holding records of this role.
    pub fn table(self) -> &'static str {
        match self {
            Role::Organizer => "organizers",
            Role::Speaker => "speakers",
        }
    }

    /// Similarity procedure a caller of this role runs (it searches the opposite store).
    pub fn match_procedure(self) -> &'static str {
        match self {
            Role::Organizer => "match_speakers",
            Role::Speaker => "match_organizers",
        }
    }

    /// Ordered attribute keys that make up this role's embedding text.
    pub fn attribute_schema(self) -> &'static [&'static str] {
        match self {
            Role::Organizer => ORGANIZER_SCHEMA,
            Role::Speaker => SPEAKER_SCHEMA,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organizer" => Ok(Role::Organizer),
            "speaker" => Ok(Role::Speaker),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A stored profile record, requester or candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Profile {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        let mut attributes = attributes;
        for column in DROPPED_COLUMNS {
            attributes.remove(*column);
        }
        let id = id.into();
        attributes.remove("id");
        Self { id, attributes }
    }

    /// Builds a profile from a store row; `None` when the row has no usable `id`.
    pub fn from_row(row: Value) -> Option<Self> {
        let Value::Object(attributes) = row else {
            return None;
        };
        let id = fields::resolve_id(&attributes, &["id"])?;
        Some(Self::new(id, attributes))
    }

    /// Canonical summary of this profile under `role`'s schema, without a prompt.
    pub fn summary(&self, role: Role) -> String {
        build_embedding_text(&self.attributes, role.attribute_schema(), "")
    }
}
