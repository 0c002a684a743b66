//! Document, identifier and collection types.
//!
//! # Invariants
//! - `DocumentId` always renders as 32 lowercase hex characters.
//! - The id lives beside the field map, never inside it.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const DOCUMENT_ID_HEX_LEN: usize = 32;

/// Store-assigned opaque identifier of one document within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a hex-encoded identifier.
    ///
    /// Surrounding whitespace is ignored; anything other than exactly 32 hex
    /// digits is rejected.
    pub fn parse(value: &str) -> Result<Self, InvalidDocumentId> {
        let trimmed = value.trim();
        if trimmed.len() != DOCUMENT_ID_HEX_LEN
            || !trimmed.bytes().all(|byte| byte.is_ascii_hexdigit())
        {
            return Err(InvalidDocumentId(trimmed.to_string()));
        }

        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| InvalidDocumentId(trimmed.to_string()))
    }

    /// Returns the canonical lowercase hex form.
    pub fn to_hex(&self) -> String {
        self.0.simple().to_string()
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rejected identifier text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDocumentId(pub String);

impl Display for InvalidDocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid document id `{}`", self.0)
    }
}

impl Error for InvalidDocumentId {}

/// Fixed set of collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tasks,
    Events,
    Notes,
}

impl Collection {
    /// Stable collection name used as the storage key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Events => "events",
            Self::Notes => "notes",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One schemaless record: an id plus arbitrary JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: DocumentId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Returns one field value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, DocumentId};

    #[test]
    fn generated_id_renders_as_fixed_length_lowercase_hex() {
        let id = DocumentId::generate();
        let hex = id.to_hex();
        assert_eq!(hex.len(), 32);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(hex, id.to_string());
    }

    #[test]
    fn parse_accepts_canonical_form_and_normalizes_case() {
        let id = DocumentId::generate();
        let upper = format!("  {}\n", id.to_hex().to_ascii_uppercase());
        assert_eq!(DocumentId::parse(&upper).unwrap(), id);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in [
            "",
            "not-an-id",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "0123456789abcdef0123456789abcdeg",
            "01234567-89ab-cdef-0123-456789abcdef",
        ] {
            assert!(DocumentId::parse(bad).is_err(), "`{bad}` should be rejected");
        }
    }

    #[test]
    fn collection_names_are_stable() {
        assert_eq!(Collection::Tasks.name(), "tasks");
        assert_eq!(Collection::Events.name(), "events");
        assert_eq!(Collection::Notes.to_string(), "notes");
    }
}
