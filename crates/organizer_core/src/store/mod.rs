//! Document store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow set of collection operations the facades need.
//! - Isolate SQL details from the facade layer.
//!
//! # Invariants
//! - Store ids are assigned on insert and never reused.
//! - `find_all` yields documents in store-native (insertion) order.

use crate::db::DbError;
use crate::model::document::{Collection, Document, DocumentId};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_store;

pub use sqlite_store::SqliteDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport or decoding failure inside the store.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "document encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted document data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Result of a single-document field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents matching the id (0 or 1).
    pub matched: u64,
    /// Documents whose stored value actually changed (0 or 1).
    pub modified: u64,
}

/// Collection-level document operations.
pub trait DocumentStore {
    fn insert_one(
        &self,
        collection: Collection,
        fields: &Map<String, Value>,
    ) -> StoreResult<DocumentId>;
    fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>>;
    fn find_one(&self, collection: Collection, id: DocumentId) -> StoreResult<Option<Document>>;
    fn set_field(
        &self,
        collection: Collection,
        id: DocumentId,
        key: &str,
        value: Value,
    ) -> StoreResult<UpdateOutcome>;
    fn delete_one(&self, collection: Collection, id: DocumentId) -> StoreResult<u64>;

    /// Releases the underlying handle.
    fn close(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}
