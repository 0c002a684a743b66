//! Collection facades over the document store.
//!
//! # Responsibility
//! - Expose add/list/get/delete per collection, plus task completion.
//! - Translate store outcomes into caller-facing error kinds.
//!
//! # Invariants
//! - Every operation checks the connection before touching the store.
//! - No validation beyond id parsing; the store decides what it accepts.

use crate::model::document::{DocumentId, InvalidDocumentId};
use crate::model::entity::{Event, ModelError, Note, Task};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection;

pub use collection::CollectionFacade;

pub type TaskFacade<'m, S> = CollectionFacade<'m, S, Task>;
pub type EventFacade<'m, S> = CollectionFacade<'m, S, Event>;
pub type NoteFacade<'m, S> = CollectionFacade<'m, S, Note>;

pub type FacadeResult<T> = Result<T, FacadeError>;

/// Failure kinds surfaced by facade operations.
#[derive(Debug)]
pub enum FacadeError {
    /// Caller-supplied id text is not a document id.
    InvalidId(String),
    /// No document with this id exists in the collection.
    NotFound(DocumentId),
    /// The store could not be opened at startup.
    StoreUnavailable,
    /// The store rejected or failed the operation.
    Store(StoreError),
    /// A stored document could not be decoded into its entity.
    Model(ModelError),
}

impl Display for FacadeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid id `{value}`"),
            Self::NotFound(id) => write!(f, "no document with id {id}"),
            Self::StoreUnavailable => write!(f, "document store is not connected"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FacadeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FacadeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ModelError> for FacadeError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<InvalidDocumentId> for FacadeError {
    fn from(value: InvalidDocumentId) -> Self {
        Self::InvalidId(value.0)
    }
}

/// Successful outcome of completing a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The task flipped from open to completed.
    Completed,
    /// The task was already completed; nothing changed.
    AlreadyCompleted,
}
