//! Typed task/event/note projections over stored documents.
//!
//! # Responsibility
//! - Map drafts from callers into document fields.
//! - Decode stored documents back into typed records.
//!
//! # Invariants
//! - Field keys are camelCase (`dueDate`, `createdAt`).
//! - Absent optional dates are written as explicit `null`, never dropped.
//! - `completed` is the only default a task receives (`false`).

use crate::model::document::{Collection, Document, DocumentId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ModelResult<T> = Result<T, ModelError>;

/// Mapping failure between entities and documents.
#[derive(Debug)]
pub enum ModelError {
    Serialization(serde_json::Error),
    NotAnObject,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialization(err) => write!(f, "document mapping failed: {err}"),
            Self::NotAnObject => write!(f, "entity did not serialize to a document object"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::NotAnObject => None,
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// One kind of document stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned {
    /// Collection holding documents of this kind.
    const COLLECTION: Collection;

    /// Caller-supplied fields for a new document.
    type Draft;

    /// Builds the entity written on insert.
    fn from_draft(draft: Self::Draft, created_at: DateTime<Utc>) -> Self;

    /// Serializes the entity into document fields.
    fn to_fields(&self) -> ModelResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Err(ModelError::NotAnObject),
        }
    }

    /// Decodes document fields into the entity.
    fn from_fields(fields: &Map<String, Value>) -> ModelResult<Self> {
        Ok(serde_json::from_value(Value::Object(fields.clone()))?)
    }
}

/// Decoded entity paired with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<E> {
    pub id: DocumentId,
    pub entity: E,
}

impl<E: Entity> Record<E> {
    pub fn from_document(document: &Document) -> ModelResult<Self> {
        Ok(Self {
            id: document.id,
            entity: E::from_fields(&document.fields)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl Entity for Task {
    const COLLECTION: Collection = Collection::Tasks;
    type Draft = NewTask;

    fn from_draft(draft: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            completed: false,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Input for a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
}

impl Entity for Event {
    const COLLECTION: Collection = Collection::Events;
    type Draft = NewEvent;

    fn from_draft(draft: NewEvent, created_at: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            date: draft.date,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for a new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl Entity for Note {
    const COLLECTION: Collection = Collection::Notes;
    type Draft = NewNote;

    fn from_draft(draft: NewNote, created_at: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            content: draft.content,
            created_at,
        }
    }
}
