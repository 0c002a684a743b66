//! Core of the digital assist organizer.
//! Stores tasks, events and notes as documents and exposes per-collection
//! facades over a single store handle.

pub mod connection;
pub mod db;
pub mod facade;
pub mod logging;
pub mod model;
pub mod store;

pub use connection::{ConnectionManager, DEFAULT_DB_PATH};
pub use facade::{
    CollectionFacade, Completion, EventFacade, FacadeError, FacadeResult, NoteFacade, TaskFacade,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::document::{Collection, Document, DocumentId, InvalidDocumentId};
pub use model::entity::{
    Entity, Event, ModelError, NewEvent, NewNote, NewTask, Note, Record, Task,
};
pub use store::{DocumentStore, SqliteDocumentStore, StoreError, StoreResult, UpdateOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
