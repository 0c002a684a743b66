//! Document-centric domain model for tasks, events and notes.
//!
//! # Responsibility
//! - Define the schemaless document shape shared by all collections.
//! - Define the typed entity projections decoded from those documents.
//!
//! # Invariants
//! - Every document is identified by a store-assigned `DocumentId`.
//! - Entities never reference each other.

pub mod document;
pub mod entity;
