//! Generic collection facade parameterized by entity kind.
//!
//! # Invariants
//! - `add` stamps `createdAt` at call time.
//! - `delete` succeeds only when exactly one document was removed.
//! - Completing an already completed task is a success (`AlreadyCompleted`).

use crate::connection::ConnectionManager;
use crate::facade::{Completion, FacadeError, FacadeResult};
use crate::model::document::{Document, DocumentId};
use crate::model::entity::{Entity, Record, Task};
use crate::store::DocumentStore;
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use std::marker::PhantomData;

/// Facade over the collection that stores entities of kind `E`.
pub struct CollectionFacade<'m, S: DocumentStore, E: Entity> {
    manager: &'m ConnectionManager<S>,
    _entity: PhantomData<E>,
}

impl<'m, S: DocumentStore, E: Entity> CollectionFacade<'m, S, E> {
    pub fn new(manager: &'m ConnectionManager<S>) -> Self {
        Self {
            manager,
            _entity: PhantomData,
        }
    }

    /// Inserts a new document built from `draft` and returns its id.
    pub fn add(&self, draft: E::Draft) -> FacadeResult<DocumentId> {
        let store = self.manager.store()?;
        let fields = E::from_draft(draft, Utc::now()).to_fields()?;

        let id = store
            .insert_one(E::COLLECTION, &fields)
            .inspect_err(|err| self.log_failure("add", err))?;

        info!(
            "event=facade_add module=facade status=ok collection={} id={id}",
            E::COLLECTION
        );
        Ok(id)
    }

    /// Returns every document of the collection in store-native order.
    pub fn list(&self) -> FacadeResult<Vec<Document>> {
        let store = self.manager.store()?;
        let documents = store
            .find_all(E::COLLECTION)
            .inspect_err(|err| self.log_failure("list", err))?;
        Ok(documents)
    }

    /// Returns every document decoded as `E`.
    pub fn records(&self) -> FacadeResult<Vec<Record<E>>> {
        self.list()?
            .iter()
            .map(|document| Record::from_document(document).map_err(FacadeError::from))
            .collect()
    }

    /// Looks up one document by id.
    pub fn get(&self, id: &str) -> FacadeResult<Record<E>> {
        let store = self.manager.store()?;
        let id = DocumentId::parse(id)?;

        let document = store
            .find_one(E::COLLECTION, id)
            .inspect_err(|err| self.log_failure("get", err))?
            .ok_or(FacadeError::NotFound(id))?;
        Ok(Record::from_document(&document)?)
    }

    /// Removes one document by id.
    pub fn delete(&self, id: &str) -> FacadeResult<()> {
        let store = self.manager.store()?;
        let id = DocumentId::parse(id)?;

        let removed = store
            .delete_one(E::COLLECTION, id)
            .inspect_err(|err| self.log_failure("delete", err))?;
        if removed != 1 {
            warn!(
                "event=facade_delete module=facade status=error collection={} id={id} removed={removed}",
                E::COLLECTION
            );
            return Err(FacadeError::NotFound(id));
        }

        info!(
            "event=facade_delete module=facade status=ok collection={} id={id}",
            E::COLLECTION
        );
        Ok(())
    }

    fn log_failure(&self, operation: &str, err: &impl std::fmt::Display) {
        warn!(
            "event=facade_{operation} module=facade status=error collection={} error={err}",
            E::COLLECTION
        );
    }
}

impl<S: DocumentStore> CollectionFacade<'_, S, Task> {
    /// Marks one task as completed.
    pub fn complete(&self, id: &str) -> FacadeResult<Completion> {
        let store = self.manager.store()?;
        let id = DocumentId::parse(id)?;

        let outcome = store
            .set_field(Task::COLLECTION, id, "completed", Value::Bool(true))
            .inspect_err(|err| self.log_failure("complete", err))?;

        if outcome.matched == 0 {
            warn!("event=facade_complete module=facade status=error id={id} matched=0");
            return Err(FacadeError::NotFound(id));
        }

        info!(
            "event=facade_complete module=facade status=ok id={id} modified={}",
            outcome.modified
        );
        if outcome.modified > 0 {
            Ok(Completion::Completed)
        } else {
            Ok(Completion::AlreadyCompleted)
        }
    }
}
