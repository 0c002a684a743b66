//! Process-wide store handle with an explicit connected/disconnected state.
//!
//! # Responsibility
//! - Open the document store once at startup.
//! - Absorb connection failures into a disconnected state.
//! - Hand out collection facades bound to this handle.
//!
//! # Invariants
//! - Construction never fails; a failed open yields a disconnected manager.
//! - A disconnected manager never reconnects.
//! - Facades never reach the store while disconnected.

use crate::db::DbResult;
use crate::facade::{EventFacade, FacadeError, FacadeResult, NoteFacade, TaskFacade};
use crate::store::{DocumentStore, SqliteDocumentStore, StoreResult};
use log::{error, info, warn};
use std::path::Path;

/// Database file used when no path is configured.
pub const DEFAULT_DB_PATH: &str = "digital_assist.sqlite3";

/// Owner of the single store handle used by every facade.
pub struct ConnectionManager<S: DocumentStore = SqliteDocumentStore> {
    store: Option<S>,
    connect_error: Option<String>,
}

impl ConnectionManager<SqliteDocumentStore> {
    /// Opens the SQLite store at `path`.
    ///
    /// Failure is recorded, logged and reported through `connect_error()`.
    pub fn connect(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_open_result(
            SqliteDocumentStore::open(path),
            &path.display().to_string(),
        )
    }

    /// Opens a private in-memory store.
    pub fn in_memory() -> Self {
        Self::from_open_result(SqliteDocumentStore::open_in_memory(), ":memory:")
    }

    fn from_open_result(result: DbResult<SqliteDocumentStore>, target: &str) -> Self {
        match result {
            Ok(store) => {
                info!("event=store_connect module=connection status=ok target={target}");
                Self::from_store(store)
            }
            Err(err) => {
                error!(
                    "event=store_connect module=connection status=error target={target} error={err}"
                );
                Self::disconnected(err.to_string())
            }
        }
    }
}

impl<S: DocumentStore> ConnectionManager<S> {
    /// Wraps an already usable store.
    pub fn from_store(store: S) -> Self {
        Self {
            store: Some(store),
            connect_error: None,
        }
    }

    /// Builds a manager that rejects every operation.
    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self {
            store: None,
            connect_error: Some(reason.into()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    /// Returns why connecting failed, if it did.
    pub fn connect_error(&self) -> Option<&str> {
        self.connect_error.as_deref()
    }

    /// Returns the live store, or `StoreUnavailable` when disconnected.
    pub fn store(&self) -> FacadeResult<&S> {
        match self.store.as_ref() {
            Some(store) => Ok(store),
            None => {
                warn!("event=store_unavailable module=connection status=error");
                Err(FacadeError::StoreUnavailable)
            }
        }
    }

    pub fn tasks(&self) -> TaskFacade<'_, S> {
        TaskFacade::new(self)
    }

    pub fn events(&self) -> EventFacade<'_, S> {
        EventFacade::new(self)
    }

    pub fn notes(&self) -> NoteFacade<'_, S> {
        NoteFacade::new(self)
    }

    /// Releases the store handle, reporting any close failure.
    ///
    /// Closing a disconnected manager is a no-op.
    pub fn close(self) -> StoreResult<()> {
        let Some(store) = self.store else {
            return Ok(());
        };

        match store.close() {
            Ok(()) => {
                info!("event=store_close module=connection status=ok");
                Ok(())
            }
            Err(err) => {
                error!("event=store_close module=connection status=error error={err}");
                Err(err)
            }
        }
    }
}
