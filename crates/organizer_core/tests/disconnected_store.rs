use organizer_core::{
    Collection, ConnectionManager, Document, DocumentId, DocumentStore, FacadeError, NewEvent,
    NewNote, NewTask, StoreError, StoreResult, UpdateOutcome,
};
use serde_json::{Map, Value};
use std::cell::Cell;

/// Store double that counts calls and fails every one of them.
#[derive(Default)]
struct CountingStore {
    calls: Cell<usize>,
}

impl CountingStore {
    fn record(&self) -> StoreError {
        self.calls.set(self.calls.get() + 1);
        StoreError::InvalidData("counting store".to_string())
    }
}

impl DocumentStore for CountingStore {
    fn insert_one(&self, _: Collection, _: &Map<String, Value>) -> StoreResult<DocumentId> {
        Err(self.record())
    }

    fn find_all(&self, _: Collection) -> StoreResult<Vec<Document>> {
        Err(self.record())
    }

    fn find_one(&self, _: Collection, _: DocumentId) -> StoreResult<Option<Document>> {
        Err(self.record())
    }

    fn set_field(
        &self,
        _: Collection,
        _: DocumentId,
        _: &str,
        _: Value,
    ) -> StoreResult<UpdateOutcome> {
        Err(self.record())
    }

    fn delete_one(&self, _: Collection, _: DocumentId) -> StoreResult<u64> {
        Err(self.record())
    }

    fn close(self) -> StoreResult<()> {
        Err(StoreError::InvalidData("close failed".to_string()))
    }
}

fn assert_unavailable<T: std::fmt::Debug>(result: Result<T, FacadeError>) {
    assert!(
        matches!(result, Err(FacadeError::StoreUnavailable)),
        "expected StoreUnavailable, got {result:?}"
    );
}

#[test]
fn every_operation_fails_fast_when_disconnected() {
    let manager = ConnectionManager::<CountingStore>::disconnected("store offline");
    let valid_id = DocumentId::generate().to_hex();

    assert!(!manager.is_connected());
    assert_eq!(manager.connect_error(), Some("store offline"));

    assert_unavailable(manager.tasks().add(NewTask {
        title: "t".to_string(),
        description: "d".to_string(),
        due_date: None,
    }));
    assert_unavailable(manager.tasks().list());
    assert_unavailable(manager.tasks().records());
    assert_unavailable(manager.tasks().complete(&valid_id));
    assert_unavailable(manager.tasks().delete(&valid_id));
    assert_unavailable(manager.events().add(NewEvent {
        title: "e".to_string(),
        description: "d".to_string(),
        date: None,
    }));
    assert_unavailable(manager.events().list());
    assert_unavailable(manager.events().delete(&valid_id));
    assert_unavailable(manager.notes().add(NewNote {
        title: "n".to_string(),
        content: "c".to_string(),
    }));
    assert_unavailable(manager.notes().list());
    assert_unavailable(manager.notes().get(&valid_id));
    assert_unavailable(manager.notes().delete(&valid_id));
}

#[test]
fn connection_check_runs_before_id_parsing() {
    let manager = ConnectionManager::<CountingStore>::disconnected("store offline");

    assert_unavailable(manager.tasks().complete("not-an-id"));
    assert_unavailable(manager.notes().delete("not-an-id"));
}

#[test]
fn connected_store_failures_surface_as_store_errors() {
    let manager = ConnectionManager::from_store(CountingStore::default());
    let valid_id = DocumentId::generate().to_hex();

    assert!(matches!(manager.tasks().list(), Err(FacadeError::Store(_))));
    assert!(matches!(
        manager.tasks().complete(&valid_id),
        Err(FacadeError::Store(_))
    ));
    assert!(matches!(
        manager.events().delete(&valid_id),
        Err(FacadeError::Store(_))
    ));

    let calls = manager.store().unwrap().calls.get();
    assert_eq!(calls, 3);
}

#[test]
fn invalid_ids_never_reach_the_store() {
    let manager = ConnectionManager::from_store(CountingStore::default());

    assert!(matches!(
        manager.tasks().delete("xyz"),
        Err(FacadeError::InvalidId(_))
    ));
    assert!(matches!(
        manager.tasks().complete("xyz"),
        Err(FacadeError::InvalidId(_))
    ));
    assert_eq!(manager.store().unwrap().calls.get(), 0);
}

#[test]
fn close_surfaces_store_close_failures() {
    let manager = ConnectionManager::from_store(CountingStore::default());

    let err = manager.close().unwrap_err();
    assert!(err.to_string().contains("close failed"));
}

#[test]
fn closing_a_disconnected_manager_is_a_no_op() {
    let manager = ConnectionManager::<CountingStore>::disconnected("store offline");

    manager.close().unwrap();
}
