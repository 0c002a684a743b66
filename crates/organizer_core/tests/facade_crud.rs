use chrono::NaiveDate;
use organizer_core::{
    Completion, ConnectionManager, DocumentId, FacadeError, NewEvent, NewNote, NewTask,
};
use serde_json::{json, Value};

fn sample_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: format!("{title} details"),
        due_date: NaiveDate::from_ymd_opt(2025, 3, 14),
    }
}

#[test]
fn add_task_then_list_returns_one_more_document_with_supplied_fields() {
    let manager = ConnectionManager::in_memory();
    let tasks = manager.tasks();
    tasks.add(sample_task("existing")).unwrap();
    let before = tasks.list().unwrap().len();

    let id = tasks.add(sample_task("Buy milk")).unwrap();

    let listed = tasks.list().unwrap();
    assert_eq!(listed.len(), before + 1);
    let document = listed.iter().find(|doc| doc.id == id).unwrap();
    assert_eq!(document.get("title"), Some(&json!("Buy milk")));
    assert_eq!(document.get("description"), Some(&json!("Buy milk details")));
    assert_eq!(document.get("dueDate"), Some(&json!("2025-03-14")));
    assert_eq!(document.get("completed"), Some(&json!(false)));
    assert!(document.get("createdAt").and_then(Value::as_str).is_some());
    assert!(document.get("_id").is_none());
    assert_eq!(document.fields.len(), 5);
}

#[test]
fn task_record_round_trips_all_fields() {
    let manager = ConnectionManager::in_memory();
    let tasks = manager.tasks();
    let draft = NewTask {
        title: "  padded title ".to_string(),
        description: String::new(),
        due_date: None,
    };

    let id = tasks.add(draft.clone()).unwrap();
    let record = tasks.get(&id.to_hex()).unwrap();

    assert_eq!(record.id, id);
    assert_eq!(record.entity.title, draft.title);
    assert_eq!(record.entity.description, draft.description);
    assert_eq!(record.entity.due_date, None);
    assert!(!record.entity.completed);

    let document = tasks.list().unwrap().remove(0);
    assert_eq!(document.get("dueDate"), Some(&Value::Null));
}

#[test]
fn complete_sets_flag_and_reports_repeat_as_already_completed() {
    let manager = ConnectionManager::in_memory();
    let tasks = manager.tasks();
    let id = tasks.add(sample_task("Write report")).unwrap().to_hex();

    assert!(!tasks.get(&id).unwrap().entity.completed);

    assert_eq!(tasks.complete(&id).unwrap(), Completion::Completed);
    assert!(tasks.get(&id).unwrap().entity.completed);

    assert_eq!(tasks.complete(&id).unwrap(), Completion::AlreadyCompleted);
    assert!(tasks.get(&id).unwrap().entity.completed);
}

#[test]
fn complete_unknown_task_is_not_found() {
    let manager = ConnectionManager::in_memory();
    let missing = DocumentId::generate();

    let err = manager.tasks().complete(&missing.to_hex()).unwrap_err();
    assert!(matches!(err, FacadeError::NotFound(id) if id == missing));
}

#[test]
fn deleting_twice_succeeds_then_reports_not_found() {
    let manager = ConnectionManager::in_memory();
    let notes = manager.notes();
    let id = notes
        .add(NewNote {
            title: "Groceries".to_string(),
            content: "eggs, flour".to_string(),
        })
        .unwrap();

    notes.delete(&id.to_hex()).unwrap();
    let err = notes.delete(&id.to_hex()).unwrap_err();
    assert!(matches!(err, FacadeError::NotFound(found) if found == id));
    assert!(notes.list().unwrap().is_empty());
}

#[test]
fn malformed_ids_are_rejected_without_touching_documents() {
    let manager = ConnectionManager::in_memory();
    let tasks = manager.tasks();
    tasks.add(sample_task("keep me")).unwrap();

    for bad in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"] {
        assert!(matches!(tasks.complete(bad), Err(FacadeError::InvalidId(_))));
        assert!(matches!(tasks.delete(bad), Err(FacadeError::InvalidId(_))));
        assert!(matches!(tasks.get(bad), Err(FacadeError::InvalidId(_))));
    }

    let remaining = tasks.records().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(!remaining[0].entity.completed);
}

#[test]
fn event_and_note_fields_round_trip() {
    let manager = ConnectionManager::in_memory();

    let event_id = manager
        .events()
        .add(NewEvent {
            title: "Dentist".to_string(),
            description: "checkup".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 2),
        })
        .unwrap();
    let note_id = manager
        .notes()
        .add(NewNote {
            title: "Quote".to_string(),
            content: "stay curious".to_string(),
        })
        .unwrap();

    let events = manager.events().records().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, event_id);
    assert_eq!(events[0].entity.title, "Dentist");
    assert_eq!(events[0].entity.description, "checkup");
    assert_eq!(events[0].entity.date, NaiveDate::from_ymd_opt(2025, 1, 2));

    let notes = manager.notes().records().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note_id);
    assert_eq!(notes[0].entity.content, "stay curious");

    let event_doc = manager.events().list().unwrap().remove(0);
    assert!(event_doc.get("completed").is_none());
    let note_doc = manager.notes().list().unwrap().remove(0);
    assert_eq!(note_doc.fields.len(), 3);
}

#[test]
fn ids_from_one_collection_do_not_resolve_in_another() {
    let manager = ConnectionManager::in_memory();
    let id = manager.tasks().add(sample_task("scoped")).unwrap().to_hex();

    assert!(matches!(
        manager.events().delete(&id),
        Err(FacadeError::NotFound(_))
    ));
    assert!(matches!(
        manager.notes().get(&id),
        Err(FacadeError::NotFound(_))
    ));
    assert_eq!(manager.tasks().list().unwrap().len(), 1);
}

#[test]
fn listing_follows_insertion_order() {
    let manager = ConnectionManager::in_memory();
    let tasks = manager.tasks();
    let ids: Vec<_> = ["c", "a", "b"]
        .into_iter()
        .map(|title| tasks.add(sample_task(title)).unwrap())
        .collect();

    let listed: Vec<_> = tasks.list().unwrap().into_iter().map(|doc| doc.id).collect();
    assert_eq!(listed, ids);
}
