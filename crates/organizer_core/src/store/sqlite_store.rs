//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist schemaless JSON documents grouped by collection name.
//! - Assign document ids on insert.
//!
//! # Invariants
//! - `(collection, id)` is unique.
//! - Document bodies are always JSON objects without the id key.
//! - Scan order follows the `seq` insertion sequence.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::document::{Collection, Document, DocumentId};
use crate::store::{DocumentStore, StoreError, StoreResult, UpdateOutcome};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use std::path::Path;

const DOCUMENT_SELECT_SQL: &str = "SELECT id, body FROM documents";

/// Document store over a single migrated SQLite connection.
pub struct SqliteDocumentStore {
    conn: Connection,
}

impl SqliteDocumentStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn read_body(&self, collection: Collection, id: DocumentId) -> StoreResult<Option<String>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2;",
                params![collection.name(), id.to_hex()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(body)
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn insert_one(
        &self,
        collection: Collection,
        fields: &Map<String, Value>,
    ) -> StoreResult<DocumentId> {
        let id = DocumentId::generate();
        let body = serde_json::to_string(fields)?;

        let result = self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![collection.name(), id.to_hex(), body],
        );
        if let Err(err) = result {
            error!(
                "event=doc_insert module=store status=error collection={collection} error={err}"
            );
            return Err(err.into());
        }

        debug!("event=doc_insert module=store status=ok collection={collection} id={id}");
        Ok(id)
    }

    fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DOCUMENT_SELECT_SQL} WHERE collection = ?1 ORDER BY seq ASC;"
        ))?;
        let mut rows = stmt.query([collection.name()])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }

        debug!(
            "event=doc_find_all module=store status=ok collection={collection} count={}",
            documents.len()
        );
        Ok(documents)
    }

    fn find_one(&self, collection: Collection, id: DocumentId) -> StoreResult<Option<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DOCUMENT_SELECT_SQL} WHERE collection = ?1 AND id = ?2;"
        ))?;
        let mut rows = stmt.query(params![collection.name(), id.to_hex()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }

        Ok(None)
    }

    fn set_field(
        &self,
        collection: Collection,
        id: DocumentId,
        key: &str,
        value: Value,
    ) -> StoreResult<UpdateOutcome> {
        let tx = self.conn.unchecked_transaction()?;

        let Some(body) = self.read_body(collection, id)? else {
            debug!(
                "event=doc_update module=store status=ok collection={collection} id={id} matched=0 modified=0"
            );
            return Ok(UpdateOutcome::default());
        };

        let mut fields = parse_body(&body)?;
        if fields.get(key) == Some(&value) {
            debug!(
                "event=doc_update module=store status=ok collection={collection} id={id} matched=1 modified=0"
            );
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        }

        fields.insert(key.to_string(), value);
        tx.execute(
            "UPDATE documents SET body = ?1 WHERE collection = ?2 AND id = ?3;",
            params![serde_json::to_string(&fields)?, collection.name(), id.to_hex()],
        )?;
        tx.commit()?;

        debug!(
            "event=doc_update module=store status=ok collection={collection} id={id} matched=1 modified=1"
        );
        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }

    fn delete_one(&self, collection: Collection, id: DocumentId) -> StoreResult<u64> {
        let removed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![collection.name(), id.to_hex()],
        )?;

        debug!(
            "event=doc_delete module=store status=ok collection={collection} id={id} removed={removed}"
        );
        Ok(removed as u64)
    }

    fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, err)| StoreError::from(err))
    }
}

fn parse_document_row(row: &Row<'_>) -> StoreResult<Document> {
    let id_text: String = row.get("id")?;
    let id = DocumentId::parse(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid id value `{id_text}` in documents.id"))
    })?;

    let body: String = row.get("body")?;
    Ok(Document::new(id, parse_body(&body)?))
}

fn parse_body(body: &str) -> StoreResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidData(format!(
            "document body must be an object, found `{other}`"
        ))),
    }
}
