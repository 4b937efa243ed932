use std::path::Path;

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OptionalExtension};
use serde_json::{Map, Value};

/// A stored JSON document. System fields (`_rid`, `_etag`, `_ts`) are added on read.
pub type Document = Map<String, Value>;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS shares (
            rid   INTEGER PRIMARY KEY,
            id    TEXT UNIQUE NOT NULL,
            body  TEXT NOT NULL,
            etag  TEXT NOT NULL,
            ts    INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_shares_ts ON shares(ts);
        ",
    )?;
    Ok(())
}

/// Build and store a new share with a fresh id and no upvotes.
pub fn create_share(conn: &Connection, name: Value, params: Value) -> Result<Document> {
    let mut doc = Document::new();
    doc.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
    doc.insert("name".into(), name);
    doc.insert("params".into(), params);
    doc.insert("upvotes".into(), Value::from(0));
    insert_document(conn, &doc)
}

/// Store `doc` (which must carry a string `id`) and return it as read back.
pub fn insert_document(conn: &Connection, doc: &Document) -> Result<Document> {
    let Some(id) = doc.get("id").and_then(Value::as_str) else {
        bail!("document has no string id");
    };
    let etag = format!("\"{}\"", uuid::Uuid::new_v4());
    let ts = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO shares (id, body, etag, ts) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![id, serde_json::to_string(doc)?, etag, ts],
    )?;
    fetch(conn, id)?.context("inserted document vanished")
}

pub fn fetch(conn: &Connection, id: &str) -> Result<Option<Document>> {
    let row = conn
        .query_row(
            "SELECT rid, body, etag, ts FROM shares WHERE id = ?1",
            [id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )
        .optional()?;
    row.map(|(rid, body, etag, ts)| with_system_fields(rid, &body, etag, ts))
        .transpose()
}

/// Newest first; insertion order breaks ties within the same second.
pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(
        "SELECT rid, body, etag, ts FROM shares ORDER BY ts DESC, rid DESC LIMIT ?1",
    )?;
    let rows = stmt
        .query_map([limit as i64], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<Result<Vec<(i64, String, String, i64)>, _>>()?;
    rows.into_iter()
        .map(|(rid, body, etag, ts)| with_system_fields(rid, &body, etag, ts))
        .collect()
}

/// Returns false when no document has this id.
pub fn delete(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM shares WHERE id = ?1", [id])?;
    Ok(n > 0)
}

fn with_system_fields(rid: i64, body: &str, etag: String, ts: i64) -> Result<Document> {
    let mut doc: Document = serde_json::from_str(body)?;
    doc.insert("_rid".into(), Value::String(rid.to_string()));
    doc.insert("_etag".into(), Value::String(etag));
    doc.insert("_ts".into(), Value::from(ts));
    Ok(doc)
}

/// Drop system fields except the timestamp.
pub fn public_view(doc: Document) -> Document {
    doc.into_iter()
        .filter(|(k, _)| !k.starts_with('_') || k == "_ts")
        .collect()
}
