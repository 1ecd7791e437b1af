use lazytodo_core::db::{open_db, open_db_in_memory, KV_SCHEMA_VERSION};
use lazytodo_core::{KeyValueStore, KvError, SqliteKvStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), KV_SCHEMA_VERSION);
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn values_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazytodo.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::new(&conn);
        store.set("labels", r#"["Work"]"#).unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), KV_SCHEMA_VERSION);
    let store = SqliteKvStore::new(&conn);
    assert_eq!(store.get("labels").unwrap().as_deref(), Some(r#"["Work"]"#));
    assert_eq!(store.get("todos").unwrap(), None);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        KvError::UnsupportedSchema { found, supported } => {
            assert_eq!(found, 42);
            assert_eq!(supported, KV_SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reopening_current_schema_keeps_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("again.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();

    assert_eq!(schema_version(&conn), KV_SCHEMA_VERSION);
    assert_table_exists(&conn, "kv_entries");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
