//! `kv_entries` table bootstrap.

use crate::repo::kv_store::{KvError, KvResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build into `PRAGMA user_version`.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_ENTRIES_SQL: &str = include_str!("kv_entries.sql");

/// Creates `kv_entries` on a fresh database; rejects files from newer builds.
pub(super) fn ensure_kv_schema(conn: &mut Connection) -> KvResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if found > KV_SCHEMA_VERSION {
        return Err(KvError::UnsupportedSchema {
            found,
            supported: KV_SCHEMA_VERSION,
        });
    }
    if found == KV_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_ENTRIES_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {KV_SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!("event=kv_schema module=db status=ok from_version={found} to_version={KV_SCHEMA_VERSION}");
    Ok(())
}
