//! Schema steps for the local storage file.
//!
//! # Invariants
//! - `STEPS` is ordered by strictly increasing version.
//! - Each step runs in its own transaction together with its
//!   `user_version` bump, so a failed step leaves the previous version intact.

use crate::db::{DbError, DbResult};
use log::{debug, info, warn};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "local_storage",
    sql: include_str!("0001_local_storage.sql"),
}];

/// Newest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Version recorded in the open file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Runs every step newer than the file's recorded version.
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build; nothing runs.
/// - `Migration` for the first failing step.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        warn!(
            "event=db_migrate module=db status=error error_code=schema_too_new found={found} supported={supported}"
        );
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let mut applied = 0usize;
    for step in STEPS.iter().filter(|step| step.version > found) {
        run_step(conn, step).map_err(|source| DbError::Migration {
            version: step.version,
            source,
        })?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
        applied += 1;
    }

    if applied > 0 {
        info!(
            "event=db_migrate module=db status=ok from_version={found} to_version={supported} steps={applied}"
        );
    }
    Ok(())
}

fn run_step(conn: &mut Connection, step: &SchemaStep) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, schema_version, STEPS};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn steps_are_strictly_increasing() {
        assert!(STEPS.windows(2).all(|pair| pair[0].version < pair[1].version));
        assert_eq!(latest_version(), 1);
    }

    #[test]
    fn fresh_file_reaches_latest_and_rerun_is_noop() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), latest_version());

        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES ('user', '{}');",
            [],
        )
        .unwrap();
        apply_migrations(&mut conn).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM local_storage;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn newer_file_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", 99).unwrap();

        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            DbError::SchemaTooNew {
                found: 99,
                supported: 1
            }
        ));
        assert_eq!(err.code(), "schema_too_new");
    }
}
