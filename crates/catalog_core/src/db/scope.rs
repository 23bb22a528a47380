//! Explicit write scopes for multi-step write sequences.
//!
//! A check-then-write sequence (uniqueness validation followed by insert,
//! delete guard followed by delete) must observe the same snapshot it
//! writes into. Services wrap those sequences in [`WriteScope::run`].
//!
//! # Invariants
//! - The SQLite scope starts with `BEGIN IMMEDIATE`, taking the reserved
//!   lock before the first read of the sequence.
//! - Commit happens only when the work closure returns `Ok`.
//! - Every other exit path rolls back.
//! - Scopes do not nest: work closures must not open another scope.

use super::DbError;
use log::{debug, error, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Runs a unit of work atomically against the underlying store.
pub trait WriteScope {
    /// Executes `work` inside one transaction.
    ///
    /// `operation` is a static label used only for diagnostics.
    fn run<T, E, F>(&self, operation: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<DbError>;
}

impl<S: WriteScope + ?Sized> WriteScope for &S {
    fn run<T, E, F>(&self, operation: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<DbError>,
    {
        (**self).run(operation, work)
    }
}

/// SQLite write scope sharing the repositories' connection.
#[derive(Clone, Copy)]
pub struct SqliteWriteScope<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWriteScope<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl WriteScope for SqliteWriteScope<'_> {
    fn run<T, E, F>(&self, operation: &'static str, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<DbError>,
    {
        let started_at = Instant::now();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(DbError::from)?;

        match work() {
            Ok(value) => {
                tx.commit().map_err(DbError::from)?;
                debug!(
                    "event=write_scope module=db status=ok op={operation} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!(
                        "event=write_scope module=db status=error op={operation} error_code=rollback_failed error={rollback_err}"
                    );
                } else {
                    warn!(
                        "event=write_scope module=db status=rollback op={operation} duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SqliteWriteScope, WriteScope};
    use crate::db::{open_db_in_memory, DbError};

    fn todo_count(conn: &rusqlite::Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM todos;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn commits_when_work_succeeds() {
        let conn = open_db_in_memory().unwrap();
        let scope = SqliteWriteScope::new(&conn);

        scope
            .run("insert", || -> Result<(), DbError> {
                conn.execute("INSERT INTO todos (description) VALUES ('a');", [])?;
                Ok(())
            })
            .unwrap();

        assert_eq!(todo_count(&conn), 1);
    }

    #[test]
    fn rolls_back_when_work_fails() {
        let conn = open_db_in_memory().unwrap();
        let scope = SqliteWriteScope::new(&conn);

        let result = scope.run("insert_then_fail", || -> Result<(), DbError> {
            conn.execute("INSERT INTO todos (description) VALUES ('a');", [])?;
            conn.execute("INSERT INTO missing_table VALUES (1);", [])?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(todo_count(&conn), 0);
        assert!(conn.is_autocommit());
    }
}
