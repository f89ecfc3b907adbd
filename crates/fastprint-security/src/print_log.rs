// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print log — append-only SQLite record of every authenticated print batch.
//
// Schema:
//   print_log(
//     id         INTEGER PRIMARY KEY AUTOINCREMENT,
//     timestamp  TEXT    NOT NULL,   -- RFC 3339
//     user_id    INTEGER NOT NULL,
//     user_name  TEXT    NOT NULL,
//     product    TEXT    NOT NULL,   -- label derived from the folder name
//     folder     TEXT    NOT NULL,
//     files      TEXT    NOT NULL,   -- printed file names, JSON array
//     quantity   INTEGER NOT NULL,   -- number of printed files
//     requested  INTEGER NOT NULL,   -- number of documents in the batch
//     printer    TEXT    NOT NULL
//   )

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use fastprint_core::error::{FastPrintError, Result};

use crate::audit::BatchAuditEntry;
use crate::session::SessionClaims;

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS print_log (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp  TEXT    NOT NULL,
        user_id    INTEGER NOT NULL,
        user_name  TEXT    NOT NULL,
        product    TEXT    NOT NULL,
        folder     TEXT    NOT NULL,
        files      TEXT    NOT NULL,
        quantity   INTEGER NOT NULL,
        requested  INTEGER NOT NULL,
        printer    TEXT    NOT NULL
    );";

fn db_err(e: rusqlite::Error) -> FastPrintError {
    FastPrintError::Database(e.to_string())
}

/// A stored print-log row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintLogEntry {
    pub id: i64,
    pub timestamp: String,
    pub user_id: i64,
    pub user_name: String,
    pub product: String,
    pub folder: String,
    pub files: Vec<String>,
    pub quantity: i64,
    pub requested: i64,
    pub printer: String,
}

/// Append-only print log backed by a SQLite database.
pub struct PrintLog {
    conn: Connection,
}

impl PrintLog {
    /// Open (or create) the print log at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;
        debug!("print log opened");
        Ok(Self { conn })
    }

    /// Open an in-memory print log (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;
        Ok(Self { conn })
    }

    /// Append one batch on behalf of `who`.
    #[instrument(skip_all, fields(user_id = who.user_id, product = %entry.label))]
    pub fn record(&self, who: &SessionClaims, entry: &BatchAuditEntry) -> Result<()> {
        let files = serde_json::to_string(&entry.printed)?;
        self.conn
            .execute(
                "INSERT INTO print_log
                     (timestamp, user_id, user_name, product, folder, files, quantity, requested, printer)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    Utc::now().to_rfc3339(),
                    who.user_id,
                    who.name,
                    entry.label,
                    entry.folder,
                    files,
                    entry.printed.len() as i64,
                    entry.documents.len() as i64,
                    entry.printer,
                ],
            )
            .map_err(db_err)?;
        debug!("print log entry recorded");
        Ok(())
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<PrintLogEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, user_id, user_name, product, folder, files, quantity, requested, printer
                 FROM print_log
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit], |row| {
                let files: String = row.get(6)?;
                let entry = PrintLogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    user_id: row.get(2)?,
                    user_name: row.get(3)?,
                    product: row.get(4)?,
                    folder: row.get(5)?,
                    files: Vec::new(),
                    quantity: row.get(7)?,
                    requested: row.get(8)?,
                    printer: row.get(9)?,
                };
                Ok((entry, files))
            })
            .map_err(db_err)?;

        let mut entries = Vec::new();
        for row in rows {
            let (mut entry, files) = row.map_err(db_err)?;
            entry.files = serde_json::from_str(&files).map_err(|e| {
                FastPrintError::Database(format!("print log row {}: bad files column: {e}", entry.id))
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    #[cfg(test)]
    fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM print_log", [], |row| row.get(0))
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn who() -> SessionClaims {
        SessionClaims {
            user_id: 3,
            username: "jsouza".into(),
            name: "João Souza".into(),
            exp: 0,
        }
    }

    fn entry(label: &str, printed: &[&str]) -> BatchAuditEntry {
        BatchAuditEntry {
            label: label.into(),
            folder: format!("/catalog/{label}"),
            documents: vec!["/catalog/a.pdf".into(), "/catalog/b.pdf".into()],
            printed: printed.iter().map(|s| s.to_string()).collect(),
            printer: "Default".into(),
        }
    }

    #[test]
    fn record_and_count() {
        let log = PrintLog::open_in_memory().unwrap();
        assert_eq!(log.count().unwrap(), 0);
        log.record(&who(), &entry("MESA", &["a.pdf"])).unwrap();
        log.record(&who(), &entry("CADEIRA", &["a.pdf", "b.pdf"])).unwrap();
        assert_eq!(log.count().unwrap(), 2);
    }

    #[test]
    fn recent_is_newest_first_with_fields() {
        let log = PrintLog::open_in_memory().unwrap();
        log.record(&who(), &entry("MESA", &["a.pdf"])).unwrap();
        log.record(&who(), &entry("CADEIRA", &["a.pdf", "b.pdf"])).unwrap();

        let recent = log.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].product, "CADEIRA");
        assert_eq!(recent[0].files, vec!["a.pdf", "b.pdf"]);
        assert_eq!(recent[0].quantity, 2);
        assert_eq!(recent[0].requested, 2);
        assert_eq!(recent[0].user_name, "João Souza");
        assert!(recent[0].id > recent[1].id);
    }

    #[test]
    fn empty_printed_list_round_trips_as_empty() {
        let log = PrintLog::open_in_memory().unwrap();
        log.record(&who(), &entry("MESA", &[])).unwrap();
        let recent = log.recent(1).unwrap();
        assert!(recent[0].files.is_empty());
        assert_eq!(recent[0].quantity, 0);
    }

    #[test]
    fn file_names_with_commas_survive() {
        let log = PrintLog::open_in_memory().unwrap();
        log.record(&who(), &entry("MESA", &["CHAPA 1,5MM.pdf", "b.pdf"])).unwrap();

        let recent = log.recent(1).unwrap();
        assert_eq!(recent[0].files, vec!["CHAPA 1,5MM.pdf", "b.pdf"]);
        assert_eq!(recent[0].files.len() as i64, recent[0].quantity);
    }

    #[test]
    fn file_backed_log_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fastprint.db");
        PrintLog::open(&path)
            .unwrap()
            .record(&who(), &entry("MESA", &["a.pdf"]))
            .unwrap();
        assert_eq!(PrintLog::open(&path).unwrap().count().unwrap(), 1);
    }
}
