// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Audit sink — where a finished print batch is reported.
//
// The orchestrator calls the sink after every authenticated batch and
// discards the result.  Implementations should still report failures
// honestly through `Result`; deciding to ignore them is the caller's job.

use std::path::PathBuf;

use tracing::{debug, instrument};

use fastprint_core::error::Result;

use crate::print_log::PrintLog;
use crate::session::SessionVerifier;

/// What gets recorded for one print batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAuditEntry {
    /// Product label, the final component of the requested folder.
    pub label: String,
    /// Folder as given by the caller.
    pub folder: String,
    /// Every document the batch tried to print.
    pub documents: Vec<String>,
    /// File names that printed, in batch order.
    pub printed: Vec<String>,
    /// Printer name, or "Default" for the system default.
    pub printer: String,
}

/// Destination for print-batch audit records.
pub trait AuditSink: Send + Sync {
    /// Record `entry` on behalf of whoever `credential` identifies.
    fn record_batch(&self, credential: &str, entry: &BatchAuditEntry) -> Result<()>;
}

/// Verifies the session token, then appends to the SQLite print log.
///
/// A fresh connection is opened and dropped for every batch; the sink holds
/// no connection between requests.
#[derive(Debug, Clone)]
pub struct SqliteAuditSink {
    verifier: SessionVerifier,
    db_path: PathBuf,
}

impl SqliteAuditSink {
    pub fn new(verifier: SessionVerifier, db_path: impl Into<PathBuf>) -> Self {
        Self {
            verifier,
            db_path: db_path.into(),
        }
    }
}

impl AuditSink for SqliteAuditSink {
    #[instrument(skip_all, fields(product = %entry.label))]
    fn record_batch(&self, credential: &str, entry: &BatchAuditEntry) -> Result<()> {
        let who = self.verifier.verify(credential)?;
        PrintLog::open(&self.db_path)?.record(&who, entry)?;
        debug!(user_id = who.user_id, printed = entry.printed.len(), "batch audited");
        Ok(())
    }
}
