// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FastPrint Security — who printed what.
//
// Session tokens are issued elsewhere; this crate only verifies them.  The
// print log is an append-only SQLite table written once per batch through
// the `AuditSink` seam, which the print orchestrator treats as best-effort.

pub mod audit;
pub mod print_log;
pub mod session;

pub use audit::{AuditSink, BatchAuditEntry, SqliteAuditSink};
pub use print_log::{PrintLog, PrintLogEntry};
pub use session::{SessionClaims, SessionVerifier};
