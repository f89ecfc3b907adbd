// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print helper abstraction.

use std::future::Future;
use std::path::Path;

use fastprint_core::types::PrintJobResult;

/// Prints a single document.
///
/// Every outcome, failures included, comes back as a `PrintJobResult`; an
/// implementation never aborts the caller's batch.
pub trait PrintHelperGateway: Send + Sync {
    /// Print `document` on `printer`, or on the system default when `None`.
    fn print_one(
        &self,
        document: &Path,
        printer: Option<&str>,
    ) -> impl Future<Output = PrintJobResult> + Send;
}
