// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print orchestrator — resolves what to print, dispatches one document at a
// time, and reports the batch to the audit sink.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use fastprint_core::error::{FastPrintError, Result};
use fastprint_core::types::{BatchPrintOutcome, file_name_of};
use fastprint_document::DocumentScanner;
use fastprint_security::{AuditSink, BatchAuditEntry};

use crate::gateway::PrintHelperGateway;

/// Printer label stored in the audit log when no printer was named.
const DEFAULT_PRINTER_LABEL: &str = "Default";

/// Which documents a print request covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSelection {
    /// Every PDF the scanner finds under the request folder.
    WholeFolder,
    /// A hand-picked list, printed as given without scanning.
    Files(Vec<PathBuf>),
}

impl DocumentSelection {
    /// `None` means the whole folder; an empty list stays an empty list.
    pub fn from_request(selected_files: Option<Vec<String>>) -> Self {
        match selected_files {
            Some(files) => Self::Files(files.into_iter().map(PathBuf::from).collect()),
            None => Self::WholeFolder,
        }
    }
}

/// Drives a [`PrintHelperGateway`] over a batch of documents.
pub struct PrintOrchestrator<G, A> {
    gateway: G,
    audit: Arc<A>,
    scanner: DocumentScanner,
    default_printer: Option<String>,
}

impl<G, A> PrintOrchestrator<G, A>
where
    G: PrintHelperGateway,
    A: AuditSink + 'static,
{
    pub fn new(gateway: G, audit: Arc<A>, default_printer: Option<String>) -> Self {
        Self {
            gateway,
            audit,
            scanner: DocumentScanner::new(),
            default_printer,
        }
    }

    /// Print `documents` strictly one after another, in order.
    ///
    /// Per-document failures are collected into the outcome; this never
    /// fails.  An empty list yields the "nothing to print" outcome.
    #[instrument(skip_all, fields(batch_id = %Uuid::new_v4(), documents = documents.len()))]
    pub async fn print_batch(&self, documents: &[PathBuf], printer: Option<&str>) -> BatchPrintOutcome {
        if documents.is_empty() {
            debug!("empty batch");
            return BatchPrintOutcome::nothing_to_print();
        }

        let mut results = Vec::with_capacity(documents.len());
        for document in documents {
            let result = self.gateway.print_one(document, printer).await;
            debug!(file = %result.file_name, success = result.success, "document dispatched");
            results.push(result);
        }

        let outcome = BatchPrintOutcome::from_results(results);
        info!(
            printed = outcome.succeeded,
            failed = outcome.failed,
            "batch complete"
        );
        outcome
    }

    /// Handle one print request end to end.
    ///
    /// `folder` is the product folder the request names.  It is scanned for
    /// [`DocumentSelection::WholeFolder`] and only used as the audit label
    /// for an explicit file list.  `printer` falls back to the configured
    /// default, then to the system default.
    ///
    /// # Errors
    ///
    /// Only resolution errors (`NotFound` and friends from the scan).  Once
    /// dispatch starts the outcome is always returned.
    #[instrument(skip_all, fields(folder = %folder.display()))]
    pub async fn print_request(
        &self,
        folder: &Path,
        selection: DocumentSelection,
        printer: Option<&str>,
        credential: Option<&str>,
    ) -> Result<BatchPrintOutcome> {
        let documents = match selection {
            DocumentSelection::Files(files) => files,
            DocumentSelection::WholeFolder => {
                let scanner = self.scanner;
                let root = folder.to_path_buf();
                tokio::task::spawn_blocking(move || scanner.scan(&root))
                    .await
                    .map_err(|e| FastPrintError::Server(e.to_string()))??
                    .into_iter()
                    .map(|record| record.absolute_path)
                    .collect()
            }
        };

        if documents.is_empty() {
            return Ok(BatchPrintOutcome::nothing_to_print());
        }

        let printer = printer.or(self.default_printer.as_deref());
        let outcome = self.print_batch(&documents, printer).await;

        if let Some(credential) = credential {
            let entry = BatchAuditEntry {
                label: file_name_of(folder),
                folder: folder.display().to_string(),
                documents: documents.iter().map(|d| d.display().to_string()).collect(),
                printed: outcome.printed_files(),
                printer: printer.unwrap_or(DEFAULT_PRINTER_LABEL).to_owned(),
            };
            self.notify_audit(credential.to_owned(), entry).await;
        }

        Ok(outcome)
    }

    /// Report a finished batch to the audit sink.
    ///
    /// Audit is best-effort: a bad token or an unavailable store is logged
    /// and dropped here, and must never change the outcome the caller gets.
    /// Do not propagate this error.
    async fn notify_audit(&self, credential: String, entry: BatchAuditEntry) {
        let audit = Arc::clone(&self.audit);
        let joined = tokio::task::spawn_blocking(move || audit.record_batch(&credential, &entry)).await;
        match joined {
            Ok(Ok(())) => debug!("batch audited"),
            Ok(Err(e)) => debug!(error = %e, "audit notification dropped"),
            Err(e) => debug!(error = %e, "audit task failed"),
        }
    }
}
