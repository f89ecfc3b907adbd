// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — builds every backend component from the
// configuration and exposes one async method per HTTP operation.
//
// Scanning, searching and browsing walk (possibly network-mounted) storage
// synchronously, so they run on the blocking pool.  Nothing here keeps
// state between requests; each call re-reads the filesystem.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use fastprint_core::AppConfig;
use fastprint_core::error::{FastPrintError, Result};
use fastprint_core::types::{
    BatchPrintOutcome, BrowseListing, DocumentRecord, PrinterList, SearchOutcome,
};
use fastprint_document::{DocumentScanner, FolderBrowser, ProductSearchIndex};
use fastprint_print::{DocumentSelection, PrintOrchestrator, SumatraGateway, list_printers};
use fastprint_security::{PrintLog, PrintLogEntry, SessionVerifier, SqliteAuditSink};

/// Documents of one folder, as returned by `POST /api/list-pdfs`.
#[derive(Debug, Clone, Serialize)]
pub struct FolderListing {
    pub success: bool,
    pub folder: String,
    pub total: usize,
    pub files: Vec<DocumentRecord>,
}

/// Recent print-log entries, as returned by `GET /api/logs`.
#[derive(Debug, Clone, Serialize)]
pub struct LogListing {
    pub total: usize,
    pub logs: Vec<PrintLogEntry>,
}

/// Shared application services, cheap to clone into connection tasks.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    scanner: DocumentScanner,
    search: Arc<ProductSearchIndex>,
    browser: Arc<FolderBrowser>,
    orchestrator: Arc<PrintOrchestrator<SumatraGateway, SqliteAuditSink>>,
}

impl AppServices {
    /// Wire up every component from `config`.  Call once at start-up.
    pub fn init(config: AppConfig) -> Self {
        let config = Arc::new(config);

        let audit = SqliteAuditSink::new(
            SessionVerifier::new(&config.token_secret),
            config.audit_db_path.clone(),
        );
        let orchestrator = PrintOrchestrator::new(
            SumatraGateway::from_config(&config),
            Arc::new(audit),
            config.default_printer.clone(),
        );

        info!(
            roots = config.catalog_roots.len(),
            audit_db = %config.audit_db_path.display(),
            "app services initialised"
        );

        Self {
            scanner: DocumentScanner::new(),
            search: Arc::new(ProductSearchIndex::from_config(&config)),
            browser: Arc::new(FolderBrowser::from_config(&config)),
            orchestrator: Arc::new(orchestrator),
            config,
        }
    }

    // -- Printers ------------------------------------------------------------

    pub async fn printers(&self) -> PrinterList {
        list_printers(self.config.default_printer.clone()).await
    }

    // -- Documents -----------------------------------------------------------

    /// Every printable document under `folder`.
    #[instrument(skip(self))]
    pub async fn list_documents(&self, folder: String) -> Result<FolderListing> {
        let scanner = self.scanner;
        let root = PathBuf::from(&folder);
        let files = blocking(move || scanner.scan(&root)).await?;
        Ok(FolderListing {
            success: true,
            total: files.len(),
            folder,
            files,
        })
    }

    pub async fn search(&self, query: String) -> Result<SearchOutcome> {
        let index = Arc::clone(&self.search);
        blocking(move || index.search(&query)).await
    }

    pub async fn browse(&self, path: String) -> Result<BrowseListing> {
        let browser = Arc::clone(&self.browser);
        blocking(move || browser.browse(&path)).await
    }

    // -- Printing ------------------------------------------------------------

    /// Print a folder, or a hand-picked subset of it.
    ///
    /// `credential` is the bearer token, if the caller sent one; it only
    /// affects auditing, never whether printing happens.
    pub async fn print(
        &self,
        folder_path: String,
        printer: Option<String>,
        selected_files: Option<Vec<String>>,
        credential: Option<String>,
    ) -> Result<BatchPrintOutcome> {
        let selection = DocumentSelection::from_request(selected_files);
        self.orchestrator
            .print_request(
                &PathBuf::from(folder_path),
                selection,
                printer.as_deref().filter(|p| !p.is_empty()),
                credential.as_deref(),
            )
            .await
    }

    // -- Print log -----------------------------------------------------------

    pub async fn logs(&self, limit: u32) -> Result<LogListing> {
        let db_path = self.config.audit_db_path.clone();
        let logs = blocking(move || PrintLog::open(&db_path)?.recent(limit)).await?;
        Ok(LogListing {
            total: logs.len(),
            logs,
        })
    }
}

/// Run `work` on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| FastPrintError::Server(format!("blocking task: {e}")))?
}
