// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Built once at start-up and handed to each component by `Arc`; nothing in
// the workspace reads configuration from global state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Catalog roots used by the Linea Brasil installation.
const DEFAULT_CATALOG_ROOTS: &[&str] = &[
    r"L:\Linea Brasil\6 Pesquisa e Desenvolvimento\1 - DOCUMENTOS\1 - DOCUMENTOS TECNICOS\1 - EM LINHA",
    r"L:\Linea Brasil\6 Pesquisa e Desenvolvimento\1 - DOCUMENTOS\1 - DOCUMENTOS TECNICOS\3 - EM REVISAO",
];

/// Executable name of the print helper, looked up on PATH as a last resort.
const DEFAULT_HELPER_PROGRAM: &str = "SumatraPDF.exe";

/// Service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
    /// Catalog roots, one per lifecycle status, searched in order.
    pub catalog_roots: Vec<PathBuf>,
    /// Printer used when a request names none (None = system default).
    pub default_printer: Option<String>,
    /// Install locations probed for the print helper, highest priority first.
    pub helper_candidates: Vec<PathBuf>,
    /// Program name resolved through PATH when no candidate exists.
    pub helper_program: String,
    /// Per-document timeout for the print helper.
    pub print_timeout_secs: u64,
    /// Maximum number of search hits returned.
    pub search_result_limit: usize,
    /// Minimum query length (in characters) for a search.
    pub min_query_chars: usize,
    /// SQLite file holding the print log.
    pub audit_db_path: PathBuf,
    /// HS256 secret shared with whatever issues session tokens.
    pub token_secret: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            catalog_roots: DEFAULT_CATALOG_ROOTS.iter().map(PathBuf::from).collect(),
            default_printer: None,
            helper_candidates: default_helper_candidates(),
            helper_program: DEFAULT_HELPER_PROGRAM.into(),
            print_timeout_secs: 60,
            search_result_limit: 20,
            min_query_chars: 3,
            audit_db_path: PathBuf::from("fastprint.db"),
            token_secret: "fastprint-linea-2025-change-me".into(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys take their default value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&data)?;
        info!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    /// Like [`load`](Self::load) but falls back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "could not read configuration, using defaults"
                );
                Self::default()
            }
        }
    }
}

/// SumatraPDF install locations, most common first.
fn default_helper_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        candidates.push(PathBuf::from(local).join("SumatraPDF").join("SumatraPDF.exe"));
    }
    let user = std::env::var("USERNAME").unwrap_or_default();
    candidates.push(PathBuf::from(format!(
        r"C:\Users\{user}\AppData\Local\SumatraPDF\SumatraPDF.exe"
    )));
    candidates.push(PathBuf::from(r"C:\Program Files\SumatraPDF\SumatraPDF.exe"));
    candidates.push(PathBuf::from(
        r"C:\Program Files (x86)\SumatraPDF\SumatraPDF.exe",
    ));
    candidates
}
