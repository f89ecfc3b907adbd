// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for document discovery and batch printing.
//
// Every value here is produced fresh per request and never persisted; field
// renames pin the JSON shape served over HTTP.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A printable PDF found under an engineering folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// File name including extension.
    pub name: String,
    #[serde(rename = "path")]
    pub absolute_path: PathBuf,
    /// Name of the top-level engineering folder the file was found under.
    #[serde(rename = "folder")]
    pub folder_label: String,
    /// File size in KiB, rounded to one decimal place (ties to even).
    #[serde(rename = "size_kb")]
    pub size_kib: f64,
}

impl DocumentRecord {
    /// Build a record for `path`, whose on-disk size is `size_bytes`.
    pub fn new(path: &Path, folder_label: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: file_name_of(path),
            absolute_path: path.to_path_buf(),
            folder_label: folder_label.into(),
            size_kib: (size_bytes as f64 / 1024.0 * 10.0).round_ties_even() / 10.0,
        }
    }
}

/// Final path component as an owned string (empty for `/` and friends).
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// What a search hit represents. Only products are ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchKind {
    Product,
}

/// A product folder matching a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMatch {
    pub name: String,
    #[serde(rename = "path")]
    pub absolute_path: PathBuf,
    #[serde(rename = "type")]
    pub kind: MatchKind,
    /// Lifecycle status derived from the catalog root name.
    #[serde(rename = "status")]
    pub status_label: String,
    #[serde(rename = "pdf_count")]
    pub document_count: usize,
}

/// Response of a catalog search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub success: bool,
    pub query: String,
    /// Number of matches before truncation.
    pub total: usize,
    pub results: Vec<ProductMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchOutcome {
    /// Structured refusal for a query below the minimum length.
    pub fn too_short(query: &str, min_chars: usize) -> Self {
        Self {
            success: false,
            query: query.to_owned(),
            total: 0,
            results: Vec::new(),
            message: Some(format!("type at least {min_chars} characters")),
        }
    }
}

/// Outcome of printing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintJobResult {
    #[serde(rename = "file")]
    pub file_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PrintJobResult {
    pub fn printed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate accounting for one multi-document print request.
///
/// `succeeded + failed == total_requested` and `results` follows input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPrintOutcome {
    /// True when at least one document printed.
    pub success: bool,
    #[serde(rename = "total")]
    pub total_requested: usize,
    #[serde(rename = "printed")]
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<PrintJobResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BatchPrintOutcome {
    /// Aggregate per-document results, preserving their order.
    pub fn from_results(results: Vec<PrintJobResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            success: succeeded > 0,
            total_requested: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
            message: None,
        }
    }

    /// Returned when the input resolved to zero documents.
    pub fn nothing_to_print() -> Self {
        Self {
            success: false,
            total_requested: 0,
            succeeded: 0,
            failed: 0,
            results: Vec::new(),
            message: Some("no PDF to print".into()),
        }
    }

    /// Names of the documents that printed, in input order.
    pub fn printed_files(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.file_name.clone())
            .collect()
    }
}

/// One sub-directory in a browse listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub pdf_count: usize,
}

/// Contents of a folder as shown by the browse endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseListing {
    pub current: PathBuf,
    pub parent: Option<PathBuf>,
    pub items: Vec<BrowseEntry>,
}

/// Printers installed on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterList {
    pub printers: Vec<String>,
    pub default: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_rounded_to_one_decimal() {
        let rec = DocumentRecord::new(Path::new("/a/ENG/x.pdf"), "ENG", 1536);
        assert_eq!(rec.size_kib, 1.5);
        let rec = DocumentRecord::new(Path::new("/a/ENG/y.pdf"), "ENG", 1000);
        assert_eq!(rec.size_kib, 1.0);
        assert_eq!(rec.name, "y.pdf");
    }

    #[test]
    fn size_halves_round_to_even() {
        let quarter = DocumentRecord::new(Path::new("/a/ENG/q.pdf"), "ENG", 256);
        assert_eq!(quarter.size_kib, 0.2);
        let three_quarters = DocumentRecord::new(Path::new("/a/ENG/t.pdf"), "ENG", 768);
        assert_eq!(three_quarters.size_kib, 0.8);
    }

    #[test]
    fn batch_counts_add_up() {
        let outcome = BatchPrintOutcome::from_results(vec![
            PrintJobResult::printed("a.pdf", "ok"),
            PrintJobResult::failed("b.pdf", "timeout"),
            PrintJobResult::printed("c.pdf", "ok"),
        ]);
        assert_eq!(outcome.total_requested, 3);
        assert_eq!(outcome.succeeded + outcome.failed, outcome.total_requested);
        assert!(outcome.success);
        assert_eq!(outcome.printed_files(), vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn all_failed_batch_is_not_success() {
        let outcome = BatchPrintOutcome::from_results(vec![PrintJobResult::failed("a.pdf", "x")]);
        assert!(!outcome.success);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn batch_json_uses_wire_names() {
        let outcome = BatchPrintOutcome::from_results(vec![PrintJobResult::failed("b.pdf", "boom")]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["printed"], 0);
        assert_eq!(json["results"][0]["file"], "b.pdf");
        assert_eq!(json["results"][0]["error"], "boom");
        assert!(json["results"][0].get("message").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn product_match_kind_serializes_uppercase() {
        let m = ProductMatch {
            name: "123456789 CHAIR".into(),
            absolute_path: PathBuf::from("/c/123456789 CHAIR"),
            kind: MatchKind::Product,
            status_label: "EM LINHA".into(),
            document_count: 2,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "PRODUCT");
        assert_eq!(json["status"], "EM LINHA");
        assert_eq!(json["pdf_count"], 2);
    }
}
