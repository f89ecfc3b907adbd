// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Catalog search — linear scan of the configured catalog roots.
//
// Layout of a catalog root:
//
//   <root "1 - EM LINHA">/
//     <category "CADEIRAS">/
//       <product "123456789 - CADEIRA X">/ENG .../*.pdf
//     <product "987654321 - MESA Y">/ENG .../*.pdf
//
// A child of the root is a product when its name starts with a 9-digit code,
// otherwise it is a category whose children are the products.  There is no
// persistent index: each query walks the roots again.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use fastprint_core::AppConfig;
use fastprint_core::classify::{REVISION_FOLDER, has_engineering_prefix, is_pdf, is_product_code};
use fastprint_core::error::{FastPrintError, Result};
use fastprint_core::types::{MatchKind, ProductMatch, SearchOutcome, file_name_of};

/// Searches product folders by name across the catalog roots.
#[derive(Debug, Clone)]
pub struct ProductSearchIndex {
    roots: Vec<PathBuf>,
    limit: usize,
    min_query_chars: usize,
}

impl ProductSearchIndex {
    pub fn new(roots: Vec<PathBuf>, limit: usize, min_query_chars: usize) -> Self {
        Self {
            roots,
            limit,
            min_query_chars,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.catalog_roots.clone(),
            config.search_result_limit,
            config.min_query_chars,
        )
    }

    /// Find products whose folder name contains `query`, case-insensitively.
    ///
    /// Queries shorter than the configured minimum return a structured
    /// "too short" outcome rather than an error.  Hits are sorted by
    /// `(status, name)` and truncated to the result limit; `total` reports
    /// the count before truncation.  Roots that do not exist are skipped.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        if query.chars().count() < self.min_query_chars {
            return Ok(SearchOutcome::too_short(query, self.min_query_chars));
        }

        let needle = query.to_uppercase();
        let mut matches = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                warn!(root = %root.display(), "catalog root missing, skipped");
                continue;
            }
            let status = status_label(root);

            for child in subdirectories(root)? {
                let name = file_name_of(&child);
                if is_product_code(&name) {
                    if name.to_uppercase().contains(&needle) {
                        matches.push(product_match(&child, name, &status));
                    }
                    continue;
                }

                for product in subdirectories(&child)? {
                    let product_name = file_name_of(&product);
                    if product_name.to_uppercase().contains(&needle) {
                        matches.push(product_match(&product, product_name, &status));
                    }
                }
            }
        }

        matches.sort_by(|a, b| {
            (&a.status_label, &a.name, &a.absolute_path).cmp(&(
                &b.status_label,
                &b.name,
                &b.absolute_path,
            ))
        });

        let total = matches.len();
        matches.truncate(self.limit);
        debug!(total, returned = matches.len(), "search complete");

        Ok(SearchOutcome {
            success: true,
            query: query.to_owned(),
            total,
            results: matches,
            message: None,
        })
    }
}

fn product_match(path: &Path, name: String, status: &str) -> ProductMatch {
    ProductMatch {
        name,
        absolute_path: path.to_path_buf(),
        kind: MatchKind::Product,
        status_label: status.to_owned(),
        document_count: count_documents(path),
    }
}

/// Lifecycle status shown for a catalog root: the segment after the first
/// `" - "` (`"1 - EM LINHA"` gives `"EM LINHA"`), or the whole name.
pub fn status_label(root: &Path) -> String {
    let name = file_name_of(root);
    match name.split(" - ").nth(1) {
        Some(label) => label.to_owned(),
        None => name,
    }
}

/// Count the PDFs below the ENG-prefixed children of a product, ignoring
/// anything whose path below the product mentions the revision folder.
///
/// The filter is applied to the product-relative path: the catalog root for
/// products under review is itself called "3 - EM REVISAO".
pub fn count_documents(product: &Path) -> usize {
    let Ok(children) = subdirectories(product) else {
        debug!(path = %product.display(), "product folder unreadable, counted as empty");
        return 0;
    };

    children
        .iter()
        .filter(|sub| has_engineering_prefix(&file_name_of(sub)))
        .map(|sub| {
            WalkDir::new(sub)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && is_pdf(entry.path()))
                .filter(|entry| {
                    let relative = entry.path().strip_prefix(product).unwrap_or(entry.path());
                    !relative.to_string_lossy().contains(REVISION_FOLDER)
                })
                .count()
        })
        .sum()
}

/// Immediate sub-directories of `dir`.
fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|e| FastPrintError::from_io(e, dir))?;
    let mut dirs = Vec::new();
    for entry in read {
        let path = entry.map_err(|e| FastPrintError::from_io(e, dir))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}
