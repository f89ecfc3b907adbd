// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document scanner — flattens the ENG folders of a product into a list of
// printable PDFs.
//
// Traversal uses an explicit work-list instead of recursion.  Revision
// folders are filtered out before they are pushed, so nothing beneath them
// is ever listed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use fastprint_core::classify::{is_engineering_folder, is_pdf, is_revision_folder};
use fastprint_core::error::{FastPrintError, Result};
use fastprint_core::types::{DocumentRecord, file_name_of};

/// Lists the printable documents of a product folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentScanner;

impl DocumentScanner {
    pub fn new() -> Self {
        Self
    }

    /// Collect every PDF below the engineering folders of `root`.
    ///
    /// Each record is labelled with the top-level ENG folder it came from,
    /// however deep it sits.  When `root` is itself an ENG folder its direct
    /// PDFs are included too, labelled with its own name.  The result is
    /// sorted by `(folder_label, name)`.
    ///
    /// # Errors
    ///
    /// `NotFound` if `root` does not exist, `PermissionDenied` if a folder
    /// on the way cannot be listed.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn scan(&self, root: &Path) -> Result<Vec<DocumentRecord>> {
        if !root.exists() {
            return Err(FastPrintError::NotFound(root.display().to_string()));
        }

        let mut documents = Vec::new();

        // (directory to visit, label of the ENG folder it belongs to)
        let mut pending: Vec<(PathBuf, String)> = Vec::new();
        for entry in list_dir(root)? {
            if entry.is_dir && is_engineering_folder(&entry.name) {
                pending.push((entry.path, entry.name));
            }
        }

        while let Some((dir, label)) = pending.pop() {
            for entry in list_dir(&dir)? {
                if entry.is_dir {
                    if is_revision_folder(&entry.name) {
                        debug!(path = %entry.path.display(), "skipping revision folder");
                        continue;
                    }
                    pending.push((entry.path, label.clone()));
                } else if is_pdf(&entry.path) {
                    documents.push(DocumentRecord::new(&entry.path, label.as_str(), entry.len));
                }
            }
        }

        // Caller passed the ENG folder itself rather than its product.
        let root_name = file_name_of(root);
        if is_engineering_folder(&root_name) {
            for entry in list_dir(root)? {
                if !entry.is_dir && is_pdf(&entry.path) {
                    documents.push(DocumentRecord::new(&entry.path, root_name.as_str(), entry.len));
                }
            }
        }

        documents.sort_by(|a, b| {
            (&a.folder_label, &a.name, &a.absolute_path).cmp(&(
                &b.folder_label,
                &b.name,
                &b.absolute_path,
            ))
        });

        debug!(count = documents.len(), "scan complete");
        Ok(documents)
    }
}

/// A directory entry with the metadata the scanner needs.
struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    len: u64,
}

/// List `dir`, following symlinks.  Entries that disappear between the
/// listing and the stat are skipped.
fn list_dir(dir: &Path) -> Result<Vec<Entry>> {
    let read = fs::read_dir(dir).map_err(|e| FastPrintError::from_io(e, dir))?;
    let mut entries = Vec::new();
    for item in read {
        let item = item.map_err(|e| FastPrintError::from_io(e, dir))?;
        let path = item.path();
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "entry vanished during scan");
                continue;
            }
            Err(e) => return Err(FastPrintError::from_io(e, &path)),
        };
        entries.push(Entry {
            name: item.file_name().to_string_lossy().into_owned(),
            path,
            is_dir: meta.is_dir(),
            len: meta.len(),
        });
    }
    Ok(entries)
}
