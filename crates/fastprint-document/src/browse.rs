// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folder browser — one-level directory listing used to pick a product by
// hand when search is not enough.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use fastprint_core::AppConfig;
use fastprint_core::classify::{has_engineering_prefix, is_pdf};
use fastprint_core::error::{FastPrintError, Result};
use fastprint_core::types::{BrowseEntry, BrowseListing, file_name_of};

/// Lists sub-folders together with a quick drawing count.
#[derive(Debug, Clone)]
pub struct FolderBrowser {
    /// Folder shown when the caller gives no path.
    home: Option<PathBuf>,
}

impl FolderBrowser {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    /// Start browsing at the first catalog root.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.catalog_roots.first().cloned())
    }

    /// List the sub-folders of `path` (or of the home folder when empty),
    /// sorted by name.
    ///
    /// Each entry's `pdf_count` is the number of PDFs sitting directly in
    /// its ENG-prefixed children; deeper files are not counted.
    #[instrument(skip(self))]
    pub fn browse(&self, path: &str) -> Result<BrowseListing> {
        let folder = if path.is_empty() {
            self.home
                .clone()
                .ok_or_else(|| FastPrintError::Validation("no catalog root configured".into()))?
        } else {
            PathBuf::from(path)
        };

        if !folder.exists() {
            return Err(FastPrintError::NotFound(folder.display().to_string()));
        }

        let mut dirs = subdirectories(&folder)?;
        dirs.sort();

        let items = dirs
            .into_iter()
            .map(|dir| BrowseEntry {
                name: file_name_of(&dir),
                pdf_count: shallow_pdf_count(&dir),
                path: dir,
                is_dir: true,
            })
            .collect::<Vec<_>>();

        debug!(items = items.len(), "folder listed");

        let parent = folder
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);

        Ok(BrowseListing {
            current: folder,
            parent,
            items,
        })
    }
}

/// PDFs directly inside the ENG-prefixed children of `dir`.  Unreadable
/// children count as zero.
fn shallow_pdf_count(dir: &Path) -> usize {
    let Ok(children) = subdirectories(dir) else {
        return 0;
    };
    children
        .iter()
        .filter(|sub| has_engineering_prefix(&file_name_of(sub)))
        .filter_map(|sub| fs::read_dir(sub).ok())
        .flat_map(|read| read.filter_map(|e| e.ok()))
        .filter(|entry| {
            let path = entry.path();
            is_pdf(&path) && path.is_file()
        })
        .count()
}

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

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF").unwrap();
    }

    #[test]
    fn lists_sorted_directories_with_counts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("B-PRODUCT/ENG/one.pdf"));
        touch(&root.join("B-PRODUCT/ENG/two.pdf"));
        touch(&root.join("B-PRODUCT/ENG/deep/three.pdf"));
        touch(&root.join("B-PRODUCT/OTHER/four.pdf"));
        fs::create_dir_all(root.join("A-PRODUCT")).unwrap();
        touch(&root.join("not-a-dir.pdf"));

        let listing = FolderBrowser::new(None)
            .browse(&root.display().to_string())
            .unwrap();

        let names: Vec<_> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A-PRODUCT", "B-PRODUCT"]);
        assert_eq!(listing.items[0].pdf_count, 0);
        assert_eq!(listing.items[1].pdf_count, 2);
        assert!(listing.items.iter().all(|i| i.is_dir));
        assert_eq!(listing.parent.as_deref(), root.parent());
    }

    #[test]
    fn empty_path_uses_home() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("CADEIRAS")).unwrap();
        let browser = FolderBrowser::new(Some(dir.path().to_path_buf()));

        let listing = browser.browse("").unwrap();
        assert_eq!(listing.current, dir.path());
        assert_eq!(listing.items.len(), 1);
    }

    #[test]
    fn empty_path_without_home_is_invalid() {
        let err = FolderBrowser::new(None).browse("").unwrap_err();
        assert!(matches!(err, FastPrintError::Validation(_)));
    }

    #[test]
    fn missing_folder_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = FolderBrowser::new(None)
            .browse(&missing.display().to_string())
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[cfg(unix)]
    mod unreadable {
        use std::os::unix::fs::PermissionsExt;

        use super::*;

        fn set_mode(path: &Path, mode: u32) {
            fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
        }

        #[test]
        fn locked_folder_is_permission_denied() {
            let dir = tempfile::tempdir().unwrap();
            let locked = dir.path().join("LOCKED");
            fs::create_dir_all(locked.join("123456789 - MESA")).unwrap();
            set_mode(&locked, 0o000);
            // Privileged users read through mode bits.
            if fs::read_dir(&locked).is_ok() {
                set_mode(&locked, 0o755);
                return;
            }

            let result = FolderBrowser::new(None).browse(&locked.display().to_string());
            set_mode(&locked, 0o755);

            let err = result.unwrap_err();
            assert!(matches!(err, FastPrintError::PermissionDenied(_)));
            assert_eq!(err.http_status(), 403);
        }

        #[test]
        fn locked_child_counts_zero() {
            let dir = tempfile::tempdir().unwrap();
            let open = dir.path().join("A - OPEN");
            let locked = dir.path().join("B - LOCKED");
            touch(&open.join("ENG").join("a.pdf"));
            touch(&locked.join("ENG").join("b.pdf"));
            set_mode(&locked, 0o000);
            if fs::read_dir(&locked).is_ok() {
                set_mode(&locked, 0o755);
                return;
            }

            let result = FolderBrowser::new(None).browse(&dir.path().display().to_string());
            set_mode(&locked, 0o755);

            let listing = result.unwrap();
            let counts: Vec<_> = listing.items.iter().map(|i| (i.name.as_str(), i.pdf_count)).collect();
            assert_eq!(counts, [("A - OPEN", 1), ("B - LOCKED", 0)]);
        }
    }
}
