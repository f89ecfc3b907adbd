// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FastPrint Document — locates printable drawings on the shared drive.
//
// Every call re-reads the filesystem; nothing is cached or indexed between
// requests.  All functions here block on I/O, so async callers should run
// them on a blocking thread.

pub mod browse;
pub mod scanner;
pub mod search;

pub use browse::FolderBrowser;
pub use scanner::DocumentScanner;
pub use search::ProductSearchIndex;
