// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory-name classification for the technical-documents tree.
//
// Products keep their released drawings in an "ENG" folder whose exact name
// has drifted over the years ("ENG", "ENG-DESENHOS", "ENG - 002 - FURACAO").
// Superseded drawings live in "REVISAO" folders which are never printed.

use std::path::Path;

/// Literal name of the revision folder. Also used as a raw path filter when
/// counting catalog documents.
pub const REVISION_FOLDER: &str = "REVISAO";

/// Number of leading digits that mark a catalog product folder.
pub const PRODUCT_CODE_DIGITS: usize = 9;

/// True for an engineering-documents folder: `ENG`, `ENG-...` or `ENG -...`,
/// compared case-insensitively.
pub fn is_engineering_folder(name: &str) -> bool {
    let upper = name.to_uppercase();
    upper == "ENG" || upper.starts_with("ENG-") || upper.starts_with("ENG -")
}

/// Looser prefix rule used when counting documents for search and browse
/// listings: any folder whose upper-cased name starts with `ENG`.
pub fn has_engineering_prefix(name: &str) -> bool {
    name.to_uppercase().starts_with("ENG")
}

/// True for a revision/superseded folder, compared case-insensitively.
pub fn is_revision_folder(name: &str) -> bool {
    name.to_uppercase() == REVISION_FOLDER
}

/// True when `name` starts with a 9-digit product code.
///
/// Anything else under a catalog root is treated as a category folder. The
/// rule is structural only: a category that happens to start with nine
/// digits is classified as a product.
pub fn is_product_code(name: &str) -> bool {
    name.chars().count() >= PRODUCT_CODE_DIGITS
        && name
            .chars()
            .take(PRODUCT_CODE_DIGITS)
            .all(|c| c.is_ascii_digit())
}

/// True when the path has a `.pdf` extension in any case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engineering_folder_variants() {
        assert!(is_engineering_folder("ENG"));
        assert!(is_engineering_folder("eng"));
        assert!(is_engineering_folder("ENG-DESENHOS"));
        assert!(is_engineering_folder("ENG - 002 - FURACAO"));
        assert!(is_engineering_folder("Eng -x"));
    }

    #[test]
    fn engineering_folder_rejects_lookalikes() {
        assert!(!is_engineering_folder("ENGENHARIA"));
        assert!(!is_engineering_folder("ENG_X"));
        assert!(!is_engineering_folder(" ENG"));
        assert!(!is_engineering_folder("DOCS ENG"));
        assert!(!is_engineering_folder(""));
    }

    #[test]
    fn prefix_rule_is_looser_than_folder_rule() {
        assert!(has_engineering_prefix("ENGENHARIA"));
        assert!(has_engineering_prefix("eng_x"));
        assert!(!has_engineering_prefix("XENG"));
    }

    #[test]
    fn revision_folder_is_case_insensitive_exact() {
        assert!(is_revision_folder("REVISAO"));
        assert!(is_revision_folder("Revisao"));
        assert!(!is_revision_folder("REVISAO 2"));
        assert!(!is_revision_folder("REV"));
    }

    #[test]
    fn product_code_needs_nine_leading_digits() {
        assert!(is_product_code("123456789"));
        assert!(is_product_code("123456789 - MESA"));
        assert!(!is_product_code("12345678"));
        assert!(!is_product_code("12345678X - MESA"));
        assert!(!is_product_code("CADEIRAS"));
        // Structural rule only: a numeric-looking category is still a product.
        assert!(is_product_code("202401011 ARCHIVE"));
    }

    #[test]
    fn pdf_extension_any_case() {
        assert!(is_pdf(Path::new("a.pdf")));
        assert!(is_pdf(Path::new("a.PDF")));
        assert!(is_pdf(Path::new("dir/a.Pdf")));
        assert!(!is_pdf(Path::new("a.pdf.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }
}
