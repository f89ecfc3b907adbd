// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for document discovery in the fastprint-document
// crate.  Both benchmarks run against a synthetic catalog on local disk, so
// they measure traversal overhead rather than network-share latency.

use std::fs;
use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fastprint_document::{DocumentScanner, ProductSearchIndex};

/// Build `categories` x `products` product folders, each with two ENG
/// folders, a nested sub-folder and a revision folder.
fn build_catalog(root: &Path, categories: usize, products: usize) {
    for c in 0..categories {
        for p in 0..products {
            let product = root.join(format!("CATEGORY {c:02}/{c:03}{p:06} - PRODUCT {p}"));
            for eng in ["ENG - 001 - CORTE", "ENG - 002 - FURACAO"] {
                let dir = product.join(eng);
                fs::create_dir_all(dir.join("DETALHES")).unwrap();
                fs::create_dir_all(dir.join("REVISAO")).unwrap();
                for f in 0..4 {
                    fs::write(dir.join(format!("sheet-{f}.pdf")), b"%PDF").unwrap();
                }
                fs::write(dir.join("DETALHES/detail.pdf"), b"%PDF").unwrap();
                fs::write(dir.join("REVISAO/old.pdf"), b"%PDF").unwrap();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Scan a single product with two ENG folders.
fn bench_scan_product(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    build_catalog(dir.path(), 1, 1);
    let product = dir.path().join("CATEGORY 00/000000000 - PRODUCT 0");
    let scanner = DocumentScanner::new();

    c.bench_function("scan (1 product, 10 pdfs)", |b| {
        b.iter(|| black_box(scanner.scan(black_box(&product)).unwrap()));
    });
}

/// Search a 5 x 40 catalog for a query that matches every product.
fn bench_search_catalog(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("1 - EM LINHA");
    build_catalog(&root, 5, 40);
    let index = ProductSearchIndex::new(vec![root], 20, 3);

    c.bench_function("search (200 products)", |b| {
        b.iter(|| black_box(index.search(black_box("product")).unwrap()));
    });
}

criterion_group!(benches, bench_scan_product, bench_search_catalog);
criterion_main!(benches);
