// benches/catalog.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use muster::{
    core::xml::parse_document, factions, reconcile::faction_from_catalog,
    specs::{catalog::extract_entries, reference::ReferenceTable},
};

const FIXTURE: &str = include_str!("../tests/fixtures/space_marines.cat");

/// Repeat the fixture's entries so the document is closer to a real catalog.
fn large_sample(copies: usize) -> String {
    let start = FIXTURE.find("<selectionEntries>").unwrap_or(0);
    let end = FIXTURE.rfind("</catalogue>").unwrap_or(FIXTURE.len());
    let body = &FIXTURE[start..end];
    let mut doc = String::from("<catalogue name=\"bench\">");
    for _ in 0..copies {
        doc.push_str(body);
    }
    doc.push_str("</catalogue>");
    doc
}

fn bench_catalog(c: &mut Criterion) {
    let info = factions::lookup("space-marines").expect("space-marines in faction table");
    let doc = large_sample(50);

    c.bench_function("parse_tree", |b| {
        b.iter(|| {
            let tree = parse_document(black_box(&doc)).expect("fixture parses");
            black_box(tree.root.children.len())
        })
    });

    let tree = parse_document(&doc).expect("fixture parses");
    c.bench_function("extract_entries", |b| {
        b.iter(|| black_box(extract_entries(black_box(&tree)).len()))
    });

    c.bench_function("faction_from_catalog", |b| {
        b.iter(|| {
            let f = faction_from_catalog(info, black_box(&doc)).expect("fixture parses");
            black_box(f.unit_count())
        })
    });

    let table = ReferenceTable::embedded().expect("embedded table");
    c.bench_function("reference_table", |b| {
        b.iter(|| black_box(table.to_factions().len()))
    });
}

criterion_group!(benches, bench_catalog);
criterion_main!(benches);
