//! Filter performance benchmarks.
//!
//! The grid refilters on every keystroke, so filtering a large accumulated
//! set has to stay well inside one frame.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nftdeck::model::{ContractAddress, Cursor, Item, OwnerAuthorization, Page, TokenId};
use nftdeck::state::{filter, AppState, ViewOptions};
use nftdeck::view_state::grid_rows;

const COLLECTIONS: [(&str, &str); 5] = [
    ("CryptoKitties", "CK"),
    ("CryptoPunks", "PUNK"),
    ("", "ENS"),
    ("Art Blocks Curated", "BLOCKS"),
    ("Bored Ape Yacht Club", "BAYC"),
];

const PAGE_SIZE: usize = 100;

/// `count` items spread over the collections, every tenth one named.
fn generate_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let (name, symbol) = COLLECTIONS[i % COLLECTIONS.len()];
            let item = Item::new(
                ContractAddress::new(format!("0x{:040x}", i % COLLECTIONS.len()))
                    .expect("valid address"),
                TokenId::new(format!("{i}{}", "0".repeat(i % 60))).expect("valid id"),
                name,
                symbol,
            );
            if i % 10 == 0 {
                item.with_name(format!("Rare #{i}"))
            } else {
                item
            }
        })
        .collect()
}

/// App state holding `count` items accumulated in pages of `PAGE_SIZE`.
fn accumulated_state(count: usize) -> AppState {
    let mut state = AppState::new(
        ViewOptions::default(),
        Box::new(OwnerAuthorization::read_only()),
    );
    let items = generate_items(count);
    let chunks: Vec<&[Item]> = items.chunks(PAGE_SIZE).collect();
    for (i, chunk) in chunks.iter().enumerate() {
        let next = if i + 1 < chunks.len() {
            Cursor::new(format!("p{}", i + 1))
        } else {
            None
        };
        let ticket = state
            .accumulator
            .begin_request()
            .expect("more pages expected");
        state.apply_page(&ticket, Ok(Page::new(chunk.to_vec()).with_next(next)));
    }
    state
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for count in [1_000, 10_000, 50_000] {
        let items = generate_items(count);
        for needle in ["punk", "rare", "zzz"] {
            group.bench_with_input(
                BenchmarkId::new(needle, count),
                &items,
                |b, items| b.iter(|| filter(items.iter(), black_box(needle)).len()),
            );
        }
    }
    group.finish();
}

fn bench_rows(c: &mut Criterion) {
    let state = accumulated_state(10_000).with_filter("kitties");
    c.bench_function("grid_rows_10k_filtered", |b| {
        b.iter(|| black_box(grid_rows(&state)).len())
    });
}

criterion_group!(benches, bench_filter, bench_rows);
criterion_main!(benches);
