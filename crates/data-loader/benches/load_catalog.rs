//! Benchmarks for catalog loading
//!
//! Run with: cargo bench --package data-loader
//!
//! Uses a synthetic catalog so it runs without the real dataset.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{parse_titles, CatalogIndex};

fn synthetic_catalog(rows: usize) -> String {
    let mut csv = String::from(
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description\n",
    );
    for i in 0..rows {
        let (kind, duration) = if i % 3 == 0 {
            ("TV Show", format!("{} Seasons", i % 5 + 1))
        } else {
            ("Movie", format!("{} min", 80 + i % 90))
        };
        csv.push_str(&format!(
            "s{i},{kind},Title {i},Director {d},,\"United States, Country {c}\",\"March {day}, 20{y:02}\",{ry},TV-MA,{duration},\"Dramas, Genre {g}\",Text\n",
            d = i % 50,
            c = i % 20,
            day = i % 28 + 1,
            y = 10 + i % 12,
            ry = 1980 + i % 40,
            g = i % 15,
        ));
    }
    csv
}

fn bench_parse_titles(c: &mut Criterion) {
    let csv = synthetic_catalog(8_000);

    c.bench_function("parse_titles_8k", |b| {
        b.iter(|| {
            let titles = parse_titles(black_box(csv.as_bytes()), b',').unwrap();
            black_box(titles)
        })
    });
}

fn bench_build_index(c: &mut Criterion) {
    let titles = parse_titles(synthetic_catalog(8_000).as_bytes(), b',').unwrap();

    c.bench_function("build_index_8k", |b| {
        b.iter(|| {
            let index = CatalogIndex::from_titles(black_box(titles.clone()));
            black_box(index)
        })
    });
}

criterion_group!(benches, bench_parse_titles, bench_build_index);
criterion_main!(benches);
