// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `stencil_svg` parsing and `stencil_cache` lookups.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use stencil_cache::ShapeCache;
use stencil_svg::{ParseOptions, SvgShapeParser};

const HEART: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
  <path d="M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z"/>
</svg>"#;

/// A grid of `n * n` tiles, each a `use` of a shared rounded rect inside a
/// transformed group.
fn tiled(n: usize) -> String {
    let mut svg = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="512" height="512">
  <defs><rect id="tile" width="8" height="8" rx="2"/></defs>
"#,
    );
    for y in 0..n {
        for x in 0..n {
            svg.push_str(&format!(
                "  <g transform=\"translate({} {}) rotate(15 4 4)\"><use xlink:href=\"#tile\"/></g>\n",
                x * 10,
                y * 10
            ));
        }
    }
    svg.push_str("</svg>\n");
    svg
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = SvgShapeParser::default();

    group.bench_function("heart_path", |b| {
        b.iter(|| parser.parse(black_box(HEART.as_bytes())).unwrap());
    });

    for n in [4_usize, 16, 32] {
        let doc = tiled(n);
        group.bench_with_input(BenchmarkId::new("tiled_use", n * n), &doc, |b, doc| {
            b.iter(|| parser.parse(black_box(doc.as_bytes())).unwrap());
        });
    }

    // Same tiles with reference expansion off: measures the index pass cost.
    let no_refs = SvgShapeParser::new(ParseOptions {
        resolve_references: false,
        ..ParseOptions::default()
    });
    let doc = tiled(16);
    group.bench_function("tiled_use_unresolved/256", |b| {
        b.iter(|| no_refs.parse(black_box(doc.as_bytes())).unwrap());
    });

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");
    let cache = ShapeCache::new();
    cache.get_or_parse_svg("heart", HEART.as_bytes()).unwrap();

    group.bench_function("hit", |b| {
        b.iter(|| cache.get_or_parse_svg(black_box("heart"), HEART.as_bytes()).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_cache);
criterion_main!(benches);
