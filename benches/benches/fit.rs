// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `stencil_fit`.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, BezPath, Size};

use stencil_fit::{
    BorderMode, BorderPaint, BorderStyle, FitRequest, ShapePainter, ShapeView, compute_fit,
};

const BLOB: &[u8] = br#"<svg width="64" height="64">
  <path d="M32 2 C50 2 62 14 62 32 C62 50 50 62 32 62 C14 62 2 50 2 32 C2 14 14 2 32 2 Z"/>
  <circle cx="20" cy="24" r="5"/><circle cx="44" cy="24" r="5"/>
  <ellipse cx="32" cy="44" rx="14" ry="6"/>
</svg>"#;

struct Sink(usize);

impl ShapePainter for Sink {
    fn draw_border(&mut self, path: &BezPath, _: &BorderPaint) {
        self.0 += path.elements().len();
    }

    fn draw_image(&mut self, _: Affine, clip: &BezPath) {
        self.0 += clip.elements().len();
    }
}

fn bench_fit(c: &mut Criterion) {
    let shape = stencil_svg::parse_svg(BLOB).unwrap();
    let mut group = c.benchmark_group("fit");

    for (name, mode) in [("outline", BorderMode::Outline), ("filled", BorderMode::Filled)] {
        let request = FitRequest::new(Size::new(320.0, 240.0), Size::new(1920.0, 1080.0))
            .with_border(6.0, mode);
        group.bench_with_input(BenchmarkId::new("compute", name), &request, |b, request| {
            b.iter(|| compute_fit(black_box(request), &shape));
        });
    }

    // Alternating sizes force a recompute on every paint.
    let style = BorderStyle::default().with_width(3.0);
    let mut view = ShapeView::new(Arc::new(shape)).with_style(style);
    view.set_image_size(Size::new(800.0, 600.0));
    let sizes = [Size::new(96.0, 96.0), Size::new(128.0, 96.0)];
    let mut i = 0_usize;
    group.bench_function("view_resize_and_paint", |b| {
        b.iter(|| {
            view.set_view_size(sizes[i % sizes.len()]);
            i += 1;
            let mut sink = Sink(0);
            view.paint(&mut sink);
            black_box(sink.0)
        });
    });

    group.bench_function("view_cached_paint", |b| {
        let mut sink = Sink(0);
        b.iter(|| view.paint(black_box(&mut sink)));
    });

    group.finish();
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
