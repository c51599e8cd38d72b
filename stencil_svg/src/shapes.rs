// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contours for the basic shape elements, in element-local coordinates.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Arc, BezPath, Circle, Ellipse, Point, Rect, Shape, Vec2};

/// Flattening tolerance for curved primitives.
pub(crate) const TOLERANCE: f64 = 0.1;

/// Rectangle, optionally with elliptical corners.
///
/// A missing or non-positive radius falls back to the other one; radii are
/// clamped to half the side they round.
pub(crate) fn rect(r: Rect, rx: Option<f64>, ry: Option<f64>) -> BezPath {
    let positive = |v: Option<f64>| v.filter(|v| *v > 0.0);
    let (rx, ry) = match (positive(rx), positive(ry)) {
        (None, None) => return r.to_path(TOLERANCE),
        (Some(v), None) | (None, Some(v)) => (v, v),
        (Some(x), Some(y)) => (x, y),
    };
    let rx = rx.min(r.width() / 2.0);
    let ry = ry.min(r.height() / 2.0);
    let radii = Vec2::new(rx, ry);

    let mut path = BezPath::new();
    path.move_to((r.x0 + rx, r.y0));
    path.line_to((r.x1 - rx, r.y0));
    corner(&mut path, Point::new(r.x1 - rx, r.y0 + ry), radii, -FRAC_PI_2);
    path.line_to((r.x1, r.y1 - ry));
    corner(&mut path, Point::new(r.x1 - rx, r.y1 - ry), radii, 0.0);
    path.line_to((r.x0 + rx, r.y1));
    corner(&mut path, Point::new(r.x0 + rx, r.y1 - ry), radii, FRAC_PI_2);
    path.line_to((r.x0, r.y0 + ry));
    corner(&mut path, Point::new(r.x0 + rx, r.y0 + ry), radii, PI);
    path.close_path();
    path
}

fn corner(path: &mut BezPath, center: Point, radii: Vec2, start_angle: f64) {
    let arc = Arc {
        center,
        radii,
        start_angle,
        sweep_angle: FRAC_PI_2,
        x_rotation: 0.0,
    };
    path.extend(arc.append_iter(TOLERANCE));
}

/// Open two-point segment.
pub(crate) fn line(p0: Point, p1: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(p0);
    path.line_to(p1);
    path
}

pub(crate) fn circle(center: Point, r: f64) -> BezPath {
    Circle::new(center, r).to_path(TOLERANCE)
}

pub(crate) fn ellipse(center: Point, rx: f64, ry: f64) -> BezPath {
    Ellipse::new(center, (rx, ry), 0.0).to_path(TOLERANCE)
}

/// Polyline or polygon through `coords` taken in `(x, y)` pairs.
///
/// A trailing unpaired number is dropped. Returns `None` when there is not
/// even one point.
pub(crate) fn poly(coords: &[f64], close: bool) -> Option<BezPath> {
    let mut points = coords.chunks_exact(2).map(|p| Point::new(p[0], p[1]));
    let mut path = BezPath::new();
    path.move_to(points.next()?);
    for p in points {
        path.line_to(p);
    }
    if close {
        path.close_path();
    }
    Some(path)
}
