// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `transform` attribute.

use kurbo::Affine;
use tracing::debug;

use crate::units::parse_number_list;

/// Parses a `transform` attribute list into a single matrix.
///
/// Functions compose in document order: the rightmost function is applied
/// to the geometry first, so `translate(10,20) scale(2)` maps `(1, 0)` to
/// `(12, 20)`. Recognised functions are `translate`, `scale`, `rotate`,
/// `skewX`, `skewY` and `matrix`; anything else (or a function with an
/// argument count it cannot use) is skipped.
#[must_use]
pub fn parse_transform(src: &str) -> Affine {
    let mut matrix = Affine::IDENTITY;
    for token in src.split(')') {
        let token = token.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        let Some((name, args)) = token.split_once('(') else {
            continue;
        };
        let name = name.trim();
        match transform_function(name, &parse_number_list(args)) {
            Some(step) => matrix *= step,
            None => debug!(function = name, args, "ignoring transform function"),
        }
    }
    matrix
}

fn transform_function(name: &str, args: &[f64]) -> Option<Affine> {
    let first = args.first().copied();
    match name {
        "translate" => {
            let tx = first.unwrap_or(0.0);
            let ty = args.get(1).copied().unwrap_or(0.0);
            Some(Affine::translate((tx, ty)))
        }
        "scale" => {
            let sx = first.unwrap_or(1.0);
            let sy = args.get(1).copied().unwrap_or(sx);
            Some(Affine::scale_non_uniform(sx, sy))
        }
        "rotate" => match *args {
            [angle] => Some(Affine::rotate(angle.to_radians())),
            [angle, cx, cy, ..] => Some(
                Affine::translate((cx, cy))
                    * Affine::rotate(angle.to_radians())
                    * Affine::translate((-cx, -cy)),
            ),
            _ => None,
        },
        "skewX" => first.map(|a| Affine::skew(a.to_radians().tan(), 0.0)),
        "skewY" => first.map(|a| Affine::skew(0.0, a.to_radians().tan())),
        "matrix" => match *args {
            [a, b, c, d, e, f] => Some(Affine::new([a, b, c, d, e, f])),
            _ => None,
        },
        _ => None,
    }
}
