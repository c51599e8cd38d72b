// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Length units and number lists.

use kurbo::Size;
use smallvec::SmallVec;

/// Resolution used to convert physical units when none is configured.
pub const DEFAULT_DPI: f64 = 72.0;

/// Numbers parsed from a list attribute (`viewBox`, `points`, transform
/// arguments). Short lists stay inline.
pub type NumberList = SmallVec<[f64; 6]>;

/// Which viewport dimension a percentage length resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Percentages are taken of the viewport width.
    Horizontal,
    /// Percentages are taken of the viewport height.
    Vertical,
}

const HORIZONTAL_ATTRIBUTES: &[&str] = &["x", "x1", "x2", "width", "cx", "rx", "dx"];

impl Axis {
    /// Axis used for percentages in the attribute called `name`.
    #[must_use]
    pub fn of_attribute(name: &str) -> Self {
        if HORIZONTAL_ATTRIBUTES
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
        {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Converts a length attribute value to user units.
///
/// - `50%` resolves against the viewport width or height, per `axis`.
/// - `px` and bare numbers are taken as-is.
/// - `pt`, `in`, `cm`, `mm` convert through `dpi`.
///
/// Returns `None` for anything that does not parse to a finite number.
#[must_use]
pub fn parse_length(raw: &str, axis: Axis, viewport: Size, dpi: f64) -> Option<f64> {
    let s = raw.trim();
    if let Some(percent) = s.strip_suffix('%') {
        let base = match axis {
            Axis::Horizontal => viewport.width,
            Axis::Vertical => viewport.height,
        };
        return parse_number(percent).map(|v| base * v / 100.0);
    }
    let (number, factor) = if let Some(n) = s.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix("pt") {
        (n, dpi / 72.0)
    } else if let Some(n) = s.strip_suffix("in") {
        (n, dpi)
    } else if let Some(n) = s.strip_suffix("cm") {
        (n, dpi / 2.54)
    } else if let Some(n) = s.strip_suffix("mm") {
        (n, dpi / 25.4)
    } else {
        (s, 1.0)
    };
    parse_number(number).map(|v| v * factor)
}

/// Splits on commas and whitespace and keeps every token that parses.
#[must_use]
pub fn parse_number_list(raw: &str) -> NumberList {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(parse_number)
        .collect()
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
