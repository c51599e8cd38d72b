// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stencil_path --heading-base-level=0

//! Stencil Path: immutable shape geometry with an intrinsic size.
//!
//! A [`PathGeometry`] is the output of parsing a shape asset: a set of
//! contours stored as a [`kurbo::BezPath`], together with the width and
//! height the shape was authored for. The intrinsic size is what fitting
//! code scales against, so it is fixed when the geometry is built:
//!
//! - If the source declared a positive width and height, those are kept.
//! - Otherwise the size is derived from the contour bounding box (rounded
//!   up) and the contours are shifted so their top-left sits near the
//!   origin.
//!
//! Geometry is never mutated after construction. Consumers that need the
//! contours in another coordinate space call [`PathGeometry::transformed`],
//! which always returns a fresh copy.
//!
//! ```rust
//! use kurbo::{Affine, BezPath, Rect, Shape};
//! use stencil_path::PathGeometry;
//!
//! let contour = Rect::new(10.5, 20.0, 35.0, 44.0).to_path(0.1);
//! // No declared size: derive it from the bounds.
//! let shape = PathGeometry::new(contour, 0.0, 0.0);
//! assert_eq!((shape.width(), shape.height()), (25.0, 24.0));
//!
//! let doubled: BezPath = shape.transformed(Affine::scale(2.0));
//! assert_eq!(doubled.bounding_box().height(), 48.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, BezPath, Rect, Shape, Size, Vec2};

/// Parsed shape contours plus the intrinsic size they were authored for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathGeometry {
    path: BezPath,
    width: f64,
    height: f64,
}

impl PathGeometry {
    /// Builds geometry from `path` and the declared `width`/`height`.
    ///
    /// When either declared dimension is not strictly positive, the size is
    /// derived from the path's bounding box instead: each extent is rounded
    /// up, and the path is translated by `(-floor(left), -round(top))` so
    /// the shape starts at the origin without clipping fractional edges.
    #[must_use]
    pub fn new(mut path: BezPath, width: f64, height: f64) -> Self {
        if width > 0.0 && height > 0.0 {
            return Self {
                path,
                width,
                height,
            };
        }
        let bounds = path.bounding_box();
        let offset = Vec2::new(-bounds.x0.floor(), -bounds.y0.round());
        if offset != Vec2::ZERO {
            path.apply_affine(Affine::translate(offset));
        }
        Self {
            path,
            width: bounds.width().ceil(),
            height: bounds.height().ceil(),
        }
    }

    /// The contours in shape-local coordinates.
    #[must_use]
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Intrinsic width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Intrinsic height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Intrinsic size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Tight bounding box of the contours (not the intrinsic size).
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }

    /// Returns `true` if the intrinsic size cannot be fitted into anything.
    ///
    /// This is the case for empty documents, or shapes whose declared or
    /// derived extent is zero, negative or not finite in either axis.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Returns a copy of the contours mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: Affine) -> BezPath {
        let mut out = self.path.clone();
        out.apply_affine(transform);
        out
    }

    /// Serializes the contours as SVG path data, for debugging.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }
}
