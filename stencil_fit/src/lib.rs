// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stencil_fit --heading-base-level=0

//! Stencil Fit: place an image and a shape mask inside a viewport.
//!
//! Given a viewport, an image size and a
//! [`PathGeometry`](stencil_path::PathGeometry), [`compute_fit`]
//! produces everything a renderer needs to draw the image masked by the
//! shape, with an optional border:
//!
//! - an image matrix that scales the image to *cover* the viewport (minus the
//!   border), centred on the overflowing axis;
//! - the shape *contained* in the same box, expressed in image pixel space so
//!   it can clip the untransformed image;
//! - a border path in viewport space, either an outline to stroke or a
//!   full-size shape to fill ([`BorderMode`]).
//!
//! [`BorderStyle`] turns caller configuration into a [`BorderPaint`], and
//! [`ShapeView`] keeps a fit cached across frames, recomputing it only when
//! an input actually changes. Drawing goes through the [`ShapePainter`]
//! trait so any backend can consume the result.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::{Affine, BezPath, Size};
//! use stencil_fit::{BorderPaint, BorderStyle, ShapePainter, ShapeView};
//!
//! struct Log(Vec<&'static str>);
//!
//! impl ShapePainter for Log {
//!     fn draw_border(&mut self, _: &BezPath, _: &BorderPaint) {
//!         self.0.push("border");
//!     }
//!     fn draw_image(&mut self, _: Affine, _: &BezPath) {
//!         self.0.push("image");
//!     }
//! }
//!
//! let svg = br#"<svg width="24" height="24"><circle cx="12" cy="12" r="12"/></svg>"#;
//! let shape = Arc::new(stencil_svg::parse_svg(svg).unwrap());
//! let mut view = ShapeView::new(shape).with_style(BorderStyle::default().with_width(2.0));
//! view.set_view_size(Size::new(64.0, 64.0));
//! view.set_image_size(Size::new(640.0, 480.0));
//!
//! let mut log = Log(Vec::new());
//! assert!(view.paint(&mut log));
//! assert_eq!(log.0, ["border", "image"]);
//! ```
//!
//! Border and image clip are independent paths and may overlap; no boolean
//! path operations are performed.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod fit;
mod style;
mod view;

pub use fit::{BorderMode, DegenerateFit, Fit, FitRequest, FitResult, compute_fit};
pub use style::{BorderPaint, BorderStyle};
pub use view::{ShapePainter, ShapeView};
