// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-fit state for a shaped image, and the drawing seam.

use alloc::sync::Arc;

use kurbo::{Affine, BezPath, Size};
use stencil_path::PathGeometry;

use crate::fit::{BorderMode, Fit, FitRequest, compute_fit};
use crate::style::{BorderPaint, BorderStyle};

/// Receives the draw calls for one shaped image.
pub trait ShapePainter {
    /// Paints the border outline in viewport space.
    fn draw_border(&mut self, path: &BezPath, paint: &BorderPaint);

    /// Draws the image through `transform`, clipped to `clip` given in image
    /// pixel space.
    fn draw_image(&mut self, transform: Affine, clip: &BezPath);
}

/// A shape, a border style and the sizes it is laid out for.
///
/// The fit is computed lazily and kept until an input that affects it
/// changes. Setting a value equal to the current one keeps the cached fit.
#[derive(Clone, Debug)]
pub struct ShapeView {
    shape: Arc<PathGeometry>,
    style: BorderStyle,
    view_size: Size,
    image_size: Size,
    fit: Option<Fit>,
}

impl ShapeView {
    /// Creates a view with the default border style and empty sizes.
    #[must_use]
    pub fn new(shape: Arc<PathGeometry>) -> Self {
        Self {
            shape,
            style: BorderStyle::default(),
            view_size: Size::ZERO,
            image_size: Size::ZERO,
            fit: None,
        }
    }

    /// Sets the border style.
    #[must_use]
    pub fn with_style(mut self, style: BorderStyle) -> Self {
        self.set_style(style);
        self
    }

    /// The shape being fitted.
    #[must_use]
    pub fn shape(&self) -> &Arc<PathGeometry> {
        &self.shape
    }

    /// The border style.
    #[must_use]
    pub fn style(&self) -> &BorderStyle {
        &self.style
    }

    /// Last viewport size.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Current image size.
    #[must_use]
    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// Returns `true` while a computed fit is cached.
    #[must_use]
    pub fn has_fit(&self) -> bool {
        self.fit.is_some()
    }

    /// The request the next fit is computed from.
    #[must_use]
    pub fn request(&self) -> FitRequest {
        self.style.request(self.view_size, self.image_size)
    }

    /// Sets the viewport size.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size != size {
            self.view_size = size;
            self.fit = None;
        }
    }

    /// Sets the image pixel size.
    pub fn set_image_size(&mut self, size: Size) {
        if self.image_size != size {
            self.image_size = size;
            self.fit = None;
        }
    }

    /// Sets the border width.
    pub fn set_border_width(&mut self, width: f64) {
        if self.style.width != width {
            self.style.width = width;
            self.fit = None;
        }
    }

    /// Sets the border mode.
    pub fn set_border_mode(&mut self, mode: BorderMode) {
        if self.style.mode != mode {
            self.style.mode = mode;
            self.fit = None;
        }
    }

    /// Sets the square override.
    pub fn set_square(&mut self, square: bool) {
        if self.style.square != square {
            self.style.square = square;
            self.fit = None;
        }
    }

    /// Replaces the shape. The same `Arc` keeps the cached fit.
    pub fn set_shape(&mut self, shape: Arc<PathGeometry>) {
        if !Arc::ptr_eq(&self.shape, &shape) {
            self.shape = shape;
            self.fit = None;
        }
    }

    /// Replaces the style. Only width, mode and the square flag affect the
    /// fit; paint-only changes keep it.
    pub fn set_style(&mut self, style: BorderStyle) {
        if self.style.width != style.width
            || self.style.mode != style.mode
            || self.style.square != style.square
        {
            self.fit = None;
        }
        self.style = style;
    }

    /// The fit for the current inputs, computing it if needed.
    pub fn fit(&mut self) -> &Fit {
        let request = self.request();
        let shape = &self.shape;
        self.fit
            .get_or_insert_with(|| compute_fit(&request, shape))
    }

    /// Draws the border, then the clipped image.
    ///
    /// Returns `false` without drawing when the fit is a no-op; the host
    /// should then draw the image unshaped.
    pub fn paint(&mut self, painter: &mut impl ShapePainter) -> bool {
        let paint = self.style.paint();
        let Fit::Shaped(result) = self.fit() else {
            return false;
        };
        if let Some(border) = &result.border_path {
            painter.draw_border(border, &paint);
        }
        painter.draw_image(result.image_matrix, &result.shape_path);
        true
    }
}
