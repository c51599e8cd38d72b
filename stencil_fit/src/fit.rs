// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form placement of an image and a shape inside a viewport.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, BezPath, Size, Vec2};
use stencil_path::PathGeometry;
use tracing::debug;

/// How the border relates to the viewport edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderMode {
    /// The border is stroked along the shape outline, with the stroke centre
    /// line half a border width inside the viewport.
    #[default]
    Outline,
    /// The border is the shape filled at full viewport size, showing around
    /// the inset image.
    Filled,
}

/// Inputs to [`compute_fit`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FitRequest {
    /// Size of the area being drawn into.
    pub viewport: Size,
    /// Pixel size of the source image.
    pub image: Size,
    /// Border width in viewport units. Non-positive means no border.
    pub border_width: f64,
    /// How the border is laid out.
    pub border_mode: BorderMode,
    /// Use a square of side `min(width, height)`, centred in the viewport.
    pub is_square: bool,
}

impl FitRequest {
    /// A borderless request.
    #[must_use]
    pub fn new(viewport: Size, image: Size) -> Self {
        Self {
            viewport,
            image,
            ..Self::default()
        }
    }

    /// Sets the border width and mode.
    #[must_use]
    pub fn with_border(mut self, width: f64, mode: BorderMode) -> Self {
        self.border_width = width;
        self.border_mode = mode;
        self
    }

    /// Sets the square override.
    #[must_use]
    pub fn with_square(mut self, is_square: bool) -> Self {
        self.is_square = is_square;
        self
    }

    /// The viewport after the square override.
    #[must_use]
    pub fn effective_viewport(&self) -> Size {
        if self.is_square {
            let side = self.viewport.width.min(self.viewport.height);
            Size::new(side, side)
        } else {
            self.viewport
        }
    }

    /// Top-left corner of the [effective viewport](Self::effective_viewport)
    /// within the full viewport, rounded to whole units.
    #[must_use]
    pub fn viewport_origin(&self) -> Vec2 {
        let effective = self.effective_viewport();
        Vec2::new(
            round_half_up((self.viewport.width - effective.width) * 0.5),
            round_half_up((self.viewport.height - effective.height) * 0.5),
        )
    }

    fn border(&self) -> f64 {
        if self.border_width.is_finite() {
            self.border_width.max(0.0)
        } else {
            0.0
        }
    }
}

/// Why a fit produced nothing drawable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegenerateFit {
    /// The viewport, minus borders, has no area.
    EmptyViewport,
    /// The image has no pixels.
    EmptyImage,
    /// The shape has no usable intrinsic size.
    EmptyShape,
}

/// Matrices and paths for drawing one shaped image.
#[derive(Clone, Debug, PartialEq)]
pub struct FitResult {
    /// Maps image pixels into the viewport (cover fit, inset by the border).
    pub image_matrix: Affine,
    /// Shape outline in image pixel space; clip the untransformed image to
    /// this, then draw through [`image_matrix`](Self::image_matrix).
    pub shape_path: BezPath,
    /// Border outline in viewport space, if there is a border.
    pub border_path: Option<BezPath>,
    /// Viewport the result was computed for (after the square override).
    pub viewport: Size,
    /// Where [`viewport`](Self::viewport) sits in the full viewport.
    pub origin: Vec2,
}

impl FitResult {
    /// The clip path mapped back into viewport space.
    #[must_use]
    pub fn shape_path_in_view(&self) -> BezPath {
        let mut path = self.shape_path.clone();
        path.apply_affine(self.image_matrix);
        path
    }
}

/// Outcome of [`compute_fit`].
#[derive(Clone, Debug, PartialEq)]
pub enum Fit {
    /// Draw the image clipped to the shape.
    Shaped(FitResult),
    /// Nothing to clip; callers draw the image unshaped.
    NoOp(DegenerateFit),
}

impl Fit {
    /// The result, if the fit produced one.
    #[must_use]
    pub fn shaped(&self) -> Option<&FitResult> {
        match self {
            Self::Shaped(result) => Some(result),
            Self::NoOp(_) => None,
        }
    }

    /// Returns `true` for [`Fit::NoOp`].
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp(_))
    }
}

/// Computes image, clip and border placement for `shape` in a viewport.
///
/// The image is scaled to cover the viewport minus the border on each side
/// and centred along its overflowing axis. The shape is scaled to fit
/// inside the same box and centred. Both offsets are rounded to whole units
/// so repeated layouts land on the same pixels.
///
/// ```rust
/// use kurbo::{Rect, Shape, Size};
/// use stencil_fit::{FitRequest, compute_fit};
/// use stencil_path::PathGeometry;
///
/// let shape = PathGeometry::new(Rect::new(0.0, 0.0, 50.0, 50.0).to_path(0.1), 50.0, 50.0);
/// let request = FitRequest::new(Size::new(200.0, 100.0), Size::new(100.0, 100.0));
/// let result = compute_fit(&request, &shape);
/// let fit = result.shaped().unwrap();
/// // The shape is scaled by 2 and centred horizontally.
/// assert_eq!(fit.shape_path_in_view().bounding_box(), Rect::new(50.0, 0.0, 150.0, 100.0));
/// ```
#[must_use]
pub fn compute_fit(request: &FitRequest, shape: &PathGeometry) -> Fit {
    match try_fit(request, shape) {
        Ok(result) => Fit::Shaped(result),
        Err(reason) => {
            debug!(?reason, "shape fit skipped");
            Fit::NoOp(reason)
        }
    }
}

fn try_fit(request: &FitRequest, shape: &PathGeometry) -> Result<FitResult, DegenerateFit> {
    let viewport = request.effective_viewport();
    let border = request.border();
    let draw = Size::new(
        round_half_up(viewport.width - 2.0 * border),
        round_half_up(viewport.height - 2.0 * border),
    );
    if !(draw.width > 0.0 && draw.height > 0.0) {
        return Err(DegenerateFit::EmptyViewport);
    }
    let image = request.image;
    if !(image.is_finite() && image.width > 0.0 && image.height > 0.0) {
        return Err(DegenerateFit::EmptyImage);
    }
    if shape.is_degenerate() {
        return Err(DegenerateFit::EmptyShape);
    }

    let origin = request.viewport_origin();
    let inset = origin + Vec2::new(border, border);
    let image_matrix = Affine::translate(inset) * cover(image, draw);
    let (scale, offset) = contain(shape.size(), draw, 0.0);
    let to_view = Affine::translate(offset + inset) * Affine::scale(scale);
    let shape_path = shape.transformed(image_matrix.inverse() * to_view);

    let border_path = (border > 0.0).then(|| {
        let (frame, d) = match request.border_mode {
            BorderMode::Outline => (
                Size::new(viewport.width - border, viewport.height - border),
                border / 2.0,
            ),
            BorderMode::Filled => (viewport, 0.0),
        };
        let (scale, offset) = contain(shape.size(), frame, d);
        shape.transformed(Affine::translate(origin + offset) * Affine::scale(scale))
    });

    Ok(FitResult {
        image_matrix,
        shape_path,
        border_path,
        viewport,
        origin,
    })
}

/// Aspect-fill: scale `image` to cover `frame`, centring the overflow.
fn cover(image: Size, frame: Size) -> Affine {
    let (scale, tx, ty) = if image.width * frame.height > frame.width * image.height {
        let scale = frame.height / image.height;
        let tx = round_half_up((frame.width / scale - image.width) * 0.5);
        (scale, tx, 0.0)
    } else {
        let scale = frame.width / image.width;
        let ty = round_half_up((frame.height / scale - image.height) * 0.5);
        (scale, 0.0, ty)
    };
    Affine::scale(scale) * Affine::translate((tx, ty))
}

/// Aspect-fit: uniform scale of `content` into `frame`, and the rounded
/// offset that centres it, shifted by `d` on both axes before rounding.
fn contain(content: Size, frame: Size, d: f64) -> (f64, Vec2) {
    let scale = (frame.width / content.width).min(frame.height / content.height);
    let offset = Vec2::new(
        round_half_up((frame.width - content.width * scale) * 0.5 + d),
        round_half_up((frame.height - content.height * scale) * 0.5 + d),
    );
    (scale, offset)
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, BezPath, Point, Rect, Shape, Size, Vec2};
    use stencil_path::PathGeometry;

    use super::{BorderMode, DegenerateFit, Fit, FitRequest, compute_fit, cover, round_half_up};

    fn square_shape(side: f64) -> PathGeometry {
        PathGeometry::new(Rect::new(0.0, 0.0, side, side).to_path(0.1), side, side)
    }

    fn near(a: Rect, b: Rect) -> bool {
        (a.x0 - b.x0).abs() < 1e-9
            && (a.y0 - b.y0).abs() < 1e-9
            && (a.x1 - b.x1).abs() < 1e-9
            && (a.y1 - b.y1).abs() < 1e-9
    }

    fn shaped(fit: Fit) -> super::FitResult {
        match fit {
            Fit::Shaped(result) => result,
            Fit::NoOp(reason) => panic!("expected a shaped fit, got {reason:?}"),
        }
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(-25.0), -25.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(1.49), 1.0);
    }

    #[test]
    fn cover_fills_wide_viewport() {
        let m = cover(Size::new(100.0, 100.0), Size::new(200.0, 100.0));
        assert_eq!(m, Affine::scale(2.0) * Affine::translate((0.0, -25.0)));
        // Image corners land outside the frame vertically, flush horizontally.
        assert_eq!(m * Point::new(0.0, 0.0), Point::new(0.0, -50.0));
        assert_eq!(m * Point::new(100.0, 100.0), Point::new(200.0, 150.0));
    }

    #[test]
    fn cover_fills_tall_viewport() {
        let m = cover(Size::new(200.0, 100.0), Size::new(100.0, 100.0));
        assert_eq!(m, Affine::scale(1.0) * Affine::translate((-50.0, 0.0)));
    }

    #[test]
    fn shape_is_contained_and_centred() {
        let request = FitRequest::new(Size::new(200.0, 100.0), Size::new(100.0, 100.0));
        let result = shaped(compute_fit(&request, &square_shape(50.0)));
        assert_eq!(
            result.image_matrix,
            Affine::scale(2.0) * Affine::translate((0.0, -25.0))
        );
        assert!(near(
            result.shape_path_in_view().bounding_box(),
            Rect::new(50.0, 0.0, 150.0, 100.0)
        ));
        // In image space the clip covers the middle of the image.
        assert!(near(
            result.shape_path.bounding_box(),
            Rect::new(25.0, 25.0, 75.0, 75.0)
        ));
        assert!(result.border_path.is_none());
    }

    #[test]
    fn square_override_centres_the_smaller_side() {
        let request =
            FitRequest::new(Size::new(300.0, 120.0), Size::new(10.0, 10.0)).with_square(true);
        let result = shaped(compute_fit(&request, &square_shape(12.0)));
        assert_eq!(result.viewport, Size::new(120.0, 120.0));
        assert_eq!(result.origin, Vec2::new(90.0, 0.0));
        assert_eq!(result.image_matrix * Point::ORIGIN, Point::new(90.0, 0.0));
        assert!(near(
            result.shape_path_in_view().bounding_box(),
            Rect::new(90.0, 0.0, 210.0, 120.0)
        ));
    }

    #[test]
    fn square_override_centres_tall_viewports_with_border() {
        let request = FitRequest::new(Size::new(100.0, 300.0), Size::new(10.0, 10.0))
            .with_square(true)
            .with_border(10.0, BorderMode::Outline);
        let result = shaped(compute_fit(&request, &square_shape(10.0)));
        assert_eq!(result.origin, Vec2::new(0.0, 100.0));
        assert!(near(
            result.shape_path_in_view().bounding_box(),
            Rect::new(10.0, 110.0, 90.0, 190.0)
        ));
        let border = result.border_path.unwrap().bounding_box();
        assert!(near(border, Rect::new(5.0, 105.0, 95.0, 195.0)));
    }

    #[test]
    fn without_square_override_origin_is_zero() {
        let request = FitRequest::new(Size::new(300.0, 120.0), Size::new(10.0, 10.0));
        assert_eq!(request.viewport_origin(), Vec2::ZERO);
    }

    #[test]
    fn border_insets_image_and_clip() {
        let request = FitRequest::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0))
            .with_border(10.0, BorderMode::Outline);
        let result = shaped(compute_fit(&request, &square_shape(10.0)));
        assert_eq!(result.image_matrix * Point::ORIGIN, Point::new(10.0, 10.0));
        assert!(near(
            result.shape_path_in_view().bounding_box(),
            Rect::new(10.0, 10.0, 90.0, 90.0)
        ));
    }

    #[test]
    fn outline_border_sits_half_a_width_inside() {
        let request = FitRequest::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0))
            .with_border(10.0, BorderMode::Outline);
        let result = shaped(compute_fit(&request, &square_shape(10.0)));
        let border = result.border_path.unwrap().bounding_box();
        // Fits into 90x90 and is shifted by 5, so the stroke centre line is
        // 5 units in from every edge.
        assert!(near(border, Rect::new(5.0, 5.0, 95.0, 95.0)));
    }

    #[test]
    fn filled_border_covers_whole_viewport() {
        let request = FitRequest::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0))
            .with_border(10.0, BorderMode::Filled);
        let result = shaped(compute_fit(&request, &square_shape(10.0)));
        let border = result.border_path.unwrap().bounding_box();
        assert!(near(border, Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn degenerate_inputs_are_noops() {
        let shape = square_shape(10.0);
        let empty_view = FitRequest::new(Size::new(10.0, 10.0), Size::new(5.0, 5.0))
            .with_border(5.0, BorderMode::Outline);
        assert_eq!(
            compute_fit(&empty_view, &shape),
            Fit::NoOp(DegenerateFit::EmptyViewport)
        );
        let empty_image = FitRequest::new(Size::new(10.0, 10.0), Size::ZERO);
        assert_eq!(
            compute_fit(&empty_image, &shape),
            Fit::NoOp(DegenerateFit::EmptyImage)
        );
        let ok = FitRequest::new(Size::new(10.0, 10.0), Size::new(5.0, 5.0));
        let empty_shape = PathGeometry::new(BezPath::new(), 0.0, 0.0);
        assert!(compute_fit(&ok, &empty_shape).is_noop());
        assert!(compute_fit(&ok, &shape).shaped().is_some());
    }

    #[test]
    fn negative_border_is_no_border() {
        let request = FitRequest::new(Size::new(40.0, 40.0), Size::new(40.0, 40.0))
            .with_border(-3.0, BorderMode::Filled);
        let result = shaped(compute_fit(&request, &square_shape(4.0)));
        assert!(result.border_path.is_none());
        assert_eq!(result.image_matrix, Affine::IDENTITY);
    }
}
