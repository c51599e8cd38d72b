// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Border appearance.

use kurbo::{Cap, Join, Size, Stroke};
use peniko::Color;

use crate::fit::{BorderMode, FitRequest};

/// Caller-owned border configuration.
///
/// `cap`, `join` and `miter_limit` left as `None` keep the stroke defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderStyle {
    /// Border color. Its own alpha is replaced by [`alpha`](Self::alpha).
    pub color: Color,
    /// Border width in viewport units.
    pub width: f64,
    /// Opacity in `0.0..=1.0`; out-of-range values are clamped when painting.
    pub alpha: f32,
    /// Force a square viewport.
    pub square: bool,
    /// Outline or filled border.
    pub mode: BorderMode,
    /// Line cap for outline borders.
    pub cap: Option<Cap>,
    /// Line join for outline borders.
    pub join: Option<Join>,
    /// Miter limit for outline borders; ignored unless positive.
    pub miter_limit: Option<f64>,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 0.0,
            alpha: 1.0,
            square: false,
            mode: BorderMode::Outline,
            cap: None,
            join: None,
            miter_limit: None,
        }
    }
}

/// Resolved border paint.
#[derive(Clone, Debug, PartialEq)]
pub enum BorderPaint {
    /// Stroke the border path.
    Stroke {
        /// Final color, alpha applied.
        color: Color,
        /// Stroke parameters.
        stroke: Stroke,
    },
    /// Fill the border path.
    Fill {
        /// Final color, alpha applied.
        color: Color,
    },
}

impl BorderPaint {
    /// The paint color.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Stroke { color, .. } | Self::Fill { color } => *color,
        }
    }
}

impl BorderStyle {
    /// Sets the width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the opacity, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = clamp_alpha(alpha);
        self
    }

    /// Sets the border mode.
    #[must_use]
    pub fn with_mode(mut self, mode: BorderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the square override.
    #[must_use]
    pub fn with_square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    /// Sets cap and join for outline borders.
    #[must_use]
    pub fn with_stroke_style(mut self, cap: Option<Cap>, join: Option<Join>) -> Self {
        self.cap = cap;
        self.join = join;
        self
    }

    /// Sets the miter limit for outline borders.
    #[must_use]
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = Some(limit);
        self
    }

    /// Builds the fit request this style implies for a viewport and image.
    #[must_use]
    pub fn request(&self, viewport: Size, image: Size) -> FitRequest {
        FitRequest {
            viewport,
            image,
            border_width: self.width,
            border_mode: self.mode,
            is_square: self.square,
        }
    }

    /// Resolves the paint for the border path.
    #[must_use]
    pub fn paint(&self) -> BorderPaint {
        let color = self.color.with_alpha(clamp_alpha(self.alpha));
        match self.mode {
            BorderMode::Outline => {
                let mut stroke = Stroke::new(self.width);
                if let Some(cap) = self.cap {
                    stroke.start_cap = cap;
                    stroke.end_cap = cap;
                }
                if let Some(join) = self.join {
                    stroke.join = join;
                }
                if let Some(limit) = self.miter_limit.filter(|l| *l > 0.0) {
                    stroke.miter_limit = limit;
                }
                BorderPaint::Stroke { color, stroke }
            }
            BorderMode::Filled => BorderPaint::Fill { color },
        }
    }
}

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        1.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}
