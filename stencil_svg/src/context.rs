// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal state of the main parser pass.

use kurbo::{Affine, BezPath, Point, Rect, Size};
use stencil_path::PathGeometry;
use tracing::debug;

use crate::attrs::Element;
use crate::error::{Diagnostic, IgnoredReason, ShapeParseError};
use crate::refs::IdIndex;
use crate::shapes;
use crate::transform::parse_transform;
use crate::units::{Axis, parse_length, parse_number_list};

/// Deepest chain of nested `use` expansions.
pub(crate) const MAX_USE_DEPTH: usize = 32;
/// Total `use` expansions per document.
pub(crate) const MAX_USE_EXPANSIONS: usize = 4096;

/// Scope stacks and counters for one parse.
///
/// `svg`, `g` and expanded `use` elements each open a scope holding an
/// accumulated path and the scope's own transform. Closing a scope maps its
/// path through that transform and appends it to the parent; closing the
/// outermost `svg` produces the final geometry.
#[derive(Debug)]
pub(crate) struct ParseContext<'a> {
    paths: Vec<BezPath>,
    transforms: Vec<Affine>,
    hidden_depth: usize,
    defs_depth: usize,
    size: Size,
    dpi: f64,
    refs: Option<&'a IdIndex>,
    expanding: Vec<usize>,
    expansions: usize,
    diagnostics: Vec<Diagnostic>,
    finished: Option<PathGeometry>,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(dpi: f64, refs: Option<&'a IdIndex>) -> Self {
        Self {
            paths: Vec::new(),
            transforms: Vec::new(),
            hidden_depth: 0,
            defs_depth: 0,
            size: Size::ZERO,
            dpi,
            refs,
            expanding: Vec::new(),
            expansions: 0,
            diagnostics: Vec::new(),
            finished: None,
        }
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.hidden_depth > 0
    }

    pub(crate) fn in_defs(&self) -> bool {
        self.defs_depth > 0
    }

    pub(crate) fn start_element(&mut self, element: &Element) {
        if self.in_defs() {
            if element.name == "defs" {
                self.defs_depth += 1;
            }
            return;
        }
        match element.name.as_str() {
            "svg" => self.start_svg(element),
            "defs" => self.defs_depth = 1,
            "g" => self.start_group(self.transform_of(element), element.is_display_none()),
            "use" => self.expand_use(element),
            "metadata" | "title" | "desc" => {}
            "rect" | "line" | "circle" | "ellipse" | "polygon" | "polyline" | "path" => {
                if !self.is_hidden()
                    && let Some(contour) = self.shape(element)
                {
                    self.append(contour, self.transform_of(element), &element.name);
                }
            }
            _ => {
                if !self.is_hidden() {
                    self.diagnose(Diagnostic::UnsupportedElement {
                        name: element.name.clone(),
                    });
                }
            }
        }
    }

    pub(crate) fn end_element(&mut self, name: &str) {
        if self.in_defs() {
            if name == "defs" {
                self.defs_depth -= 1;
            }
            return;
        }
        match name {
            "svg" => self.end_svg(),
            "g" => self.end_group(),
            _ => {}
        }
    }

    /// Hands back the geometry of the closed root, or
    /// [`ShapeParseError::MissingRoot`] if no `svg` element was closed.
    pub(crate) fn finish(self) -> Result<(PathGeometry, Vec<Diagnostic>), ShapeParseError> {
        match self.finished {
            Some(geometry) => Ok((geometry, self.diagnostics)),
            None => Err(ShapeParseError::MissingRoot),
        }
    }

    fn start_svg(&mut self, element: &Element) {
        let is_root = self.paths.is_empty();
        let mut width = self.length(element, "width").unwrap_or(0.0).round();
        let mut height = self.length(element, "height").unwrap_or(0.0).round();
        let mut transform = Affine::IDENTITY;
        if let Some(view_box) = self.view_box(element) {
            let origin = Affine::translate((-view_box.x0, -view_box.y0));
            if width < 0.1 || height < 0.1 {
                width = view_box.width();
                height = view_box.height();
                transform = origin;
            } else {
                transform = Affine::scale_non_uniform(
                    width / view_box.width(),
                    height / view_box.height(),
                ) * origin;
            }
        }
        if is_root {
            self.size = Size::new(width, height);
        }
        self.open_scope(transform);
    }

    fn end_svg(&mut self) {
        let Some(path) = self.close_scope() else {
            return;
        };
        match self.paths.last_mut() {
            Some(parent) => parent.extend(path),
            None => {
                debug!(
                    width = self.size.width,
                    height = self.size.height,
                    "closed svg root"
                );
                self.finished = Some(PathGeometry::new(path, self.size.width, self.size.height));
            }
        }
    }

    fn start_group(&mut self, transform: Affine, display_none: bool) {
        if self.hidden_depth > 0 {
            self.hidden_depth += 1;
        } else if display_none {
            self.hidden_depth = 1;
        }
        self.open_scope(transform);
    }

    fn end_group(&mut self) {
        if self.hidden_depth > 0 {
            self.hidden_depth -= 1;
        }
        if let Some(path) = self.close_scope()
            && let Some(parent) = self.paths.last_mut()
        {
            parent.extend(path);
        }
    }

    fn open_scope(&mut self, transform: Affine) {
        self.paths.push(BezPath::new());
        self.transforms.push(transform);
    }

    fn close_scope(&mut self) -> Option<BezPath> {
        let mut path = self.paths.pop()?;
        let transform = self.transforms.pop().unwrap_or(Affine::IDENTITY);
        path.apply_affine(transform);
        Some(path)
    }

    fn append(&mut self, mut contour: BezPath, transform: Affine, element: &str) {
        let Some(parent) = self.paths.last_mut() else {
            debug!(element, "shape outside of any svg element ignored");
            return;
        };
        contour.apply_affine(transform);
        parent.extend(contour);
    }

    /// Expands `use` as a group scope holding a replay of the referenced
    /// subtree. The group carries the `use` element's own `transform`
    /// followed by its `x`/`y` offset, and its `display`.
    fn expand_use(&mut self, element: &Element) {
        if self.is_hidden() {
            return;
        }
        let Some(href) = self.required(element, "xlink:href") else {
            return;
        };
        let target = self.refs.and_then(|refs| Some((refs, refs.resolve(href)?)));
        let Some((refs, index)) = target else {
            self.diagnose(Diagnostic::UnresolvedReference { href: href.into() });
            return;
        };
        if self.expanding.contains(&index) {
            self.diagnose(Diagnostic::ReferenceCycle { href: href.into() });
            return;
        }
        if self.expanding.len() >= MAX_USE_DEPTH || self.expansions >= MAX_USE_EXPANSIONS {
            self.diagnose(Diagnostic::ReferenceLimitExceeded { href: href.into() });
            return;
        }
        let x = self.length(element, "x").unwrap_or(0.0);
        let y = self.length(element, "y").unwrap_or(0.0);
        let transform = self.transform_of(element) * Affine::translate((x, y));

        self.expansions += 1;
        self.expanding.push(index);
        self.start_group(transform, element.is_display_none());
        self.replay(refs, index);
        self.end_group();
        self.expanding.pop();
    }

    fn replay(&mut self, refs: &'a IdIndex, index: usize) {
        let Some(node) = refs.node(index) else {
            return;
        };
        self.start_element(&node.element);
        for &child in &node.children {
            self.replay(refs, child);
        }
        self.end_element(&node.element.name);
    }

    /// Element-local contour for a basic shape, or `None` (with a
    /// diagnostic) if its attributes do not describe one.
    fn shape(&mut self, element: &Element) -> Option<BezPath> {
        match element.name.as_str() {
            "rect" => {
                let x = self.length(element, "x").unwrap_or(0.0);
                let y = self.length(element, "y").unwrap_or(0.0);
                let w = self.positive(element, "width")?;
                let h = self.positive(element, "height")?;
                let rx = self.length(element, "rx");
                let ry = self.length(element, "ry");
                Some(shapes::rect(Rect::new(x, y, x + w, y + h), rx, ry))
            }
            "line" => {
                let p0 = self.point(element, "x1", "y1");
                let p1 = self.point(element, "x2", "y2");
                Some(shapes::line(p0, p1))
            }
            "circle" => {
                let center = self.point(element, "cx", "cy");
                let r = self.positive(element, "r")?;
                Some(shapes::circle(center, r))
            }
            "ellipse" => {
                let center = self.point(element, "cx", "cy");
                let rx = self.positive(element, "rx")?;
                let ry = self.positive(element, "ry")?;
                Some(shapes::ellipse(center, rx, ry))
            }
            "polygon" | "polyline" => {
                let raw = self.required(element, "points")?;
                let contour = shapes::poly(&parse_number_list(raw), element.name == "polygon");
                if contour.is_none() {
                    self.ignore(element, "points", Some(raw), IgnoredReason::Unparsable);
                }
                contour
            }
            "path" => {
                let raw = self.required(element, "d")?;
                match BezPath::from_svg(raw) {
                    Ok(path) => Some(path),
                    Err(err) => {
                        debug!(error = %err, "path data rejected");
                        self.ignore(element, "d", Some(raw), IgnoredReason::Unparsable);
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn point(&mut self, element: &Element, x: &str, y: &str) -> Point {
        Point::new(
            self.length(element, x).unwrap_or(0.0),
            self.length(element, y).unwrap_or(0.0),
        )
    }

    fn transform_of(&self, element: &Element) -> Affine {
        element
            .attrs
            .get("transform")
            .map_or(Affine::IDENTITY, parse_transform)
    }

    fn view_box(&mut self, element: &Element) -> Option<Rect> {
        let raw = element.attrs.get("viewBox")?;
        match *parse_number_list(raw).as_slice() {
            [x, y, w, h] if w > 0.0 && h > 0.0 => Some(Rect::new(x, y, x + w, y + h)),
            _ => {
                self.ignore(element, "viewBox", Some(raw), IgnoredReason::Unparsable);
                None
            }
        }
    }

    /// Length in user units; present-but-unparsable values are diagnosed.
    fn length(&mut self, element: &Element, name: &str) -> Option<f64> {
        let raw = element.attrs.get(name)?;
        let value = parse_length(raw, Axis::of_attribute(name), self.size, self.dpi);
        if value.is_none() {
            self.ignore(element, name, Some(raw), IgnoredReason::Unparsable);
        }
        value
    }

    fn positive(&mut self, element: &Element, name: &str) -> Option<f64> {
        let raw = self.required(element, name)?;
        let value = self.length(element, name)?;
        if value > 0.0 {
            Some(value)
        } else {
            self.ignore(element, name, Some(raw), IgnoredReason::OutOfRange);
            None
        }
    }

    fn required<'e>(&mut self, element: &'e Element, name: &str) -> Option<&'e str> {
        let value = element.attrs.get(name);
        if value.is_none() {
            self.ignore(element, name, None, IgnoredReason::Missing);
        }
        value
    }

    fn ignore(
        &mut self,
        element: &Element,
        attribute: &str,
        value: Option<&str>,
        reason: IgnoredReason,
    ) {
        self.diagnose(Diagnostic::AttributeIgnored {
            element: element.name.clone(),
            attribute: attribute.into(),
            value: value.map(Into::into),
            reason,
        });
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        debug!(%diagnostic, "svg input partially ignored");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Shape};

    use super::ParseContext;
    use crate::attrs::Element;
    use crate::error::Diagnostic;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new("rect")
            .with_attr("x", x.to_string())
            .with_attr("y", y.to_string())
            .with_attr("width", w.to_string())
            .with_attr("height", h.to_string())
    }

    fn root(w: f64, h: f64) -> Element {
        Element::new("svg")
            .with_attr("width", w.to_string())
            .with_attr("height", h.to_string())
    }

    #[test]
    fn hidden_counter_tracks_nesting() {
        let mut ctx = ParseContext::new(72.0, None);
        ctx.start_element(&root(10.0, 10.0));
        ctx.start_element(&Element::new("g").with_attr("display", "none"));
        assert!(ctx.is_hidden());
        ctx.start_element(&Element::new("g"));
        ctx.end_element("g");
        assert!(ctx.is_hidden(), "inner group must not reveal the outer one");
        ctx.end_element("g");
        assert!(!ctx.is_hidden());
        ctx.start_element(&Element::new("g"));
        assert!(!ctx.is_hidden());
        ctx.end_element("g");
        ctx.end_element("svg");
    }

    #[test]
    fn hidden_groups_draw_nothing() {
        let mut ctx = ParseContext::new(72.0, None);
        ctx.start_element(&root(100.0, 100.0));
        ctx.start_element(&Element::new("g").with_attr("display", "none"));
        ctx.start_element(&Element::new("g"));
        ctx.start_element(&rect(0.0, 0.0, 5.0, 5.0));
        ctx.end_element("rect");
        ctx.end_element("g");
        ctx.end_element("g");
        ctx.start_element(&rect(10.0, 10.0, 5.0, 5.0));
        ctx.end_element("rect");
        ctx.end_element("svg");
        let (geometry, _) = ctx.finish().unwrap();
        assert_eq!(geometry.bounds(), Rect::new(10.0, 10.0, 15.0, 15.0));
    }

    #[test]
    fn nested_defs_are_skipped() {
        let mut ctx = ParseContext::new(72.0, None);
        ctx.start_element(&root(100.0, 100.0));
        ctx.start_element(&Element::new("defs"));
        ctx.start_element(&Element::new("defs"));
        ctx.end_element("defs");
        assert!(ctx.in_defs());
        ctx.start_element(&rect(0.0, 0.0, 50.0, 50.0));
        ctx.end_element("rect");
        ctx.end_element("defs");
        assert!(!ctx.in_defs());
        ctx.start_element(&rect(1.0, 1.0, 2.0, 2.0));
        ctx.end_element("rect");
        ctx.end_element("svg");
        let (geometry, diagnostics) = ctx.finish().unwrap();
        assert_eq!(geometry.bounds(), Rect::new(1.0, 1.0, 3.0, 3.0));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn percentages_resolve_against_document_size() {
        let mut ctx = ParseContext::new(72.0, None);
        ctx.start_element(&root(200.0, 100.0));
        ctx.start_element(
            &Element::new("rect")
                .with_attr("x", "50%")
                .with_attr("y", "50%")
                .with_attr("width", "25%")
                .with_attr("height", "10%"),
        );
        ctx.end_element("rect");
        ctx.end_element("svg");
        let (geometry, _) = ctx.finish().unwrap();
        assert_eq!(geometry.bounds(), Rect::new(100.0, 50.0, 150.0, 60.0));
    }

    #[test]
    fn unsupported_elements_are_reported_but_children_visited() {
        let mut ctx = ParseContext::new(72.0, None);
        ctx.start_element(&root(10.0, 10.0));
        ctx.start_element(&Element::new("a"));
        ctx.start_element(&rect(0.0, 0.0, 4.0, 4.0));
        ctx.end_element("rect");
        ctx.end_element("a");
        ctx.end_element("svg");
        let (geometry, diagnostics) = ctx.finish().unwrap();
        assert_eq!(geometry.path().bounding_box(), Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(
            diagnostics,
            [Diagnostic::UnsupportedElement { name: "a".into() }]
        );
    }

    #[test]
    fn finishing_without_root_fails() {
        let mut ctx = ParseContext::new(72.0, None);
        ctx.start_element(&Element::new("g"));
        ctx.end_element("g");
        assert!(ctx.finish().is_err());
    }
}
