// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stencil_svg --heading-base-level=0

//! Stencil SVG: turn a small SVG document into shape geometry.
//!
//! This crate reads the subset of SVG used for mask and outline assets and
//! produces a single [`PathGeometry`]: the union of every visible basic
//! shape, mapped into the root coordinate system, plus the intrinsic size
//! of the document.
//!
//! Supported input:
//!
//! - Containers: `svg` (with `width`, `height`, `viewBox`), `g` (with
//!   `transform` and `display="none"`), `defs` (skipped), and `use`
//!   referencing any element with an `id`.
//! - Shapes: `rect` (with `rx`/`ry`), `line`, `circle`, `ellipse`,
//!   `polygon`, `polyline`, `path`.
//! - Lengths in `px`, `pt`, `in`, `cm`, `mm` or `%`, converted at a
//!   configurable resolution (see [`ParseOptions::dpi`]).
//!
//! Styling, clipping, text, images and gradients are not interpreted.
//! Elements and attributes the parser cannot use are skipped and reported
//! as [`Diagnostic`]s; only structural failures are errors.
//!
//! ```rust
//! use kurbo::{Rect, Shape};
//!
//! let svg = br#"<svg width="48" height="48" viewBox="0 0 24 24">
//!     <rect x="2" y="2" width="20" height="20" rx="4"/>
//! </svg>"#;
//! let shape = stencil_svg::parse_svg(svg).unwrap();
//! assert_eq!((shape.width(), shape.height()), (48.0, 48.0));
//! let b = shape.bounds();
//! assert!((b.x0 - 4.0).abs() < 1e-9 && (b.x1 - 44.0).abs() < 1e-9);
//! ```
//!
//! Parsing runs in up to two passes over the same bytes. When the document
//! contains `use` elements, a tolerant first pass indexes every element with
//! an `id`; the main pass then replays referenced subtrees in place.

mod attrs;
mod context;
mod error;
mod refs;
mod shapes;
mod transform;
mod units;

use std::io::Read;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use stencil_path::PathGeometry;
use tracing::{debug, warn};

pub use error::{Diagnostic, IgnoredReason, ShapeParseError};
pub use transform::parse_transform;
pub use units::{Axis, DEFAULT_DPI, NumberList, parse_length, parse_number_list};

use attrs::Element;
use context::ParseContext;
use refs::IdIndex;

/// Parser configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParseOptions {
    /// Resolution for physical units (`pt`, `in`, `cm`, `mm`).
    pub dpi: f64,
    /// Whether `use` elements are expanded. When off, they are reported as
    /// unresolved and skipped.
    pub resolve_references: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            resolve_references: true,
        }
    }
}

/// Geometry plus everything that was skipped to produce it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedShape {
    /// The parsed shape.
    pub geometry: PathGeometry,
    /// Soft problems, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Reusable SVG shape parser.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvgShapeParser {
    options: ParseOptions,
}

impl SvgShapeParser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a complete document.
    ///
    /// Parsing is deterministic: the same bytes always give equal results.
    pub fn parse(&self, input: &[u8]) -> Result<ParsedShape, ShapeParseError> {
        let refs = (self.options.resolve_references && mentions_use(input)).then(|| {
            let index = IdIndex::scan(input);
            debug!(ids = index.len(), "indexed referenceable elements");
            index
        });
        let mut context = ParseContext::new(self.options.dpi, refs.as_ref());
        let result = walk(input, &mut context).and_then(|()| context.finish());
        match result {
            Ok((geometry, diagnostics)) => Ok(ParsedShape {
                geometry,
                diagnostics,
            }),
            Err(err) => {
                warn!(error = %err, "failed to parse svg shape");
                Err(err)
            }
        }
    }

    /// Reads `reader` to the end and parses the result.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<ParsedShape, ShapeParseError> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        self.parse(&input)
    }
}

/// Parses `input` with default options and returns only the geometry.
pub fn parse_svg(input: &[u8]) -> Result<PathGeometry, ShapeParseError> {
    SvgShapeParser::default()
        .parse(input)
        .map(|parsed| parsed.geometry)
}

/// Like [`parse_svg`], reading from `reader`.
pub fn parse_svg_reader<R: Read>(reader: R) -> Result<PathGeometry, ShapeParseError> {
    SvgShapeParser::default()
        .parse_reader(reader)
        .map(|parsed| parsed.geometry)
}

fn mentions_use(input: &[u8]) -> bool {
    input
        .windows(4)
        .any(|w| matches!(w[0], b'<' | b':') && &w[1..] == b"use")
}

/// Main pass: feeds start and end tags to `context`.
fn walk(input: &[u8], context: &mut ParseContext<'_>) -> Result<(), ShapeParseError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().expand_empty_elements = true;
    let mut buf = Vec::new();
    let mut open: Vec<String> = Vec::new();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| ShapeParseError::Xml {
                position: reader.error_position(),
                source,
            })?;
        match event {
            Event::Start(start) => {
                let element = Element::from_start(&start)
                    .map_err(|err| attribute_error(&start, reader.buffer_position(), err))?;
                context.start_element(&element);
                open.push(element.name);
            }
            Event::End(end) => {
                context.end_element(&attrs::lossy(end.local_name().as_ref()));
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    match open.pop() {
        Some(element) => Err(ShapeParseError::UnexpectedEof { element }),
        None => Ok(()),
    }
}

fn attribute_error(
    start: &BytesStart<'_>,
    position: u64,
    err: quick_xml::Error,
) -> ShapeParseError {
    match err {
        quick_xml::Error::InvalidAttr(source) => ShapeParseError::Attribute {
            element: attrs::lossy(start.local_name().as_ref()),
            position,
            source,
        },
        source => ShapeParseError::Xml { position, source },
    }
}
