// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parse failures and soft diagnostics.

use core::fmt;

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Fatal parse failure. No geometry is produced.
#[derive(Debug, Error)]
pub enum ShapeParseError {
    /// Reading the input failed.
    #[error("failed to read SVG input")]
    Io(#[from] std::io::Error),
    /// The document is not well-formed XML.
    #[error("malformed XML near byte {position}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        /// Underlying reader error.
        #[source]
        source: quick_xml::Error,
    },
    /// An attribute of a start tag could not be read.
    #[error("malformed attribute on <{element}> near byte {position}")]
    Attribute {
        /// Local name of the element carrying the attribute.
        element: String,
        /// Byte offset reported by the reader.
        position: u64,
        /// Underlying attribute error.
        #[source]
        source: AttrError,
    },
    /// Input ended while an element was still open.
    #[error("input ended inside <{element}>")]
    UnexpectedEof {
        /// Innermost element left open.
        element: String,
    },
    /// The document never closed an `<svg>` root, so there is no shape.
    #[error("document has no <svg> root element")]
    MissingRoot,
}

/// Why an attribute value was not used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoredReason {
    /// A required attribute was not present.
    Missing,
    /// The value could not be parsed.
    Unparsable,
    /// The value parsed but is outside the usable range.
    OutOfRange,
}

/// Something the parser skipped or repaired while still producing geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// An attribute was missing or unusable, so its element (or just the
    /// attribute) was skipped.
    AttributeIgnored {
        /// Local element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// The raw value, if there was one.
        value: Option<String>,
        /// What was wrong with it.
        reason: IgnoredReason,
    },
    /// An element the parser does not interpret. Its children are still
    /// visited.
    UnsupportedElement {
        /// Local element name.
        name: String,
    },
    /// A `use` reference did not name any element with an `id`.
    UnresolvedReference {
        /// The reference as written.
        href: String,
    },
    /// A `use` reference points back into its own expansion.
    ReferenceCycle {
        /// The reference as written.
        href: String,
    },
    /// Reference expansion hit its nesting or total-expansion limit.
    ReferenceLimitExceeded {
        /// The reference that was not expanded.
        href: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeIgnored {
                element,
                attribute,
                value: Some(value),
                reason,
            } => write!(
                f,
                "ignored {attribute}=\"{value}\" on <{element}> ({reason:?})"
            ),
            Self::AttributeIgnored {
                element,
                attribute,
                value: None,
                reason,
            } => write!(f, "ignored {attribute} on <{element}> ({reason:?})"),
            Self::UnsupportedElement { name } => write!(f, "unsupported element <{name}>"),
            Self::UnresolvedReference { href } => write!(f, "unresolved reference {href}"),
            Self::ReferenceCycle { href } => write!(f, "reference cycle through {href}"),
            Self::ReferenceLimitExceeded { href } => {
                write!(f, "reference expansion limit reached at {href}")
            }
        }
    }
}
