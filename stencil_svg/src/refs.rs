// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index of identified elements, used to expand `use` references.

use hashbrown::HashMap;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::attrs::Element;

/// One element captured by the reference pass.
#[derive(Clone, Debug)]
pub(crate) struct RefNode {
    pub(crate) element: Element,
    pub(crate) children: Vec<usize>,
}

/// Every element of a document in an arena, plus a lookup from `id` to the
/// element carrying it.
///
/// Subtrees are kept structured so a referenced element can be replayed
/// through the same handlers as the main pass, without re-serializing it.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdIndex {
    nodes: Vec<RefNode>,
    ids: HashMap<String, usize>,
}

impl IdIndex {
    /// Scans `input` for identified elements.
    ///
    /// This pass is tolerant: it stops quietly at the first malformed
    /// construct and keeps what it has seen so far. Structural errors are
    /// reported by the main pass.
    pub(crate) fn scan(input: &[u8]) -> Self {
        let mut index = Self::default();
        let mut reader = Reader::from_reader(input);
        reader.config_mut().expand_empty_elements = true;
        let mut buf = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(start)) => {
                    let Ok(element) = Element::from_start(&start) else {
                        debug!("reference pass stopped at malformed attribute");
                        break;
                    };
                    let node = index.nodes.len();
                    if let Some(id) = element.attrs.id() {
                        // First occurrence wins.
                        index.ids.entry(id.to_owned()).or_insert(node);
                    }
                    if let Some(&parent) = open.last() {
                        index.nodes[parent].children.push(node);
                    }
                    index.nodes.push(RefNode {
                        element,
                        children: Vec::new(),
                    });
                    open.push(node);
                }
                Ok(Event::End(_)) => {
                    open.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    debug!(error = %err, "reference pass stopped at malformed XML");
                    break;
                }
            }
            buf.clear();
        }
        index
    }

    /// Resolves an `href` (`#id` or a bare id) to an arena index.
    pub(crate) fn resolve(&self, href: &str) -> Option<usize> {
        let id = href.trim();
        let id = id.strip_prefix('#').unwrap_or(id);
        self.ids.get(id).copied()
    }

    pub(crate) fn node(&self, index: usize) -> Option<&RefNode> {
        self.nodes.get(index)
    }

    /// Number of distinct ids.
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}
