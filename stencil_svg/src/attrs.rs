// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured elements and attribute lookup.

use std::borrow::Cow;

use quick_xml::events::BytesStart;

/// Attribute list of one element, in document order.
///
/// Names are stored as written (including any namespace prefix); values are
/// already unescaped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Looks up an attribute value by name.
    ///
    /// Lookup falls back through namespace spellings:
    /// 1. the exact qualified name (`xlink:href`);
    /// 2. the local part of the requested name (`href`);
    /// 3. for a prefixed request, any attribute with the same local part
    ///    under another prefix (`x:href`).
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.find(|k| k == name) {
            return Some(value);
        }
        let local = local_part(name);
        if local.len() == name.len() {
            return None;
        }
        self.find(|k| k == local)
            .or_else(|| self.find(|k| local_part(k) == local))
    }

    /// Value of the `id` attribute. Only the attribute name ignores case;
    /// the value is returned as written.
    pub(crate) fn id(&self) -> Option<&str> {
        self.find(|k| k.eq_ignore_ascii_case("id"))
    }

    fn find(&self, mut pred: impl FnMut(&str) -> bool) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| pred(k))
            .map(|(_, v)| v.as_str())
    }
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// One element start tag: local name plus attributes.
///
/// Both parser passes work on this owned form, so replaying a referenced
/// subtree goes through exactly the same handlers as the document itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Element {
    /// Local element name (`rect` for both `<rect>` and `<svg:rect>`).
    pub(crate) name: String,
    pub(crate) attrs: Attributes,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(name, value);
        self
    }

    /// Returns `true` if the element carries `display="none"`.
    pub(crate) fn is_display_none(&self) -> bool {
        self.attrs.get("display").map(str::trim) == Some("none")
    }

    pub(crate) fn from_start(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let mut element = Self::new(lossy(start.local_name().as_ref()));
        for attr in start.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?;
            element
                .attrs
                .push(lossy(attr.key.as_ref()), value.into_owned());
        }
        Ok(element)
    }
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_owned(),
        Cow::Owned(s) => s,
    }
}
