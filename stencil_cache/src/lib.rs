// Copyright 2025 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stencil_cache --heading-base-level=0

//! Stencil Cache: parse each shape asset once per process.
//!
//! [`ShapeCache`] maps a caller-chosen key (an asset id, a file name, ...)
//! to shared, immutable [`PathGeometry`]. Lookups are cheap and concurrent;
//! a miss runs the supplied loader outside of any lock and then publishes
//! the result, first writer wins.
//!
//! ```rust
//! use stencil_cache::ShapeCache;
//!
//! let cache = ShapeCache::new();
//! let svg = br#"<svg width="24" height="24"><circle cx="12" cy="12" r="10"/></svg>"#;
//! let a = cache.get_or_parse_svg("badge", svg).unwrap();
//! let b = cache.get_or_parse_svg("badge", b"not even looked at").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! Entries live as long as the cache; there is no eviction.

use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use stencil_path::PathGeometry;
use stencil_svg::ShapeParseError;
use tracing::debug;

/// Thread-safe get-or-parse store of shape geometry.
pub struct ShapeCache<K> {
    entries: RwLock<HashMap<K, Arc<PathGeometry>>>,
}

impl<K> Default for ShapeCache<K> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K> fmt::Debug for ShapeCache<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K> ShapeCache<K> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash> ShapeCache<K> {
    /// The stored geometry for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<PathGeometry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns `true` if `key` has been stored.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Returns the geometry stored for `key`, running `loader` to produce it
    /// on a miss.
    ///
    /// The loader runs without any lock held, so concurrent misses on the
    /// same key may each run it. Only the first result to be published is
    /// kept; every caller gets that same [`Arc`]. A loader error is returned
    /// as-is and nothing is stored.
    pub fn get_or_parse<E>(
        &self,
        key: K,
        loader: impl FnOnce() -> Result<PathGeometry, E>,
    ) -> Result<Arc<PathGeometry>, E> {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let parsed = Arc::new(loader()?);
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let stored = entries.entry(key).or_insert_with(|| {
            debug!("cached newly parsed shape");
            Arc::clone(&parsed)
        });
        Ok(Arc::clone(stored))
    }

    /// [`get_or_parse`](Self::get_or_parse) with [`stencil_svg::parse_svg`]
    /// as the loader. `markup` is only read on a miss.
    pub fn get_or_parse_svg(
        &self,
        key: K,
        markup: &[u8],
    ) -> Result<Arc<PathGeometry>, ShapeParseError> {
        self.get_or_parse(key, || stencil_svg::parse_svg(markup))
    }
}
