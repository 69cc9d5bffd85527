// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ref-counted hover tracking.
//!
//! Several independent sources (mouse, touch contacts, the controller focus
//! highlight, several surfaces) can consider the same target hovered. The
//! [`HighlightTable`] keeps one count per target and reports a transition only
//! when the count crosses 0↔1.
//!
//! Each source holds at most one target. Reporting the same target for the
//! same source twice is a no-op, so duplicate updates within a frame can
//! neither double count nor decrement below zero.
//!
//! ```
//! use stagehand_event_state::highlight::{HighlightTable, HoverChange};
//!
//! let mut table: HighlightTable<u32, u8> = HighlightTable::new();
//! assert_eq!(table.set_hovered(0, Some(5)).as_slice(), &[HoverChange::Enter(5)]);
//! // A second source on the same target only bumps the count.
//! assert!(table.set_hovered(1, Some(5)).is_empty());
//! assert!(table.set_hovered(0, None).is_empty());
//! assert_eq!(table.set_hovered(1, None).as_slice(), &[HoverChange::Leave(5)]);
//! ```

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// A hover transition for one target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverChange<K> {
    /// Count went 0 → 1: `OnHover(true)`.
    Enter(K),
    /// Count went 1 → 0: `OnHover(false)`.
    Leave(K),
}

/// Hover refcounts keyed by target, fed by named sources.
#[derive(Clone, Debug)]
pub struct HighlightTable<K, S> {
    counts: HashMap<K, u32>,
    sources: HashMap<S, K>,
}

impl<K, S> Default for HighlightTable<K, S> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            sources: HashMap::new(),
        }
    }
}

impl<K, S> HighlightTable<K, S>
where
    K: Clone + Eq + Hash + Debug,
    S: Copy + Eq + Hash + Debug,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set what `source` hovers. Returns the 0↔1 transitions, leave first.
    pub fn set_hovered(&mut self, source: S, target: Option<K>) -> SmallVec<[HoverChange<K>; 2]> {
        let mut out = SmallVec::new();
        if self.sources.get(&source) == target.as_ref() {
            return out;
        }
        if let Some(old) = self.sources.remove(&source)
            && let Some(change) = self.decrement(old)
        {
            out.push(change);
        }
        if let Some(new) = target {
            self.sources.insert(source, new.clone());
            let count = self.counts.entry(new.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                out.push(HoverChange::Enter(new));
            }
        }
        out
    }

    /// Remove `source` entirely. Equivalent to `set_hovered(source, None)`.
    pub fn clear_source(&mut self, source: S) -> Option<HoverChange<K>> {
        self.set_hovered(source, None).into_iter().next()
    }

    /// Drop a destroyed target and every source pointing at it, silently.
    ///
    /// Returns `true` if the target had an entry.
    pub fn forget_target(&mut self, target: &K) -> bool {
        self.sources.retain(|_, k| k != target);
        self.counts.remove(target).is_some()
    }

    /// Current refcount for `target` (0 if not hovered).
    pub fn refcount(&self, target: &K) -> u32 {
        self.counts.get(target).copied().unwrap_or(0)
    }

    /// The target `source` currently hovers.
    pub fn hovered_by(&self, source: S) -> Option<&K> {
        self.sources.get(&source)
    }

    /// Number of targets currently hovered.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing is hovered.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn decrement(&mut self, target: K) -> Option<HoverChange<K>> {
        // Guard before decrement: a missing entry means nothing to release.
        let count = self.counts.get_mut(&target)?;
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&target);
            Some(HoverChange::Leave(target))
        } else {
            None
        }
    }
}
