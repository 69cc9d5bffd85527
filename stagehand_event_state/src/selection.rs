// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global selection with deferred switching.
//!
//! [`SelectionState::select`] only records the request: the outgoing target is
//! told it lost the selection right away, but the new selection takes effect
//! when the host calls [`SelectionState::commit`] at the end of the frame.
//! A key event that changes the selection therefore cannot be reprocessed by
//! the newly selected target within the same frame.
//!
//! Requests within one frame are last-wins, and a request equal to the
//! effective (pending or current) selection is a no-op.
//!
//! ```
//! use stagehand_event_state::selection::{SelectionChange, SelectionState};
//!
//! let mut sel: SelectionState<u32> = SelectionState::new();
//! assert_eq!(sel.select(Some(4), false), None);
//! assert_eq!(sel.select(Some(4), false), None);
//! assert_eq!(sel.current(), None);
//! assert_eq!(
//!     sel.commit(),
//!     Some(SelectionChange::Selected { target: 4, focus_highlight: false })
//! );
//! assert_eq!(sel.current(), Some(&4));
//! ```

use core::fmt::Debug;

/// Selection transitions to notify.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange<K> {
    /// `OnSelect(false)`; if `focus_highlight`, the focus hover goes too.
    Deselected {
        /// Target losing the selection.
        target: K,
        /// The target was selected through keyboard/controller focus.
        focus_highlight: bool,
    },
    /// `OnSelect(true)`; if `focus_highlight`, the target also gets a focus hover.
    Selected {
        /// Target gaining the selection.
        target: K,
        /// Selected through keyboard/controller focus.
        focus_highlight: bool,
    },
}

/// The single global selection.
#[derive(Clone, Debug)]
pub struct SelectionState<K> {
    current: Option<K>,
    focus_highlight: bool,
    pending: Option<Option<K>>,
    pending_focus: bool,
    deselect_sent: bool,
}

impl<K> Default for SelectionState<K> {
    fn default() -> Self {
        Self {
            current: None,
            focus_highlight: false,
            pending: None,
            pending_focus: false,
            deselect_sent: false,
        }
    }
}

impl<K: Clone + PartialEq + Debug> SelectionState<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed selection.
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Requested selection awaiting commit. `Some(None)` is a pending clear.
    pub fn pending(&self) -> Option<Option<&K>> {
        self.pending.as_ref().map(Option::as_ref)
    }

    /// Whether the committed selection carries a focus highlight.
    pub fn has_focus_highlight(&self) -> bool {
        self.focus_highlight
    }

    /// Selection as it will be after the next commit.
    pub fn effective(&self) -> Option<&K> {
        match &self.pending {
            Some(p) => p.as_ref(),
            None => self.current.as_ref(),
        }
    }

    /// Request `target` as the selection (`None` clears it).
    ///
    /// Returns the deselection of the committed target, at most once per
    /// frame.
    pub fn select(&mut self, target: Option<K>, via_focus: bool) -> Option<SelectionChange<K>> {
        if self.effective() == target.as_ref() {
            return None;
        }
        tracing::debug!(?target, via_focus, "selection requested");
        self.pending = Some(target);
        self.pending_focus = via_focus;
        if self.deselect_sent {
            return None;
        }
        let current = self.current.clone()?;
        self.deselect_sent = true;
        Some(SelectionChange::Deselected {
            target: current,
            focus_highlight: self.focus_highlight,
        })
    }

    /// Apply the pending request. Call once, after all of the frame's input.
    pub fn commit(&mut self) -> Option<SelectionChange<K>> {
        let pending = self.pending.take()?;
        let deselected = core::mem::take(&mut self.deselect_sent);
        if pending == self.current && !deselected {
            return None;
        }
        self.current = pending;
        self.focus_highlight = self.pending_focus && self.current.is_some();
        self.pending_focus = false;
        let target = self.current.clone()?;
        tracing::debug!(?target, "selection committed");
        Some(SelectionChange::Selected {
            target,
            focus_highlight: self.focus_highlight,
        })
    }

    /// Drop a destroyed target from the current and pending selection.
    pub fn forget(&mut self, target: &K) {
        if self.current.as_ref() == Some(target) {
            self.current = None;
            self.focus_highlight = false;
            self.deselect_sent = false;
        }
        if let Some(Some(p)) = &self.pending
            && p == target
        {
            self.pending = Some(None);
            self.pending_focus = false;
        }
    }
}
