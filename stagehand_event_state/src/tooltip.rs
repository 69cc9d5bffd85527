// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed tooltip display for the hovered target.
//!
//! The timer arms when a target becomes hovered and fires once `delay`
//! seconds have passed while the target stays hovered by exactly one source
//! and no button is held. A configured modifier shows it immediately.
//!
//! Cancellation (hide if shown, timer reset):
//! - any button pressed;
//! - hovered target changes (the pointer left the target's bounds);
//! - in non-sticky mode, any pointer movement at all.

use core::fmt::Debug;

use smallvec::SmallVec;

/// Tooltip timing options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TooltipSettings {
    /// Seconds of stable hover before the tooltip shows.
    pub delay: f64,
    /// Keep the tooltip while the pointer moves within the same target.
    pub sticky: bool,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            delay: 1.0,
            sticky: true,
        }
    }
}

/// One poll's view of the hover state.
#[derive(Copy, Clone, Debug)]
pub struct TooltipInput<'a, K> {
    /// Target under the hovering pointer.
    pub hovered: Option<&'a K>,
    /// Hover refcount of `hovered`.
    pub refcount: u32,
    /// Any pointing-device button is held.
    pub any_pressed: bool,
    /// The hovering pointer moved this poll.
    pub moved: bool,
    /// The tooltip modifier key is held.
    pub modifier_held: bool,
    /// Current time in seconds.
    pub now: f64,
}

/// `OnTooltip` transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TooltipChange<K> {
    /// `OnTooltip(true)`.
    Show(K),
    /// `OnTooltip(false)`.
    Hide(K),
}

/// Tooltip timer for a single hovering pointer.
#[derive(Clone, Debug)]
pub struct TooltipState<K> {
    settings: TooltipSettings,
    target: Option<K>,
    due: Option<f64>,
    shown: bool,
}

impl<K: Clone + PartialEq + Debug> TooltipState<K> {
    /// Create an idle tooltip timer.
    pub fn new(settings: TooltipSettings) -> Self {
        Self {
            settings,
            target: None,
            due: None,
            shown: false,
        }
    }

    /// Timing options in use.
    pub fn settings(&self) -> TooltipSettings {
        self.settings
    }

    /// Replace the timing options. Takes effect on the next arm.
    pub fn set_settings(&mut self, settings: TooltipSettings) {
        self.settings = settings;
    }

    /// Target whose tooltip is showing.
    pub fn shown(&self) -> Option<&K> {
        if self.shown { self.target.as_ref() } else { None }
    }

    /// Advance the timer by one poll.
    pub fn update(&mut self, input: &TooltipInput<'_, K>) -> SmallVec<[TooltipChange<K>; 2]> {
        let mut out = SmallVec::new();

        if input.any_pressed {
            out.extend(self.clear());
            return out;
        }

        if self.target.as_ref() != input.hovered {
            out.extend(self.hide());
            self.target = input.hovered.cloned();
            self.due = self.target.as_ref().map(|_| input.now + self.settings.delay);
        } else if self.target.is_some() && input.moved && !self.settings.sticky {
            out.extend(self.hide());
            self.due = Some(input.now + self.settings.delay);
        }

        let Some(target) = self.target.as_ref() else {
            return out;
        };
        if self.shown {
            return out;
        }
        if input.refcount != 1 {
            // Shared hover does not count as stable; restart the wait.
            self.due = Some(input.now + self.settings.delay);
            return out;
        }
        if input.modifier_held || self.due.is_some_and(|due| input.now >= due) {
            tracing::debug!(?target, "tooltip shown");
            self.shown = true;
            self.due = None;
            out.push(TooltipChange::Show(target.clone()));
        }
        out
    }

    /// Hide and disarm. The next hovered target arms a fresh timer.
    pub fn clear(&mut self) -> Option<TooltipChange<K>> {
        let hidden = self.hide();
        self.target = None;
        self.due = None;
        hidden
    }

    /// Drop a destroyed target without notification.
    pub fn forget(&mut self, target: &K) {
        if self.target.as_ref() == Some(target) {
            self.target = None;
            self.due = None;
            self.shown = false;
        }
    }

    fn hide(&mut self) -> Option<TooltipChange<K>> {
        if !self.shown {
            return None;
        }
        self.shown = false;
        let target = self.target.clone()?;
        tracing::debug!(?target, "tooltip hidden");
        Some(TooltipChange::Hide(target))
    }
}
