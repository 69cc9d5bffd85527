// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device pollers: raw per-frame snapshots in, normalized samples out.
//!
//! Hosts report what devices look like *now* (button held, contacts down,
//! keys held). The pollers remember the previous snapshot and derive
//! press/release transitions, per-frame deltas and touch phases from it.
//!
//! Non-finite positions are rejected: the sample carries `None` for the
//! position and the last good position is kept for delta computation.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use stagehand_responder::KeyCode;

/// Number of tracked mouse buttons (left, right, middle).
pub const MOUSE_BUTTONS: usize = 3;

/// Mouse snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MouseInput {
    /// Cursor position in screen space.
    pub position: Point,
    /// Held state of left, right and middle buttons.
    pub buttons: [bool; MOUSE_BUTTONS],
    /// Scroll axis movement this frame.
    pub scroll: f64,
}

/// One touch contact currently on the screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchContact {
    /// Platform contact id, stable while the contact is down.
    pub id: u32,
    /// Contact position in screen space.
    pub position: Point,
}

/// Everything the host observed this frame.
#[derive(Clone, Debug, Default)]
pub struct RawInput {
    /// Mouse snapshot, or `None` if no mouse is present.
    pub mouse: Option<MouseInput>,
    /// Active touch contacts, in device enumeration order.
    pub touches: Vec<TouchContact>,
    /// Keys currently held.
    pub keys: Vec<KeyCode>,
    /// Text typed this frame.
    pub text: String,
}

/// Normalized mouse state for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseSample {
    /// Cursor position, or `None` if the reported position was not finite.
    pub position: Option<Point>,
    /// Movement since the last good position.
    pub delta: Vec2,
    /// Buttons that went down this frame.
    pub pressed: [bool; MOUSE_BUTTONS],
    /// Buttons that went up this frame.
    pub released: [bool; MOUSE_BUTTONS],
    /// Buttons held after this frame.
    pub held: [bool; MOUSE_BUTTONS],
    /// Scroll axis movement.
    pub scroll: f64,
}

impl MouseSample {
    /// Returns `true` if any button is held.
    pub fn any_held(&self) -> bool {
        self.held.iter().any(|h| *h)
    }
}

/// Edge detection and deltas for the mouse.
#[derive(Clone, Debug, Default)]
pub struct MousePoller {
    last_position: Option<Point>,
    held: [bool; MOUSE_BUTTONS],
}

impl MousePoller {
    /// Create a poller with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `input` against the previous snapshot.
    pub fn poll(&mut self, input: &MouseInput) -> MouseSample {
        let position = input.position.is_finite().then_some(input.position);
        let delta = match (self.last_position, position) {
            (Some(last), Some(now)) => now - last,
            _ => Vec2::ZERO,
        };
        if position.is_some() {
            self.last_position = position;
        }
        let mut pressed = [false; MOUSE_BUTTONS];
        let mut released = [false; MOUSE_BUTTONS];
        for (b, held) in input.buttons.iter().enumerate() {
            pressed[b] = *held && !self.held[b];
            released[b] = !*held && self.held[b];
        }
        self.held = input.buttons;
        MouseSample {
            position,
            delta,
            pressed,
            released,
            held: input.buttons,
            scroll: if input.scroll.is_finite() { input.scroll } else { 0.0 },
        }
    }
}

/// Lifecycle phase of a touch sample.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    /// Contact appeared this frame.
    Began,
    /// Contact still down.
    Moved,
    /// Contact lifted (or stopped being reported).
    Ended,
}

/// Normalized touch state for one contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Platform contact id.
    pub id: u32,
    /// Contact position, or `None` if the reported position was not finite.
    pub position: Option<Point>,
    /// Phase this frame.
    pub phase: TouchPhase,
}

/// Turns contact lists into began / moved / ended samples.
#[derive(Clone, Debug, Default)]
pub struct TouchPoller {
    active: Vec<u32>,
}

impl TouchPoller {
    /// Create a poller with no active contacts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active contact ids, in the order they were first reported.
    pub fn active(&self) -> &[u32] {
        &self.active
    }

    /// Diff `contacts` against the previous frame.
    ///
    /// Reported contacts come first in enumeration order, followed by
    /// `Ended` samples for contacts that disappeared.
    pub fn poll(&mut self, contacts: &[TouchContact]) -> SmallVec<[TouchSample; 4]> {
        let mut out = SmallVec::new();
        let mut seen: SmallVec<[u32; 8]> = SmallVec::new();
        for c in contacts {
            if seen.contains(&c.id) {
                continue;
            }
            seen.push(c.id);
            let phase = if self.active.contains(&c.id) {
                TouchPhase::Moved
            } else {
                self.active.push(c.id);
                TouchPhase::Began
            };
            out.push(TouchSample {
                id: c.id,
                position: c.position.is_finite().then_some(c.position),
                phase,
            });
        }
        self.active.retain(|id| {
            let still = seen.contains(id);
            if !still {
                out.push(TouchSample {
                    id: *id,
                    position: None,
                    phase: TouchPhase::Ended,
                });
            }
            still
        });
        out
    }
}

/// Keys that changed this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeySample {
    /// Keys that went down, in reported order.
    pub down: SmallVec<[KeyCode; 4]>,
    /// Keys that went up.
    pub up: SmallVec<[KeyCode; 4]>,
}

/// Edge detection for held keys.
#[derive(Clone, Debug, Default)]
pub struct KeyPoller {
    held: SmallVec<[KeyCode; 8]>,
}

impl KeyPoller {
    /// Create a poller with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` was held at the last poll.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Diff `held` against the previous frame.
    pub fn poll(&mut self, held: &[KeyCode]) -> KeySample {
        let mut sample = KeySample::default();
        for key in held {
            if !self.held.contains(key) && !sample.down.contains(key) {
                sample.down.push(*key);
            }
        }
        for key in &self.held {
            if !held.contains(key) {
                sample.up.push(*key);
            }
        }
        self.held.clear();
        for key in held {
            if !self.held.contains(key) {
                self.held.push(*key);
            }
        }
        sample
    }
}
