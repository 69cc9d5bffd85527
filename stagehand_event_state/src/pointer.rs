// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer press / drag / click state machine.
//!
//! Each logical pointer (a mouse button, one touch contact, or the
//! keyboard/controller pseudo-pointer) owns one [`PointerState`]. Every poll
//! the host updates its position and hit target, then calls
//! [`PointerState::process`] with the frame's press/release transitions. The
//! state machine appends [`PointerIntent`]s in the order they must be
//! delivered.
//!
//! ## States
//!
//! `Idle → Pressed → (Dragging) → Idle`
//!
//! - **Press**: the current target becomes the pressed (and dragged) target,
//!   accumulated movement resets and clicks are judged on movement.
//! - **Move while pressed**: movement accumulates. Once it exceeds the drag
//!   threshold the drag starts (`DragStart`, then `DragOver` the current
//!   target), exactly once per press.
//! - **Move while dragging**: `DragOut`/`DragOver` when the target under the
//!   pointer changes, then `Drag(delta)`. Once accumulated movement exceeds the
//!   click threshold the click is canceled for the rest of the press, even if
//!   the pointer comes back.
//! - **Release**: end any drag, report the release, then classify the gesture
//!   as a click (possibly a double click) or a drop.
//!
//! ```
//! use kurbo::Point;
//! use stagehand_event_state::pointer::{DeviceClass, PointerFrame, PointerId, PointerIntent, PointerState, Thresholds};
//!
//! let mut p: PointerState<u32> = PointerState::new(PointerId::MOUSE_LEFT, DeviceClass::Mouse);
//! let th = Thresholds::MOUSE;
//! let mut out = Vec::new();
//!
//! p.set_target(Some(7));
//! p.process(&PointerFrame { pressed: true, released: false, now: 0.0, thresholds: th, selection: None }, &mut out);
//! p.move_to(Point::new(2.0, 0.0));
//! p.process(&PointerFrame { pressed: false, released: true, now: 0.1, thresholds: th, selection: None }, &mut out);
//!
//! assert!(out.contains(&PointerIntent::Click { target: Some(7) }));
//! assert!(!out.iter().any(|i| matches!(i, PointerIntent::DragStart { .. })));
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Vec2};
use stagehand_raycast::SurfaceId;

/// Two clicks closer together than this (seconds) form a double click.
pub const DOUBLE_CLICK_WINDOW: f64 = 0.35;

/// Identifier for a logical pointer.
///
/// Mouse buttons and the keyboard/controller pseudo-pointer use reserved
/// negative ids; touch contacts use their non-negative platform id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointerId(pub i64);

impl PointerId {
    /// Primary mouse button.
    pub const MOUSE_LEFT: Self = Self(-1);
    /// Secondary mouse button.
    pub const MOUSE_RIGHT: Self = Self(-2);
    /// Middle mouse button.
    pub const MOUSE_MIDDLE: Self = Self(-3);
    /// Keyboard / controller pseudo-pointer.
    pub const CONTROLLER: Self = Self(-100);

    /// Pointer for a touch contact.
    pub const fn touch(id: u32) -> Self {
        Self(id as i64)
    }

    /// Pointer for mouse button `0..=2`.
    pub const fn mouse_button(button: u8) -> Option<Self> {
        match button {
            0 => Some(Self::MOUSE_LEFT),
            1 => Some(Self::MOUSE_RIGHT),
            2 => Some(Self::MOUSE_MIDDLE),
            _ => None,
        }
    }

    /// Device class implied by the id range.
    pub const fn class(self) -> DeviceClass {
        if self.0 >= 0 {
            DeviceClass::Touch
        } else if self.0 == Self::CONTROLLER.0 {
            DeviceClass::Controller
        } else {
            DeviceClass::Mouse
        }
    }
}

/// Kind of device behind a pointer. Selects thresholds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeviceClass {
    /// Mouse or another precise pointing device.
    Mouse,
    /// Touch contact.
    Touch,
    /// Keyboard or controller pseudo-pointer.
    Controller,
}

/// Movement thresholds, in pixels of accumulated movement since the press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Thresholds {
    /// Movement beyond which a press becomes a drag.
    pub drag: f64,
    /// Movement beyond which a press can no longer click.
    pub click: f64,
}

impl Thresholds {
    /// Defaults for mice and other precise devices.
    pub const MOUSE: Self = Self {
        drag: 4.0,
        click: 10.0,
    };
    /// Defaults for touch.
    pub const TOUCH: Self = Self {
        drag: 40.0,
        click: 40.0,
    };
}

/// How a release is judged for click notification.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ClickMode {
    /// Always notify the click (keyboard activation).
    Always,
    /// Notify unless movement exceeded the click threshold.
    #[default]
    BasedOnDelta,
    /// Click canceled for this press.
    None,
}

/// Semantic intent produced by a pointer step, in delivery order.
///
/// `target` is the recipient; `None` means "empty space" and is dropped by
/// the dispatcher. Selection requests are deferred by the selection manager.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerIntent<K> {
    /// `OnPress(pressed)` to the pressed target.
    Press {
        /// Recipient.
        target: Option<K>,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// `OnDragStart` to the dragged target.
    DragStart {
        /// Recipient.
        target: Option<K>,
    },
    /// `OnDragOver(dragged)` to the target under the pointer.
    DragOver {
        /// Recipient.
        target: Option<K>,
        /// Object being dragged.
        dragged: Option<K>,
    },
    /// `OnDragOut(dragged)` to the target the drag left.
    DragOut {
        /// Recipient.
        target: Option<K>,
        /// Object being dragged.
        dragged: Option<K>,
    },
    /// `OnDrag(delta)` to the dragged target.
    Drag {
        /// Recipient.
        target: Option<K>,
        /// Movement this poll.
        delta: Vec2,
    },
    /// `OnDragEnd` to the dragged target.
    DragEnd {
        /// Recipient.
        target: Option<K>,
    },
    /// `OnClick` to the pressed target.
    Click {
        /// Recipient.
        target: Option<K>,
    },
    /// `OnDoubleClick` to the pressed target.
    DoubleClick {
        /// Recipient.
        target: Option<K>,
    },
    /// `OnDrop(dragged)` to the target under the pointer at release.
    Drop {
        /// Recipient.
        target: Option<K>,
        /// Object that was dragged.
        dragged: Option<K>,
    },
    /// Request that the global selection become `target` (`None` clears it).
    Select {
        /// Requested selection.
        target: Option<K>,
    },
}

/// Inputs for one [`PointerState::process`] call.
#[derive(Clone, Debug)]
pub struct PointerFrame<'a, K> {
    /// The pointer went down this poll.
    pub pressed: bool,
    /// The pointer went up this poll.
    pub released: bool,
    /// Current time in seconds.
    pub now: f64,
    /// Thresholds for this pointer's device class.
    pub thresholds: Thresholds,
    /// The current global selection.
    pub selection: Option<&'a K>,
}

/// State for one logical pointer.
#[derive(Clone, Debug)]
pub struct PointerState<K> {
    /// Stable pointer id.
    pub id: PointerId,
    /// Device class, fixed at creation.
    pub class: DeviceClass,
    /// Position this poll.
    pub position: Point,
    /// Position last poll.
    pub last_position: Point,
    /// Movement this poll.
    pub delta: Vec2,
    /// Accumulated movement since the last press.
    pub total_delta: Vec2,
    /// Target under the pointer this poll.
    pub current: Option<K>,
    /// Target under the pointer at the end of the previous step.
    pub last: Option<K>,
    /// Target the active press began on.
    pub pressed: Option<K>,
    /// Target being dragged during the active press.
    pub dragged: Option<K>,
    /// Surface the active press began on. Raycasts stay anchored to it.
    pub pressed_surface: Option<SurfaceId>,
    /// A drag has started during the active press.
    pub drag_started: bool,
    /// A press is active.
    pub press_started: bool,
    /// Click judgement for the active press.
    pub click_mode: ClickMode,
    /// Click mode assigned on each press.
    pub press_click_mode: ClickMode,
    /// Time of the last notified click, in seconds.
    pub last_click_time: Option<f64>,
}

impl<K: Clone + PartialEq + Debug> PointerState<K> {
    /// Create an idle pointer at the origin.
    pub fn new(id: PointerId, class: DeviceClass) -> Self {
        Self {
            id,
            class,
            position: Point::ORIGIN,
            last_position: Point::ORIGIN,
            delta: Vec2::ZERO,
            total_delta: Vec2::ZERO,
            current: None,
            last: None,
            pressed: None,
            dragged: None,
            pressed_surface: None,
            drag_started: false,
            press_started: false,
            click_mode: ClickMode::BasedOnDelta,
            press_click_mode: if class == DeviceClass::Controller {
                ClickMode::Always
            } else {
                ClickMode::BasedOnDelta
            },
            last_click_time: None,
        }
    }

    /// Create an idle pointer whose first sample is at `position` (no delta).
    pub fn at(id: PointerId, class: DeviceClass, position: Point) -> Self {
        let mut p = Self::new(id, class);
        p.position = position;
        p.last_position = position;
        p
    }

    /// Record a new position and compute this poll's delta.
    pub fn move_to(&mut self, position: Point) {
        self.last_position = self.position;
        self.position = position;
        self.delta = position - self.last_position;
    }

    /// Record the target under the pointer this poll.
    pub fn set_target(&mut self, target: Option<K>) {
        self.current = target;
    }

    /// Returns `true` while a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press_started
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.drag_started
    }

    /// Returns `true` if the active gesture pressed or drags `target`.
    pub fn holds(&self, target: &K) -> bool {
        self.press_started
            && (self.pressed.as_ref() == Some(target) || self.dragged.as_ref() == Some(target))
    }

    /// Run one poll: press, then movement, then release.
    pub fn process(&mut self, frame: &PointerFrame<'_, K>, out: &mut Vec<PointerIntent<K>>) {
        if frame.pressed {
            self.press(frame, out);
        } else if self.press_started && self.delta != Vec2::ZERO {
            self.drag_step(frame, out);
        }
        if frame.released && self.press_started {
            self.release(frame, out);
        }
        self.last = self.current.clone();
    }

    fn press(&mut self, frame: &PointerFrame<'_, K>, out: &mut Vec<PointerIntent<K>>) {
        // A press without a release (lost event) restarts the gesture cleanly.
        if self.press_started {
            self.cancel(out);
        }
        self.press_started = true;
        self.drag_started = false;
        self.pressed = self.current.clone();
        self.dragged = self.current.clone();
        self.total_delta = Vec2::ZERO;
        self.click_mode = self.press_click_mode;
        tracing::debug!(pointer = ?self.id, target = ?self.pressed, "press");
        out.push(PointerIntent::Press {
            target: self.pressed.clone(),
            pressed: true,
        });
        if self.pressed.as_ref() != frame.selection {
            out.push(PointerIntent::Select { target: None });
        }
    }

    fn drag_step(&mut self, frame: &PointerFrame<'_, K>, out: &mut Vec<PointerIntent<K>>) {
        self.total_delta += self.delta;
        let moved = self.total_delta.hypot();

        if !self.drag_started && moved > frame.thresholds.drag {
            self.drag_started = true;
            tracing::debug!(pointer = ?self.id, dragged = ?self.dragged, moved, "drag start");
            out.push(PointerIntent::DragStart {
                target: self.dragged.clone(),
            });
            out.push(PointerIntent::DragOver {
                target: self.current.clone(),
                dragged: self.dragged.clone(),
            });
            self.last = self.current.clone();
        }

        if self.drag_started {
            if self.last != self.current {
                out.push(PointerIntent::DragOut {
                    target: self.last.clone(),
                    dragged: self.dragged.clone(),
                });
                out.push(PointerIntent::DragOver {
                    target: self.current.clone(),
                    dragged: self.dragged.clone(),
                });
                self.last = self.current.clone();
            }
            out.push(PointerIntent::Drag {
                target: self.dragged.clone(),
                delta: self.delta,
            });
            if self.click_mode == ClickMode::BasedOnDelta && moved > frame.thresholds.click {
                tracing::trace!(pointer = ?self.id, moved, "click canceled");
                self.click_mode = ClickMode::None;
            }
        }
    }

    fn release(&mut self, frame: &PointerFrame<'_, K>, out: &mut Vec<PointerIntent<K>>) {
        if self.drag_started {
            out.push(PointerIntent::DragOut {
                target: self.last.clone(),
                dragged: self.dragged.clone(),
            });
            out.push(PointerIntent::DragEnd {
                target: self.dragged.clone(),
            });
        }
        out.push(PointerIntent::Press {
            target: self.pressed.clone(),
            pressed: false,
        });

        let is_click = self.dragged == self.current
            || (self.click_mode != ClickMode::None
                && self.total_delta.hypot() < frame.thresholds.drag);
        tracing::debug!(
            pointer = ?self.id,
            pressed = ?self.pressed,
            current = ?self.current,
            is_click,
            "release"
        );

        if is_click {
            if self.pressed.as_ref() != frame.selection {
                out.push(PointerIntent::Select {
                    target: self.pressed.clone(),
                });
            }
            if self.click_mode != ClickMode::None {
                out.push(PointerIntent::Click {
                    target: self.pressed.clone(),
                });
                if self
                    .last_click_time
                    .is_some_and(|t| frame.now - t < DOUBLE_CLICK_WINDOW)
                {
                    out.push(PointerIntent::DoubleClick {
                        target: self.pressed.clone(),
                    });
                }
                self.last_click_time = Some(frame.now);
            }
        } else {
            out.push(PointerIntent::Drop {
                target: self.current.clone(),
                dragged: self.dragged.clone(),
            });
        }
        self.clear_gesture();
    }

    /// Force-terminate the active gesture.
    ///
    /// An in-flight drag is ended with `DragOut` + `DragEnd`; no release,
    /// click or drop is reported. Returns `true` if a press was active.
    pub fn cancel(&mut self, out: &mut Vec<PointerIntent<K>>) -> bool {
        if !self.press_started {
            return false;
        }
        if self.drag_started {
            tracing::debug!(pointer = ?self.id, dragged = ?self.dragged, "drag force-terminated");
            out.push(PointerIntent::DragOut {
                target: self.last.clone(),
                dragged: self.dragged.clone(),
            });
            out.push(PointerIntent::DragEnd {
                target: self.dragged.clone(),
            });
        }
        self.clear_gesture();
        true
    }

    /// Drop every reference to `target` without notifying anyone.
    pub fn forget(&mut self, target: &K) {
        for slot in [
            &mut self.current,
            &mut self.last,
            &mut self.pressed,
            &mut self.dragged,
        ] {
            if slot.as_ref() == Some(target) {
                *slot = None;
            }
        }
    }

    fn clear_gesture(&mut self) {
        self.pressed = None;
        self.dragged = None;
        self.pressed_surface = None;
        self.drag_started = false;
        self.press_started = false;
        self.total_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use PointerIntent as I;

    const T1: u32 = 1;
    const T2: u32 = 2;
    const T3: u32 = 3;

    struct Driver {
        p: PointerState<u32>,
        th: Thresholds,
        now: f64,
        selection: Option<u32>,
        out: Vec<PointerIntent<u32>>,
    }

    impl Driver {
        fn mouse() -> Self {
            Self {
                p: PointerState::new(PointerId::MOUSE_LEFT, DeviceClass::Mouse),
                th: Thresholds::MOUSE,
                now: 0.0,
                selection: None,
                out: Vec::new(),
            }
        }

        fn touch(id: u32) -> Self {
            Self {
                p: PointerState::new(PointerId::touch(id), DeviceClass::Touch),
                th: Thresholds::TOUCH,
                ..Self::mouse()
            }
        }

        fn step(&mut self, dx: f64, target: Option<u32>, pressed: bool, released: bool) {
            let pos = self.p.position + Vec2::new(dx, 0.0);
            self.p.move_to(pos);
            self.p.set_target(target);
            let frame = PointerFrame {
                pressed,
                released,
                now: self.now,
                thresholds: self.th,
                selection: self.selection.as_ref(),
            };
            self.p.process(&frame, &mut self.out);
            // Selection requests apply at frame end in the real driver.
            for i in &self.out {
                if let I::Select { target } = i {
                    self.selection = *target;
                }
            }
        }

        fn press(&mut self, target: Option<u32>) {
            self.step(0.0, target, true, false);
        }

        fn drag(&mut self, dx: f64, target: Option<u32>) {
            self.step(dx, target, false, false);
        }

        fn release(&mut self, target: Option<u32>) {
            self.step(0.0, target, false, true);
        }

        fn take(&mut self) -> Vec<PointerIntent<u32>> {
            core::mem::take(&mut self.out)
        }

        fn count(events: &[PointerIntent<u32>], f: impl Fn(&PointerIntent<u32>) -> bool) -> usize {
            events.iter().filter(|e| f(e)).count()
        }
    }

    #[test]
    fn small_move_then_release_is_a_single_click() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        d.drag(2.0, Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(
            ev,
            vec![
                I::Press {
                    target: Some(T1),
                    pressed: true
                },
                I::Select { target: None },
                I::Press {
                    target: Some(T1),
                    pressed: false
                },
                I::Select { target: Some(T1) },
                I::Click { target: Some(T1) },
            ]
        );
    }

    #[test]
    fn drag_below_click_threshold_still_clicks_on_same_target() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        d.drag(6.0, Some(T1));
        d.drag(3.0, Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::DragStart { .. })), 1);
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::DragOver { .. })), 1);
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::Drag { .. })), 2);
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::Click { .. })), 1);
    }

    #[test]
    fn drag_past_click_threshold_cancels_click() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        let _ = d.take();
        d.drag(6.0, Some(T1));
        d.drag(6.0, Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(
            ev,
            vec![
                I::DragStart { target: Some(T1) },
                I::DragOver {
                    target: Some(T1),
                    dragged: Some(T1)
                },
                I::Drag {
                    target: Some(T1),
                    delta: Vec2::new(6.0, 0.0)
                },
                I::Drag {
                    target: Some(T1),
                    delta: Vec2::new(6.0, 0.0)
                },
                I::DragOut {
                    target: Some(T1),
                    dragged: Some(T1)
                },
                I::DragEnd { target: Some(T1) },
                I::Press {
                    target: Some(T1),
                    pressed: false
                },
                I::Select { target: Some(T1) },
            ]
        );
    }

    #[test]
    fn click_cancellation_is_permanent_for_the_press() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        d.drag(12.0, Some(T1));
        d.drag(-12.0, Some(T1));
        assert_eq!(d.p.click_mode, ClickMode::None);
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::Click { .. })), 0);
    }

    #[test]
    fn drag_start_fires_once_per_press() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        for _ in 0..10 {
            d.drag(5.0, Some(T1));
        }
        d.release(Some(T1));
        d.press(Some(T1));
        d.drag(5.0, Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::DragStart { .. })), 2);
    }

    #[test]
    fn drag_across_targets_emits_out_and_over() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        d.drag(5.0, Some(T1));
        let _ = d.take();
        d.drag(5.0, Some(T2));
        assert_eq!(
            d.take(),
            vec![
                I::DragOut {
                    target: Some(T1),
                    dragged: Some(T1)
                },
                I::DragOver {
                    target: Some(T2),
                    dragged: Some(T1)
                },
                I::Drag {
                    target: Some(T1),
                    delta: Vec2::new(5.0, 0.0)
                },
            ]
        );
    }

    #[test]
    fn touch_drop_on_other_target() {
        let mut d = Driver::touch(3);
        d.press(Some(T2));
        d.drag(50.0, Some(T2));
        d.drag(10.0, Some(T3));
        let _ = d.take();
        d.release(Some(T3));
        let ev = d.take();
        assert_eq!(
            ev,
            vec![
                I::DragOut {
                    target: Some(T3),
                    dragged: Some(T2)
                },
                I::DragEnd { target: Some(T2) },
                I::Press {
                    target: Some(T2),
                    pressed: false
                },
                I::Drop {
                    target: Some(T3),
                    dragged: Some(T2)
                },
            ]
        );
    }

    #[test]
    fn touch_uses_touch_thresholds() {
        let mut d = Driver::touch(0);
        d.press(Some(T1));
        d.drag(30.0, Some(T1));
        assert!(!d.p.is_dragging(), "30px is below the 40px touch threshold");
        d.drag(11.0, Some(T1));
        assert!(d.p.is_dragging());
    }

    #[test]
    fn double_click_window() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        d.release(Some(T1));
        d.now = 0.2;
        d.press(Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::DoubleClick { .. })), 1);

        d.now = 1.0;
        d.press(Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::Click { .. })), 1);
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::DoubleClick { .. })), 0);
    }

    #[test]
    fn press_on_empty_space_is_tracked_and_deselects() {
        let mut d = Driver::mouse();
        d.selection = Some(T1);
        d.press(None);
        assert!(d.p.is_pressed());
        d.release(None);
        let ev = d.take();
        assert!(ev.contains(&I::Select { target: None }));
        assert!(ev.contains(&I::Click { target: None }));
        assert_eq!(d.selection, None);
    }

    #[test]
    fn pressing_the_selection_keeps_it() {
        let mut d = Driver::mouse();
        d.selection = Some(T1);
        d.press(Some(T1));
        d.release(Some(T1));
        let ev = d.take();
        assert_eq!(Driver::count(&ev, |e| matches!(e, I::Select { .. })), 0);
    }

    #[test]
    fn cancel_terminates_drag_and_clears_transients() {
        let mut d = Driver::mouse();
        d.press(Some(T1));
        d.drag(8.0, Some(T1));
        let _ = d.take();
        let mut out = Vec::new();
        assert!(d.p.cancel(&mut out));
        assert_eq!(
            out,
            vec![
                I::DragOut {
                    target: Some(T1),
                    dragged: Some(T1)
                },
                I::DragEnd { target: Some(T1) },
            ]
        );
        assert!(!d.p.is_pressed());
        assert!(!d.p.is_dragging());
        assert_eq!(d.p.pressed, None);
        assert_eq!(d.p.dragged, None);
        assert!(!d.p.cancel(&mut out), "second cancel is a no-op");
    }

    #[test]
    fn controller_clicks_always() {
        let mut p: PointerState<u32> = PointerState::new(PointerId::CONTROLLER, DeviceClass::Controller);
        let mut out = Vec::new();
        p.set_target(Some(T1));
        let frame = PointerFrame {
            pressed: true,
            released: true,
            now: 0.0,
            thresholds: Thresholds::MOUSE,
            selection: Some(&T1),
        };
        p.process(&frame, &mut out);
        assert_eq!(p.click_mode, ClickMode::Always);
        assert!(out.contains(&I::Click { target: Some(T1) }));
    }

    #[test]
    fn pointer_id_classes() {
        assert_eq!(PointerId::touch(0).class(), DeviceClass::Touch);
        assert_eq!(PointerId::MOUSE_MIDDLE.class(), DeviceClass::Mouse);
        assert_eq!(PointerId::CONTROLLER.class(), DeviceClass::Controller);
        assert_eq!(PointerId::mouse_button(1), Some(PointerId::MOUSE_RIGHT));
        assert_eq!(PointerId::mouse_button(3), None);
    }
}
