// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed handler capabilities.
//!
//! Targets implement [`Responder`] and override only the handlers they care
//! about. Every method has an empty default, so a missing handler is simply a
//! no-op rather than an error. The host exposes its objects to the dispatcher
//! through [`ResponderLookup`], which is also the liveness oracle: an object
//! the lookup cannot resolve is treated as destroyed.

use kurbo::Vec2;

use crate::event::{KeyCode, Notification};

/// Who a delivery is addressed to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// The object the notification is about.
    Target,
    /// The global listener observing traffic it is not the subject of.
    Listener,
}

/// Context passed to every handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery<K> {
    /// The notification's subject. For [`Role::Listener`] this is not the receiver.
    pub target: K,
    /// Whether the receiver is the target or the global listener.
    pub role: Role,
}

/// Handler set for a scene object. Override what you need.
#[allow(unused_variables, reason = "default handlers ignore their arguments")]
pub trait Responder<K> {
    /// Hover refcount crossed 0↔1.
    fn on_hover(&mut self, cx: &Delivery<K>, hovered: bool) {}
    /// Pointer pressed or released over the target.
    fn on_press(&mut self, cx: &Delivery<K>, pressed: bool) {}
    /// Selection gained or lost.
    fn on_select(&mut self, cx: &Delivery<K>, selected: bool) {}
    /// Click recognized.
    fn on_click(&mut self, cx: &Delivery<K>) {}
    /// Double click recognized.
    fn on_double_click(&mut self, cx: &Delivery<K>) {}
    /// Drag threshold crossed.
    fn on_drag_start(&mut self, cx: &Delivery<K>) {}
    /// A drag entered this object.
    fn on_drag_over(&mut self, cx: &Delivery<K>, dragged: Option<&K>) {}
    /// A drag left this object.
    fn on_drag_out(&mut self, cx: &Delivery<K>, dragged: Option<&K>) {}
    /// Movement while dragging.
    fn on_drag(&mut self, cx: &Delivery<K>, delta: Vec2) {}
    /// Drag finished.
    fn on_drag_end(&mut self, cx: &Delivery<K>) {}
    /// Something was dropped on this object.
    fn on_drop(&mut self, cx: &Delivery<K>, dragged: Option<&K>) {}
    /// Scroll while hovered.
    fn on_scroll(&mut self, cx: &Delivery<K>, delta: f64) {}
    /// Navigation or command key while selected.
    fn on_key(&mut self, cx: &Delivery<K>, key: KeyCode) {}
    /// Text input while selected.
    fn on_input(&mut self, cx: &Delivery<K>, text: &str) {}
    /// Tooltip shown or hidden.
    fn on_tooltip(&mut self, cx: &Delivery<K>, show: bool) {}
}

/// Resolves keys to live responders.
pub trait ResponderLookup<K> {
    /// Returns `true` while the object exists in the scene.
    fn is_alive(&self, target: &K) -> bool;

    /// Handler set for `target`, or `None` if it has been destroyed.
    fn responder_mut(&mut self, target: &K) -> Option<&mut dyn Responder<K>>;
}

impl<K> Notification<K> {
    /// Invoke the matching handler on `responder`.
    pub fn deliver(&self, responder: &mut dyn Responder<K>, cx: &Delivery<K>) {
        match self {
            Self::Hover(v) => responder.on_hover(cx, *v),
            Self::Press(v) => responder.on_press(cx, *v),
            Self::Select(v) => responder.on_select(cx, *v),
            Self::Click => responder.on_click(cx),
            Self::DoubleClick => responder.on_double_click(cx),
            Self::DragStart => responder.on_drag_start(cx),
            Self::DragOver { dragged } => responder.on_drag_over(cx, dragged.as_ref()),
            Self::DragOut { dragged } => responder.on_drag_out(cx, dragged.as_ref()),
            Self::Drag(delta) => responder.on_drag(cx, *delta),
            Self::DragEnd => responder.on_drag_end(cx),
            Self::Drop { dragged } => responder.on_drop(cx, dragged.as_ref()),
            Self::Scroll(delta) => responder.on_scroll(cx, *delta),
            Self::Key(key) => responder.on_key(cx, *key),
            Self::Input(text) => responder.on_input(cx, text),
            Self::Tooltip(v) => responder.on_tooltip(cx, *v),
        }
    }
}
