// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The notification surface: every semantic event a target can receive.

use alloc::string::String;

use kurbo::Vec2;

/// Navigation and command keys forwarded to the current selection.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    /// Move focus up.
    Up,
    /// Move focus down.
    Down,
    /// Move focus left.
    Left,
    /// Move focus right.
    Right,
    /// Activate (Enter, gamepad A).
    Submit,
    /// Back out (Escape, gamepad B).
    Cancel,
    /// Cycle focus.
    Tab,
    /// Any other key, by host-defined code.
    Other(u32),
}

/// A semantic notification delivered to a target.
///
/// Payload references to other scene objects (`dragged`) are non-owning and
/// may be `None` when a gesture started over empty space.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification<K> {
    /// Hover refcount crossed 0↔1.
    Hover(bool),
    /// Pointer pressed (`true`) or released (`false`) over the target.
    Press(bool),
    /// Target became (`true`) or stopped being (`false`) the global selection.
    Select(bool),
    /// Press and release within thresholds.
    Click,
    /// Second click within the double-click window.
    DoubleClick,
    /// Drag threshold crossed.
    DragStart,
    /// A drag entered the target's area.
    DragOver {
        /// Object being dragged.
        dragged: Option<K>,
    },
    /// A drag left the target's area.
    DragOut {
        /// Object being dragged.
        dragged: Option<K>,
    },
    /// Pointer moved while dragging.
    Drag(Vec2),
    /// Drag gesture released or abandoned.
    DragEnd,
    /// A drag was released over the target.
    Drop {
        /// Object that was dragged onto the target.
        dragged: Option<K>,
    },
    /// Scroll axis moved while hovering.
    Scroll(f64),
    /// Navigation or command key.
    Key(KeyCode),
    /// Raw text input.
    Input(String),
    /// Tooltip shown (`true`) or hidden (`false`).
    Tooltip(bool),
}

impl<K> Notification<K> {
    /// Stable handler name, useful for logs and traces.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hover(_) => "OnHover",
            Self::Press(_) => "OnPress",
            Self::Select(_) => "OnSelect",
            Self::Click => "OnClick",
            Self::DoubleClick => "OnDoubleClick",
            Self::DragStart => "OnDragStart",
            Self::DragOver { .. } => "OnDragOver",
            Self::DragOut { .. } => "OnDragOut",
            Self::Drag(_) => "OnDrag",
            Self::DragEnd => "OnDragEnd",
            Self::Drop { .. } => "OnDrop",
            Self::Scroll(_) => "OnScroll",
            Self::Key(_) => "OnKey",
            Self::Input(_) => "OnInput",
            Self::Tooltip(_) => "OnTooltip",
        }
    }
}
