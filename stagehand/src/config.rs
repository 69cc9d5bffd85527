// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input configuration.

use stagehand_event_state::{DeviceClass, Thresholds, TooltipSettings};
use stagehand_responder::KeyCode;

use crate::error::ConfigError;

/// Recognized input options.
///
/// The double-click window is fixed; see
/// [`DOUBLE_CLICK_WINDOW`](stagehand_event_state::DOUBLE_CLICK_WINDOW).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Process the mouse.
    pub use_mouse: bool,
    /// Process touch contacts.
    pub use_touch: bool,
    /// Process keyboard keys and text.
    ///
    /// [`RawInput::keys`](crate::RawInput::keys) does not say which device a
    /// key came from, so keys are processed when either this or
    /// [`use_controller`](Self::use_controller) is set. Text needs this one.
    pub use_keyboard: bool,
    /// Process controller navigation keys. Shares the key stream with
    /// [`use_keyboard`](Self::use_keyboard).
    pub use_controller: bool,
    /// Track every touch contact, not only the first.
    pub allow_multi_touch: bool,
    /// Mouse movement (px) that starts a drag.
    pub mouse_drag_threshold: f64,
    /// Mouse movement (px) that cancels a click.
    pub mouse_click_threshold: f64,
    /// Touch movement (px) that starts a drag.
    pub touch_drag_threshold: f64,
    /// Touch movement (px) that cancels a click.
    pub touch_click_threshold: f64,
    /// Seconds of stable hover before a tooltip shows.
    pub tooltip_delay: f64,
    /// Keep tooltips while the pointer moves within the hovered target.
    pub sticky_tooltip: bool,
    /// Holding this key shows tooltips immediately.
    pub tooltip_modifier: Option<KeyCode>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            use_mouse: true,
            use_touch: true,
            use_keyboard: true,
            use_controller: true,
            allow_multi_touch: true,
            mouse_drag_threshold: Thresholds::MOUSE.drag,
            mouse_click_threshold: Thresholds::MOUSE.click,
            touch_drag_threshold: Thresholds::TOUCH.drag,
            touch_click_threshold: Thresholds::TOUCH.click,
            tooltip_delay: 1.0,
            sticky_tooltip: true,
            tooltip_modifier: None,
        }
    }
}

impl InputConfig {
    /// Check every numeric option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("mouse_drag_threshold", self.mouse_drag_threshold),
            ("mouse_click_threshold", self.mouse_click_threshold),
            ("touch_drag_threshold", self.touch_drag_threshold),
            ("touch_click_threshold", self.touch_click_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeThreshold { name, value });
            }
        }
        if !self.tooltip_delay.is_finite() {
            return Err(ConfigError::NonFiniteValue {
                name: "tooltip_delay",
                value: self.tooltip_delay,
            });
        }
        if self.tooltip_delay < 0.0 {
            return Err(ConfigError::TooltipDelayNegative(self.tooltip_delay));
        }
        Ok(())
    }

    /// Thresholds for a device class. The pseudo-pointer uses the mouse values.
    pub fn thresholds(&self, class: DeviceClass) -> Thresholds {
        match class {
            DeviceClass::Touch => Thresholds {
                drag: self.touch_drag_threshold,
                click: self.touch_click_threshold,
            },
            DeviceClass::Mouse | DeviceClass::Controller => Thresholds {
                drag: self.mouse_drag_threshold,
                click: self.mouse_click_threshold,
            },
        }
    }

    /// Tooltip timing derived from this config.
    pub fn tooltip_settings(&self) -> TooltipSettings {
        TooltipSettings {
            delay: self.tooltip_delay,
            sticky: self.sticky_tooltip,
        }
    }

    /// Whether the shared key stream is processed.
    pub fn uses_keys(&self) -> bool {
        self.use_keyboard || self.use_controller
    }
}
