// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand: frame-driven input routing for retained UI scenes.
//!
//! ## Overview
//!
//! Once per host frame, [`InputSystem::frame`] takes a [`RawInput`] snapshot
//! and decides which scene object receives which notification:
//!
//! - [`device`] pollers turn snapshots into press/release edges, deltas and
//!   touch phases.
//! - [`stagehand_raycast`] resolves each pointer to one hit target.
//! - [`stagehand_event_state`] runs per-pointer gestures, ref-counted hover,
//!   tooltips and deferred selection.
//! - [`stagehand_responder`] delivers typed notifications to the target and
//!   an optional global listener.
//!
//! The host scene implements [`InputScene`]: candidate queries, a
//! visibility test and responder lookup. Nothing here owns scene objects;
//! a key the scene no longer resolves is treated as destroyed and its
//! notifications are dropped.
//!
//! ## Configuration
//!
//! [`InputConfig`] holds device toggles, drag/click thresholds per device
//! class and tooltip timing. It is validated once, in
//! [`InputSystem::try_new`] or [`InputSystem::set_config`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod device;
pub mod engine;
pub mod error;

pub use config::InputConfig;
pub use device::{
    KeyPoller, KeySample, MouseInput, MousePoller, MouseSample, RawInput, TouchContact,
    TouchPhase, TouchPoller, TouchSample,
};
pub use engine::{InputScene, InputSystem};
pub use error::ConfigError;

pub use stagehand_event_state::{DOUBLE_CLICK_WINDOW, DeviceClass, PointerId};
pub use stagehand_raycast::{DeviceFlags, Surface, SurfaceId, SurfaceMode};
pub use stagehand_responder::{Delivery, KeyCode, Notification, Responder, ResponderLookup, Role};
