// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Responder: typed UI notifications and their dispatcher.
//!
//! ## Overview
//!
//! [`Notification`] is the full set of semantic events a UI element can
//! receive: hover, press, select, click, double click, the drag family,
//! drop, scroll, key, text input and tooltip. Elements implement
//! [`Responder`], overriding only the handlers they support; everything else
//! is a no-op.
//!
//! [`Dispatcher::notify`] delivers one notification to its target and then
//! to an optional global listener, synchronously. Targets that are absent or
//! destroyed (as reported by [`ResponderLookup`]) are skipped silently.
//!
//! This crate does not decide *which* notifications fire; see the pointer
//! state machine in `stagehand_event_state` and the frame driver in `stagehand`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod event;
pub mod responder;

pub use dispatcher::Dispatcher;
pub use event::{KeyCode, Notification};
pub use responder::{Delivery, Responder, ResponderLookup, Role};
