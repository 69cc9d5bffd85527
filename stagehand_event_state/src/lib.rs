// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Event State: the stateful half of input routing.
//!
//! ## Overview
//!
//! - [`pointer`]: one press / drag / click state machine per logical pointer.
//!   It consumes hit targets and press/release transitions and emits
//!   [`PointerIntent`]s in delivery order.
//! - [`highlight`]: ref-counted hover shared by every pointer and surface.
//! - [`tooltip`]: delayed tooltip display for the hovered target.
//! - [`selection`]: the single global selection, switched at frame end.
//!
//! None of these types deliver anything. The host turns their outputs into
//! notifications, which keeps every state machine testable in isolation.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod highlight;
pub mod pointer;
pub mod selection;
pub mod tooltip;

pub use highlight::{HighlightTable, HoverChange};
pub use pointer::{
    ClickMode, DOUBLE_CLICK_WINDOW, DeviceClass, PointerFrame, PointerId, PointerIntent,
    PointerState, Thresholds,
};
pub use selection::{SelectionChange, SelectionState};
pub use tooltip::{TooltipChange, TooltipInput, TooltipSettings, TooltipState};
