// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Steady-state input handling never fails; only building an input system
//! from a bad [`InputConfig`](crate::InputConfig) does.

use thiserror::Error;

/// Why an [`InputConfig`](crate::InputConfig) was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A drag or click threshold is below zero.
    #[error("{name} must not be negative (got {value})")]
    NegativeThreshold {
        /// Option name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A numeric option is NaN or infinite.
    #[error("{name} must be finite (got {value})")]
    NonFiniteValue {
        /// Option name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The tooltip delay is below zero.
    #[error("tooltip_delay must not be negative (got {0})")]
    TooltipDelayNegative(f64),
}
