// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Raycast: resolve a screen point to the single topmost interactive target.
//!
//! ## Overview
//!
//! Input surfaces (cameras, UI layers) are registered in a
//! [`SurfaceRegistry`] with an explicit priority. For each query the
//! [`Raycaster`] walks the enabled surfaces highest priority first, builds a
//! [`Ray`] for every surface whose viewport contains the point, and asks the
//! host scene for candidates through [`CandidateSource`].
//!
//! ## Ordering
//!
//! - World surfaces take the candidate nearest along the ray.
//! - UI surfaces rank candidates by UI depth (higher is nearer) and pick the
//!   first one the [`VisibilityTest`] accepts. Depth always dominates distance.
//! - Equal depths keep the order the scene reported them in.
//!
//! ## Collaborators
//!
//! This crate does not know about render trees. The host implements
//! [`CandidateSource`] and [`VisibilityTest`]; [`ShapeScene`] is a small
//! reference implementation over `kurbo` shapes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod raycaster;
pub mod registry;
pub mod scene;
pub mod source;
pub mod types;

pub use raycaster::Raycaster;
pub use registry::SurfaceRegistry;
pub use scene::{HitShape, SceneNode, ShapeScene};
pub use source::{CandidateSource, VisibilityTest};
pub use types::{Candidate, DeviceFlags, HitResult, LayerMask, Ray, Surface, SurfaceId, SurfaceMode};
