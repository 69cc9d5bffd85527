// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for hit testing: surfaces, rays, candidates and results.

use kurbo::{Affine, Point, Rect};

/// Identifier for a registered input surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SurfaceId(pub u32);

/// How a surface resolves overlapping candidates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SurfaceMode {
    /// Pick the candidate nearest along the ray.
    World,
    /// Order candidates by UI depth, then take the first one that is visible at the hit point.
    #[default]
    Ui,
}

bitflags::bitflags! {
    /// Device classes a surface accepts events from.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DeviceFlags: u8 {
        /// Mouse and other pointing devices with buttons.
        const MOUSE      = 0b0000_0001;
        /// Touch contacts.
        const TOUCH      = 0b0000_0010;
        /// Keyboard navigation and text.
        const KEYBOARD   = 0b0000_0100;
        /// Gamepad / controller navigation.
        const CONTROLLER = 0b0000_1000;
    }
}

impl Default for DeviceFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Bit mask selecting which scene layers a surface can see.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Returns `true` if the two masks share at least one layer.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Descriptor for an input surface (a camera or UI layer).
///
/// Surfaces are consumed, not owned: the host describes them and registers
/// them with a [`SurfaceRegistry`](crate::registry::SurfaceRegistry).
#[derive(Clone, Debug)]
pub struct Surface {
    /// Sort key. Higher priority surfaces are tested first.
    pub priority: i32,
    /// Screen-space rectangle the surface covers. Points outside are rejected.
    pub viewport: Rect,
    /// Screen → surface space transform used to build rays.
    pub transform: Affine,
    /// Candidate resolution mode.
    pub mode: SurfaceMode,
    /// Scene layers visible to this surface.
    pub layers: LayerMask,
    /// Device classes this surface accepts.
    pub devices: DeviceFlags,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            priority: 0,
            viewport: Rect::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::INFINITY),
            transform: Affine::IDENTITY,
            mode: SurfaceMode::default(),
            layers: LayerMask::ALL,
            devices: DeviceFlags::default(),
        }
    }
}

impl Surface {
    /// Create a UI-mode surface covering `viewport` with an identity transform.
    pub fn ui(priority: i32, viewport: Rect) -> Self {
        Self {
            priority,
            viewport,
            ..Default::default()
        }
    }

    /// Create a world-mode surface covering `viewport` with an identity transform.
    pub fn world(priority: i32, viewport: Rect) -> Self {
        Self {
            priority,
            viewport,
            mode: SurfaceMode::World,
            ..Default::default()
        }
    }

    /// Returns `true` if the screen point lies inside the viewport (edges inclusive).
    pub fn accepts_point(&self, screen: Point) -> bool {
        screen.x >= self.viewport.x0
            && screen.x <= self.viewport.x1
            && screen.y >= self.viewport.y0
            && screen.y <= self.viewport.y1
    }
}

/// A query ray in surface space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Surface that produced the ray.
    pub surface: SurfaceId,
    /// Ray origin in surface space.
    pub origin: Point,
    /// Original screen-space point.
    pub screen: Point,
}

/// A candidate reported by a [`CandidateSource`](crate::source::CandidateSource).
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<K> {
    /// Scene object that was hit.
    pub target: K,
    /// Hit location in world (surface) space.
    pub world_point: Point,
    /// Physical distance along the ray. Only consulted in [`SurfaceMode::World`].
    pub distance: f64,
}

/// The single resolved hit for a raycast.
#[derive(Clone, Debug, PartialEq)]
pub struct HitResult<K> {
    /// Winning target.
    pub target: K,
    /// Hit location in world (surface) space.
    pub world_point: Point,
    /// UI depth of the winner (0 for world-mode hits and the fallback target).
    pub ui_depth: i32,
    /// Surface that produced the hit, or `None` for the fallback target.
    pub surface: Option<SurfaceId>,
}
