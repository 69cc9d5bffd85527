// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts supplied by the host scene.
//!
//! The raycaster never walks a scene graph itself. It asks a
//! [`CandidateSource`] for everything under a ray and, in UI mode, asks a
//! [`VisibilityTest`] whether a candidate is actually visible (not clipped)
//! at the hit point. Any spatial index that can answer these two questions
//! is a valid backend.

use alloc::vec::Vec;

use kurbo::Point;

use crate::types::{Candidate, LayerMask, Ray};

/// Broad query: report every candidate along a ray.
pub trait CandidateSource<K> {
    /// Append all candidates intersecting `ray` on layers in `mask` to `out`.
    ///
    /// The order candidates are appended in is the collection order used to
    /// break equal-depth ties.
    fn query_candidates(&self, ray: &Ray, mask: LayerMask, out: &mut Vec<Candidate<K>>);

    /// Ordering key for UI-mode resolution. Higher is nearer to the viewer.
    fn ui_depth(&self, target: &K) -> i32;
}

/// Narrow query: is the target visible at a world point.
pub trait VisibilityTest<K> {
    /// Return `true` if `world_point` is inside the target's visible, clipped bounds.
    fn is_point_visible(&self, target: &K, world_point: Point) -> bool;
}

impl<K, T: CandidateSource<K> + ?Sized> CandidateSource<K> for &T {
    fn query_candidates(&self, ray: &Ray, mask: LayerMask, out: &mut Vec<Candidate<K>>) {
        (**self).query_candidates(ray, mask, out);
    }

    fn ui_depth(&self, target: &K) -> i32 {
        (**self).ui_depth(target)
    }
}

impl<K, T: VisibilityTest<K> + ?Sized> VisibilityTest<K> for &T {
    fn is_point_visible(&self, target: &K, world_point: Point) -> bool {
        (**self).is_point_visible(target, world_point)
    }
}
