// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raycaster implementation.
//!
//! ## Overview
//!
//! Walks registered surfaces in priority order and resolves a screen point to
//! exactly one target.
//!
//! ## Target Selection
//!
//! - Surfaces whose viewport does not contain the point are skipped.
//! - [`SurfaceMode::World`]: the candidate nearest along the ray wins and the
//!   walk stops at the first surface with any candidate.
//! - [`SurfaceMode::Ui`]: candidates are ordered by UI depth (higher first)
//!   and the first one passing [`VisibilityTest`] wins. Clipped candidates are
//!   skipped individually; a surface whose candidates are all clipped passes
//!   the point on to the next surface.
//! - UI depth strictly dominates ray distance. Equal depths keep collection
//!   order, which is deterministic within one raycast.
//! - When no surface produces a hit, the fallback target (if any) is returned.
//!
//! Non-finite screen points produce no hit at all, not even the fallback.

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::registry::SurfaceRegistry;
use crate::source::{CandidateSource, VisibilityTest};
use crate::types::{Candidate, DeviceFlags, HitResult, Ray, Surface, SurfaceId, SurfaceMode};

/// Prioritized multi-surface hit tester.
///
/// ## Usage
///
/// - Register surfaces through [`Raycaster::surfaces_mut`].
/// - Optionally set a fallback target with [`Raycaster::set_fallback`].
/// - Call [`Raycaster::raycast`] once per pointer per frame, or
///   [`Raycaster::raycast_on`] to stay anchored to the surface a press began on.
#[derive(Debug)]
pub struct Raycaster<K> {
    surfaces: SurfaceRegistry,
    fallback: Option<K>,
    // Reused across raycasts to avoid per-query allocation.
    scratch: Vec<Candidate<K>>,
}

impl<K> Default for Raycaster<K> {
    fn default() -> Self {
        Self {
            surfaces: SurfaceRegistry::new(),
            fallback: None,
            scratch: Vec::new(),
        }
    }
}

impl<K: Clone> Raycaster<K> {
    /// Create a raycaster with no surfaces and no fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered surfaces.
    pub fn surfaces(&self) -> &SurfaceRegistry {
        &self.surfaces
    }

    /// Mutable access to the surface registry.
    pub fn surfaces_mut(&mut self) -> &mut SurfaceRegistry {
        &mut self.surfaces
    }

    /// Set the target returned when nothing else is hit.
    pub fn set_fallback(&mut self, target: Option<K>) {
        self.fallback = target;
    }

    /// The configured fallback target.
    pub fn fallback(&self) -> Option<&K> {
        self.fallback.as_ref()
    }

    /// Resolve `screen` against every enabled surface accepting `devices`.
    pub fn raycast<S>(&mut self, scene: &S, screen: Point, devices: DeviceFlags) -> Option<HitResult<K>>
    where
        S: CandidateSource<K> + VisibilityTest<K> + ?Sized,
    {
        if !screen.is_finite() {
            return None;
        }
        for (id, surface) in self.surfaces.iter_for(devices) {
            if let Some(hit) = cast_surface(&mut self.scratch, scene, id, surface, screen) {
                return Some(hit);
            }
        }
        self.fallback_hit()
    }

    /// Resolve `screen` against a single surface, ignoring priority order.
    ///
    /// Used while a pointer is pressed so hits stay anchored to the surface the
    /// press began on. A disabled or unknown surface yields only the fallback.
    pub fn raycast_on<S>(&mut self, scene: &S, screen: Point, surface: SurfaceId) -> Option<HitResult<K>>
    where
        S: CandidateSource<K> + VisibilityTest<K> + ?Sized,
    {
        if !screen.is_finite() {
            return None;
        }
        if self.surfaces.is_enabled(surface)
            && let Some(desc) = self.surfaces.get(surface)
            && let Some(hit) = cast_surface(&mut self.scratch, scene, surface, desc, screen)
        {
            return Some(hit);
        }
        self.fallback_hit()
    }

    fn fallback_hit(&self) -> Option<HitResult<K>> {
        self.fallback.clone().map(|target| HitResult {
            target,
            world_point: Point::ORIGIN,
            ui_depth: 0,
            surface: None,
        })
    }
}

fn cast_surface<K, S>(
    scratch: &mut Vec<Candidate<K>>,
    scene: &S,
    id: SurfaceId,
    surface: &Surface,
    screen: Point,
) -> Option<HitResult<K>>
where
    K: Clone,
    S: CandidateSource<K> + VisibilityTest<K> + ?Sized,
{
    if !surface.accepts_point(screen) {
        return None;
    }
    let ray = Ray {
        surface: id,
        origin: surface.transform * screen,
        screen,
    };
    scratch.clear();
    scene.query_candidates(&ray, surface.layers, scratch);
    tracing::trace!(surface = ?id, candidates = scratch.len(), "raycast");
    if scratch.is_empty() {
        return None;
    }

    match surface.mode {
        SurfaceMode::World => {
            // `min_by` keeps the first of equal minima, preserving collection order.
            let best = scratch
                .iter()
                .min_by(|a, b| a.distance.total_cmp(&b.distance))?;
            Some(HitResult {
                target: best.target.clone(),
                world_point: best.world_point,
                ui_depth: 0,
                surface: Some(id),
            })
        }
        SurfaceMode::Ui => {
            let mut order: SmallVec<[(i32, usize); 16]> = scratch
                .iter()
                .enumerate()
                .map(|(i, c)| (scene.ui_depth(&c.target), i))
                .collect();
            // Stable: equal depths keep collection order.
            order.sort_by(|a, b| b.0.cmp(&a.0));
            order.iter().find_map(|&(depth, i)| {
                let c = &scratch[i];
                scene
                    .is_point_visible(&c.target, c.world_point)
                    .then(|| HitResult {
                        target: c.target.clone(),
                        world_point: c.world_point,
                        ui_depth: depth,
                        surface: Some(id),
                    })
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LayerMask;
    use kurbo::Rect;

    /// Candidate list keyed by surface, with fixed depths and a clip list.
    #[derive(Default)]
    struct Fixture {
        hits: Vec<(SurfaceId, Candidate<u32>)>,
        depths: Vec<(u32, i32)>,
        clipped: Vec<u32>,
    }

    impl Fixture {
        fn hit(mut self, surface: SurfaceId, target: u32, distance: f64, depth: i32) -> Self {
            self.hits.push((
                surface,
                Candidate {
                    target,
                    world_point: Point::new(1.0, 1.0),
                    distance,
                },
            ));
            self.depths.push((target, depth));
            self
        }

        fn clip(mut self, target: u32) -> Self {
            self.clipped.push(target);
            self
        }
    }

    impl CandidateSource<u32> for Fixture {
        fn query_candidates(&self, ray: &Ray, _mask: LayerMask, out: &mut Vec<Candidate<u32>>) {
            out.extend(
                self.hits
                    .iter()
                    .filter(|(s, _)| *s == ray.surface)
                    .map(|(_, c)| c.clone()),
            );
        }

        fn ui_depth(&self, target: &u32) -> i32 {
            self.depths
                .iter()
                .find(|(t, _)| t == target)
                .map_or(0, |(_, d)| *d)
        }
    }

    impl VisibilityTest<u32> for Fixture {
        fn is_point_visible(&self, target: &u32, _world_point: Point) -> bool {
            !self.clipped.contains(target)
        }
    }

    fn view() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn ui_depth_dominates_ray_distance() {
        let mut rc = Raycaster::new();
        let s = rc.surfaces_mut().register(Surface::ui(0, view()));
        // Depth 5 is nearer to the viewer but farther along the ray.
        let scene = Fixture::default().hit(s, 1, 0.5, 3).hit(s, 2, 9.0, 5);
        let hit = rc
            .raycast(&scene, Point::new(10.0, 10.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(hit.target, 2);
        assert_eq!(hit.ui_depth, 5);
        assert_eq!(hit.surface, Some(s));
    }

    #[test]
    fn clipped_candidate_is_skipped_not_the_whole_surface() {
        let mut rc = Raycaster::new();
        let s = rc.surfaces_mut().register(Surface::ui(0, view()));
        let scene = Fixture::default().hit(s, 1, 0.0, 10).hit(s, 2, 0.0, 3).clip(1);
        let hit = rc
            .raycast(&scene, Point::new(10.0, 10.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(hit.target, 2);
    }

    #[test]
    fn all_clipped_falls_through_to_next_surface() {
        let mut rc = Raycaster::new();
        let top = rc.surfaces_mut().register(Surface::ui(10, view()));
        let below = rc.surfaces_mut().register(Surface::ui(0, view()));
        let scene = Fixture::default().hit(top, 1, 0.0, 10).clip(1).hit(below, 7, 0.0, 0);
        let hit = rc
            .raycast(&scene, Point::new(10.0, 10.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(hit.target, 7);
        assert_eq!(hit.surface, Some(below));
    }

    #[test]
    fn equal_depth_keeps_collection_order() {
        let mut rc = Raycaster::new();
        let s = rc.surfaces_mut().register(Surface::ui(0, view()));
        let scene = Fixture::default().hit(s, 4, 0.0, 2).hit(s, 5, 0.0, 2);
        let first = rc
            .raycast(&scene, Point::new(1.0, 1.0), DeviceFlags::MOUSE)
            .unwrap();
        let second = rc
            .raycast(&scene, Point::new(1.0, 1.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(first.target, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn world_mode_picks_nearest_and_stops() {
        let mut rc = Raycaster::new();
        let world = rc.surfaces_mut().register(Surface::world(10, view()));
        let ui = rc.surfaces_mut().register(Surface::ui(0, view()));
        let scene = Fixture::default()
            .hit(world, 1, 4.0, 100)
            .hit(world, 2, 1.5, 0)
            .hit(ui, 3, 0.0, 1000);
        let hit = rc
            .raycast(&scene, Point::new(1.0, 1.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(hit.target, 2);
        assert_eq!(hit.surface, Some(world));
    }

    #[test]
    fn viewport_rejects_outside_points() {
        let mut rc = Raycaster::new();
        let s = rc.surfaces_mut().register(Surface::ui(0, view()));
        let scene = Fixture::default().hit(s, 1, 0.0, 0);
        assert!(
            rc.raycast(&scene, Point::new(150.0, 10.0), DeviceFlags::MOUSE)
                .is_none()
        );
    }

    #[test]
    fn fallback_when_nothing_hit_but_not_for_nan() {
        let mut rc: Raycaster<u32> = Raycaster::new();
        rc.set_fallback(Some(99));
        let scene = Fixture::default();
        let hit = rc
            .raycast(&scene, Point::new(1.0, 1.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(hit.target, 99);
        assert_eq!(hit.surface, None);
        assert!(
            rc.raycast(&scene, Point::new(f64::NAN, 1.0), DeviceFlags::MOUSE)
                .is_none()
        );
    }

    #[test]
    fn device_flags_filter_surfaces() {
        let mut rc = Raycaster::new();
        let s = rc.surfaces_mut().register(Surface {
            devices: DeviceFlags::MOUSE,
            viewport: view(),
            ..Default::default()
        });
        let scene = Fixture::default().hit(s, 1, 0.0, 0);
        assert!(
            rc.raycast(&scene, Point::new(1.0, 1.0), DeviceFlags::TOUCH)
                .is_none()
        );
        assert!(
            rc.raycast(&scene, Point::new(1.0, 1.0), DeviceFlags::MOUSE)
                .is_some()
        );
    }

    #[test]
    fn anchored_raycast_ignores_higher_surfaces() {
        let mut rc = Raycaster::new();
        let top = rc.surfaces_mut().register(Surface::ui(10, view()));
        let anchor = rc.surfaces_mut().register(Surface::ui(0, view()));
        let scene = Fixture::default().hit(top, 1, 0.0, 0).hit(anchor, 2, 0.0, 0);
        let hit = rc.raycast_on(&scene, Point::new(1.0, 1.0), anchor).unwrap();
        assert_eq!(hit.target, 2);
        rc.surfaces_mut().set_enabled(anchor, false);
        assert!(rc.raycast_on(&scene, Point::new(1.0, 1.0), anchor).is_none());
    }
}
