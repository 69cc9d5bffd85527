// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference scene implementing both collaborator contracts over `kurbo` shapes.
//!
//! [`ShapeScene`] is a flat list of nodes, each with a hit shape in surface
//! space, a UI depth, an optional clip rectangle and a layer mask. It is small
//! enough to back tests and demos, and shows what a real render tree has to
//! answer for the [`Raycaster`](crate::raycaster::Raycaster).
//!
//! ```
//! use kurbo::{Point, Rect};
//! use stagehand_raycast::{DeviceFlags, HitShape, Raycaster, SceneNode, ShapeScene, Surface};
//!
//! let mut scene = ShapeScene::new();
//! scene.insert(SceneNode::new(1_u32, HitShape::Rect(Rect::new(0.0, 0.0, 50.0, 50.0))).with_depth(1));
//! scene.insert(SceneNode::new(2_u32, HitShape::Rect(Rect::new(10.0, 10.0, 20.0, 20.0))).with_depth(2));
//!
//! let mut rc = Raycaster::new();
//! rc.surfaces_mut().register(Surface::ui(0, Rect::new(0.0, 0.0, 100.0, 100.0)));
//! let hit = rc.raycast(&scene, Point::new(15.0, 15.0), DeviceFlags::MOUSE).unwrap();
//! assert_eq!(hit.target, 2);
//! ```

use alloc::vec::Vec;

use kurbo::{Circle, Point, Rect, RoundedRect, Shape, Vec2};

use crate::source::{CandidateSource, VisibilityTest};
use crate::types::{Candidate, LayerMask, Ray};

/// Hit geometry for a scene node, in surface space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitShape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Filled disk.
    Circle(Circle),
    /// Filled rounded rectangle.
    RoundedRect(RoundedRect),
}

impl HitShape {
    /// Distance from `pt` to the shape's fill, or `None` for a miss.
    ///
    /// Interior points score 0. Points within `tolerance` of the edge are
    /// hits scored by how far outside they are.
    pub fn hit_distance(&self, pt: Point, tolerance: f64) -> Option<f64> {
        match self {
            Self::Rect(r) => {
                let dx = if pt.x < r.x0 {
                    r.x0 - pt.x
                } else if pt.x > r.x1 {
                    pt.x - r.x1
                } else {
                    0.0
                };
                let dy = if pt.y < r.y0 {
                    r.y0 - pt.y
                } else if pt.y > r.y1 {
                    pt.y - r.y1
                } else {
                    0.0
                };
                let dist = Vec2::new(dx, dy).hypot();
                (dist <= tolerance).then_some(dist)
            }
            Self::Circle(c) => {
                let dist = c.center.distance(pt);
                if dist <= c.radius + tolerance {
                    Some((dist - c.radius).max(0.0))
                } else {
                    None
                }
            }
            Self::RoundedRect(rr) => {
                if rr.contains(pt) {
                    return Some(0.0);
                }
                let dist = rounded_rect_distance(rr, pt);
                (dist <= tolerance).then_some(dist)
            }
        }
    }
}

/// Distance from an outside point to a rounded rectangle's fill.
///
/// Uses the radius of the corner facing `pt`, clamped to the half extents.
fn rounded_rect_distance(rr: &RoundedRect, pt: Point) -> f64 {
    let rect = rr.rect();
    let radii = rr.radii();
    let rel = pt - rect.center();
    let half = Vec2::new(rect.width() * 0.5, rect.height() * 0.5);
    let radius = match (rel.x > 0.0, rel.y > 0.0) {
        (false, false) => radii.top_left,
        (true, false) => radii.top_right,
        (true, true) => radii.bottom_right,
        (false, true) => radii.bottom_left,
    }
    .min(half.x)
    .min(half.y)
    .max(0.0);
    // Distance from the corner-circle centers' rectangle, less the radius.
    let qx = (if rel.x < 0.0 { -rel.x } else { rel.x }) - half.x + radius;
    let qy = (if rel.y < 0.0 { -rel.y } else { rel.y }) - half.y + radius;
    let outside = Vec2::new(qx.max(0.0), qy.max(0.0)).hypot();
    (outside + qx.max(qy).min(0.0) - radius).max(0.0)
}

/// One hit-testable object in a [`ShapeScene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode<K> {
    /// Key reported in hits.
    pub target: K,
    /// Hit geometry in surface space.
    pub shape: HitShape,
    /// UI ordering key. Higher is nearer to the viewer.
    pub depth: i32,
    /// Distance along the ray, used by world-mode surfaces.
    pub distance: f64,
    /// Layers the node lives on.
    pub layers: LayerMask,
    /// Visible region. Points outside fail the visibility test.
    pub clip: Option<Rect>,
    /// Hidden nodes are never reported.
    pub visible: bool,
}

impl<K> SceneNode<K> {
    /// A visible node on every layer with depth 0 and no clip.
    pub fn new(target: K, shape: HitShape) -> Self {
        Self {
            target,
            shape,
            depth: 0,
            distance: 0.0,
            layers: LayerMask::ALL,
            clip: None,
            visible: true,
        }
    }

    /// Set the UI depth.
    #[must_use]
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the world-mode ray distance.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Set the clip rectangle.
    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Set the layer mask.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }
}

/// Flat list of [`SceneNode`]s answering candidate and visibility queries.
#[derive(Clone, Debug)]
pub struct ShapeScene<K> {
    nodes: Vec<SceneNode<K>>,
    /// Near-miss tolerance applied to every shape.
    pub tolerance: f64,
}

impl<K> Default for ShapeScene<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            tolerance: 0.0,
        }
    }
}

impl<K: PartialEq + Clone> ShapeScene<K> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Nodes are reported in insertion order.
    pub fn insert(&mut self, node: SceneNode<K>) {
        self.nodes.push(node);
    }

    /// Remove the node for `target`. Returns `true` if it existed.
    pub fn remove(&mut self, target: &K) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.target != *target);
        self.nodes.len() != before
    }

    /// Returns `true` if a node exists for `target`.
    pub fn contains(&self, target: &K) -> bool {
        self.get(target).is_some()
    }

    /// Look up a node.
    pub fn get(&self, target: &K) -> Option<&SceneNode<K>> {
        self.nodes.iter().find(|n| n.target == *target)
    }

    /// Mutable node lookup.
    pub fn get_mut(&mut self, target: &K) -> Option<&mut SceneNode<K>> {
        self.nodes.iter_mut().find(|n| n.target == *target)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[SceneNode<K>] {
        &self.nodes
    }
}

impl<K: PartialEq + Clone> CandidateSource<K> for ShapeScene<K> {
    fn query_candidates(&self, ray: &Ray, mask: LayerMask, out: &mut Vec<Candidate<K>>) {
        for node in &self.nodes {
            if !node.visible || !node.layers.intersects(mask) {
                continue;
            }
            if let Some(d) = node.shape.hit_distance(ray.origin, self.tolerance) {
                out.push(Candidate {
                    target: node.target.clone(),
                    world_point: ray.origin,
                    distance: node.distance + d,
                });
            }
        }
    }

    fn ui_depth(&self, target: &K) -> i32 {
        self.get(target).map_or(0, |n| n.depth)
    }
}

impl<K: PartialEq + Clone> VisibilityTest<K> for ShapeScene<K> {
    fn is_point_visible(&self, target: &K, world_point: Point) -> bool {
        self.get(target).is_some_and(|n| {
            n.visible && n.clip.is_none_or(|clip| clip.contains(world_point))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raycaster::Raycaster;
    use crate::types::{DeviceFlags, Surface};

    #[test]
    fn rect_hit_inside_and_tolerant_miss() {
        let r = HitShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(r.hit_distance(Point::new(5.0, 5.0), 0.0), Some(0.0));
        assert_eq!(r.hit_distance(Point::new(11.0, 5.0), 0.0), None);
        let near = r.hit_distance(Point::new(10.5, 5.0), 1.0).unwrap();
        assert!((near - 0.5).abs() < 1e-9, "near-miss scores its overshoot");
    }

    #[test]
    fn circle_and_rounded_rect() {
        let c = HitShape::Circle(Circle::new((0.0, 0.0), 5.0));
        assert_eq!(c.hit_distance(Point::new(1.0, 1.0), 0.0), Some(0.0));
        assert!(c.hit_distance(Point::new(10.0, 0.0), 0.0).is_none());

        let rr = HitShape::RoundedRect(RoundedRect::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0));
        assert!(rr.hit_distance(Point::new(5.0, 5.0), 0.0).is_some());
        assert!(rr.hit_distance(Point::new(20.0, 20.0), 0.0).is_none());
    }

    #[test]
    fn rounded_rect_near_misses_score_their_distance() {
        let rr = HitShape::RoundedRect(RoundedRect::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0));
        let side = rr.hit_distance(Point::new(11.0, 5.0), 4.0).unwrap();
        assert!((side - 1.0).abs() < 1e-9);
        let farther = rr.hit_distance(Point::new(13.0, 5.0), 4.0).unwrap();
        assert!((farther - 3.0).abs() < 1e-9);
        // Diagonal from the rounded corner: measured to the arc, not the box.
        let corner = rr.hit_distance(Point::new(11.0, 11.0), 4.0).unwrap();
        let expected = Vec2::new(3.0, 3.0).hypot() - 2.0;
        assert!((corner - expected).abs() < 1e-9);
        assert!(rr.hit_distance(Point::new(11.0, 11.0), 1.0).is_none());
    }

    #[test]
    fn world_mode_prefers_the_nearer_rounded_rect_miss() {
        let mut scene = ShapeScene::new();
        let rounded = |x0: f64| {
            HitShape::RoundedRect(RoundedRect::from_rect(Rect::new(x0, 0.0, x0 + 10.0, 10.0), 2.0))
        };
        // Inserted first, so it would win a tie.
        scene.insert(SceneNode::new(2_u32, rounded(12.5)));
        scene.insert(SceneNode::new(1_u32, rounded(0.0)));
        scene.tolerance = 2.0;
        let mut rc = Raycaster::new();
        rc.surfaces_mut()
            .register(Surface::world(0, Rect::new(0.0, 0.0, 100.0, 100.0)));
        let hit = rc
            .raycast(&scene, Point::new(11.0, 5.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(hit.target, 1);
    }

    #[test]
    fn clip_rejects_point_but_next_candidate_wins() {
        let mut scene = ShapeScene::new();
        let full = Rect::new(0.0, 0.0, 100.0, 100.0);
        scene.insert(SceneNode::new(1_u32, HitShape::Rect(full)).with_depth(1));
        // Scrolled-out item: geometry covers the point but its clip does not.
        scene.insert(
            SceneNode::new(2_u32, HitShape::Rect(full))
                .with_depth(9)
                .with_clip(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        let mut rc = Raycaster::new();
        rc.surfaces_mut().register(Surface::ui(0, full));
        let inside_clip = rc
            .raycast(&scene, Point::new(5.0, 5.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(inside_clip.target, 2);
        let outside_clip = rc
            .raycast(&scene, Point::new(50.0, 50.0), DeviceFlags::MOUSE)
            .unwrap();
        assert_eq!(outside_clip.target, 1);
    }

    #[test]
    fn layers_and_visibility_filter_candidates() {
        let mut scene = ShapeScene::new();
        let r = HitShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.insert(SceneNode::new(1_u32, r).with_layers(LayerMask(0b10)));
        scene.insert(SceneNode::new(2_u32, r));
        scene.get_mut(&2).unwrap().visible = false;

        let mut out = Vec::new();
        let ray = Ray {
            surface: crate::types::SurfaceId(0),
            origin: Point::new(1.0, 1.0),
            screen: Point::new(1.0, 1.0),
        };
        scene.query_candidates(&ray, LayerMask(0b01), &mut out);
        assert!(out.is_empty());
        scene.query_candidates(&ray, LayerMask(0b10), &mut out);
        assert_eq!(out.len(), 1);
        assert!(scene.remove(&1));
        assert!(!scene.contains(&1));
    }
}
