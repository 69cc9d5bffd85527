// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared test scene: shapes for hit testing, one recorder for every responder.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use kurbo::{Point, Rect, Vec2};
use stagehand::{
    Delivery, InputSystem, KeyCode, MouseInput, Notification, RawInput, Responder,
    ResponderLookup, Role, Surface, SurfaceId, TouchContact,
};
use stagehand_raycast::{
    Candidate, CandidateSource, HitShape, LayerMask, Ray, SceneNode, ShapeScene, VisibilityTest,
};

pub const T1: u32 = 1;
pub const T2: u32 = 2;
pub const T3: u32 = 3;
pub const FALLBACK: u32 = 50;
pub const LISTENER: u32 = 99;

#[derive(Default)]
pub struct Recorder {
    pub log: Vec<(u32, Role, Notification<u32>)>,
}

impl Recorder {
    fn push(&mut self, cx: &Delivery<u32>, n: Notification<u32>) {
        self.log.push((cx.target, cx.role, n));
    }
}

impl Responder<u32> for Recorder {
    fn on_hover(&mut self, cx: &Delivery<u32>, hovered: bool) {
        self.push(cx, Notification::Hover(hovered));
    }
    fn on_press(&mut self, cx: &Delivery<u32>, pressed: bool) {
        self.push(cx, Notification::Press(pressed));
    }
    fn on_select(&mut self, cx: &Delivery<u32>, selected: bool) {
        self.push(cx, Notification::Select(selected));
    }
    fn on_click(&mut self, cx: &Delivery<u32>) {
        self.push(cx, Notification::Click);
    }
    fn on_double_click(&mut self, cx: &Delivery<u32>) {
        self.push(cx, Notification::DoubleClick);
    }
    fn on_drag_start(&mut self, cx: &Delivery<u32>) {
        self.push(cx, Notification::DragStart);
    }
    fn on_drag_over(&mut self, cx: &Delivery<u32>, dragged: Option<&u32>) {
        self.push(cx, Notification::DragOver { dragged: dragged.copied() });
    }
    fn on_drag_out(&mut self, cx: &Delivery<u32>, dragged: Option<&u32>) {
        self.push(cx, Notification::DragOut { dragged: dragged.copied() });
    }
    fn on_drag(&mut self, cx: &Delivery<u32>, delta: Vec2) {
        self.push(cx, Notification::Drag(delta));
    }
    fn on_drag_end(&mut self, cx: &Delivery<u32>) {
        self.push(cx, Notification::DragEnd);
    }
    fn on_drop(&mut self, cx: &Delivery<u32>, dragged: Option<&u32>) {
        self.push(cx, Notification::Drop { dragged: dragged.copied() });
    }
    fn on_scroll(&mut self, cx: &Delivery<u32>, delta: f64) {
        self.push(cx, Notification::Scroll(delta));
    }
    fn on_key(&mut self, cx: &Delivery<u32>, key: KeyCode) {
        self.push(cx, Notification::Key(key));
    }
    fn on_input(&mut self, cx: &Delivery<u32>, text: &str) {
        self.push(cx, Notification::Input(text.to_string()));
    }
    fn on_tooltip(&mut self, cx: &Delivery<u32>, show: bool) {
        self.push(cx, Notification::Tooltip(show));
    }
}

#[derive(Default)]
pub struct TestScene {
    pub shapes: ShapeScene<u32>,
    /// Live keys with no geometry (listener, fallback).
    pub extra: Vec<u32>,
    pub recorder: Recorder,
}

impl CandidateSource<u32> for TestScene {
    fn query_candidates(&self, ray: &Ray, mask: LayerMask, out: &mut Vec<Candidate<u32>>) {
        self.shapes.query_candidates(ray, mask, out);
    }

    fn ui_depth(&self, target: &u32) -> i32 {
        self.shapes.ui_depth(target)
    }
}

impl VisibilityTest<u32> for TestScene {
    fn is_point_visible(&self, target: &u32, world_point: Point) -> bool {
        self.shapes.is_point_visible(target, world_point)
    }
}

impl ResponderLookup<u32> for TestScene {
    fn is_alive(&self, target: &u32) -> bool {
        self.shapes.contains(target) || self.extra.contains(target)
    }

    fn responder_mut(&mut self, target: &u32) -> Option<&mut dyn Responder<u32>> {
        if self.is_alive(target) {
            Some(&mut self.recorder as &mut dyn Responder<u32>)
        } else {
            None
        }
    }
}

pub struct Harness {
    pub sys: InputSystem<u32>,
    pub scene: TestScene,
    pub surface: SurfaceId,
    pub mouse: Option<MouseInput>,
    pub touches: Vec<TouchContact>,
    pub keys: Vec<KeyCode>,
    pub text: String,
}

/// Three 100x100 targets side by side: T1 at x 0..100, T2 at 200..300, T3 at 400..500.
pub fn row_scene() -> TestScene {
    let mut scene = TestScene::default();
    for (target, x) in [(T1, 0.0), (T2, 200.0), (T3, 400.0)] {
        scene.shapes.insert(
            SceneNode::new(target, HitShape::Rect(Rect::new(x, 0.0, x + 100.0, 100.0)))
                .with_depth(10),
        );
    }
    scene.extra = vec![FALLBACK, LISTENER];
    scene
}

impl Harness {
    pub fn new() -> Self {
        Self::with(
            row_scene(),
            InputSystem::with_defaults(),
            Surface::ui(0, Rect::new(0.0, 0.0, 800.0, 600.0)),
        )
    }

    pub fn with(scene: TestScene, mut sys: InputSystem<u32>, surface: Surface) -> Self {
        let surface = sys.register_surface(surface);
        Self {
            sys,
            scene,
            surface,
            mouse: None,
            touches: Vec::new(),
            keys: Vec::new(),
            text: String::new(),
        }
    }

    pub fn mouse_to(&mut self, x: f64, y: f64) {
        let m = self.mouse.get_or_insert_with(MouseInput::default);
        m.position = Point::new(x, y);
    }

    pub fn left(&mut self, held: bool) {
        let m = self.mouse.get_or_insert_with(MouseInput::default);
        m.buttons[0] = held;
    }

    pub fn scroll(&mut self, delta: f64) {
        let m = self.mouse.get_or_insert_with(MouseInput::default);
        m.scroll = delta;
    }

    pub fn frame(&mut self, now: f64) {
        let input = RawInput {
            mouse: self.mouse,
            touches: self.touches.clone(),
            keys: self.keys.clone(),
            text: core::mem::take(&mut self.text),
        };
        self.sys.frame(&mut self.scene, &input, now);
        if let Some(m) = self.mouse.as_mut() {
            m.scroll = 0.0;
        }
    }

    /// Everything `target` received as the subject, in order.
    pub fn events(&self, target: u32) -> Vec<Notification<u32>> {
        self.scene
            .recorder
            .log
            .iter()
            .filter(|(t, role, _)| *t == target && *role == Role::Target)
            .map(|(_, _, n)| n.clone())
            .collect()
    }

    /// Like [`Harness::events`], without hover and tooltip traffic.
    pub fn gestures(&self, target: u32) -> Vec<Notification<u32>> {
        self.events(target)
            .into_iter()
            .filter(|n| !matches!(n, Notification::Hover(_) | Notification::Tooltip(_)))
            .collect()
    }

    pub fn count(&self, target: u32, n: &Notification<u32>) -> usize {
        self.events(target).iter().filter(|e| *e == n).count()
    }
}
