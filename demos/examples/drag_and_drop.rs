// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a card onto a bin, click a button, then activate it from the keyboard.
//!
//! This example wires the whole pipeline together:
//! - `stagehand_raycast::ShapeScene` answers hit queries,
//! - widgets implement `stagehand::Responder` for the handlers they need,
//! - `stagehand::InputSystem` turns scripted device snapshots into notifications.
//!
//! Run:
//! - `cargo run -p stagehand_demos --example drag_and_drop`
//! - `RUST_LOG=stagehand_event_state=debug cargo run -p stagehand_demos --example drag_and_drop`

use std::collections::HashMap;

use kurbo::{Circle, Point, Rect, Vec2};
use stagehand::{
    Delivery, InputSystem, KeyCode, MouseInput, RawInput, Responder, ResponderLookup, Role,
    Surface,
};
use stagehand_raycast::{
    Candidate, CandidateSource, HitShape, LayerMask, Ray, SceneNode, ShapeScene, VisibilityTest,
};
use tracing_subscriber::EnvFilter;

const CARD: u32 = 1;
const BIN: u32 = 2;
const BUTTON: u32 = 3;
const LOGGER: u32 = 100;

/// A widget that prints the notifications it cares about.
struct Widget {
    name: &'static str,
    offset: Vec2,
}

impl Responder<u32> for Widget {
    fn on_hover(&mut self, cx: &Delivery<u32>, hovered: bool) {
        if cx.role == Role::Target {
            println!("{}: hover {hovered}", self.name);
        }
    }

    fn on_click(&mut self, cx: &Delivery<u32>) {
        if cx.role == Role::Target {
            println!("{}: click", self.name);
        }
    }

    fn on_select(&mut self, cx: &Delivery<u32>, selected: bool) {
        if cx.role == Role::Target {
            println!("{}: selected {selected}", self.name);
        }
    }

    fn on_drag(&mut self, cx: &Delivery<u32>, delta: Vec2) {
        if cx.role == Role::Target {
            self.offset += delta;
        }
    }

    fn on_drag_end(&mut self, cx: &Delivery<u32>) {
        if cx.role == Role::Target {
            println!("{}: dropped after moving {:?}", self.name, self.offset);
        }
    }

    fn on_drop(&mut self, cx: &Delivery<u32>, dragged: Option<&u32>) {
        if cx.role == Role::Target {
            println!("{}: received {dragged:?}", self.name);
        }
    }

    fn on_key(&mut self, cx: &Delivery<u32>, key: KeyCode) {
        if cx.role == Role::Target {
            println!("{}: key {key:?}", self.name);
        }
    }
}

/// Counts every notification that passes through the dispatcher.
#[derive(Default)]
struct Logger {
    clicks: u32,
}

impl Responder<u32> for Logger {
    fn on_click(&mut self, cx: &Delivery<u32>) {
        self.clicks += 1;
        println!("logger: click on {}", cx.target);
    }
}

struct Scene {
    shapes: ShapeScene<u32>,
    widgets: HashMap<u32, Widget>,
    logger: Logger,
}

impl CandidateSource<u32> for Scene {
    fn query_candidates(&self, ray: &Ray, mask: LayerMask, out: &mut Vec<Candidate<u32>>) {
        self.shapes.query_candidates(ray, mask, out);
    }

    fn ui_depth(&self, target: &u32) -> i32 {
        self.shapes.ui_depth(target)
    }
}

impl VisibilityTest<u32> for Scene {
    fn is_point_visible(&self, target: &u32, world_point: Point) -> bool {
        self.shapes.is_point_visible(target, world_point)
    }
}

impl ResponderLookup<u32> for Scene {
    fn is_alive(&self, target: &u32) -> bool {
        *target == LOGGER || self.widgets.contains_key(target)
    }

    fn responder_mut(&mut self, target: &u32) -> Option<&mut dyn Responder<u32>> {
        if *target == LOGGER {
            return Some(&mut self.logger as &mut dyn Responder<u32>);
        }
        self.widgets
            .get_mut(target)
            .map(|w| w as &mut dyn Responder<u32>)
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut shapes = ShapeScene::new();
    shapes.insert(
        SceneNode::new(CARD, HitShape::Rect(Rect::new(20.0, 20.0, 120.0, 80.0))).with_depth(2),
    );
    // The bin sits under a clipped panel edge: only its left part is visible.
    shapes.insert(
        SceneNode::new(BIN, HitShape::Rect(Rect::new(200.0, 20.0, 320.0, 80.0)))
            .with_depth(1)
            .with_clip(Rect::new(0.0, 0.0, 300.0, 600.0)),
    );
    shapes.insert(
        SceneNode::new(BUTTON, HitShape::Circle(Circle::new((60.0, 200.0), 30.0))).with_depth(1),
    );

    let mut widgets = HashMap::new();
    for (key, name) in [(CARD, "card"), (BIN, "bin"), (BUTTON, "button")] {
        widgets.insert(
            key,
            Widget {
                name,
                offset: Vec2::ZERO,
            },
        );
    }
    let mut scene = Scene {
        shapes,
        widgets,
        logger: Logger::default(),
    };

    let mut input = InputSystem::with_defaults();
    input.register_surface(Surface::ui(0, Rect::new(0.0, 0.0, 640.0, 480.0)));
    input.set_listener(Some(LOGGER));

    // Scripted mouse: hover the card, drag it onto the bin, then click the button.
    let path = [
        (Point::new(50.0, 50.0), false),
        (Point::new(50.0, 50.0), true),
        (Point::new(120.0, 50.0), true),
        (Point::new(250.0, 50.0), true),
        (Point::new(250.0, 50.0), false),
        (Point::new(60.0, 200.0), false),
        (Point::new(60.0, 200.0), true),
        (Point::new(61.0, 201.0), false),
    ];
    let mut now = 0.0;
    for (position, held) in path {
        let raw = RawInput {
            mouse: Some(MouseInput {
                position,
                buttons: [held, false, false],
                scroll: 0.0,
            }),
            ..Default::default()
        };
        input.frame(&mut scene, &raw, now);
        now += 1.0 / 60.0;
    }
    tracing::info!(selection = ?input.selection(), "mouse script done");

    // Keyboard: the button is selected now, so keys go to it.
    for keys in [vec![KeyCode::Submit], vec![]] {
        let raw = RawInput {
            keys,
            ..Default::default()
        };
        input.frame(&mut scene, &raw, now);
        now += 1.0 / 60.0;
    }
    tracing::info!(clicks = scene.logger.clicks, "keyboard script done");
}
