// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame input driver.
//!
//! ## Frame order
//!
//! [`InputSystem::frame`] runs the whole pipeline once:
//!
//! 1. Touch contacts, in device enumeration order. Touches run before the
//!    mouse so platforms that mirror touches as mouse events do not produce
//!    the touch's events twice in the wrong order.
//! 2. Mouse buttons (left, right, middle), then mouse hover and scroll.
//! 3. Keyboard / controller keys and text, routed to the committed selection.
//! 4. Tooltip timer for the mouse hover target.
//! 5. Selection commit.
//!
//! Every pointer step's intents are delivered before the next pointer runs,
//! so a selection request from one pointer is visible to the next.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use stagehand_event_state::{
    DOUBLE_CLICK_WINDOW, DeviceClass, HighlightTable, HoverChange, PointerFrame, PointerId, PointerIntent,
    PointerState, SelectionChange, SelectionState, TooltipChange, TooltipInput, TooltipState,
};
use stagehand_raycast::{
    CandidateSource, DeviceFlags, HitResult, Raycaster, Surface, SurfaceId, VisibilityTest,
};
use stagehand_responder::{Dispatcher, KeyCode, Notification, ResponderLookup};

use crate::config::InputConfig;
use crate::device::{
    KeyPoller, MouseInput, MousePoller, MouseSample, RawInput, TouchContact, TouchPhase,
    TouchPoller,
};
use crate::error::ConfigError;

/// Everything the input system needs from the host scene.
///
/// Implemented automatically for any type providing candidates, visibility
/// and responders.
pub trait InputScene<K>: CandidateSource<K> + VisibilityTest<K> + ResponderLookup<K> {}

impl<K, T> InputScene<K> for T where
    T: CandidateSource<K> + VisibilityTest<K> + ResponderLookup<K> + ?Sized
{
}

/// Highlight source for the mouse hover.
const HOVER_SOURCE: PointerId = PointerId::MOUSE_LEFT;
/// Highlight source for the keyboard/controller focus.
const FOCUS_SOURCE: PointerId = PointerId::CONTROLLER;

const MOUSE_POINTERS: [PointerId; 3] = [
    PointerId::MOUSE_LEFT,
    PointerId::MOUSE_RIGHT,
    PointerId::MOUSE_MIDDLE,
];

/// Routes polled device input to scene objects.
#[derive(Debug)]
pub struct InputSystem<K> {
    config: InputConfig,
    raycaster: Raycaster<K>,
    dispatcher: Dispatcher<K>,
    pointers: HashMap<PointerId, PointerState<K>>,
    highlight: HighlightTable<K, PointerId>,
    tooltip: TooltipState<K>,
    selection: SelectionState<K>,
    mouse: MousePoller,
    touch: TouchPoller,
    keys: KeyPoller,
    primary_touch: Option<u32>,
    // Last click of lifted contacts, so a second tap can double click.
    touch_clicks: HashMap<PointerId, f64>,
    // Reused across pointer steps.
    intents: Vec<PointerIntent<K>>,
}

impl<K: Clone + Eq + Hash + Debug> InputSystem<K> {
    /// Create an input system with a validated configuration.
    pub fn try_new(config: InputConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an input system with the default configuration.
    pub fn with_defaults() -> Self {
        Self::build(InputConfig::default())
    }

    fn build(config: InputConfig) -> Self {
        let mut pointers = HashMap::new();
        for id in MOUSE_POINTERS {
            pointers.insert(id, PointerState::new(id, DeviceClass::Mouse));
        }
        pointers.insert(
            PointerId::CONTROLLER,
            PointerState::new(PointerId::CONTROLLER, DeviceClass::Controller),
        );
        Self {
            tooltip: TooltipState::new(config.tooltip_settings()),
            config,
            raycaster: Raycaster::new(),
            dispatcher: Dispatcher::new(),
            pointers,
            highlight: HighlightTable::new(),
            selection: SelectionState::new(),
            mouse: MousePoller::new(),
            touch: TouchPoller::new(),
            keys: KeyPoller::new(),
            primary_touch: None,
            touch_clicks: HashMap::new(),
            intents: Vec::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Replace the configuration. Thresholds apply from the next step.
    pub fn set_config(&mut self, config: InputConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.tooltip.set_settings(config.tooltip_settings());
        self.config = config;
        Ok(())
    }

    /// The hit tester.
    pub fn raycaster(&self) -> &Raycaster<K> {
        &self.raycaster
    }

    /// Mutable hit tester, e.g. to set the fallback target.
    pub fn raycaster_mut(&mut self) -> &mut Raycaster<K> {
        &mut self.raycaster
    }

    /// The notification dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher<K> {
        &self.dispatcher
    }

    /// Set or clear the global listener that observes all traffic.
    pub fn set_listener(&mut self, listener: Option<K>) {
        self.dispatcher.set_listener(listener);
    }

    /// Register an input surface.
    pub fn register_surface(&mut self, surface: Surface) -> SurfaceId {
        self.raycaster.surfaces_mut().register(surface)
    }

    /// Unregister a surface, force-ending gestures anchored to it.
    pub fn unregister_surface<S>(&mut self, scene: &mut S, id: SurfaceId) -> Option<Surface>
    where
        S: ResponderLookup<K> + ?Sized,
    {
        self.cancel_where(scene, |p| p.pressed_surface == Some(id));
        self.raycaster.surfaces_mut().unregister(id)
    }

    /// Enable or disable a surface. Disabling force-ends gestures anchored to it.
    ///
    /// Returns `false` if the surface is unknown.
    pub fn set_surface_enabled<S>(&mut self, scene: &mut S, id: SurfaceId, enabled: bool) -> bool
    where
        S: ResponderLookup<K> + ?Sized,
    {
        if !enabled {
            self.cancel_where(scene, |p| p.pressed_surface == Some(id));
        }
        self.raycaster.surfaces_mut().set_enabled(id, enabled)
    }

    /// Tell the system `target` was destroyed.
    ///
    /// In-flight gestures pressing or dragging it are force-ended, and every
    /// reference to it is dropped without further notification.
    pub fn target_destroyed<S>(&mut self, scene: &mut S, target: &K)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        tracing::debug!(?target, "target destroyed");
        self.cancel_where(scene, |p| p.holds(target));
        for p in self.pointers.values_mut() {
            p.forget(target);
        }
        self.highlight.forget_target(target);
        self.tooltip.forget(target);
        self.selection.forget(target);
    }

    /// Request a selection change, applied at the end of the next frame.
    ///
    /// `via_focus` marks keyboard/controller navigation: the selected target
    /// also receives a focus highlight.
    pub fn request_selection<S>(&mut self, scene: &mut S, target: Option<K>, via_focus: bool)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        if let Some(change) = self.selection.select(target, via_focus) {
            self.apply_selection_change(scene, change);
        }
    }

    /// State of a pointer, if it exists.
    pub fn pointer(&self, id: PointerId) -> Option<&PointerState<K>> {
        self.pointers.get(&id)
    }

    /// Returns `true` while `id` is dragging.
    pub fn is_dragging(&self, id: PointerId) -> bool {
        self.pointers.get(&id).is_some_and(PointerState::is_dragging)
    }

    /// The committed selection.
    pub fn selection(&self) -> Option<&K> {
        self.selection.current()
    }

    /// Hover refcount of `target`.
    pub fn hovered(&self, target: &K) -> u32 {
        self.highlight.refcount(target)
    }

    /// Target whose tooltip is showing.
    pub fn tooltip(&self) -> Option<&K> {
        self.tooltip.shown()
    }

    /// Run one frame of input at time `now` (seconds).
    pub fn frame<S>(&mut self, scene: &mut S, input: &RawInput, now: f64)
    where
        S: InputScene<K> + ?Sized,
    {
        if self.config.use_touch {
            self.process_touches(scene, &input.touches, now);
        }

        let mouse = match input.mouse.as_ref() {
            Some(raw) if self.config.use_mouse => Some(self.process_mouse(scene, raw, now)),
            _ => {
                let changes = self.highlight.set_hovered(HOVER_SOURCE, None);
                self.dispatch_hover(scene, changes);
                None
            }
        };

        if self.config.uses_keys() {
            self.process_keys(scene, input, now);
        }

        self.update_tooltip(scene, mouse.as_ref(), input, now);

        if let Some(change) = self.selection.commit() {
            self.apply_selection_change(scene, change);
        }
    }

    fn process_touches<S>(&mut self, scene: &mut S, contacts: &[TouchContact], now: f64)
    where
        S: InputScene<K> + ?Sized,
    {
        let thresholds = self.config.thresholds(DeviceClass::Touch);
        self.touch_clicks.retain(|_, t| now - *t < DOUBLE_CLICK_WINDOW);
        for sample in self.touch.poll(contacts) {
            if !self.config.allow_multi_touch {
                match self.primary_touch {
                    None if sample.phase == TouchPhase::Began => {
                        self.primary_touch = Some(sample.id);
                    }
                    Some(primary) if primary == sample.id => {}
                    _ => continue,
                }
            }

            let id = PointerId::touch(sample.id);
            let selection = self.selection.effective().cloned();
            // A contact starts on its first finite position.
            let began = !self.pointers.contains_key(&id);
            if began {
                match sample.position {
                    Some(pos) if sample.phase != TouchPhase::Ended => {
                        let mut p = PointerState::at(id, DeviceClass::Touch, pos);
                        p.last_click_time = self.touch_clicks.remove(&id);
                        self.pointers.insert(id, p);
                    }
                    _ => {
                        if sample.phase == TouchPhase::Ended {
                            self.release_primary_touch(sample.id);
                        }
                        continue;
                    }
                }
            }
            let Some(p) = self.pointers.get_mut(&id) else {
                continue;
            };

            let position = match sample.phase {
                _ if began => sample.position,
                TouchPhase::Began | TouchPhase::Moved => {
                    track(p, sample.position);
                    sample.position
                }
                // Lifted where it was last seen.
                TouchPhase::Ended => {
                    p.delta = Vec2::ZERO;
                    Some(p.position)
                }
            };
            let hit = cast(&mut self.raycaster, &*scene, p, position, DeviceFlags::TOUCH);
            let surface = hit.as_ref().and_then(|h| h.surface);
            // A lost sample keeps a pressed contact on its last target.
            if position.is_some() || !p.is_pressed() {
                p.set_target(hit.map(|h| h.target));
            }

            let frame = PointerFrame {
                pressed: began,
                released: sample.phase == TouchPhase::Ended,
                now,
                thresholds,
                selection: selection.as_ref(),
            };
            p.process(&frame, &mut self.intents);
            if frame.pressed && p.is_pressed() {
                p.pressed_surface = surface;
            }

            if sample.phase == TouchPhase::Ended {
                if let Some(last_click) =
                    self.pointers.remove(&id).and_then(|p| p.last_click_time)
                {
                    self.touch_clicks.insert(id, last_click);
                }
                self.release_primary_touch(sample.id);
            }
            self.flush_intents(scene);
        }
    }

    fn release_primary_touch(&mut self, contact: u32) {
        if self.primary_touch == Some(contact) {
            self.primary_touch = None;
        }
    }

    fn process_mouse<S>(&mut self, scene: &mut S, raw: &MouseInput, now: f64) -> MouseSample
    where
        S: InputScene<K> + ?Sized,
    {
        let sample = self.mouse.poll(raw);
        let thresholds = self.config.thresholds(DeviceClass::Mouse);
        let hover_hit = sample
            .position
            .and_then(|pos| self.raycaster.raycast(&*scene, pos, DeviceFlags::MOUSE));

        for (button, id) in MOUSE_POINTERS.into_iter().enumerate() {
            let selection = self.selection.effective().cloned();
            let Some(p) = self.pointers.get_mut(&id) else {
                continue;
            };
            p.last_position = p.position;
            if let Some(pos) = sample.position {
                p.position = pos;
            }
            p.delta = sample.delta;

            let hit = match p.pressed_surface {
                Some(surface) if p.is_pressed() => sample
                    .position
                    .and_then(|pos| self.raycaster.raycast_on(&*scene, pos, surface)),
                _ => hover_hit.clone(),
            };
            let surface = hit.as_ref().and_then(|h| h.surface);
            // A lost sample keeps a pressed button on its last target.
            if sample.position.is_some() || !p.is_pressed() {
                p.set_target(hit.map(|h| h.target));
            }

            let frame = PointerFrame {
                pressed: sample.pressed[button],
                released: sample.released[button],
                now,
                thresholds,
                selection: selection.as_ref(),
            };
            p.process(&frame, &mut self.intents);
            if frame.pressed && p.is_pressed() {
                p.pressed_surface = surface;
            }
            self.flush_intents(scene);
        }

        // Only a mouse with no button held updates hover and scrolls.
        if !sample.any_held() {
            let changes = self
                .highlight
                .set_hovered(HOVER_SOURCE, hover_hit.map(|h| h.target));
            self.dispatch_hover(scene, changes);
            if sample.scroll != 0.0 {
                let hovered = self.highlight.hovered_by(HOVER_SOURCE).cloned();
                self.notify(scene, hovered.as_ref(), Notification::Scroll(sample.scroll));
            }
        }
        sample
    }

    fn process_keys<S>(&mut self, scene: &mut S, input: &RawInput, now: f64)
    where
        S: InputScene<K> + ?Sized,
    {
        let sample = self.keys.poll(&input.keys);
        // Keys go to the selection committed before this frame, never to one
        // requested during it.
        let selected = self.selection.current().cloned();
        for key in &sample.down {
            self.notify(scene, selected.as_ref(), Notification::Key(*key));
            match key {
                KeyCode::Submit => self.drive_controller(scene, true, now),
                KeyCode::Cancel if self.config.use_mouse || self.config.use_touch => {
                    self.request_selection(scene, None, false);
                }
                _ => {}
            }
        }
        if sample.up.contains(&KeyCode::Submit) {
            self.drive_controller(scene, false, now);
        }
        if self.config.use_keyboard && !input.text.is_empty() {
            self.notify(
                scene,
                selected.as_ref(),
                Notification::Input(input.text.clone()),
            );
        }
    }

    /// Press or release the pseudo-pointer on the current selection.
    fn drive_controller<S>(&mut self, scene: &mut S, down: bool, now: f64)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        let thresholds = self.config.thresholds(DeviceClass::Controller);
        let selected = self.selection.current().cloned();
        let Some(p) = self.pointers.get_mut(&PointerId::CONTROLLER) else {
            return;
        };
        p.delta = Vec2::ZERO;
        p.set_target(selected.clone());
        // Judged against the selection it presses, so a pending request survives.
        let frame = PointerFrame {
            pressed: down,
            released: !down,
            now,
            thresholds,
            selection: selected.as_ref(),
        };
        p.process(&frame, &mut self.intents);
        self.flush_intents(scene);
    }

    fn update_tooltip<S>(
        &mut self,
        scene: &mut S,
        mouse: Option<&MouseSample>,
        input: &RawInput,
        now: f64,
    ) where
        S: ResponderLookup<K> + ?Sized,
    {
        let any_touch = self
            .pointers
            .keys()
            .any(|id| id.class() == DeviceClass::Touch);
        let hovered = self.highlight.hovered_by(HOVER_SOURCE);
        let tooltip_input = TooltipInput {
            hovered,
            refcount: hovered.map_or(0, |k| self.highlight.refcount(k)),
            any_pressed: any_touch || mouse.is_some_and(MouseSample::any_held),
            moved: mouse.is_some_and(|m| m.delta != Vec2::ZERO),
            modifier_held: self
                .config
                .tooltip_modifier
                .is_some_and(|k| input.keys.contains(&k)),
            now,
        };
        let changes = self.tooltip.update(&tooltip_input);
        for change in changes {
            match change {
                TooltipChange::Show(target) => {
                    self.notify(scene, Some(&target), Notification::Tooltip(true));
                }
                TooltipChange::Hide(target) => {
                    self.notify(scene, Some(&target), Notification::Tooltip(false));
                }
            }
        }
    }

    /// Cancel every pointer matching `pred`, in pointer id order.
    fn cancel_where<S, F>(&mut self, scene: &mut S, pred: F)
    where
        S: ResponderLookup<K> + ?Sized,
        F: Fn(&PointerState<K>) -> bool,
    {
        let mut ids: SmallVec<[PointerId; 8]> = self
            .pointers
            .iter()
            .filter(|&(_, p)| p.is_pressed() && pred(p))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        for id in ids {
            if let Some(p) = self.pointers.get_mut(&id) {
                tracing::debug!(pointer = ?id, "gesture force-ended");
                p.cancel(&mut self.intents);
            }
        }
        self.flush_intents(scene);
    }

    fn flush_intents<S>(&mut self, scene: &mut S)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        let mut intents = core::mem::take(&mut self.intents);
        for intent in intents.drain(..) {
            self.deliver_intent(scene, intent);
        }
        self.intents = intents;
    }

    fn deliver_intent<S>(&mut self, scene: &mut S, intent: PointerIntent<K>)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        let (target, notification) = match intent {
            PointerIntent::Select { target } => {
                self.request_selection(scene, target, false);
                return;
            }
            PointerIntent::Press { target, pressed } => (target, Notification::Press(pressed)),
            PointerIntent::DragStart { target } => (target, Notification::DragStart),
            PointerIntent::DragOver { target, dragged } => {
                (target, Notification::DragOver { dragged })
            }
            PointerIntent::DragOut { target, dragged } => {
                (target, Notification::DragOut { dragged })
            }
            PointerIntent::Drag { target, delta } => (target, Notification::Drag(delta)),
            PointerIntent::DragEnd { target } => (target, Notification::DragEnd),
            PointerIntent::Click { target } => (target, Notification::Click),
            PointerIntent::DoubleClick { target } => (target, Notification::DoubleClick),
            PointerIntent::Drop { target, dragged } => (target, Notification::Drop { dragged }),
        };
        self.notify(scene, target.as_ref(), notification);
    }

    fn apply_selection_change<S>(&mut self, scene: &mut S, change: SelectionChange<K>)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        match change {
            SelectionChange::Deselected {
                target,
                focus_highlight,
            } => {
                self.notify(scene, Some(&target), Notification::Select(false));
                if focus_highlight {
                    let changes = self.highlight.set_hovered(FOCUS_SOURCE, None);
                    self.dispatch_hover(scene, changes);
                }
            }
            SelectionChange::Selected {
                target,
                focus_highlight,
            } => {
                self.notify(scene, Some(&target), Notification::Select(true));
                if focus_highlight {
                    let changes = self.highlight.set_hovered(FOCUS_SOURCE, Some(target));
                    self.dispatch_hover(scene, changes);
                }
            }
        }
    }

    fn dispatch_hover<S>(&self, scene: &mut S, changes: SmallVec<[HoverChange<K>; 2]>)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        for change in changes {
            match change {
                HoverChange::Enter(target) => {
                    self.notify(scene, Some(&target), Notification::Hover(true));
                }
                HoverChange::Leave(target) => {
                    self.notify(scene, Some(&target), Notification::Hover(false));
                }
            }
        }
    }

    fn notify<S>(&self, scene: &mut S, target: Option<&K>, notification: Notification<K>)
    where
        S: ResponderLookup<K> + ?Sized,
    {
        self.dispatcher.notify(scene, target, &notification);
    }
}

/// Feed a touch position into the pointer. Invalid positions freeze it.
fn track<K: Clone + PartialEq + Debug>(p: &mut PointerState<K>, position: Option<Point>) {
    match position {
        Some(pos) => p.move_to(pos),
        None => p.delta = Vec2::ZERO,
    }
}

/// Raycast for a pointer, anchored to its press surface while pressed.
fn cast<K, S>(
    raycaster: &mut Raycaster<K>,
    scene: &S,
    p: &PointerState<K>,
    position: Option<Point>,
    devices: DeviceFlags,
) -> Option<HitResult<K>>
where
    K: Clone + PartialEq + Debug,
    S: CandidateSource<K> + VisibilityTest<K> + ?Sized,
{
    let pos = position?;
    match p.pressed_surface {
        Some(surface) if p.is_pressed() => raycaster.raycast_on(scene, pos, surface),
        _ => raycaster.raycast(scene, pos, devices),
    }
}
