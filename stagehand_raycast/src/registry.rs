// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface registry with explicit lifecycle and deterministic priority order.

use alloc::vec::Vec;

use crate::types::{DeviceFlags, Surface, SurfaceId};

#[derive(Clone, Debug)]
struct Entry {
    id: SurfaceId,
    surface: Surface,
    enabled: bool,
}

/// Registered input surfaces, kept sorted by descending priority.
///
/// Surfaces with equal priority keep registration order, so iteration is
/// deterministic for a given sequence of `register`/`unregister` calls.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    entries: Vec<Entry>,
    next_id: u32,
}

impl SurfaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface and return its id. New surfaces start enabled.
    pub fn register(&mut self, surface: Surface) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        // Insert after every entry with priority >= ours: ties keep registration order.
        let at = self
            .entries
            .iter()
            .position(|e| e.surface.priority < surface.priority)
            .unwrap_or(self.entries.len());
        tracing::debug!(?id, priority = surface.priority, "surface registered");
        self.entries.insert(
            at,
            Entry {
                id,
                surface,
                enabled: true,
            },
        );
        id
    }

    /// Remove a surface. Returns the descriptor if it was registered.
    pub fn unregister(&mut self, id: SurfaceId) -> Option<Surface> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        tracing::debug!(?id, "surface unregistered");
        Some(self.entries.remove(idx).surface)
    }

    /// Enable or disable a surface. Returns `false` if `id` is unknown.
    pub fn set_enabled(&mut self, id: SurfaceId, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the surface is registered and enabled.
    pub fn is_enabled(&self, id: SurfaceId) -> bool {
        self.entries.iter().any(|e| e.id == id && e.enabled)
    }

    /// Look up a surface descriptor.
    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.surface)
    }

    /// Number of registered surfaces, enabled or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enabled surfaces in priority order (highest first).
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &Surface)> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| (e.id, &e.surface))
    }

    /// Enabled surfaces accepting any of `devices`, in priority order.
    pub fn iter_for(&self, devices: DeviceFlags) -> impl Iterator<Item = (SurfaceId, &Surface)> {
        self.iter()
            .filter(move |(_, s)| s.devices.intersects(devices))
    }
}
