// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: deliver one notification to its target and the global listener.
//!
//! The dispatcher is deliberately minimal:
//!
//! - A notification about nothing (`None`) or about a destroyed object is
//!   dropped silently.
//! - The target's handler runs first, then the global listener's (if one is
//!   configured and it is not the target itself).
//! - Delivery is synchronous; [`Dispatcher::notify`] returns after every
//!   handler has run. Ordering across notifications is the caller's order.
//!
//! ## Minimal example
//!
//! ```
//! use stagehand_responder::{Delivery, Dispatcher, Notification, Responder, ResponderLookup, Role};
//!
//! #[derive(Default)]
//! struct Counter { clicks: u32, observed: u32 }
//! impl Responder<u32> for Counter {
//!     fn on_click(&mut self, cx: &Delivery<u32>) {
//!         match cx.role {
//!             Role::Target => self.clicks += 1,
//!             Role::Listener => self.observed += 1,
//!         }
//!     }
//! }
//!
//! struct Scene(Vec<Counter>);
//! impl ResponderLookup<u32> for Scene {
//!     fn is_alive(&self, t: &u32) -> bool { (*t as usize) < self.0.len() }
//!     fn responder_mut(&mut self, t: &u32) -> Option<&mut dyn Responder<u32>> {
//!         self.0.get_mut(*t as usize).map(|c| c as &mut dyn Responder<u32>)
//!     }
//! }
//!
//! let mut scene = Scene(vec![Counter::default(), Counter::default()]);
//! let dispatcher = Dispatcher::with_listener(1);
//! assert!(dispatcher.notify(&mut scene, Some(&0), &Notification::Click));
//! assert_eq!(scene.0[0].clicks, 1);
//! assert_eq!(scene.0[1].observed, 1);
//!
//! // Nothing to notify, nothing delivered.
//! assert!(!dispatcher.notify(&mut scene, None, &Notification::Click));
//! ```

use core::fmt::Debug;

use smallvec::{SmallVec, smallvec};

use crate::event::Notification;
use crate::responder::{Delivery, ResponderLookup, Role};

/// Synchronous notification dispatcher with an optional global listener.
#[derive(Clone, Debug)]
pub struct Dispatcher<K> {
    listener: Option<K>,
}

impl<K> Default for Dispatcher<K> {
    fn default() -> Self {
        Self { listener: None }
    }
}

impl<K: Clone + PartialEq + Debug> Dispatcher<K> {
    /// Create a dispatcher without a global listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher whose listener observes all traffic.
    pub fn with_listener(listener: K) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    /// Set or clear the global listener.
    pub fn set_listener(&mut self, listener: Option<K>) {
        self.listener = listener;
    }

    /// The global listener, if any.
    pub fn listener(&self) -> Option<&K> {
        self.listener.as_ref()
    }

    /// The delivery sequence for a notification about `target`: `(receiver, context)` pairs.
    pub fn route(&self, target: &K) -> SmallVec<[(K, Delivery<K>); 2]> {
        let mut seq: SmallVec<[(K, Delivery<K>); 2]> = smallvec![(
            target.clone(),
            Delivery {
                target: target.clone(),
                role: Role::Target,
            },
        )];
        if let Some(listener) = &self.listener
            && listener != target
        {
            seq.push((
                listener.clone(),
                Delivery {
                    target: target.clone(),
                    role: Role::Listener,
                },
            ));
        }
        seq
    }

    /// Deliver `notification` about `target`.
    ///
    /// Returns `false` when nothing was delivered because the target is
    /// `None` or no longer alive.
    pub fn notify<L>(&self, scene: &mut L, target: Option<&K>, notification: &Notification<K>) -> bool
    where
        L: ResponderLookup<K> + ?Sized,
    {
        let Some(target) = target else {
            return false;
        };
        if !scene.is_alive(target) {
            tracing::trace!(?target, event = notification.name(), "dropped: target not alive");
            return false;
        }
        tracing::trace!(?target, event = notification.name(), "notify");
        for (receiver, cx) in self.route(target) {
            // A listener that was destroyed is skipped like a missing handler.
            if let Some(responder) = scene.responder_mut(&receiver) {
                notification.deliver(responder, &cx);
            }
        }
        true
    }
}
