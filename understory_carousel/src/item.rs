// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slide state pushed down by the container.

use crate::gesture::{PanEvent, PanPhase};

/// One slide of a carousel.
///
/// Items are passive: the container assigns the logical index when the content
/// changes and rewrites the display order and active flag on every recompute.
/// `K` is the host's handle for the rendered element.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselItem<K> {
    key: K,
    logical_index: usize,
    display_order: usize,
    active: bool,
    dirty: bool,
}

impl<K> CarouselItem<K> {
    /// Creates an item for `key` at `logical_index`, displayed in document order.
    pub fn new(key: K, logical_index: usize) -> Self {
        Self {
            key,
            logical_index,
            display_order: logical_index,
            active: false,
            dirty: true,
        }
    }

    /// Host handle of this item.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Position of this item in the content collection.
    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    /// Visual slot, independent of document order.
    pub fn display_order(&self) -> usize {
        self.display_order
    }

    /// Whether this item is the carousel's anchor.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Assigns the visual slot.
    ///
    /// Always succeeds; the container is responsible for handing out a valid
    /// permutation.
    pub fn set_order(&mut self, order: usize) {
        self.dirty |= self.display_order != order;
        self.display_order = order;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.dirty |= self.active != active;
        self.active = active;
    }

    /// Returns `true` if the order or active flag changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears and returns the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    /// Wraps a pan gesture this item received so it can be routed to the container.
    pub fn forward_pan(&self, phase: PanPhase, event: PanEvent) -> ItemGesture<K>
    where
        K: Clone,
    {
        ItemGesture {
            source: self.key.clone(),
            logical_index: self.logical_index,
            phase,
            event,
        }
    }
}

/// A pan gesture received by an individual item.
///
/// Hosts that attach gesture recognizers per item hand these to
/// [`CarouselContainer::on_item_gesture`](crate::CarouselContainer::on_item_gesture).
#[derive(Clone, Debug, PartialEq)]
pub struct ItemGesture<K> {
    /// Item that received the gesture.
    pub source: K,
    /// Logical index of that item at the time it was received.
    pub logical_index: usize,
    /// Which part of the gesture this is.
    pub phase: PanPhase,
    /// Gesture payload.
    pub event: PanEvent,
}
