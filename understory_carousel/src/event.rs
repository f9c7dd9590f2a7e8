// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted to the embedding context.

/// Which transition produced a [`CarouselEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Content or geometry was (re)initialized.
    OnChanges,
    /// The carousel advanced.
    Next,
    /// The carousel went back.
    Previous,
}

impl EventKind {
    /// Stable name for logging and host bindings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnChanges => "ON_CHANGES_EVENT",
            Self::Next => "NEXT_EVENT",
            Self::Previous => "PREVIOUS_EVENT",
        }
    }
}

/// Post-transition navigation state.
///
/// `next` and `previous` say whether forward or backward navigation is possible
/// now, so subscribers can render their own affordances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CarouselEvent {
    /// Transition that produced this event.
    pub kind: EventKind,
    /// Anchor index after the transition.
    pub index: usize,
    /// Forward navigation is possible.
    pub next: bool,
    /// Backward navigation is possible.
    pub previous: bool,
}

/// Receiver for [`CarouselEvent`]s.
///
/// Implemented for any `FnMut(CarouselEvent)`.
pub trait CarouselObserver {
    /// Called after every transition.
    fn on_carousel_event(&mut self, event: CarouselEvent);
}

impl<F: FnMut(CarouselEvent)> CarouselObserver for F {
    fn on_carousel_event(&mut self, event: CarouselEvent) {
        self(event);
    }
}
