// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the carousel state machine and the host UI stack.
//!
//! The container never touches a render tree directly. Everything it needs from
//! the outside world goes through [`CarouselHost`]:
//!
//! - **Layout queries**: rendered widths of the viewport and of each item.
//!   Before layout settles these may be missing or zero; the container rejects
//!   such readings and keeps its previous state.
//! - **Style application**: one [`StripStyle`] for the strip element and a
//!   display order/active flag per item.
//! - **Scheduling**: deferred work is expressed as a [`Task`] plus a
//!   [`Deferral`]. When the timer or frame callback fires, the host hands the
//!   task back through [`CarouselContainer::run_task`]. Tasks capture no state,
//!   so a late task simply acts on whatever the state is when it runs.
//! - **Subscriptions**: resize and content-change notifications, returned as
//!   [`Subscription`] handles the container releases on dispose.
//!
//! [`CarouselContainer::run_task`]: crate::CarouselContainer::run_task

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Vec2};

use crate::item::CarouselItem;

bitflags::bitflags! {
    /// Transient presentation state of the strip.
    ///
    /// These drive host styling (transitions, cursors) and never decide navigation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StripFlags: u8 {
        /// A bounded carousel is following a drag.
        const PANNING   = 0b0000_0001;
        /// A committed navigation is rendering its first frame. Hosts should
        /// disable transitions while this is set and re-enable them when it clears.
        const ANIMATING = 0b0000_0010;
        /// The last navigation went backwards.
        const REVERSING = 0b0000_0100;
    }
}

/// Style of the element that holds all items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripStyle {
    /// Transform applied to the strip (a horizontal translation).
    pub transform: Affine,
    /// Static `left` offset. Looping carousels pull the strip left by the width
    /// of the previous item so only a sliver of it shows.
    pub left: f64,
    /// Presentation flags.
    pub flags: StripFlags,
}

impl StripStyle {
    pub(crate) fn new(translate_x: f64, left: f64, flags: StripFlags) -> Self {
        Self {
            transform: Affine::translate(Vec2::new(translate_x, 0.0)),
            left,
            flags,
        }
    }

    /// Horizontal component of the transform.
    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.transform.translation().x
    }
}

/// Host-assigned handle of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Deferred work the container asks the host to run later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Measure geometry once the content has been laid out.
    MeasureLayout,
    /// Measure geometry again after a committed navigation.
    SettleNavigation,
    /// Render the resting frame of a navigation transition.
    FinishAnimation,
    /// Advance automatically.
    AutoAdvance,
}

/// When a [`Task`] should run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Deferral {
    /// Once, after this many milliseconds.
    Delay(u64),
    /// Once, on the next rendered frame.
    NextFrame,
    /// Repeatedly, every this many milliseconds, until cancelled.
    Every(u64),
}

/// Host notifications the container listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostSignal {
    /// The viewport was resized; the host should call
    /// [`CarouselContainer::on_resize`](crate::CarouselContainer::on_resize).
    Resize,
    /// The set of items changed; the host should call
    /// [`CarouselContainer::on_content_changed`](crate::CarouselContainer::on_content_changed).
    ContentChanged,
}

/// A live listener registration.
///
/// Dropping a subscription without calling [`Subscription::unsubscribe`] leaves
/// the listener registered.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps the function that removes the listener.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Removes the listener.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.release.is_some())
            .finish()
    }
}

/// Everything the container consumes from the host UI stack.
pub trait CarouselHost {
    /// Handle of a rendered item.
    type Key: Clone + PartialEq;

    /// Rendered width of the viewport, if laid out.
    fn viewport_extent(&self) -> Option<f64>;

    /// Rendered width of an item, if laid out.
    fn item_extent(&self, key: &Self::Key) -> Option<f64>;

    /// Applies the strip style.
    fn apply_strip(&mut self, style: &StripStyle);

    /// Applies an item's display order and active flag.
    fn apply_item(&mut self, item: &CarouselItem<Self::Key>);

    /// Schedules `task` and returns a handle that can cancel it.
    fn schedule(&mut self, task: Task, when: Deferral) -> TimerId;

    /// Cancels a scheduled task. Cancelling a finished or unknown timer is a no-op.
    fn cancel(&mut self, timer: TimerId);

    /// Starts listening for `signal`.
    fn subscribe(&mut self, signal: HostSignal) -> Subscription;
}
