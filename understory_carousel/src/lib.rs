// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: a headless carousel state machine.
//!
//! This crate implements the navigation and layout logic of a horizontal,
//! paginated item viewer, without knowing anything about the UI stack that
//! renders it. It decides which items are visible, how far to translate the
//! strip to bring the next item flush with the viewport edge, how a drag turns
//! into a committed navigation, and, in looping mode, how a fixed set of items
//! is reordered to look like an endless strip.
//!
//! The core concepts are:
//!
//! - [`CarouselContainer`]: the single writer of navigation state. Hosts drive it
//!   through explicit lifecycle calls, gesture handlers and [`Task`]s they were
//!   asked to schedule.
//! - [`CarouselHost`]: everything the container consumes from the host: layout
//!   queries, style application, timers and subscriptions.
//! - [`CarouselItem`]: per-slide display order and active flag, pushed down by
//!   the container.
//! - [`ItemStrip`] and [`compute_visible_window`]: prefix-sum geometry and the
//!   range of fully visible items.
//! - [`display_order`]: the ring-to-slot projection used by looping carousels.
//! - [`CarouselEvent`]: `OnChanges`, `Next` and `Previous` notifications for an
//!   optional [`CarouselObserver`].
//!
//! Host frameworks are responsible for:
//!
//! - Rendering the strip and the items with the [`StripStyle`] and item orders
//!   the container hands out.
//! - Recognizing pan gestures and forwarding them as [`PanEvent`]s.
//! - Running scheduled [`Task`]s through [`CarouselContainer::run_task`].
//!
//! ## Minimal example
//!
//! A bounded carousel with five 100px items in a 200px viewport:
//!
//! ```rust
//! use understory_carousel::{
//!     CarouselConfig, CarouselContainer, CarouselHost, CarouselItem, Deferral, HostSignal,
//!     StripStyle, Subscription, Task, TimerId, VisibleWindow,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     translate_x: f64,
//!     timers: u64,
//! }
//!
//! impl CarouselHost for Host {
//!     type Key = usize;
//!     fn viewport_extent(&self) -> Option<f64> { Some(200.0) }
//!     fn item_extent(&self, _key: &usize) -> Option<f64> { Some(100.0) }
//!     fn apply_strip(&mut self, style: &StripStyle) { self.translate_x = style.translate_x(); }
//!     fn apply_item(&mut self, _item: &CarouselItem<usize>) {}
//!     fn schedule(&mut self, _task: Task, _when: Deferral) -> TimerId {
//!         self.timers += 1;
//!         TimerId(self.timers)
//!     }
//!     fn cancel(&mut self, _timer: TimerId) {}
//!     fn subscribe(&mut self, _signal: HostSignal) -> Subscription { Subscription::detached() }
//! }
//!
//! let mut carousel = CarouselContainer::new(Host::default(), CarouselConfig::new());
//! carousel.initialize(0..5);
//! carousel.on_layout_ready();
//! assert_eq!(carousel.visible_window(), Some(VisibleWindow { left: 0, right: 1, count: 2 }));
//!
//! // Item 2 becomes flush with the right edge of the viewport.
//! assert!(carousel.next());
//! assert_eq!(carousel.translate_x(), -100.0);
//! assert_eq!(carousel.host().translate_x, -100.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`CarouselConfig`].
//!
//! Diagnostics are emitted through `tracing`; install a subscriber in the host
//! application to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autoplay;
mod config;
mod container;
mod error;
mod event;
mod gesture;
mod host;
mod item;
mod order;
mod strip;

pub use autoplay::AutoAdvance;
pub use config::{AUTO_ADVANCE_INTERVAL_MS, CarouselConfig};
pub use container::CarouselContainer;
pub use error::LayoutError;
pub use event::{CarouselEvent, CarouselObserver, EventKind};
pub use gesture::{PanEvent, PanPhase, PanTracker, PanUpdate};
pub use host::{
    CarouselHost, Deferral, HostSignal, StripFlags, StripStyle, Subscription, Task, TimerId,
};
pub use item::{CarouselItem, ItemGesture};
pub use order::{display_order, display_orders, item_at_slot};
pub use strip::{ItemStrip, VisibleWindow, compute_visible_window};
