// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a carousel from a simulated host with a virtual clock.
//!
//! This example shows how a host integration layer:
//! - answers layout queries and applies strip/item styles,
//! - runs scheduled tasks (settle delays, next-frame callbacks, the auto-advance
//!   interval) through `CarouselContainer::run_task`,
//! - forwards pan gestures.
//!
//! Run:
//! - `RUST_LOG=understory_carousel=debug cargo run -p understory_carousel_demos --example headless_carousel`

use kurbo::Vec2;
use tracing_subscriber::EnvFilter;
use understory_carousel::{
    CarouselConfig, CarouselContainer, CarouselEvent, CarouselHost, CarouselItem, Deferral,
    HostSignal, PanEvent, StripStyle, Subscription, Task, TimerId,
};

/// Milliseconds per rendered frame.
const FRAME_MS: u64 = 16;

#[derive(Debug)]
struct Scheduled {
    due: u64,
    id: TimerId,
    task: Task,
    when: Deferral,
}

/// A host with fixed geometry and a virtual clock.
#[derive(Debug, Default)]
struct SimulatedHost {
    viewport: f64,
    widths: Vec<f64>,
    now: u64,
    next_id: u64,
    queue: Vec<Scheduled>,
    orders: Vec<usize>,
}

impl SimulatedHost {
    fn new(viewport: f64, widths: Vec<f64>) -> Self {
        let orders = (0..widths.len()).collect();
        Self {
            viewport,
            widths,
            orders,
            ..Self::default()
        }
    }

    /// Removes the earliest task due at or before `until`, advancing the clock.
    fn pop_due(&mut self, until: u64) -> Option<Task> {
        let (pos, _) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.id))?;
        let entry = self.queue.remove(pos);
        self.now = entry.due;
        if let Deferral::Every(period) = entry.when {
            self.queue.push(Scheduled {
                due: entry.due + period,
                ..entry
            });
        }
        Some(entry.task)
    }
}

impl CarouselHost for SimulatedHost {
    type Key = usize;

    fn viewport_extent(&self) -> Option<f64> {
        Some(self.viewport)
    }

    fn item_extent(&self, key: &usize) -> Option<f64> {
        self.widths.get(*key).copied()
    }

    fn apply_strip(&mut self, style: &StripStyle) {
        tracing::trace!(
            translate_x = style.translate_x(),
            left = style.left,
            flags = ?style.flags,
            "strip"
        );
    }

    fn apply_item(&mut self, item: &CarouselItem<usize>) {
        if let Some(order) = self.orders.get_mut(*item.key()) {
            *order = item.display_order();
        }
    }

    fn schedule(&mut self, task: Task, when: Deferral) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let delay = match when {
            Deferral::Delay(ms) | Deferral::Every(ms) => ms,
            Deferral::NextFrame => FRAME_MS,
        };
        self.queue.push(Scheduled {
            due: self.now + delay,
            id,
            task,
            when,
        });
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.queue.retain(|s| s.id != timer);
    }

    fn subscribe(&mut self, signal: HostSignal) -> Subscription {
        tracing::debug!(?signal, "subscribed");
        Subscription::new(move || tracing::debug!(?signal, "unsubscribed"))
    }
}

/// Runs every task due up to `until` on the virtual clock.
fn run_until(carousel: &mut CarouselContainer<SimulatedHost>, until: u64) {
    while let Some(task) = carousel.host_mut().pop_due(until) {
        carousel.run_task(task);
    }
    carousel.host_mut().now = until;
}

fn print_event(label: &'static str) -> impl FnMut(CarouselEvent) {
    move |event| {
        println!(
            "[{label}] {:<16} index={} next={} previous={}",
            event.kind.as_str(),
            event.index,
            event.next,
            event.previous
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Looping carousel that advances on its own until the user swipes.
    let config = CarouselConfig::new().with_looping(true).with_automatic(true);
    let host = SimulatedHost::new(320.0, vec![160.0; 5]);
    let mut looping = CarouselContainer::new(host, config).with_observer(print_event("loop"));
    looping.initialize(0..5);
    run_until(&mut looping, 10_000);
    println!("[loop] orders after autoplay: {:?}", looping.host().orders);

    let now = looping.host().now;
    looping.on_pan_start(&PanEvent::horizontal(0.0, 0.0));
    looping.on_pan(&PanEvent::horizontal(70.0, 70.0));
    looping.on_pan_end(&PanEvent::horizontal(70.0, 70.0).finished());
    run_until(&mut looping, now + 10_000);
    println!(
        "[loop] after swipe: index={} autoplay={}",
        looping.index(),
        looping.is_auto_advancing()
    );
    looping.dispose();

    // Bounded carousel with uneven items, driven by buttons and a vertical drag.
    let host = SimulatedHost::new(300.0, vec![120.0, 180.0, 90.0, 150.0, 110.0]);
    let mut bounded =
        CarouselContainer::new(host, CarouselConfig::new()).with_observer(print_event("bounded"));
    bounded.initialize(0..5);
    bounded.on_layout_ready();
    while bounded.next() {
        let until = bounded.host().now + 200;
        run_until(&mut bounded, until);
        println!(
            "[bounded] translate_x={} window={:?}",
            bounded.translate_x(),
            bounded.visible_window()
        );
    }

    let scroll_page = PanEvent::horizontal(-40.0, 120.0).with_velocity(Vec2::new(0.2, -1.4));
    bounded.on_pan_start(&scroll_page);
    bounded.on_pan(&scroll_page);
    bounded.on_pan_end(&scroll_page.finished());
    println!(
        "[bounded] vertical drag ignored: translate_x={}",
        bounded.translate_x()
    );

    while bounded.prev() {
        let until = bounded.host().now + 200;
        run_until(&mut bounded, until);
    }
    bounded.dispose();
}
