// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel navigation and layout state machine.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::autoplay::AutoAdvance;
use crate::config::CarouselConfig;
use crate::error::LayoutError;
use crate::event::{CarouselEvent, CarouselObserver, EventKind};
use crate::gesture::{PanEvent, PanPhase, PanTracker, PanUpdate};
use crate::host::{
    CarouselHost, Deferral, HostSignal, StripFlags, StripStyle, Subscription, Task, TimerId,
};
use crate::item::{CarouselItem, ItemGesture};
use crate::order::{display_order, item_at_slot};
use crate::strip::{ItemStrip, VisibleWindow, compute_visible_window};

/// Fallback measurements attempted after the first one is rejected.
const MEASURE_RETRY_LIMIT: u32 = 10;

/// Direction of a navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// Controller for one carousel instance.
///
/// The container is the single writer of all navigation state. It is driven by
/// explicit calls from the host integration layer:
///
/// - lifecycle: [`initialize`](Self::initialize),
///   [`on_content_changed`](Self::on_content_changed),
///   [`on_layout_ready`](Self::on_layout_ready), [`on_resize`](Self::on_resize),
///   [`dispose`](Self::dispose),
/// - deferred work: [`run_task`](Self::run_task),
/// - user input: [`next`](Self::next), [`prev`](Self::prev) and the pan handlers.
///
/// In bounded mode the strip is translated so that the item after (or before)
/// the visible window becomes flush with the viewport edge. In looping mode the
/// strip stays put and each item's display order is remapped around the anchor,
/// with a one-frame offset that the host's transition turns into a slide.
pub struct CarouselContainer<H: CarouselHost> {
    host: H,
    config: CarouselConfig,
    observer: Option<Box<dyn CarouselObserver>>,
    items: Vec<CarouselItem<H::Key>>,

    /// Widths in logical order.
    strip: ItemStrip,
    /// Widths in display order (looping mode only).
    slots: ItemStrip,
    viewport_extent: f64,

    index: usize,
    translate_x: f64,
    window: Option<VisibleWindow>,
    padding_left: f64,

    /// Translation currently rendered, including any provisional drag.
    rendered_x: f64,
    flags: StripFlags,
    pending_delta: f64,
    pan: PanTracker,

    autoplay: AutoAdvance,
    measure_timer: Option<TimerId>,
    measure_retries: u32,
    subscriptions: SmallVec<[Subscription; 2]>,
    attached: bool,
    disposed: bool,
}

impl<H: CarouselHost> CarouselContainer<H> {
    /// Creates a detached container. Nothing happens until [`Self::initialize`].
    pub fn new(host: H, config: CarouselConfig) -> Self {
        Self {
            host,
            config,
            observer: None,
            items: Vec::new(),
            strip: ItemStrip::new(),
            slots: ItemStrip::new(),
            viewport_extent: 0.0,
            index: 0,
            translate_x: 0.0,
            window: None,
            padding_left: 0.0,
            rendered_x: 0.0,
            flags: StripFlags::empty(),
            pending_delta: 0.0,
            pan: PanTracker::new(config.pan_jump_threshold),
            autoplay: AutoAdvance::new(),
            measure_timer: None,
            measure_retries: 0,
            subscriptions: SmallVec::new(),
            attached: false,
            disposed: false,
        }
    }

    /// Returns the container with `observer` receiving every [`CarouselEvent`].
    #[must_use]
    pub fn with_observer(mut self, observer: impl CarouselObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Replaces the event observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn CarouselObserver>>) {
        self.observer = observer;
    }

    /// Shared access to the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The configuration this container was created with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Items in logical order.
    pub fn items(&self) -> &[CarouselItem<H::Key>] {
        &self.items
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Logical index of the anchor item.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Committed horizontal translation of the strip.
    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    /// Items currently fully inside the viewport, once geometry is known.
    pub fn visible_window(&self) -> Option<VisibleWindow> {
        self.window
    }

    /// Width of the previous-item sliver in looping mode, zero otherwise.
    pub fn padding_left(&self) -> f64 {
        self.padding_left
    }

    /// Total width of all items, as last measured.
    pub fn content_extent(&self) -> f64 {
        self.strip.total_extent()
    }

    /// Provisional, uncommitted drag offset.
    pub fn pending_delta(&self) -> f64 {
        self.pending_delta
    }

    /// Presentation flags.
    pub fn flags(&self) -> StripFlags {
        self.flags
    }

    /// A bounded carousel is following a drag.
    pub fn is_panning(&self) -> bool {
        self.flags.contains(StripFlags::PANNING)
    }

    /// A navigation transition has not rendered its resting frame yet.
    pub fn is_animating(&self) -> bool {
        self.flags.contains(StripFlags::ANIMATING)
    }

    /// The last navigation went backwards.
    pub fn is_reversing(&self) -> bool {
        self.flags.contains(StripFlags::REVERSING)
    }

    /// The auto-advance interval is running.
    pub fn is_auto_advancing(&self) -> bool {
        self.autoplay.is_running()
    }

    /// [`Self::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Forward navigation is not possible.
    ///
    /// Bounded carousels are disabled at the end of the content and until
    /// geometry has been measured. Looping carousels are only disabled when empty.
    pub fn is_next_disabled(&self) -> bool {
        let count = self.items.len();
        if count == 0 {
            return true;
        }
        if self.config.looping {
            return false;
        }
        self.window.is_none_or(|w| w.right + 1 >= count)
    }

    /// Backward navigation is not possible.
    pub fn is_prev_disabled(&self) -> bool {
        if self.items.is_empty() {
            return true;
        }
        if self.config.looping {
            return false;
        }
        self.window.is_none_or(|w| w.left == 0)
    }

    /// Style the strip should currently have.
    pub fn strip_style(&self) -> StripStyle {
        let left = if self.config.looping {
            -self.padding_left
        } else {
            0.0
        };
        StripStyle::new(self.rendered_x, left, self.flags)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attaches to the host and takes the first set of items.
    ///
    /// Subscribes to resize and content-change notifications and, if
    /// configured, starts auto-advance. Calling this again re-runs content
    /// initialization without subscribing twice.
    pub fn initialize<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = H::Key>,
    {
        if self.disposed {
            debug!("initialize after dispose ignored");
            return;
        }
        if !self.attached {
            self.attached = true;
            self.subscriptions.push(self.host.subscribe(HostSignal::Resize));
            self.subscriptions
                .push(self.host.subscribe(HostSignal::ContentChanged));
            if self.config.automatic
                && self
                    .autoplay
                    .start(&mut self.host, self.config.auto_advance_interval_ms)
            {
                debug!(
                    interval_ms = self.config.auto_advance_interval_ms,
                    "auto-advance started"
                );
            }
        }
        self.on_content_changed(keys);
    }

    /// Replaces the item collection.
    ///
    /// Items get their logical index from their position in `keys`. Navigation
    /// resets to the first item and geometry is measured once layout settles,
    /// either through [`Self::on_layout_ready`] or after the configured fallback
    /// delay.
    pub fn on_content_changed<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = H::Key>,
    {
        if self.disposed {
            return;
        }
        self.items = keys
            .into_iter()
            .enumerate()
            .map(|(index, key)| CarouselItem::new(key, index))
            .collect();

        self.index = 0;
        self.translate_x = 0.0;
        self.rendered_x = 0.0;
        self.window = None;
        self.padding_left = 0.0;
        self.pending_delta = 0.0;
        self.pan.end();
        self.flags = StripFlags::empty();
        self.strip.rebuild(core::iter::empty());
        self.slots.rebuild(core::iter::empty());

        debug!(count = self.items.len(), "carousel content changed");

        self.reorder();
        self.push_items();
        self.apply_strip();

        if let Some(timer) = self.measure_timer.take() {
            self.host.cancel(timer);
        }
        self.measure_retries = 0;
        if !self.items.is_empty() {
            self.schedule_measure();
        }
    }

    fn schedule_measure(&mut self) {
        self.measure_timer = Some(self.host.schedule(
            Task::MeasureLayout,
            Deferral::Delay(self.config.layout_settle_ms),
        ));
    }

    /// Measures geometry now that the host has laid out the items.
    ///
    /// Emits [`EventKind::OnChanges`] when the measurement is usable.
    pub fn on_layout_ready(&mut self) {
        if let Some(timer) = self.measure_timer.take() {
            self.host.cancel(timer);
        }
        self.recalculate();
    }

    /// Re-measures after the viewport changed size.
    pub fn on_resize(&mut self) {
        self.recalculate();
    }

    /// Runs a task previously handed to [`CarouselHost::schedule`].
    pub fn run_task(&mut self, task: Task) {
        if self.disposed {
            return;
        }
        match task {
            Task::MeasureLayout => {
                self.measure_timer = None;
                if !self.recalculate() && !self.items.is_empty() {
                    if self.measure_retries < MEASURE_RETRY_LIMIT {
                        self.measure_retries += 1;
                        self.schedule_measure();
                    } else {
                        debug!("giving up on fallback layout measurement");
                    }
                }
            }
            Task::SettleNavigation => self.settle(),
            Task::FinishAnimation => self.finish_animation(),
            Task::AutoAdvance => self.auto_advance(),
        }
    }

    /// Releases the timer and all subscriptions.
    ///
    /// Safe to call at any point, including before [`Self::initialize`], and
    /// more than once.
    pub fn dispose(&mut self) {
        if self.autoplay.stop(&mut self.host) {
            debug!("auto-advance stopped on dispose");
        }
        if let Some(timer) = self.measure_timer.take() {
            self.host.cancel(timer);
        }
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.pan.end();
        self.flags = StripFlags::empty();
        if !self.disposed {
            debug!("carousel disposed");
        }
        self.disposed = true;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Moves forward one item. Returns `false` if forward navigation is disabled.
    ///
    /// Stops auto-advance either way.
    pub fn next(&mut self) -> bool {
        self.stop_auto_advance();
        self.step(Step::Forward, 0.0)
    }

    /// Moves back one item. Returns `false` if backward navigation is disabled.
    ///
    /// Stops auto-advance either way.
    pub fn prev(&mut self) -> bool {
        self.stop_auto_advance();
        self.step(Step::Backward, 0.0)
    }

    fn stop_auto_advance(&mut self) {
        if self.autoplay.stop(&mut self.host) {
            debug!("auto-advance stopped by user interaction");
        }
    }

    fn auto_advance(&mut self) {
        if !self.autoplay.is_running() {
            return;
        }
        if self.window.is_none() {
            trace!("auto-advance tick before layout is measured");
            return;
        }
        if self.is_next_disabled() {
            // Nothing left to show in a bounded carousel.
            self.autoplay.stop(&mut self.host);
            debug!("auto-advance reached the end");
            return;
        }
        self.step(Step::Forward, 0.0);
    }

    /// Commits one navigation step.
    ///
    /// `drag` is the provisional offset the strip was rendered at when a pan
    /// gesture committed this step, so looping slides start under the finger.
    fn step(&mut self, step: Step, drag: f64) -> bool {
        if self.disposed {
            return false;
        }
        let disabled = match step {
            Step::Forward => self.is_next_disabled(),
            Step::Backward => self.is_prev_disabled(),
        };
        if disabled {
            return false;
        }
        let count = self.items.len();

        let first_frame = if self.config.looping {
            self.index = match step {
                Step::Forward => (self.index + 1) % count,
                Step::Backward => (self.index + count - 1) % count,
            };
            self.reorder();
            self.refresh_window();
            // Reordering moves every item by one slot; offset the strip so the
            // content appears where it was, then let the next frame slide it home.
            let jump = match step {
                Step::Forward => self.padding_left,
                Step::Backward => -self.strip.extent_of(self.index),
            };
            jump + drag
        } else {
            let Some(window) = self.window else {
                return false;
            };
            let target = match step {
                Step::Forward => window.right + 1,
                Step::Backward => window.left - 1,
            };
            let offset = self.strip.offset_of(target);
            self.translate_x = match step {
                Step::Forward => {
                    -(offset - (self.viewport_extent - self.strip.extent_of(target)))
                }
                Step::Backward => -offset,
            };
            self.index = match step {
                Step::Forward => (self.index + 1).min(count - 1),
                Step::Backward => self.index.saturating_sub(1),
            };
            self.reorder();
            self.refresh_window();
            self.translate_x
        };

        self.flags.set(StripFlags::REVERSING, step == Step::Backward);
        self.flags.insert(StripFlags::ANIMATING);
        self.flags.remove(StripFlags::PANNING);
        self.pending_delta = 0.0;
        self.rendered_x = first_frame;
        self.push_items();
        self.apply_strip();
        self.host.schedule(Task::FinishAnimation, Deferral::NextFrame);
        self.host.schedule(
            Task::SettleNavigation,
            Deferral::Delay(self.config.navigation_settle_ms),
        );

        let kind = match step {
            Step::Forward => EventKind::Next,
            Step::Backward => EventKind::Previous,
        };
        debug!(
            kind = kind.as_str(),
            index = self.index,
            translate_x = self.translate_x,
            "carousel navigated"
        );
        self.emit(kind);
        true
    }

    fn finish_animation(&mut self) {
        if !self.flags.contains(StripFlags::ANIMATING) {
            return;
        }
        self.flags.remove(StripFlags::ANIMATING);
        self.rendered_x = self.translate_x + self.pending_delta;
        self.apply_strip();
    }

    /// Re-reads geometry after a navigation, without notifying observers.
    fn settle(&mut self) {
        match self.measure() {
            // The loop padding follows the measured width of the sliver item.
            Ok(_) => self.apply_strip(),
            Err(err) => debug!(error = %err, "settle measurement rejected"),
        }
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Routes a gesture phase to the matching handler.
    pub fn handle_pan(&mut self, phase: PanPhase, event: &PanEvent) {
        match phase {
            PanPhase::Start => self.on_pan_start(event),
            PanPhase::Move => self.on_pan(event),
            PanPhase::End => self.on_pan_end(event),
        }
    }

    /// Handles a gesture forwarded by an individual item.
    pub fn on_item_gesture(&mut self, gesture: ItemGesture<H::Key>) {
        trace!(
            source = gesture.logical_index,
            phase = ?gesture.phase,
            "item gesture"
        );
        self.handle_pan(gesture.phase, &gesture.event);
    }

    /// A drag started. Stops auto-advance.
    pub fn on_pan_start(&mut self, event: &PanEvent) {
        if self.disposed || self.items.is_empty() {
            return;
        }
        self.stop_auto_advance();
        // The drag takes over from a navigation that has not reached its resting frame.
        self.finish_animation();
        self.pan.begin(event);
        self.pending_delta = 0.0;
        self.flags.set(StripFlags::PANNING, !self.config.looping);
        self.apply_strip();
    }

    /// A drag moved. Horizontal movement is rendered provisionally.
    pub fn on_pan(&mut self, event: &PanEvent) {
        if self.disposed || self.items.is_empty() {
            return;
        }
        match self.pan.update(event) {
            PanUpdate::Ignore => {}
            PanUpdate::Drag(delta_x) => {
                trace!(delta_x, "pan");
                self.pending_delta = delta_x;
                self.rendered_x = self.translate_x + delta_x;
                self.apply_strip();
            }
            PanUpdate::Interrupted => {
                trace!(distance = event.distance, "pan interrupted");
                self.flags.remove(StripFlags::PANNING);
                self.snap_back();
            }
        }
    }

    /// A drag ended. Commits a navigation if the drag went far enough,
    /// otherwise returns to the committed translation.
    pub fn on_pan_end(&mut self, event: &PanEvent) {
        if self.disposed || self.items.is_empty() {
            return;
        }
        self.pan.end();
        self.flags.remove(StripFlags::PANNING);

        let delta_x = event.delta.x;
        let step = if delta_x > 0.0 {
            Step::Backward
        } else {
            Step::Forward
        };
        let committed = delta_x.is_finite()
            && self
                .pan_threshold(step)
                .is_some_and(|threshold| delta_x.abs() > threshold)
            && self.step(step, delta_x);
        if !committed {
            self.snap_back();
        }
    }

    /// Minimum drag distance to commit `step`: a fraction of the width of the
    /// item the step would reveal.
    fn pan_threshold(&self, step: Step) -> Option<f64> {
        let count = self.items.len();
        if count == 0 || self.strip.len() != count {
            return None;
        }
        let target = if self.config.looping {
            match step {
                Step::Forward => self
                    .window
                    .map_or((self.index + 1) % count, |w| (w.right + 1) % count),
                Step::Backward => (self.index + count - 1) % count,
            }
        } else {
            let window = self.window?;
            match step {
                Step::Forward if window.right + 1 < count => window.right + 1,
                Step::Backward if window.left > 0 => window.left - 1,
                _ => return None,
            }
        };
        let threshold = self.strip.extent_of(target) * self.config.pan_commit_fraction;
        (threshold > 0.0).then_some(threshold)
    }

    fn snap_back(&mut self) {
        self.pending_delta = 0.0;
        self.rendered_x = self.translate_x;
        self.apply_strip();
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Measures geometry, clamps the translation and notifies observers.
    ///
    /// Returns `false` if the measurement was rejected.
    fn recalculate(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        if let Err(err) = self.measure() {
            debug!(error = %err, "layout measurement rejected");
            return false;
        }
        self.measure_retries = 0;
        if !self.config.looping {
            let max_scroll = self.strip.max_scroll(self.viewport_extent);
            let clamped = self.translate_x.clamp(-max_scroll, 0.0);
            if clamped != self.translate_x {
                self.translate_x = clamped;
                // Pulling the strip back uncovers earlier items; the anchor
                // follows so it never sits past the first visible item.
                if let Some(window) = self.refresh_window() {
                    self.index = self.index.min(window.left);
                }
            }
        }
        self.index = self.index.min(self.items.len().saturating_sub(1));
        self.rendered_x = self.translate_x + self.pending_delta;
        self.reorder();
        self.push_items();
        self.apply_strip();
        debug!(
            viewport = self.viewport_extent,
            content = self.strip.total_extent(),
            window = ?self.window,
            "carousel layout recalculated"
        );
        self.emit(EventKind::OnChanges);
        true
    }

    /// Reads widths from the host and recomputes the visible window.
    ///
    /// On any unusable reading the previous geometry is kept.
    fn measure(&mut self) -> Result<VisibleWindow, LayoutError> {
        if self.items.is_empty() {
            return Err(LayoutError::NoItems);
        }
        let usable = |v: &f64| v.is_finite() && *v > 0.0;
        let viewport = self
            .host
            .viewport_extent()
            .filter(usable)
            .ok_or(LayoutError::ViewportUnavailable)?;
        let extents = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.host
                    .item_extent(item.key())
                    .filter(usable)
                    .ok_or(LayoutError::ItemUnavailable { index })
            })
            .collect::<Result<Vec<f64>, LayoutError>>()?;

        self.viewport_extent = viewport;
        self.strip.rebuild(extents);
        self.refresh_window().ok_or(LayoutError::ViewportUnavailable)
    }

    /// Recomputes the visible window (and the loop padding) from cached geometry.
    fn refresh_window(&mut self) -> Option<VisibleWindow> {
        let count = self.items.len();
        if count == 0 || self.strip.len() != count {
            self.window = None;
            return None;
        }
        let window = if self.config.looping {
            let anchor = self.index;
            self.slots.rebuild(
                (0..count).map(|slot| self.strip.extent_of(item_at_slot(slot, anchor, count))),
            );
            self.padding_left = if count > 1 { self.slots.extent_of(0) } else { 0.0 };
            compute_visible_window(&self.slots, self.padding_left, self.viewport_extent).map(
                |w| VisibleWindow {
                    left: item_at_slot(w.left, anchor, count),
                    right: item_at_slot(w.right, anchor, count),
                    count: w.count,
                },
            )
        } else {
            compute_visible_window(&self.strip, -self.translate_x, self.viewport_extent)
        };
        self.window = window;
        window
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn reorder(&mut self) {
        let count = self.items.len();
        let anchor = self.index;
        let looping = self.config.looping;
        for item in &mut self.items {
            let index = item.logical_index();
            let order = if looping {
                display_order(index, anchor, count)
            } else {
                index
            };
            item.set_order(order);
            item.set_active(index == anchor);
        }
    }

    fn push_items(&mut self) {
        for item in &mut self.items {
            if item.take_dirty() {
                self.host.apply_item(item);
            }
        }
    }

    fn apply_strip(&mut self) {
        let style = self.strip_style();
        self.host.apply_strip(&style);
    }

    fn emit(&mut self, kind: EventKind) {
        let event = CarouselEvent {
            kind,
            index: self.index,
            next: !self.is_next_disabled(),
            previous: !self.is_prev_disabled(),
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_carousel_event(event);
        }
    }
}

impl<H> fmt::Debug for CarouselContainer<H>
where
    H: CarouselHost + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselContainer")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("index", &self.index)
            .field("translate_x", &self.translate_x)
            .field("window", &self.window)
            .field("flags", &self.flags)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
