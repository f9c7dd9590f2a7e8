// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture input and the duplicate-event guard.
//!
//! Raw touch/pointer input is recognized by the host (or a gesture library it
//! uses) and arrives here as [`PanEvent`]s tagged with a [`PanPhase`]. The
//! carousel only cares about the horizontal component; updates whose velocity
//! is predominantly vertical are left to the page so the widget does not fight
//! vertical scrolling.
//!
//! Some recognizers report the final event twice, the second time with a
//! cumulative distance that jumps far past the previous reading. [`PanTracker`]
//! treats such a jump, or a reading with no net movement, as an implicit end of
//! the gesture.

use kurbo::Vec2;

/// Phase of a pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    /// The pointer went down and started moving.
    Start,
    /// Intermediate movement.
    Move,
    /// The pointer was released.
    End,
}

/// One pan gesture report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    /// Movement since the gesture started.
    pub delta: Vec2,
    /// Velocity over the last few samples.
    pub velocity: Vec2,
    /// Velocity over the whole gesture.
    pub overall_velocity: Vec2,
    /// Cumulative distance travelled since the gesture started.
    pub distance: f64,
    /// Set on the last report of a gesture.
    pub is_final: bool,
}

impl PanEvent {
    /// A purely horizontal report with velocity pointing along the drag.
    #[must_use]
    pub fn horizontal(delta_x: f64, distance: f64) -> Self {
        let velocity = Vec2::new(delta_x.signum(), 0.0);
        Self {
            delta: Vec2::new(delta_x, 0.0),
            velocity,
            overall_velocity: velocity,
            distance,
            is_final: false,
        }
    }

    /// Returns a copy with the given overall velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self.overall_velocity = velocity;
        self
    }

    /// Returns a copy marked as the final report.
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Returns `true` if the gesture moves at least as fast horizontally as vertically.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.overall_velocity.x.abs() >= self.overall_velocity.y.abs()
    }
}

/// What an intermediate pan update means for the strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanUpdate {
    /// Nothing to render (final, vertical or malformed report).
    Ignore,
    /// Provisionally offset the strip by this many pixels.
    Drag(f64),
    /// The report looks like a duplicate final event; end the gesture and snap back.
    Interrupted,
}

/// Tracks the cumulative distance of the gesture in flight.
#[derive(Clone, Copy, Debug)]
pub struct PanTracker {
    active: bool,
    last_distance: f64,
    jump_threshold: f64,
}

impl PanTracker {
    /// Creates an idle tracker.
    ///
    /// `jump_threshold` is the jump in cumulative distance between two updates
    /// above which an update is treated as a duplicate final event.
    #[must_use]
    pub const fn new(jump_threshold: f64) -> Self {
        Self {
            active: false,
            last_distance: 0.0,
            jump_threshold,
        }
    }

    /// Records the start of a gesture.
    pub fn begin(&mut self, event: &PanEvent) {
        self.active = true;
        self.last_distance = if event.distance.is_finite() {
            event.distance
        } else {
            0.0
        };
    }

    /// Classifies an intermediate report.
    pub fn update(&mut self, event: &PanEvent) -> PanUpdate {
        if event.is_final || !event.is_horizontal() || !event.delta.x.is_finite() {
            return PanUpdate::Ignore;
        }
        let jump = event.distance - self.last_distance;
        if event.distance.is_nan() || event.distance <= 0.0 || jump > self.jump_threshold {
            self.active = false;
            self.last_distance = 0.0;
            return PanUpdate::Interrupted;
        }
        self.active = true;
        self.last_distance = event.distance;
        PanUpdate::Drag(event.delta.x)
    }

    /// Ends the gesture, returning whether one was in flight.
    pub fn end(&mut self) -> bool {
        self.last_distance = 0.0;
        core::mem::replace(&mut self.active, false)
    }

    /// Distance jump that interrupts the gesture.
    #[must_use]
    pub const fn jump_threshold(&self) -> f64 {
        self.jump_threshold
    }

    /// Returns `true` between [`Self::begin`] and [`Self::end`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}
