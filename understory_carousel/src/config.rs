// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance carousel configuration.

/// Interval between automatic advances, in milliseconds.
pub const AUTO_ADVANCE_INTERVAL_MS: u64 = 3000;

/// Configuration for a single carousel instance.
///
/// The configuration is supplied once, before [`CarouselContainer::initialize`]
/// runs, and is treated as immutable afterwards.
///
/// [`CarouselContainer::initialize`]: crate::CarouselContainer::initialize
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Infinite scrolling by remapping item display order instead of bounded paging.
    pub looping: bool,
    /// Advance automatically every [`Self::auto_advance_interval_ms`] until the user
    /// navigates or starts a gesture.
    pub automatic: bool,
    /// Period of the auto-advance timer.
    pub auto_advance_interval_ms: u64,
    /// Fallback delay before measuring geometry after the content changed.
    ///
    /// Hosts that can tell when layout has settled should call
    /// [`CarouselContainer::on_layout_ready`](crate::CarouselContainer::on_layout_ready)
    /// instead of waiting for this delay.
    pub layout_settle_ms: u64,
    /// Delay after a committed navigation before geometry is measured again.
    pub navigation_settle_ms: u64,
    /// Jump in cumulative pan distance between two updates that is treated as a
    /// duplicate final event rather than real movement.
    pub pan_jump_threshold: f64,
    /// Fraction of the newly revealed item's width a pan must cover to commit.
    pub pan_commit_fraction: f64,
}

impl CarouselConfig {
    /// Bounded paging without auto-advance.
    pub const fn new() -> Self {
        Self {
            looping: false,
            automatic: false,
            auto_advance_interval_ms: AUTO_ADVANCE_INTERVAL_MS,
            layout_settle_ms: 300,
            navigation_settle_ms: 150,
            pan_jump_threshold: 100.0,
            pan_commit_fraction: 1.0 / 3.0,
        }
    }

    /// Returns a copy with looping enabled or disabled.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Returns a copy with auto-advance enabled or disabled.
    #[must_use]
    pub const fn with_automatic(mut self, automatic: bool) -> Self {
        self.automatic = automatic;
        self
    }

    /// Returns a copy with custom settle delays.
    #[must_use]
    pub const fn with_settle_delays(mut self, layout_ms: u64, navigation_ms: u64) -> Self {
        self.layout_settle_ms = layout_ms;
        self.navigation_settle_ms = navigation_ms;
        self
    }

    /// Returns a copy with a custom duplicate-event guard for pan updates.
    #[must_use]
    pub const fn with_pan_jump_threshold(mut self, threshold: f64) -> Self {
        self.pan_jump_threshold = threshold;
        self
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::new()
    }
}
