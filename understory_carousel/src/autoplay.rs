// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The auto-advance interval.

use crate::host::{CarouselHost, Deferral, Task, TimerId};

/// Handle for the repeating auto-advance timer.
///
/// Auto-advance is a convenience that lasts until the user takes over: once
/// stopped it never starts again for the lifetime of the container.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoAdvance {
    timer: Option<TimerId>,
    stopped: bool,
}

impl AutoAdvance {
    /// Creates an idle handle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timer: None,
            stopped: false,
        }
    }

    /// Starts the interval unless it is already running or was stopped before.
    pub fn start<H: CarouselHost>(&mut self, host: &mut H, interval_ms: u64) -> bool {
        if self.timer.is_some() || self.stopped || interval_ms == 0 {
            return false;
        }
        self.timer = Some(host.schedule(Task::AutoAdvance, Deferral::Every(interval_ms)));
        true
    }

    /// Stops the interval for good. Stopping twice is a no-op.
    pub fn stop<H: CarouselHost>(&mut self, host: &mut H) -> bool {
        self.stopped = true;
        match self.timer.take() {
            Some(timer) => {
                host.cancel(timer);
                true
            }
            None => false,
        }
    }

    /// Returns `true` while the interval is scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}
