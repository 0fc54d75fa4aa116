//! Watchdog heartbeat fed from the control loop.

use crate::clock::Millis;
use crate::grid::{GridError, PeriodicGrid};

/// "Still alive" signal towards an external watchdog.
pub trait Heartbeat {
    fn beat(&mut self);
}

/// Feeds a [`Heartbeat`] on a fixed grid, independent of RC state.
pub struct LivenessFeeder<H: Heartbeat> {
    grid: PeriodicGrid,
    heartbeat: H,
    beats: u32,
}

impl<H: Heartbeat> LivenessFeeder<H> {
    /// Beats immediately and then every `period_ms` after `now`.
    ///
    /// # Errors
    ///
    /// [`GridError::ZeroPeriod`] when `period_ms` is zero.
    pub fn new(mut heartbeat: H, now: Millis, period_ms: u32) -> Result<Self, GridError> {
        let grid = PeriodicGrid::new(now, period_ms)?;
        heartbeat.beat();
        Ok(Self {
            grid,
            heartbeat,
            beats: 1,
        })
    }

    /// Beats if the next grid point has passed. Returns `true` when it did.
    pub fn poll(&mut self, now: Millis) -> bool {
        if !self.grid.poll(now) {
            return false;
        }
        self.heartbeat.beat();
        self.beats = self.beats.wrapping_add(1);
        true
    }

    #[must_use]
    pub const fn beats(&self) -> u32 {
        self.beats
    }

    #[must_use]
    pub const fn heartbeat(&self) -> &H {
        &self.heartbeat
    }
}
