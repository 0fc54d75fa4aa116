//! Non-blocking, self-terminating blink patterns.
//!
//! A [`BlinkScheduler`] plays `times` ON/OFF pairs of one color on a single
//! visual channel. Starting a new pattern always forces the channel dark first
//! and discards the old one; patterns never queue or merge. Each
//! [`BlinkScheduler::tick`] performs at most one toggle, and the toggle grid
//! stays aligned to the `start` time no matter how late `tick` is called.

use core::fmt;

use crate::clock::Millis;
use crate::config::BlinkSpec;
use crate::grid::PeriodicGrid;
use crate::led::{Color, Rgb, RgbOutput};

/// Rejected `start` arguments. The channel is left dark and inactive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlinkError {
    ZeroPeriod,
    ZeroCount,
}

impl fmt::Display for BlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlinkError::ZeroPeriod => f.write_str("blink period must be non-zero"),
            BlinkError::ZeroCount => f.write_str("blink count must be non-zero"),
        }
    }
}

/// What a single `tick` did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// No pattern is active.
    Inactive,
    /// Active, next toggle not yet due.
    Waiting,
    /// One toggle was applied; `lit` is the new light state.
    Toggled { lit: bool },
    /// The final toggle was consumed and the channel forced dark.
    Finished,
}

/// In-flight pattern state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BlinkPattern {
    pub color: Color,
    pub remaining_toggles: u16,
    pub lit: bool,
    grid: PeriodicGrid,
}

impl BlinkPattern {
    #[must_use]
    pub const fn next_deadline(&self) -> Millis {
        self.grid.next_deadline()
    }
}

/// One visual channel. `None` pattern means INACTIVE.
#[derive(Clone, Debug, Default)]
pub struct BlinkScheduler {
    pattern: Option<BlinkPattern>,
}

impl BlinkScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self { pattern: None }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    #[must_use]
    pub const fn pattern(&self) -> Option<&BlinkPattern> {
        self.pattern.as_ref()
    }

    /// Cancels whatever is playing and arms `times` blinks of `color`.
    ///
    /// The first toggle (to ON) is due at `now + period_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`BlinkError`] for a zero period or count; the previous pattern
    /// is still cancelled and nothing new is armed.
    pub fn start<O: RgbOutput>(
        &mut self,
        output: &mut O,
        color: Color,
        times: u8,
        period_ms: u32,
        now: Millis,
    ) -> Result<(), BlinkError> {
        self.stop(output);

        if times == 0 {
            return Err(BlinkError::ZeroCount);
        }
        let grid = PeriodicGrid::new(now, period_ms).map_err(|_| BlinkError::ZeroPeriod)?;

        self.pattern = Some(BlinkPattern {
            color,
            remaining_toggles: u16::from(times) * 2,
            lit: false,
            grid,
        });
        Ok(())
    }

    /// [`start`](Self::start) driven by a configured [`BlinkSpec`].
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    pub fn start_spec<O: RgbOutput>(
        &mut self,
        output: &mut O,
        spec: BlinkSpec,
        now: Millis,
    ) -> Result<(), BlinkError> {
        self.start(output, spec.color, spec.times, spec.period_ms, now)
    }

    /// Advances the pattern. Never sleeps; at most one toggle per call.
    pub fn tick<O: RgbOutput>(&mut self, output: &mut O, now: Millis) -> TickOutcome {
        let Some(pattern) = self.pattern.as_mut() else {
            return TickOutcome::Inactive;
        };
        if !pattern.grid.poll(now) {
            return TickOutcome::Waiting;
        }

        pattern.lit = !pattern.lit;
        output.write(if pattern.lit {
            pattern.color.rgb()
        } else {
            Rgb::OFF
        });
        pattern.remaining_toggles = pattern.remaining_toggles.saturating_sub(1);

        if pattern.remaining_toggles == 0 {
            self.stop(output);
            return TickOutcome::Finished;
        }
        TickOutcome::Toggled { lit: pattern.lit }
    }

    /// Forces the channel dark and drops any remaining toggles. Idempotent.
    pub fn stop<O: RgbOutput>(&mut self, output: &mut O) {
        self.pattern = None;
        output.off();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        writes: std::vec::Vec<Rgb>,
    }

    impl RgbOutput for Recorder {
        fn write(&mut self, rgb: Rgb) {
            self.writes.push(rgb);
        }
    }

    #[test]
    fn zero_period_does_not_arm() {
        let mut out = Recorder::default();
        let mut blink = BlinkScheduler::new();
        assert_eq!(
            blink.start(&mut out, Color::Red, 3, 0, Millis(0)),
            Err(BlinkError::ZeroPeriod)
        );
        assert!(!blink.is_active());
        assert_eq!(out.writes, [Rgb::OFF]);
    }

    #[test]
    fn zero_count_does_not_arm() {
        let mut out = Recorder::default();
        let mut blink = BlinkScheduler::new();
        assert_eq!(
            blink.start(&mut out, Color::Red, 0, 100, Millis(0)),
            Err(BlinkError::ZeroCount)
        );
        assert!(!blink.is_active());
    }

    #[test]
    fn first_toggle_waits_one_period() {
        let mut out = Recorder::default();
        let mut blink = BlinkScheduler::new();
        blink.start(&mut out, Color::Green, 1, 100, Millis(50)).unwrap();

        assert_eq!(blink.tick(&mut out, Millis(149)), TickOutcome::Waiting);
        assert_eq!(blink.tick(&mut out, Millis(150)), TickOutcome::Toggled { lit: true });
        assert_eq!(out.writes.last(), Some(&Color::Green.rgb()));
    }

    #[test]
    fn tick_on_inactive_writes_nothing() {
        let mut out = Recorder::default();
        let mut blink = BlinkScheduler::new();
        for now in [0, 10, 1_000] {
            assert_eq!(blink.tick(&mut out, Millis(now)), TickOutcome::Inactive);
        }
        assert!(out.writes.is_empty());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut out = Recorder::default();
        let mut blink = BlinkScheduler::new();
        blink.start(&mut out, Color::Blue, 2, 100, Millis(0)).unwrap();
        blink.stop(&mut out);
        blink.stop(&mut out);
        assert!(!blink.is_active());
        assert!(out.writes.iter().all(|rgb| rgb.is_off()));
    }

    #[test]
    fn stall_toggles_once_and_stays_on_grid() {
        let mut out = Recorder::default();
        let mut blink = BlinkScheduler::new();
        blink.start(&mut out, Color::Red, 5, 100, Millis(1_000)).unwrap();

        // Five periods late.
        assert_eq!(blink.tick(&mut out, Millis(1_560)), TickOutcome::Toggled { lit: true });
        let pattern = blink.pattern().unwrap();
        assert_eq!(pattern.next_deadline(), Millis(1_600));
        assert_eq!(pattern.remaining_toggles, 9);
        assert_eq!(pattern.next_deadline().wrapping_since(Millis(1_000)) % 100, 0);
    }
}
