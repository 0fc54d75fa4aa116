//! Boot-time safety override and the interrupt-free fallback it selects.
//!
//! The override pin is sampled exactly once before anything else is
//! configured. When asserted the runtime never arms edge capture and instead
//! runs [`SafeFallback`], which only needs a clock and the LED, so a faulty
//! input or a hung edge handler cannot lock out reprogramming.

use crate::blink::{BlinkError, BlinkScheduler, TickOutcome};
use crate::clock::Millis;
use crate::config::{BlinkSpec, StatePatterns};
use crate::led::{Color, RgbOutput};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BootMode {
    Normal,
    Safe,
}

impl BootMode {
    #[must_use]
    pub const fn from_override(asserted: bool) -> Self {
        if asserted { BootMode::Safe } else { BootMode::Normal }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BootMode::Normal => "normal",
            BootMode::Safe => "safe",
        }
    }
}

/// Red blink shown once when booting into safe mode.
pub const SAFE_MODE_BLINK: BlinkSpec = BlinkSpec::new(
    Color::Red,
    StatePatterns::DEFAULT_TIMES,
    BlinkSpec::period_for_hz(StatePatterns::DEFAULT_HZ),
);

/// Blink-only loop body used instead of the controller in safe mode.
pub struct SafeFallback<O: RgbOutput> {
    output: O,
    blink: BlinkScheduler,
}

impl<O: RgbOutput> SafeFallback<O> {
    /// Arms `spec` from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`BlinkError`] for a degenerate `spec`; the LED is left dark.
    pub fn new(mut output: O, spec: BlinkSpec, now: Millis) -> Result<Self, BlinkError> {
        let mut blink = BlinkScheduler::new();
        blink.start_spec(&mut output, spec, now)?;
        Ok(Self { output, blink })
    }

    pub fn poll(&mut self, now: Millis) -> TickOutcome {
        self.blink.tick(&mut self.output, now)
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        !self.blink.is_active()
    }

    #[must_use]
    pub const fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::Rgb;

    #[derive(Default)]
    struct Recorder {
        lit_phases: u32,
        current: Rgb,
    }

    impl RgbOutput for Recorder {
        fn write(&mut self, rgb: Rgb) {
            if !rgb.is_off() {
                self.lit_phases += 1;
            }
            self.current = rgb;
        }
    }

    #[test]
    fn override_selects_safe_mode() {
        assert_eq!(BootMode::from_override(true), BootMode::Safe);
        assert_eq!(BootMode::from_override(false), BootMode::Normal);
    }

    #[test]
    fn fallback_blinks_three_times_then_idles_dark() {
        let mut fallback =
            SafeFallback::new(Recorder::default(), SAFE_MODE_BLINK, Millis(0)).unwrap();
        for now in 0..=5_000 {
            fallback.poll(Millis(now));
        }
        assert!(fallback.is_done());
        assert_eq!(fallback.output().lit_phases, 3);
        assert!(fallback.output().current.is_off());
    }
}
