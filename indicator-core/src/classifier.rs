//! Maps a validated pulse width onto the three command states.

use core::fmt;

use crate::config::Thresholds;
use crate::validator::ValidatedSignal;

/// Discrete command decoded from the RC channel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CommandState {
    /// Dead zone, stale or missing signal. Also the boot state.
    #[default]
    Neutral,
    /// Short pulses (switch DOWN).
    Low,
    /// Long pulses (switch UP).
    High,
}

impl CommandState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CommandState::Neutral => "NEUTRAL",
            CommandState::Low => "LOW",
            CommandState::High => "HIGH",
        }
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Thresholds {
    /// Classifies a width that already passed validation.
    ///
    /// HIGH is tested first; with degenerate thresholds both tests may match and
    /// the result is HIGH rather than a fault.
    #[must_use]
    pub const fn classify_width(&self, width_us: u16) -> CommandState {
        if width_us >= self.high_min_us {
            CommandState::High
        } else if width_us <= self.low_max_us {
            CommandState::Low
        } else {
            CommandState::Neutral
        }
    }
}

/// Classifies a signal, falling back to NEUTRAL whenever it is not valid.
#[must_use]
pub fn classify(signal: &ValidatedSignal, thresholds: &Thresholds) -> CommandState {
    signal
        .usable_width()
        .map_or(CommandState::Neutral, |width| thresholds.classify_width(width))
}
