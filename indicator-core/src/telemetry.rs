//! Transition history and status reports shared by firmware and host tooling.
//!
//! Nothing here logs directly; firmware mirrors these records to defmt and the
//! emulator prints them, each using its own sink.

use core::fmt;

use heapless::{HistoryBuf, OldestOrdered};

use crate::capture::CaptureCounters;
use crate::classifier::CommandState;
use crate::clock::Millis;
use crate::validator::{SignalStatus, ValidatedSignal};

/// Number of transitions retained.
pub const TRANSITION_HISTORY: usize = 16;

/// A classified-state change observed by the controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    pub at: Millis,
    pub from: CommandState,
    pub to: CommandState,
    /// Width that caused the change, `None` when the signal was lost.
    pub width_us: Option<u16>,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} {} -> {}", self.at, self.from, self.to)?;
        match self.width_us {
            Some(width) => write!(f, " width={width}us"),
            None => f.write_str(" width=-"),
        }
    }
}

/// Fixed-capacity ring of the most recent transitions.
pub struct TransitionLog {
    ring: HistoryBuf<Transition, TRANSITION_HISTORY>,
}

impl TransitionLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuf::new(),
        }
    }

    pub fn record(&mut self, transition: Transition) {
        self.ring.write(transition);
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Transition> {
        self.ring.recent()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    /// Transitions in chronological order.
    #[must_use]
    pub fn oldest_first(&self) -> OldestOrdered<'_, Transition> {
        self.ring.oldest_ordered()
    }
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line summary of the decoder, emitted on the status grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatusReport {
    pub now: Millis,
    pub width_us: Option<u16>,
    pub age_ms: Option<u32>,
    pub status: SignalStatus,
    pub state: CommandState,
    pub counters: CaptureCounters,
}

impl StatusReport {
    #[must_use]
    pub const fn new(
        now: Millis,
        signal: &ValidatedSignal,
        state: CommandState,
        counters: CaptureCounters,
    ) -> Self {
        Self {
            now,
            width_us: signal.width_us,
            age_ms: signal.age_ms,
            status: signal.status,
            state,
            counters,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rc")?;
        match self.width_us {
            Some(width) => write!(f, " width={width}us")?,
            None => f.write_str(" width=-")?,
        }
        write!(f, " status={} state={}", self.status, self.state)?;
        match self.age_ms {
            Some(age) => write!(f, " age={age}ms")?,
            None => f.write_str(" age=-")?,
        }
        write!(
            f,
            " ok={} rej={}",
            self.counters.published, self.counters.rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn history_keeps_the_most_recent_entries() {
        let mut log = TransitionLog::new();
        for step in 0..20u32 {
            log.record(Transition {
                at: Millis(step),
                from: CommandState::Neutral,
                to: CommandState::High,
                width_us: Some(1_800),
            });
        }
        assert_eq!(log.len(), TRANSITION_HISTORY);
        assert_eq!(log.oldest_first().next().map(|t| t.at), Some(Millis(4)));
        assert_eq!(log.latest().map(|t| t.at), Some(Millis(19)));
    }

    #[test]
    fn status_report_renders_one_line() {
        let signal = ValidatedSignal {
            width_us: Some(1_800),
            age_ms: Some(4),
            status: SignalStatus::Valid,
        };
        let report = StatusReport::new(
            Millis(1_000),
            &signal,
            CommandState::High,
            CaptureCounters {
                published: 120,
                rejected: 2,
            },
        );
        assert_eq!(
            report.to_string(),
            "rc width=1800us status=valid state=HIGH age=4ms ok=120 rej=2"
        );

        let report = StatusReport::new(
            Millis(0),
            &ValidatedSignal::NONE,
            CommandState::Neutral,
            CaptureCounters::default(),
        );
        assert_eq!(
            report.to_string(),
            "rc width=- status=no-signal state=NEUTRAL age=- ok=0 rej=0"
        );
    }
}
