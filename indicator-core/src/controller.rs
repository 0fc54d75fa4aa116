//! Control-loop iteration: snapshot, validate, classify, render.
//!
//! The controller owns the indicator output and its blink channel. A single
//! tri-color LED is one visual channel, so at most one pattern is ever active
//! and every state change cancels it before arming the next.

use crate::blink::{BlinkError, BlinkScheduler, TickOutcome};
use crate::capture::{PulseSample, SampleCell};
use crate::classifier::{CommandState, classify};
use crate::clock::{Clock, Millis};
use crate::config::{BlinkSpec, IndicatorConfig};
use crate::led::RgbOutput;
use crate::telemetry::{Transition, TransitionLog};
use crate::validator::{ValidatedSignal, validate};

/// Everything one iteration observed and did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PollReport {
    pub signal: ValidatedSignal,
    pub state: CommandState,
    pub transition: Option<Transition>,
    pub tick: TickOutcome,
    /// Set when the pattern for a new state could not be armed.
    pub start_error: Option<BlinkError>,
}

pub struct Controller<O: RgbOutput> {
    config: IndicatorConfig,
    output: O,
    blink: BlinkScheduler,
    state: CommandState,
    transitions: TransitionLog,
}

impl<O: RgbOutput> Controller<O> {
    /// Starts in NEUTRAL with the output forced dark.
    pub fn new(config: IndicatorConfig, mut output: O) -> Self {
        output.off();
        Self {
            config,
            output,
            blink: BlinkScheduler::new(),
            state: CommandState::Neutral,
            transitions: TransitionLog::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> CommandState {
        self.state
    }

    #[must_use]
    pub const fn blink(&self) -> &BlinkScheduler {
        &self.blink
    }

    #[must_use]
    pub const fn transitions(&self) -> &TransitionLog {
        &self.transitions
    }

    #[must_use]
    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// One loop iteration: snapshots `cell` once, then reads the clock once.
    pub fn run_iteration<C: Clock>(&mut self, clock: &C, cell: &SampleCell) -> PollReport {
        let sample = cell.snapshot();
        self.poll(clock.now_ms(), sample)
    }

    /// One loop iteration against an already-taken snapshot.
    pub fn poll(&mut self, now: Millis, sample: Option<PulseSample>) -> PollReport {
        let signal = validate(sample, now, &self.config.signal);
        let next = classify(&signal, &self.config.signal.thresholds);

        let mut transition = None;
        let mut start_error = None;
        if next != self.state {
            let change = Transition {
                at: now,
                from: self.state,
                to: next,
                width_us: signal.usable_width(),
            };
            self.transitions.record(change);
            transition = Some(change);
            self.state = next;

            self.blink.stop(&mut self.output);
            if let Some(spec) = self.pattern_for(next) {
                start_error = self.blink.start_spec(&mut self.output, spec, now).err();
            }
        }

        let tick = self.blink.tick(&mut self.output, now);

        PollReport {
            signal,
            state: self.state,
            transition,
            tick,
            start_error,
        }
    }

    fn pattern_for(&self, state: CommandState) -> Option<BlinkSpec> {
        match state {
            CommandState::Neutral => None,
            CommandState::Low => self.config.patterns.low,
            CommandState::High => self.config.patterns.high,
        }
    }
}
