//! Edge-driven pulse-width capture and its handoff to the control loop.
//!
//! [`PulseCapture`] lives in the edge handler's context and is the only writer
//! of a [`SampleCell`]. The control loop reads the cell through
//! [`SampleCell::snapshot`], which copies width and timestamp together inside a
//! critical section so a reader never pairs the width of one pulse with the
//! completion time of another.

use core::cell::Cell;

use critical_section::Mutex;
use portable_atomic::{AtomicU32, Ordering};

use crate::clock::{Micros, Millis};
use crate::config::PulseBand;

/// Direction of a transition on the RC input line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    /// Edge implied by the line level sampled right after the transition.
    #[must_use]
    pub const fn from_level(high: bool) -> Self {
        if high { Edge::Rising } else { Edge::Falling }
    }
}

/// Last accepted pulse: width plus the coarse time it completed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PulseSample {
    pub width_us: u16,
    pub completed_at: Millis,
}

impl PulseSample {
    #[must_use]
    pub const fn new(width_us: u16, completed_at: Millis) -> Self {
        Self {
            width_us,
            completed_at,
        }
    }
}

/// Reason a falling edge did not produce a sample.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PulseRejection {
    /// No rising edge was seen since the previous falling edge.
    MissingRise,
    /// Width fell outside the plausible band (clamped to `u16::MAX` when huge).
    OutOfBand(u16),
}

/// Result of handling one edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CaptureOutcome {
    /// Rising edge recorded as the start of a pulse.
    Armed,
    Published(PulseSample),
    Rejected(PulseRejection),
}

/// Publish/reject counters, as last observed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CaptureCounters {
    pub published: u32,
    pub rejected: u32,
}

/// Single-writer, single-reader slot for the latest good [`PulseSample`].
pub struct SampleCell {
    latest: Mutex<Cell<Option<PulseSample>>>,
    published: AtomicU32,
    rejected: AtomicU32,
}

impl SampleCell {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new(None)),
            published: AtomicU32::new(0),
            rejected: AtomicU32::new(0),
        }
    }

    /// Replaces the stored sample. Only the edge handler calls this.
    pub fn publish(&self, sample: PulseSample) {
        critical_section::with(|cs| self.latest.borrow(cs).set(Some(sample)));
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    fn note_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current sample out as a unit. `None` until the first good pulse.
    #[must_use]
    pub fn snapshot(&self) -> Option<PulseSample> {
        critical_section::with(|cs| self.latest.borrow(cs).get())
    }

    #[must_use]
    pub fn counters(&self) -> CaptureCounters {
        CaptureCounters {
            published: self.published.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Working state of the edge handler.
///
/// Every call is O(1) and never blocks; the only shared access is the short
/// critical section inside [`SampleCell::publish`].
#[derive(Clone, Debug)]
pub struct PulseCapture {
    band: PulseBand,
    rise: Option<Micros>,
}

impl PulseCapture {
    #[must_use]
    pub const fn new(band: PulseBand) -> Self {
        Self { band, rise: None }
    }

    /// Handles one transition of the input line.
    ///
    /// `micros` is the fine timestamp of the edge and `millis` the coarse one
    /// recorded as the completion time of a published pulse.
    pub fn on_edge(
        &mut self,
        edge: Edge,
        micros: Micros,
        millis: Millis,
        cell: &SampleCell,
    ) -> CaptureOutcome {
        match edge {
            Edge::Rising => {
                self.rise = Some(micros);
                CaptureOutcome::Armed
            }
            Edge::Falling => {
                let Some(rise) = self.rise.take() else {
                    cell.note_rejected();
                    return CaptureOutcome::Rejected(PulseRejection::MissingRise);
                };

                let width_us = clamp_width(micros.wrapping_since(rise));
                if !self.band.admits_capture(width_us) {
                    cell.note_rejected();
                    return CaptureOutcome::Rejected(PulseRejection::OutOfBand(width_us));
                }

                let sample = PulseSample::new(width_us, millis);
                cell.publish(sample);
                CaptureOutcome::Published(sample)
            }
        }
    }
}

fn clamp_width(raw: u32) -> u16 {
    u16::try_from(raw).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse(
        capture: &mut PulseCapture,
        cell: &SampleCell,
        rise_us: u32,
        width_us: u32,
        now_ms: u32,
    ) -> CaptureOutcome {
        capture.on_edge(Edge::Rising, Micros(rise_us), Millis(now_ms), cell);
        capture.on_edge(
            Edge::Falling,
            Micros(rise_us.wrapping_add(width_us)),
            Millis(now_ms),
            cell,
        )
    }

    #[test]
    fn publishes_in_band_pulse() {
        let cell = SampleCell::new();
        let mut capture = PulseCapture::new(PulseBand::STANDARD);

        let outcome = pulse(&mut capture, &cell, 10_000, 1_500, 42);
        let expected = PulseSample::new(1_500, Millis(42));
        assert_eq!(outcome, CaptureOutcome::Published(expected));
        assert_eq!(cell.snapshot(), Some(expected));
        assert_eq!(cell.counters(), CaptureCounters { published: 1, rejected: 0 });
    }

    #[test]
    fn glitches_keep_the_previous_sample() {
        let cell = SampleCell::new();
        let mut capture = PulseCapture::new(PulseBand::STANDARD);
        pulse(&mut capture, &cell, 0, 1_800, 5);

        assert_eq!(
            pulse(&mut capture, &cell, 20_000, 120, 25),
            CaptureOutcome::Rejected(PulseRejection::OutOfBand(120))
        );
        assert_eq!(
            pulse(&mut capture, &cell, 40_000, 2_200, 45),
            CaptureOutcome::Rejected(PulseRejection::OutOfBand(2_200))
        );
        assert_eq!(cell.snapshot(), Some(PulseSample::new(1_800, Millis(5))));
        assert_eq!(cell.counters().rejected, 2);
    }

    #[test]
    fn width_survives_microsecond_wraparound() {
        let cell = SampleCell::new();
        let mut capture = PulseCapture::new(PulseBand::STANDARD);

        let outcome = pulse(&mut capture, &cell, u32::MAX - 499, 1_200, 7);
        assert_eq!(
            outcome,
            CaptureOutcome::Published(PulseSample::new(1_200, Millis(7)))
        );
    }

    #[test]
    fn huge_widths_clamp_instead_of_overflowing() {
        let cell = SampleCell::new();
        let mut capture = PulseCapture::new(PulseBand::STANDARD);

        let outcome = pulse(&mut capture, &cell, 0, 3_000_000, 0);
        assert_eq!(
            outcome,
            CaptureOutcome::Rejected(PulseRejection::OutOfBand(u16::MAX))
        );
    }

    #[test]
    fn falling_edge_without_rise_is_rejected() {
        let cell = SampleCell::new();
        let mut capture = PulseCapture::new(PulseBand::STANDARD);
        pulse(&mut capture, &cell, 0, 1_500, 1);

        let outcome = capture.on_edge(Edge::Falling, Micros(9_000), Millis(9), &cell);
        assert_eq!(outcome, CaptureOutcome::Rejected(PulseRejection::MissingRise));
        assert_eq!(cell.snapshot(), Some(PulseSample::new(1_500, Millis(1))));
    }
}
