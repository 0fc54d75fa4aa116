//! Simulated board: synthetic PWM source, simulated clocks and the real core.

use crossterm::style::{Color as TermColor, Stylize};

use indicator_core::blink::TickOutcome;
use indicator_core::capture::{CaptureOutcome, Edge, PulseCapture, SampleCell};
use indicator_core::clock::{Clock, Micros, Millis};
use indicator_core::config::IndicatorConfig;
use indicator_core::console::{ConsoleCommand, HELP_TOPICS, parse_command};
use indicator_core::controller::Controller;
use indicator_core::grid::PeriodicGrid;
use indicator_core::led::{Rgb, RgbOutput};
use indicator_core::liveness::{Heartbeat, LivenessFeeder};
use indicator_core::telemetry::StatusReport;
use indicator_core::validator::validate;

/// Standard RC frame spacing (50 Hz).
const FRAME_PERIOD_MS: u32 = 20;

/// Manually advanced clock. Both counters wrap like the hardware ones.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimClock {
    now_ms: Millis,
}

impl SimClock {
    fn advance_ms(&mut self, delta: u32) {
        self.now_ms = self.now_ms.wrapping_add(delta);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> Millis {
        self.now_ms
    }

    fn now_us(&self) -> Micros {
        Micros(self.now_ms.0.wrapping_mul(1_000))
    }
}

/// LED that remembers every change until the session drains it.
#[derive(Default)]
pub struct TerminalLed {
    current: Rgb,
    changes: Vec<Rgb>,
}

impl TerminalLed {
    pub fn current(&self) -> Rgb {
        self.current
    }
}

impl RgbOutput for TerminalLed {
    fn write(&mut self, rgb: Rgb) {
        if rgb != self.current {
            self.changes.push(rgb);
        }
        self.current = rgb;
    }
}

#[derive(Default)]
struct BeatCounter(u32);

impl Heartbeat for BeatCounter {
    fn beat(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

pub struct Session {
    clock: SimClock,
    capture: PulseCapture,
    cell: SampleCell,
    controller: Controller<TerminalLed>,
    liveness: LivenessFeeder<BeatCounter>,
    frames: Option<PeriodicGrid>,
    signal_us: u16,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(IndicatorConfig::STANDARD)
    }

    pub fn with_config(config: IndicatorConfig) -> Self {
        let clock = SimClock::default();
        let heartbeat_period = config.heartbeat_period_ms.max(1);
        let liveness =
            LivenessFeeder::new(BeatCounter::default(), clock.now_ms(), heartbeat_period)
                .expect("heartbeat period is non-zero");

        Self {
            clock,
            capture: PulseCapture::new(config.signal.band),
            cell: SampleCell::new(),
            controller: Controller::new(config, TerminalLed::default()),
            liveness,
            frames: None,
            signal_us: 0,
        }
    }

    pub fn controller(&self) -> &Controller<TerminalLed> {
        &self.controller
    }

    pub fn handle_command(&mut self, line: &str) -> Vec<String> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => return vec![format!("ERR {err}")],
        };

        match command {
            ConsoleCommand::Help => HELP_TOPICS
                .iter()
                .map(|(_, usage)| (*usage).to_string())
                .collect(),
            ConsoleCommand::Status => vec![self.status_line(), self.heartbeat_line()],
            ConsoleCommand::History => self.history_lines(),
            ConsoleCommand::Signal(width_us) => {
                self.signal_us = width_us;
                let first = self.clock.now_ms().wrapping_add(FRAME_PERIOD_MS);
                self.frames = PeriodicGrid::with_first_deadline(first, FRAME_PERIOD_MS).ok();
                vec![format!("OK signal {width_us}us every {FRAME_PERIOD_MS}ms")]
            }
            ConsoleCommand::Silence => {
                self.frames = None;
                vec!["OK signal stopped".to_string()]
            }
            ConsoleCommand::Glitch(width_us) => {
                let outcome = self.emit_pulse(u32::from(width_us));
                vec![describe_capture(outcome)]
            }
            ConsoleCommand::ResetEdge => {
                let outcome = self.capture.on_edge(
                    Edge::Falling,
                    self.clock.now_us(),
                    self.clock.now_ms(),
                    &self.cell,
                );
                vec![describe_capture(outcome)]
            }
            ConsoleCommand::Advance(duration_ms) => self.advance(duration_ms),
        }
    }

    fn advance(&mut self, duration_ms: u32) -> Vec<String> {
        let mut lines = Vec::new();
        for _ in 0..duration_ms {
            self.clock.advance_ms(1);
            let now = self.clock.now_ms();

            let frame_due = self.frames.as_mut().is_some_and(|grid| grid.poll(now));
            if frame_due {
                self.emit_pulse(u32::from(self.signal_us));
            }

            let report = self.controller.run_iteration(&self.clock, &self.cell);
            if let Some(transition) = report.transition {
                lines.push(format!("[{now}] state {transition}"));
            }
            if let Some(err) = report.start_error {
                lines.push(format!("[{now}] blink not started: {err}"));
            }
            if report.tick == TickOutcome::Finished {
                lines.push(format!("[{now}] blink finished"));
            }
            for rgb in self.controller.output_mut().changes.drain(..) {
                lines.push(format!("[{now}] led {}", render(rgb)));
            }

            self.liveness.poll(now);
        }
        lines.push(format!("OK t={}", self.clock.now_ms()));
        lines
    }

    fn emit_pulse(&mut self, width_us: u32) -> CaptureOutcome {
        let rise = self.clock.now_us();
        let now_ms = self.clock.now_ms();
        self.capture.on_edge(Edge::Rising, rise, now_ms, &self.cell);
        self.capture
            .on_edge(Edge::Falling, rise.wrapping_add(width_us), now_ms, &self.cell)
    }

    fn status_line(&self) -> String {
        let now = self.clock.now_ms();
        let config = self.controller.config();
        let signal = validate(self.cell.snapshot(), now, &config.signal);
        StatusReport::new(now, &signal, self.controller.state(), self.cell.counters()).to_string()
    }

    fn heartbeat_line(&self) -> String {
        format!(
            "heartbeats={} led={}",
            self.liveness.beats(),
            render(self.controller.output().current())
        )
    }

    fn history_lines(&self) -> Vec<String> {
        let log = self.controller.transitions();
        if log.is_empty() {
            return vec!["no transitions recorded".to_string()];
        }
        log.oldest_first().map(ToString::to_string).collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_capture(outcome: CaptureOutcome) -> String {
    match outcome {
        CaptureOutcome::Armed => "OK rising edge recorded".to_string(),
        CaptureOutcome::Published(sample) => {
            format!("OK pulse {}us accepted", sample.width_us)
        }
        CaptureOutcome::Rejected(reason) => format!("OK pulse rejected ({reason:?})"),
    }
}

fn render(rgb: Rgb) -> String {
    if rgb.is_off() {
        return "off".to_string();
    }
    let level = |lit: bool| if lit { 255 } else { 0 };
    let color = TermColor::Rgb {
        r: level(rgb.red),
        g: level(rgb.green),
        b: level(rgb.blue),
    };
    format!("{}", "●".with(color))
}
