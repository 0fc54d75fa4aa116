use embassy_time::Timer;
use indicator_core::clock::Clock;
use indicator_core::config::IndicatorConfig;
use indicator_core::controller::Controller;
use indicator_core::liveness::LivenessFeeder;

use super::SAMPLES;
use crate::clock::EmbassyClock;
use crate::hw::led::RgbLed;
use crate::hw::watchdog::WatchdogPin;
use crate::telemetry::{StatusLogger, log_blink_error, log_transition};

/// Main control loop. Sleeps at most `loop_period_ms` per iteration.
#[embassy_executor::task]
pub async fn run(
    led: RgbLed<'static>,
    watchdog: WatchdogPin<'static>,
    config: IndicatorConfig,
) -> ! {
    let clock = EmbassyClock;
    let started = clock.now_ms();
    let mut controller = Controller::new(config, led);
    let mut liveness = LivenessFeeder::new(watchdog, started, config.heartbeat_period_ms)
        .expect("validated heartbeat period");
    let mut status = StatusLogger::new(started, config.status_period_ms)
        .expect("validated status period");

    loop {
        let sample = SAMPLES.snapshot();
        let now = clock.now_ms();
        let report = controller.poll(now, sample);

        if let Some(transition) = report.transition {
            log_transition(&transition);
        }
        if let Some(error) = report.start_error {
            log_blink_error(report.state, error);
        }

        liveness.poll(now);
        status.poll(now, &report.signal, report.state, SAMPLES.counters());

        Timer::after_millis(u64::from(config.loop_period_ms)).await;
    }
}
