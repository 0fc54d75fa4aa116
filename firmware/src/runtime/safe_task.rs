use embassy_futures::yield_now;
use indicator_core::blink::TickOutcome;
use indicator_core::clock::Clock;
use indicator_core::config::IndicatorConfig;
use indicator_core::liveness::LivenessFeeder;
use indicator_core::safe_mode::{SAFE_MODE_BLINK, SafeFallback};

use crate::clock::EmbassyClock;
use crate::hw::led::RgbLed;
use crate::hw::watchdog::WatchdogPin;
use crate::telemetry::log_safe_blink_done;

/// Safe-mode loop: boot blink plus heartbeat, no RC capture and no timers.
#[embassy_executor::task]
pub async fn run(
    led: RgbLed<'static>,
    watchdog: WatchdogPin<'static>,
    config: IndicatorConfig,
) -> ! {
    let clock = EmbassyClock;
    let started = clock.now_ms();
    let mut liveness = LivenessFeeder::new(watchdog, started, config.heartbeat_period_ms)
        .expect("validated heartbeat period");
    let mut fallback =
        SafeFallback::new(led, SAFE_MODE_BLINK, started).expect("safe-mode blink spec is valid");

    loop {
        let now = clock.now_ms();
        if fallback.poll(now) == TickOutcome::Finished {
            log_safe_blink_done(now);
        }
        liveness.poll(now);
        yield_now().await;
    }
}
