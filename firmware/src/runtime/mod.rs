use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32 as hal;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_time::Timer;
use indicator_core::capture::SampleCell;
use indicator_core::safe_mode::BootMode;

use crate::config::{INDICATOR_CONFIG, OVERRIDE_SETTLE_US};
use crate::hw::led::RgbLed;
use crate::hw::watchdog::WatchdogPin;
use crate::telemetry::log_boot_mode;

mod capture_task;
mod control_task;
mod safe_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        cortex_m::interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                cortex_m::interrupt::enable();
            }
        }
    }
}

/// Latest accepted RC pulse, written by the capture task only.
pub(super) static SAMPLES: SampleCell = SampleCell::new();

/// Capture runs above thread mode, on the otherwise unused USART3..6 vector.
static CAPTURE_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn USART3_4_5_6_LPUART1() {
    unsafe { CAPTURE_EXECUTOR.on_interrupt() }
}

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let hal::Peripherals {
        PA8,
        EXTI8,
        PB3,
        PB4,
        PB5,
        PB6,
        PB7,
        ..
    } = hal::init(config);

    // Sampled once, before the RC line or its interrupt is touched.
    let boot_mode = {
        let safe_override = Input::new(PB6, Pull::Up);
        Timer::after_micros(OVERRIDE_SETTLE_US).await;
        BootMode::from_override(safe_override.is_low())
    };
    log_boot_mode(boot_mode);

    let indicator = INDICATOR_CONFIG;
    let dark = RgbLed::dark_level(indicator.polarity);
    let led = RgbLed::new(
        Output::new(PB3, dark, RgbLed::SPEED),
        Output::new(PB4, dark, RgbLed::SPEED),
        Output::new(PB5, dark, RgbLed::SPEED),
        indicator.polarity,
    );
    let watchdog = WatchdogPin::new(Output::new(PB7, Level::Low, Speed::Low));

    match boot_mode {
        BootMode::Safe => {
            spawner
                .spawn(safe_task::run(led, watchdog, indicator))
                .expect("failed to spawn safe-mode task");
        }
        BootMode::Normal => {
            let rc_input = ExtiInput::new(PA8, EXTI8, Pull::Down);
            interrupt::USART3_4_5_6_LPUART1.set_priority(Priority::P1);
            let capture_spawner = CAPTURE_EXECUTOR.start(interrupt::USART3_4_5_6_LPUART1);
            capture_spawner
                .spawn(capture_task::run(rc_input, indicator.signal.band))
                .expect("failed to spawn RC capture task");
            spawner
                .spawn(control_task::run(led, watchdog, indicator))
                .expect("failed to spawn control task");
        }
    }

    core::future::pending::<()>().await;
}
