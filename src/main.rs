//! GreenVent Firmware — Main Entry Point
//!
//! Hexagonal layout with a fixed-cadence control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter      LcdDisplay       LogEventSink          │
//! │  (Sensor+Actuator)    (DisplayPort)    (EventSink)           │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ────────────────        │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            VentService (pure logic)                │      │
//! │  │  thresholds · window FSM · travel timer            │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  ButtonBank (ISR edge latch → one-shot flags) · ModeSwitch   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod app;
mod adapters;
mod control;
mod drivers;
pub mod fsm;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use std::time::Duration;

use anyhow::Result;
use log::info;

use adapters::display::LcdDisplay;
use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::Uptime;
use app::service::VentService;
use config::SystemConfig;
use drivers::buttons::ButtonBank;
use drivers::mode_switch::ModeSwitch;
use drivers::motor::MotorDriver;
use sensors::climate::ClimateSensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("GreenVent v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("config: {e}"))?;

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production the watchdog resets the board after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without buttons", e);
    }
    let watchdog = drivers::watchdog::Watchdog::new(10_000);
    let clock = Uptime::new();

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(ClimateSensor::new(pins::DHT_GPIO), MotorDriver::new());
    let mut display = LcdDisplay::new();
    let mut sink = LogEventSink::new();

    let mode_switch = ModeSwitch::new(pins::MODE_SWITCH_GPIO);
    let mut buttons = ButtonBank::new(config.debounce_ms);

    // ── 5. Application service ────────────────────────────────
    let mut app = VentService::new(&config);
    app.start(mode_switch.read(), clock.now_ms(), &mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        std::thread::sleep(Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));

        let now_ms = clock.now_ms();
        let mode = mode_switch.read();

        buttons.tick(now_ms, mode, app.actuator_active());
        app.tick(now_ms, mode, &mut buttons, &mut hw, &mut display, &mut sink);

        watchdog.feed();
    }
}
