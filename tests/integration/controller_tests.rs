//! End-to-end scenarios for the VentService tick pipeline.
//!
//! Each test builds a private rig: service + mock hardware + capture
//! display + recording sink + a button bank over its own edge latch, so the
//! parallel test runner cannot cross signals between scenarios.

use greenvent::app::events::{AppEvent, DisplayIntent, ThresholdKind};
use greenvent::app::service::VentService;
use greenvent::config::SystemConfig;
use greenvent::control::travel::Direction;
use greenvent::drivers::buttons::{ButtonBank, ButtonId, EdgeLatch};
use greenvent::fsm::context::{OperatingMode, WindowPosition};
use greenvent::fsm::StateId;

use crate::mock_hw::{CaptureDisplay, MockHardware, RecordingSink};

macro_rules! test_latch {
    () => {{
        static LATCH: EdgeLatch = EdgeLatch::new();
        &LATCH
    }};
}

struct Rig {
    app: VentService,
    hw: MockHardware,
    lcd: CaptureDisplay,
    sink: RecordingSink,
    bank: ButtonBank,
    now_ms: u32,
    tick_ms: u32,
}

impl Rig {
    fn new(config: &SystemConfig, mode: OperatingMode, latch: &'static EdgeLatch) -> Self {
        let mut app = VentService::new(config);
        let mut hw = MockHardware::new();
        let mut sink = RecordingSink::new();
        app.start(mode, 0, &mut hw, &mut sink);

        Self {
            app,
            hw,
            lcd: CaptureDisplay::new(),
            sink,
            bank: ButtonBank::with_latch(latch, config.debounce_ms),
            now_ms: 0,
            tick_ms: config.control_loop_interval_ms,
        }
    }

    fn tick(&mut self, mode: OperatingMode) {
        self.now_ms = self.now_ms.wrapping_add(self.tick_ms);
        self.bank
            .tick(self.now_ms, mode, self.app.actuator_active());
        self.app.tick(
            self.now_ms,
            mode,
            &mut self.bank,
            &mut self.hw,
            &mut self.lcd,
            &mut self.sink,
        );
    }

    /// Tick until the machine settles in `state` (bounded).
    fn run_until_state(&mut self, mode: OperatingMode, state: StateId, max_ticks: usize) {
        for _ in 0..max_ticks {
            if self.app.state() == state {
                return;
            }
            self.tick(mode);
        }
        assert_eq!(self.app.state(), state, "did not reach {state:?}");
    }
}

fn instant_travel() -> SystemConfig {
    SystemConfig {
        travel_duration_secs: 0,
        ..SystemConfig::default()
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn automatic_startup_forces_close_regardless_of_temperature() {
    let config = SystemConfig::default();
    let mut app = VentService::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_temperature(35); // well above the open threshold
    app.start(OperatingMode::Automatic, 0, &mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Closing);
    assert_eq!(app.position(), WindowPosition::Closed);
    assert!(app.actuator_active());
    assert_eq!(hw.motor_driving(), Some(Direction::Retract));
    assert_eq!(
        sink.events.first(),
        Some(&AppEvent::Started {
            state: StateId::Closing,
            mode: OperatingMode::Automatic,
        })
    );
}

#[test]
fn manual_startup_assumes_closed_without_moving() {
    let rig = Rig::new(
        &SystemConfig::default(),
        OperatingMode::Manual,
        test_latch!(),
    );

    assert_eq!(rig.app.state(), StateId::Closed);
    assert!(!rig.app.actuator_active());
    assert_eq!(rig.hw.motor_driving(), None);
    assert_eq!(rig.hw.drive_count(), 0);
}

// ── Hysteresis ────────────────────────────────────────────────

#[test]
fn hysteresis_sequence_with_instant_travel() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);

    let temps = [20, 25, 28, 30, 25, 22, 21];
    let mut positions = Vec::new();
    for t in temps {
        rig.hw.set_temperature(t);
        rig.tick(OperatingMode::Automatic);
        positions.push(rig.app.position());
    }

    use WindowPosition::{Closed, Open};
    assert_eq!(positions, [Closed, Closed, Open, Open, Open, Closed, Closed]);
}

#[test]
fn reopen_command_while_open_is_noop() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);

    rig.hw.set_temperature(30);
    rig.run_until_state(OperatingMode::Automatic, StateId::Open, 4);

    rig.hw.calls.clear();
    for _ in 0..3 {
        rig.tick(OperatingMode::Automatic);
        assert_eq!(rig.app.state(), StateId::Open);
        assert!(!rig.app.actuator_active());
    }
    assert_eq!(rig.hw.drive_count(), 0, "no re-trigger while already open");
}

// ── Travel timing ─────────────────────────────────────────────

#[test]
fn travel_is_non_blocking_and_sensor_reads_continue() {
    let latch = test_latch!();
    let config = SystemConfig::default(); // 50 s stroke, 200 ms tick
    let mut rig = Rig::new(&config, OperatingMode::Automatic, latch);

    // Let the startup reference close run out: 50 s / 200 ms = 250 ticks.
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 260);

    rig.hw.set_temperature(30);
    rig.tick(OperatingMode::Automatic);
    assert_eq!(rig.app.state(), StateId::Opening);

    let reads_at_start = rig.hw.read_count;
    let mut ticks = 0usize;
    while rig.app.actuator_active() {
        rig.tick(OperatingMode::Automatic);
        ticks += 1;
        assert!(ticks <= 250, "stroke never completed");
    }

    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(ticks, 250, "stroke should span exactly 50 s of 200 ms ticks");
    assert_eq!(
        rig.hw.read_count - reads_at_start,
        ticks,
        "every tick during travel must still read the sensor"
    );
}

// ── Sensor failure ────────────────────────────────────────────

#[test]
fn sensor_failure_holds_state_and_shows_error() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);
    rig.hw.set_temperature(30);
    rig.run_until_state(OperatingMode::Automatic, StateId::Open, 4);

    rig.hw.fail_reads();
    rig.hw.calls.clear();
    for _ in 0..3 {
        rig.tick(OperatingMode::Automatic);
        assert_eq!(rig.app.state(), StateId::Open);
    }

    assert_eq!(rig.hw.drive_count(), 0);
    assert_eq!(rig.lcd.last(), Some(&DisplayIntent::SensorFault));
    assert!(rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::SensorReadFailed(_))));
}

#[test]
fn sensor_failure_mid_stroke_keeps_travel_running() {
    let latch = test_latch!();
    let mut rig = Rig::new(&SystemConfig::default(), OperatingMode::Automatic, latch);
    assert_eq!(rig.app.state(), StateId::Closing);

    rig.hw.fail_reads();
    for _ in 0..5 {
        rig.tick(OperatingMode::Automatic);
        assert_eq!(rig.app.state(), StateId::Closing);
        assert_eq!(
            rig.lcd.last(),
            Some(&DisplayIntent::Moving(Direction::Retract)),
            "banner, not the error screen, while the stroke runs"
        );
    }

    // The stroke still times out on schedule even with the sensor down.
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 260);
}

// ── Manual mode ───────────────────────────────────────────────

#[test]
fn manual_buttons_drive_window_end_to_end() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Manual, latch);

    latch.record(ButtonId::ManualExtend, 100);
    rig.tick(OperatingMode::Manual);
    assert_eq!(rig.app.state(), StateId::Opening);
    assert_eq!(rig.hw.motor_driving(), Some(Direction::Extend));

    rig.tick(OperatingMode::Manual); // instant stroke completes
    assert_eq!(rig.app.state(), StateId::Open);

    latch.record(ButtonId::ManualRetract, rig.now_ms + 10);
    rig.tick(OperatingMode::Manual);
    assert_eq!(rig.app.state(), StateId::Closing);
    assert_eq!(rig.hw.motor_driving(), Some(Direction::Retract));

    rig.tick(OperatingMode::Manual);
    assert_eq!(rig.app.state(), StateId::Closed);
}

#[test]
fn manual_retract_reruns_stroke_even_when_closed() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Manual, latch);
    assert_eq!(rig.app.state(), StateId::Closed);

    latch.record(ButtonId::ManualRetract, 100);
    rig.tick(OperatingMode::Manual);
    assert_eq!(rig.app.state(), StateId::Closing);
    assert_eq!(rig.hw.motor_driving(), Some(Direction::Retract));
}

#[test]
fn latched_press_survives_sensor_outage() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Manual, latch);

    rig.hw.fail_reads();
    latch.record(ButtonId::ManualExtend, 100);
    for _ in 0..3 {
        rig.tick(OperatingMode::Manual);
        assert_eq!(rig.app.state(), StateId::Closed, "no commands while blind");
    }

    rig.hw.set_temperature(25);
    rig.tick(OperatingMode::Manual);
    assert_eq!(
        rig.app.state(),
        StateId::Opening,
        "the latched press applies on the first good reading"
    );
}

// ── Threshold buttons ─────────────────────────────────────────

#[test]
fn threshold_step_applies_to_same_tick_decision() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);

    rig.hw.set_temperature(27); // below the default open threshold of 28
    rig.tick(OperatingMode::Automatic);
    assert_eq!(rig.app.state(), StateId::Closed);

    latch.record(ButtonId::HighTempDown, rig.now_ms + 10);
    rig.tick(OperatingMode::Automatic);

    assert_eq!(rig.app.thresholds().open_c(), 27);
    assert!(rig.sink.events.contains(&AppEvent::ThresholdAdjusted {
        which: ThresholdKind::Open,
        value_c: 27,
    }));
    assert_eq!(
        rig.app.state(),
        StateId::Opening,
        "the lowered threshold takes effect in the very same tick"
    );
}

#[test]
fn threshold_steps_at_gap_limit_are_rejected() {
    let latch = test_latch!();
    let config = SystemConfig {
        close_temp_c: 27,
        open_temp_c: 28,
        ..instant_travel()
    };
    let mut rig = Rig::new(&config, OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);
    rig.hw.set_temperature(20);

    latch.record(ButtonId::HighTempDown, rig.now_ms + 10);
    rig.tick(OperatingMode::Automatic);
    assert_eq!(rig.app.thresholds().open_c(), 28, "lower_open rejected");
    assert!(rig.sink.events.contains(&AppEvent::ThresholdLimitReached {
        which: ThresholdKind::Open,
    }));

    latch.record(ButtonId::LowTempUp, rig.now_ms + 10);
    rig.tick(OperatingMode::Automatic);
    assert_eq!(rig.app.thresholds().close_c(), 27, "raise_close rejected");
    assert!(rig.sink.events.contains(&AppEvent::ThresholdLimitReached {
        which: ThresholdKind::Close,
    }));
}

// ── Mode arbitration ──────────────────────────────────────────

#[test]
fn cross_mode_button_edges_are_discarded() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);

    // Manual motion edge while in Automatic: dropped at settle time.
    latch.record(ButtonId::ManualRetract, rig.now_ms + 10);
    rig.tick(OperatingMode::Automatic);
    assert_eq!(rig.app.state(), StateId::Closed);

    // Even after flipping to Manual the press is gone, not deferred.
    rig.tick(OperatingMode::Manual);
    assert_eq!(rig.app.state(), StateId::Closed);

    // Threshold edge while in Manual: same story.
    let close_before = rig.app.thresholds().close_c();
    latch.record(ButtonId::LowTempDown, rig.now_ms + 10);
    rig.tick(OperatingMode::Manual);
    rig.tick(OperatingMode::Automatic);
    assert_eq!(rig.app.thresholds().close_c(), close_before);
}

#[test]
fn mode_change_is_reported() {
    let latch = test_latch!();
    let mut rig = Rig::new(&instant_travel(), OperatingMode::Automatic, latch);
    rig.run_until_state(OperatingMode::Automatic, StateId::Closed, 4);

    rig.tick(OperatingMode::Manual);
    assert!(rig.sink.events.contains(&AppEvent::ModeChanged {
        mode: OperatingMode::Manual,
    }));
}
