//! Application service — the hexagonal core.
//!
//! [`VentService`] owns the window state machine and its context, and runs
//! one full control cycle per tick: drain gated button flags → read the
//! climate sensor → apply threshold steps → tick the FSM → apply the motor
//! command → emit the display intent and events.  All I/O flows through
//! port traits injected at call sites, so the whole cycle runs against
//! mocks on the host.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ DisplayPort
//!   ButtonBank ──▶ │       VentService        │ ──▶ EventSink
//!                  │  thresholds · FSM · travel│
//! ActuatorPort ◀── └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::thresholds::Thresholds;
use crate::control::travel::TravelTimer;
use crate::drivers::buttons::{ButtonBank, ButtonId};
use crate::fsm::context::{ManualRequest, OperatingMode, WindowContext, WindowPosition};
use crate::fsm::states::build_state_table;
use crate::fsm::{StateId, WindowFsm};

use super::events::{AppEvent, DisplayIntent, ThresholdKind};
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// VentService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct VentService {
    fsm: WindowFsm,
    ctx: WindowContext,
}

impl VentService {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** start the FSM — call [`VentService::start`] next; the
    /// initial state depends on the mode switch at boot.
    pub fn new(config: &SystemConfig) -> Self {
        let thresholds = Thresholds::new(config.close_temp_c, config.open_temp_c);
        let travel = TravelTimer::new(config.travel_duration_secs);
        let ctx = WindowContext::new(thresholds, travel);
        let fsm = WindowFsm::new(build_state_table(), StateId::Closed);

        Self { fsm, ctx }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the state machine for the mode read at boot.
    ///
    /// Automatic boots into `Closing`: physical position is unknown, so the
    /// window is driven shut once to establish a reference, whatever the
    /// temperature is.  Manual boots into `Closed` without moving anything.
    pub fn start(
        &mut self,
        mode: OperatingMode,
        now_ms: u32,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let initial = match mode {
            OperatingMode::Automatic => StateId::Closing,
            OperatingMode::Manual => StateId::Closed,
        };
        self.ctx.now_ms = now_ms;
        self.ctx.mode = mode;
        self.fsm = WindowFsm::new(build_state_table(), initial);
        self.fsm.start(&mut self.ctx);
        self.apply_motor(hw);

        sink.emit(&AppEvent::Started {
            state: initial,
            mode,
        });
        info!("VentService started in {:?} ({:?} mode)", initial, mode);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — one adapter, one mutable borrow, explicit port
    /// boundary.
    pub fn tick(
        &mut self,
        now_ms: u32,
        mode: OperatingMode,
        buttons: &mut ButtonBank,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        let prev_state = self.fsm.current_state();

        if mode != self.ctx.mode {
            info!("mode switched to {:?}", mode);
            sink.emit(&AppEvent::ModeChanged { mode });
        }
        self.ctx.now_ms = now_ms;
        self.ctx.mode = mode;
        self.ctx.manual = ManualRequest::default();

        // 1. Climate read
        match hw.read_climate() {
            Ok(reading) => self.ctx.sensors = reading.into(),
            Err(e) => {
                self.ctx.sensors.valid = false;
                warn!("climate read failed: {e}");
                sink.emit(&AppEvent::SensorReadFailed(e));
            }
        }

        // 2. Button flags.  Nothing is consumed on a failed-read tick —
        //    latched presses wait for the next good reading.
        if self.ctx.sensors.valid {
            match mode {
                OperatingMode::Automatic => self.apply_threshold_buttons(buttons, sink),
                OperatingMode::Manual => {
                    let retract = buttons.take(ButtonId::ManualRetract);
                    let extend = if retract {
                        false
                    } else {
                        buttons.take(ButtonId::ManualExtend)
                    };
                    self.ctx.manual = ManualRequest { retract, extend };
                }
            }
        }

        // 3. State machine tick
        self.fsm.tick(&mut self.ctx);

        // 4. Apply the motor command
        self.apply_motor(hw);

        // 5. Display intent
        display.show(&self.display_intent());

        // 6. Emit state change if the machine moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    /// Current state of the window machine.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Commanded window position.
    pub fn position(&self) -> WindowPosition {
        self.fsm.current_state().position()
    }

    /// Whether a stroke is in progress — gates the manual buttons.
    pub fn actuator_active(&self) -> bool {
        self.ctx.travel.is_active()
    }

    /// Current threshold pair.
    pub fn thresholds(&self) -> Thresholds {
        self.ctx.thresholds
    }

    // ── Internal ──────────────────────────────────────────────

    /// At most one threshold step per tick, in fixed priority order — the
    /// remaining flags stay latched for the following ticks.
    fn apply_threshold_buttons(&mut self, buttons: &mut ButtonBank, sink: &mut impl EventSink) {
        let t = &mut self.ctx.thresholds;

        if buttons.take(ButtonId::LowTempUp) {
            match t.raise_close() {
                Some(v) => Self::adjusted(sink, ThresholdKind::Close, v),
                None => Self::limit(sink, ThresholdKind::Close),
            }
        } else if buttons.take(ButtonId::LowTempDown) {
            if let Some(v) = t.lower_close() {
                Self::adjusted(sink, ThresholdKind::Close, v);
            }
        } else if buttons.take(ButtonId::HighTempUp) {
            if let Some(v) = t.raise_open() {
                Self::adjusted(sink, ThresholdKind::Open, v);
            }
        } else if buttons.take(ButtonId::HighTempDown) {
            match t.lower_open() {
                Some(v) => Self::adjusted(sink, ThresholdKind::Open, v),
                None => Self::limit(sink, ThresholdKind::Open),
            }
        }
    }

    fn adjusted(sink: &mut impl EventSink, which: ThresholdKind, value_c: i16) {
        info!(
            "{} temp updated to {}°C",
            match which {
                ThresholdKind::Close => "close",
                ThresholdKind::Open => "open",
            },
            value_c
        );
        sink.emit(&AppEvent::ThresholdAdjusted { which, value_c });
    }

    fn limit(sink: &mut impl EventSink, which: ThresholdKind) {
        info!(
            "{} temp limit reached",
            match which {
                ThresholdKind::Close => "close",
                ThresholdKind::Open => "open",
            }
        );
        sink.emit(&AppEvent::ThresholdLimitReached { which });
    }

    fn apply_motor(&self, hw: &mut impl ActuatorPort) {
        match self.ctx.commands.drive {
            Some(direction) => hw.drive_motor(direction),
            None => hw.stop_motor(),
        }
    }

    fn display_intent(&self) -> DisplayIntent {
        let state = self.fsm.current_state();
        let moving = self.ctx.travel.direction();

        if !self.ctx.sensors.valid {
            return match moving {
                Some(direction) => DisplayIntent::Moving(direction),
                None => DisplayIntent::SensorFault,
            };
        }

        DisplayIntent::Status {
            mode: self.ctx.mode,
            position: state.position(),
            moving,
            temperature_c: self.ctx.sensors.temperature_c,
            humidity_pct: self.ctx.sensors.humidity_pct,
            close_temp_c: self.ctx.thresholds.close_c(),
            open_temp_c: self.ctx.thresholds.open_c(),
        }
    }
}
