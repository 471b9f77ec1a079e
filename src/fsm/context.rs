//! Shared mutable context threaded through every state handler.
//!
//! `WindowContext` is the single struct that state handlers read from and
//! write to: the latest climate snapshot, the operating mode, the hysteresis
//! thresholds, the travel timer, pending manual requests, and the motor
//! command output.  The control loop fills it in before each FSM tick and
//! applies the command output afterwards.

use crate::control::thresholds::Thresholds;
use crate::control::travel::{Direction, TravelTimer};

// ---------------------------------------------------------------------------
// Core value types
// ---------------------------------------------------------------------------

/// Operating mode, sampled from the physical switch once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Hysteresis control; threshold buttons live.
    Automatic,
    /// Motion buttons live; thresholds frozen.
    Manual,
}

/// Commanded window position.  Travel time is assumed, not sensed, so this
/// flips the moment a move is commanded — not when the stroke completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    Open,
    Closed,
}

/// A successful climate reading as delivered by the sensor port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateReading {
    /// Ambient temperature (°C, rounded).
    pub temperature_c: i16,
    /// Relative humidity (%).
    pub humidity_pct: u8,
}

/// The per-tick climate snapshot the state handlers see.  `valid` is false
/// when the sensor read failed this tick; the other fields are then
/// meaningless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimateSnapshot {
    /// Ambient temperature (°C, rounded).
    pub temperature_c: i16,
    /// Relative humidity (%).
    pub humidity_pct: u8,
    /// Whether this tick's read succeeded.
    pub valid: bool,
}

impl From<ClimateReading> for ClimateSnapshot {
    fn from(r: ClimateReading) -> Self {
        Self {
            temperature_c: r.temperature_c,
            humidity_pct: r.humidity_pct,
            valid: true,
        }
    }
}

/// One-shot manual motion requests for this tick, already debounced and
/// mode-gated.  Cleared by the control loop before each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualRequest {
    pub retract: bool,
    pub extend: bool,
}

/// Motor command written by state handlers, applied by the control loop.
/// `None` = coast/stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotorCommand {
    pub drive: Option<Direction>,
}

// ---------------------------------------------------------------------------
// WindowContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct WindowContext {
    /// Monotonic milliseconds, set by the control loop each tick.
    pub now_ms: u32,
    /// Mode sampled this tick.
    pub mode: OperatingMode,
    /// Latest climate reading.
    pub sensors: ClimateSnapshot,
    /// Hysteresis thresholds (adjusted before the FSM tick).
    pub thresholds: Thresholds,
    /// Actuator stroke bookkeeping.
    pub travel: TravelTimer,
    /// Pending manual motion requests.
    pub manual: ManualRequest,
    /// Motor output for this tick.
    pub commands: MotorCommand,
}

impl WindowContext {
    pub fn new(thresholds: Thresholds, travel: TravelTimer) -> Self {
        Self {
            now_ms: 0,
            mode: OperatingMode::Automatic,
            sensors: ClimateSnapshot::default(),
            thresholds,
            travel,
            manual: ManualRequest::default(),
            commands: MotorCommand::default(),
        }
    }
}
