//! Outbound application events and display intents.
//!
//! The [`VentService`](super::service::VentService) emits [`AppEvent`]s
//! through the [`EventSink`](super::ports::EventSink) port and one
//! [`DisplayIntent`] per tick through the
//! [`DisplayPort`](super::ports::DisplayPort).  Adapters on the other side
//! decide how to log or render them.

use crate::control::travel::Direction;
use crate::error::SensorError;
use crate::fsm::context::{OperatingMode, WindowPosition};
use crate::fsm::StateId;

/// Which of the two hysteresis thresholds an adjustment touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    Close,
    Open,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the initial state and mode).
    Started { state: StateId, mode: OperatingMode },

    /// The window state machine transitioned.
    StateChanged { from: StateId, to: StateId },

    /// The mode switch changed position.
    ModeChanged { mode: OperatingMode },

    /// A threshold button applied a ±1 °C step.
    ThresholdAdjusted { which: ThresholdKind, value_c: i16 },

    /// A threshold step was rejected at the 1 °C gap limit.
    ThresholdLimitReached { which: ThresholdKind },

    /// This tick's climate read failed (retried next tick).
    SensorReadFailed(SensorError),
}

/// What the panel should show this tick.  Semantic content only — the LCD
/// adapter owns columns, padding, and the exact 16x2 layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayIntent {
    /// A stroke is running and no climate reading is available: show only
    /// the travel banner ("OPENING WINDOWS" / "CLOSING WINDOWS").
    Moving(Direction),

    /// Climate read failed with the actuator idle.
    SensorFault,

    /// Normal status: position and temperature, humidity, plus the
    /// threshold pair in Automatic mode or the MANUAL tag otherwise.
    /// `moving` overrides the position text with the travel banner.
    Status {
        mode: OperatingMode,
        position: WindowPosition,
        moving: Option<Direction>,
        temperature_c: i16,
        humidity_pct: u8,
        close_temp_c: i16,
        open_temp_c: i16,
    },
}
