//! Concrete state handler functions and table builder.
//!
//! Each state is three plain `fn` pointers.  Handlers branch on the
//! operating mode first: Automatic states consult the hysteresis thresholds,
//! Manual states consult the one-shot motion requests.  `Opening` and
//! `Closing` only watch the travel timer — a stroke, once started, runs to
//! its timed end.

use super::context::WindowContext;
use super::{StateDescriptor, StateId};
use crate::control::travel::Direction;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Closed
        StateDescriptor {
            id: StateId::Closed,
            name: "Closed",
            on_enter: None,
            on_exit: None,
            on_update: closed_update,
        },
        // Index 1 — Opening
        StateDescriptor {
            id: StateId::Opening,
            name: "Opening",
            on_enter: Some(opening_enter),
            on_exit: Some(stroke_exit),
            on_update: opening_update,
        },
        // Index 2 — Open
        StateDescriptor {
            id: StateId::Open,
            name: "Open",
            on_enter: None,
            on_exit: None,
            on_update: open_update,
        },
        // Index 3 — Closing
        StateDescriptor {
            id: StateId::Closing,
            name: "Closing",
            on_enter: Some(closing_enter),
            on_exit: Some(stroke_exit),
            on_update: closing_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED — window shut, actuator idle
// ═══════════════════════════════════════════════════════════════════════════

fn closed_update(ctx: &mut WindowContext) -> Option<StateId> {
    use super::context::OperatingMode;

    match ctx.mode {
        OperatingMode::Manual => {
            if ctx.manual.retract {
                // Physical position is unknown to us; a re-close from
                // "Closed" still runs the stroke so the operator can seat
                // the window.
                info!("manual: close requested");
                return Some(StateId::Closing);
            }
            if ctx.manual.extend {
                info!("manual: open requested");
                return Some(StateId::Opening);
            }
            None
        }
        OperatingMode::Automatic => {
            if !ctx.sensors.valid {
                return None;
            }
            if ctx.sensors.temperature_c >= ctx.thresholds.open_c() {
                info!(
                    "auto: {}°C >= open threshold {}°C",
                    ctx.sensors.temperature_c,
                    ctx.thresholds.open_c()
                );
                return Some(StateId::Opening);
            }
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPENING — extend stroke in progress
// ═══════════════════════════════════════════════════════════════════════════

fn opening_enter(ctx: &mut WindowContext) {
    ctx.travel.start(Direction::Extend, ctx.now_ms);
    ctx.commands.drive = Some(Direction::Extend);
    info!("OPENING: extend stroke started");
}

fn opening_update(ctx: &mut WindowContext) -> Option<StateId> {
    ctx.travel.tick(ctx.now_ms);
    if ctx.travel.is_active() {
        None
    } else {
        Some(StateId::Open)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN — window open, actuator idle
// ═══════════════════════════════════════════════════════════════════════════

fn open_update(ctx: &mut WindowContext) -> Option<StateId> {
    use super::context::OperatingMode;

    match ctx.mode {
        OperatingMode::Manual => {
            if ctx.manual.retract {
                info!("manual: close requested");
                return Some(StateId::Closing);
            }
            if ctx.manual.extend {
                info!("manual: open requested");
                return Some(StateId::Opening);
            }
            None
        }
        OperatingMode::Automatic => {
            if !ctx.sensors.valid {
                return None;
            }
            if ctx.sensors.temperature_c <= ctx.thresholds.close_c() {
                info!(
                    "auto: {}°C <= close threshold {}°C",
                    ctx.sensors.temperature_c,
                    ctx.thresholds.close_c()
                );
                return Some(StateId::Closing);
            }
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSING — retract stroke in progress
// ═══════════════════════════════════════════════════════════════════════════

fn closing_enter(ctx: &mut WindowContext) {
    ctx.travel.start(Direction::Retract, ctx.now_ms);
    ctx.commands.drive = Some(Direction::Retract);
    info!("CLOSING: retract stroke started");
}

fn closing_update(ctx: &mut WindowContext) -> Option<StateId> {
    ctx.travel.tick(ctx.now_ms);
    if ctx.travel.is_active() {
        None
    } else {
        Some(StateId::Closed)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared exit — stroke finished, release the motor
// ═══════════════════════════════════════════════════════════════════════════

fn stroke_exit(ctx: &mut WindowContext) {
    ctx.commands.drive = None;
}
