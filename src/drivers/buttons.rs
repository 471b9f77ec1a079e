//! ISR-debounced button bank for the six panel buttons.
//!
//! ## Hardware
//!
//! Momentary switches with external pull-ups.  Each GPIO fires an interrupt
//! on its edge; the ISR records the raw timestamp into a per-button atomic,
//! and `tick()` (called from the main loop at control-tick rate) applies the
//! settle interval and the mode gate before latching a one-shot flag.
//!
//! ## Gating
//!
//! | Button group          | Valid when                                |
//! |-----------------------|-------------------------------------------|
//! | Threshold up/down ×4  | mode = Automatic                          |
//! | Manual retract/extend | mode = Manual **and** actuator idle       |
//!
//! Edges that fail the gate are discarded.  Edges that pass collapse into a
//! single pending flag until the control loop consumes it with `take()` —
//! flags are booleans, not counters.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::fsm::context::OperatingMode;

/// The six logical panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum ButtonId {
    /// Raise the close threshold.
    LowTempUp = 0,
    /// Lower the close threshold.
    LowTempDown = 1,
    /// Raise the open threshold.
    HighTempUp = 2,
    /// Lower the open threshold.
    HighTempDown = 3,
    /// Close the window (Manual mode).
    ManualRetract = 4,
    /// Open the window (Manual mode).
    ManualExtend = 5,
}

impl ButtonId {
    pub const COUNT: usize = 6;

    pub const ALL: [ButtonId; Self::COUNT] = [
        Self::LowTempUp,
        Self::LowTempDown,
        Self::HighTempUp,
        Self::HighTempDown,
        Self::ManualRetract,
        Self::ManualExtend,
    ];

    /// Manual-motion buttons carry the extra actuator-idle gate.
    fn is_manual_motion(self) -> bool {
        matches!(self, Self::ManualRetract | Self::ManualExtend)
    }
}

// ---------------------------------------------------------------------------
// ISR-side edge latch
// ---------------------------------------------------------------------------

/// Raw ISR edge timestamps (milliseconds since boot, truncated to u32),
/// one slot per button with overwrite semantics.  Written by ISRs, read by
/// the main loop.  A stamp of 0 means "no edge seen".
pub struct EdgeLatch {
    stamps: [AtomicU32; ButtonId::COUNT],
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            stamps: [
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
            ],
        }
    }

    /// Record an edge.  Safe to call from interrupt context (lock-free
    /// atomic store; a later edge simply overwrites an unconsumed one).
    pub fn record(&self, id: ButtonId, now_ms: u32) {
        self.stamps[id as usize].store(now_ms, Ordering::Release);
    }

    fn load(&self, id: ButtonId) -> u32 {
        self.stamps[id as usize].load(Ordering::Acquire)
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// The production latch every button ISR writes into.
pub static BUTTON_EDGES: EdgeLatch = EdgeLatch::new();

/// ISR handler — register on each button GPIO edge.
pub fn button_isr_handler(id: ButtonId, now_ms: u32) {
    BUTTON_EDGES.record(id, now_ms);
}

// ---------------------------------------------------------------------------
// Main-loop side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct Channel {
    /// Last ISR stamp already seen by the main loop.
    seen_edge_ms: u32,
    /// Edge currently waiting out the settle interval.
    settling_since_ms: Option<u32>,
    /// Latched one-shot flag.
    pending: bool,
}

/// Debounces the edge latch into per-button one-shot flags.
pub struct ButtonBank {
    latch: &'static EdgeLatch,
    debounce_ms: u32,
    channels: [Channel; ButtonId::COUNT],
}

impl ButtonBank {
    /// Bank over the production ISR latch.
    pub fn new(debounce_ms: u32) -> Self {
        Self::with_latch(&BUTTON_EDGES, debounce_ms)
    }

    /// Bank over an explicit latch (tests give each scenario its own).
    pub fn with_latch(latch: &'static EdgeLatch, debounce_ms: u32) -> Self {
        Self {
            latch,
            debounce_ms,
            channels: [Channel::default(); ButtonId::COUNT],
        }
    }

    /// Call once per control tick.  Picks up fresh edges, waits out the
    /// settle interval, and latches flags for buttons whose action is valid
    /// under the mode/actuator state *at settle time*.
    pub fn tick(&mut self, now_ms: u32, mode: OperatingMode, actuator_active: bool) {
        for id in ButtonId::ALL {
            let ch = &mut self.channels[id as usize];

            let edge_ms = self.latch.load(id);
            if edge_ms != 0 && edge_ms != ch.seen_edge_ms {
                ch.seen_edge_ms = edge_ms;
                ch.settling_since_ms = Some(edge_ms);
            }

            if let Some(since_ms) = ch.settling_since_ms {
                if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                    ch.settling_since_ms = None;
                    if Self::gate(id, mode, actuator_active) {
                        ch.pending = true;
                    }
                }
            }
        }
    }

    fn gate(id: ButtonId, mode: OperatingMode, actuator_active: bool) -> bool {
        if id.is_manual_motion() {
            mode == OperatingMode::Manual && !actuator_active
        } else {
            mode == OperatingMode::Automatic
        }
    }

    /// Consume a pending flag (read-and-clear).
    pub fn take(&mut self, id: ButtonId) -> bool {
        core::mem::replace(&mut self.channels[id as usize].pending, false)
    }
}
