//! Function-pointer window state machine.
//!
//! Classic embedded FSM pattern: a fixed table of state descriptors, each a
//! set of plain `fn` pointers — no closures, no dynamic dispatch, no heap.
//!
//! ```text
//!             [temp >= open | manual extend]
//!   CLOSED ──────────────────────────────▶ OPENING
//!     ▲  │                                    │
//!     │  │ [manual retract]        [stroke timer done]
//!     │  ▼                                    ▼
//!  CLOSING ◀────────────────────────────── OPEN ──[manual extend]──▶ OPENING
//!     ▲        [temp <= close | manual retract]
//!     │
//!     └── initial state on Automatic startup (fail-safe reference close)
//! ```
//!
//! The window's commanded position is a projection of the state: `Opening`
//! and `Open` mean Open, `Closing` and `Closed` mean Closed.  A stroke in
//! progress is likewise just `Opening`/`Closing` — there is no separate
//! "moving" flag to drift out of sync.

pub mod context;
pub mod states;

use context::{WindowContext, WindowPosition};
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The four reachable window states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Closed = 0,
    Opening = 1,
    Open = 2,
    Closing = 3,
}

impl StateId {
    /// Total number of states — sizes the table array.
    pub const COUNT: usize = 4;

    /// Convert a table index back to a `StateId`.
    fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Closed,
            1 => Self::Opening,
            2 => Self::Open,
            3 => Self::Closing,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Closed
            }
        }
    }

    /// Commanded position implied by this state.
    pub fn position(self) -> WindowPosition {
        match self {
            Self::Opening | Self::Open => WindowPosition::Open,
            Self::Closing | Self::Closed => WindowPosition::Closed,
        }
    }

    /// Whether the actuator is mid-stroke in this state.
    pub fn is_moving(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions, run once per transition.
pub type StateActionFn = fn(&mut WindowContext);

/// Per-tick update handler.  `Some(next)` triggers a transition.
pub type StateUpdateFn = fn(&mut WindowContext) -> Option<StateId>;

/// Static descriptor for a single state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The window state machine engine.  Owns the state table and walks it one
/// `on_update` call per control tick.
pub struct WindowFsm {
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
}

impl WindowFsm {
    /// Construct with the given table, positioned on `initial` but without
    /// running its entry action yet — call [`WindowFsm::start`] for that.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial state's `on_enter`.  Call once, before the first
    /// `tick()`.  This is what launches the fail-safe reference close when
    /// the machine starts in `Closing`.
    pub fn start(&mut self, ctx: &mut WindowContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance by one tick: run the current state's `on_update`, and if it
    /// requests a transition run `on_exit` → `on_enter` around the switch.
    pub fn tick(&mut self, ctx: &mut WindowContext) {
        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    fn transition(&mut self, next_id: StateId, ctx: &mut WindowContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
