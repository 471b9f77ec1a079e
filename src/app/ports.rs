//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ VentService (domain)
//! ```
//!
//! Driven adapters (climate sensor, motor bridge, LCD, log sink) implement
//! these traits.  The [`VentService`](super::service::VentService) consumes
//! them via generics, so the domain core never touches hardware directly and
//! every scenario runs on the host with mocks.

use crate::control::travel::Direction;
use crate::error::SensorError;
use crate::fsm::context::ClimateReading;

use super::events::{AppEvent, DisplayIntent};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
///
/// A failed read is routine — the domain retries next tick and shows the
/// condition on the display; implementations must not retry internally.
pub trait SensorPort {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commands the window actuator through this.
/// The domain never reads motor hardware state back — stroke bookkeeping
/// lives entirely in its own travel timer.
pub trait ActuatorPort {
    /// Run the actuator in the given direction.
    fn drive_motor(&mut self, direction: Direction);

    /// De-energise the actuator.
    fn stop_motor(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel LCD)
// ───────────────────────────────────────────────────────────────

/// The domain emits one [`DisplayIntent`] per tick; the adapter owns all
/// formatting, padding, and column layout.
pub trait DisplayPort {
    fn show(&mut self, intent: &DisplayIntent);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log in production, a Vec in tests).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
