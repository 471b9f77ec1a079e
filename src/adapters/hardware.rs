//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the climate sensor and the motor driver, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::travel::Direction;
use crate::drivers::motor::MotorDriver;
use crate::error::SensorError;
use crate::fsm::context::ClimateReading;
use crate::sensors::climate::ClimateSensor;

/// Concrete adapter that combines the board's hardware behind port traits.
pub struct HardwareAdapter {
    climate: ClimateSensor,
    motor: MotorDriver,
}

impl HardwareAdapter {
    pub fn new(climate: ClimateSensor, motor: MotorDriver) -> Self {
        Self { climate, motor }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn drive_motor(&mut self, direction: Direction) {
        self.motor.drive(direction);
    }

    fn stop_motor(&mut self) {
        self.motor.stop();
    }
}
