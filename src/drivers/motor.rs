//! Linear-actuator motor driver (BTS7960 H-bridge).
//!
//! Binary drive only: the actuator either runs at full speed in one
//! direction or coasts.  Stroke timing belongs to the travel timer — this
//! driver is a dumb actuator and never decides when to stop.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the enable + per-direction pins via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::control::travel::Direction;
use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Driving(Direction),
}

pub struct MotorDriver {
    state: MotorState,
}

impl MotorDriver {
    pub fn new() -> Self {
        Self {
            state: MotorState::Stopped,
        }
    }

    /// Energise the bridge in the given direction.
    pub fn drive(&mut self, direction: Direction) {
        hw_init::gpio_write(
            pins::MOTOR_EXTEND_GPIO,
            matches!(direction, Direction::Extend),
        );
        hw_init::gpio_write(
            pins::MOTOR_RETRACT_GPIO,
            matches!(direction, Direction::Retract),
        );
        hw_init::gpio_write(pins::MOTOR_ENABLE_GPIO, true);
        self.state = MotorState::Driving(direction);
    }

    /// De-energise both half-bridges and disable the driver.
    pub fn stop(&mut self) {
        hw_init::gpio_write(pins::MOTOR_EXTEND_GPIO, false);
        hw_init::gpio_write(pins::MOTOR_RETRACT_GPIO, false);
        hw_init::gpio_write(pins::MOTOR_ENABLE_GPIO, false);
        self.state = MotorState::Stopped;
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_driving(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }
}

impl Default for MotorDriver {
    fn default() -> Self {
        Self::new()
    }
}
