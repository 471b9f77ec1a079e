//! Auto/manual mode switch.
//!
//! Level-sensed toggle on a pulled-up GPIO, sampled once per control tick.
//! The pull-up inverts the reading: switch asserted low = Manual.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level.
//! On host/test: reads from a static AtomicBool for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::fsm::context::OperatingMode;

#[cfg(not(target_os = "espidf"))]
static SIM_LEVEL_HIGH: AtomicBool = AtomicBool::new(true);

/// Set the simulated GPIO level (high = Automatic, low = Manual).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(high: bool) {
    SIM_LEVEL_HIGH.store(high, Ordering::Relaxed);
}

pub struct ModeSwitch {
    gpio: i32,
}

impl ModeSwitch {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Sample the switch.  Takes effect on the next control cycle; nothing
    /// is latched here.
    pub fn read(&self) -> OperatingMode {
        if self.level_high() {
            OperatingMode::Automatic
        } else {
            OperatingMode::Manual
        }
    }

    #[cfg(target_os = "espidf")]
    fn level_high(&self) -> bool {
        crate::drivers::hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn level_high(&self) -> bool {
        let _ = self.gpio;
        SIM_LEVEL_HIGH.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins;

    #[test]
    fn inverted_logic() {
        let sw = ModeSwitch::new(pins::MODE_SWITCH_GPIO);

        sim_set_level(true);
        assert_eq!(sw.read(), OperatingMode::Automatic);

        sim_set_level(false);
        assert_eq!(sw.read(), OperatingMode::Manual);

        sim_set_level(true);
        assert_eq!(sw.read(), OperatingMode::Automatic);
    }
}
