//! System configuration parameters
//!
//! All tunable parameters for the GreenVent controller.  There is no
//! persistent storage on this board — values are compile-time defaults; the
//! serde derives exist for diagnostics dumps and test fixtures.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Hysteresis thresholds ---
    /// Temperature (°C) at or above which the window opens.
    pub open_temp_c: i16,
    /// Temperature (°C) at or below which the window closes.
    /// Must stay strictly below `open_temp_c`.
    pub close_temp_c: i16,

    // --- Actuator ---
    /// Time the linear actuator needs for a full stroke (seconds).
    /// There is no position feedback; travel is timed, not sensed.
    pub travel_duration_secs: u16,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Button settle interval after an edge (milliseconds).
    pub debounce_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            open_temp_c: 28,
            close_temp_c: 22,

            // Actuator
            travel_duration_secs: 50,

            // Timing
            control_loop_interval_ms: 200, // 5 Hz
            debounce_ms: 50,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.close_temp_c >= self.open_temp_c {
            return Err(Error::Config("close_temp_c must be below open_temp_c"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.close_temp_c < c.open_temp_c);
        assert!(c.travel_duration_secs > 0);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.debounce_ms > 0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.open_temp_c, c2.open_temp_c);
        assert_eq!(c.close_temp_c, c2.close_temp_c);
        assert_eq!(c.travel_duration_secs, c2.travel_duration_secs);
    }

    #[test]
    fn threshold_ordering_invariant() {
        let c = SystemConfig::default();
        assert!(
            c.close_temp_c < c.open_temp_c,
            "close threshold must stay below open to prevent oscillation"
        );
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let c = SystemConfig {
            open_temp_c: 20,
            close_temp_c: 25,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn equal_thresholds_rejected() {
        let c = SystemConfig {
            open_temp_c: 22,
            close_temp_c: 22,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
