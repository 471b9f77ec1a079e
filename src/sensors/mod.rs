//! Sensor drivers.  The climate sensor is the only one on this board; it
//! feeds the `ClimateSnapshot` consumed by the window state machine.

pub mod climate;
