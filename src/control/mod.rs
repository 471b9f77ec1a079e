//! Pure control-logic building blocks: the hysteresis threshold store and
//! the non-blocking actuator travel timer.  No I/O, fully host-testable.

pub mod thresholds;
pub mod travel;
