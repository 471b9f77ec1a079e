//! Hysteresis threshold store.
//!
//! Two temperatures drive the window: at or above `open_c` the window opens,
//! at or below `close_c` it closes.  The gap between them is what stops the
//! actuator from chattering around a single setpoint.  Button presses adjust
//! either threshold in 1 °C steps; a step that would collapse the gap below
//! 1 °C is rejected outright rather than clamped.
//!
//! The limit checks are deliberately one-sided: `close_c` may fall
//! arbitrarily low and `open_c` rise arbitrarily high — only the sides
//! approaching each other are constrained.

/// Holds the open/close temperature pair.  Invariant: `close_c < open_c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    close_c: i16,
    open_c: i16,
}

impl Thresholds {
    /// Construct from a validated configuration pair.
    pub fn new(close_c: i16, open_c: i16) -> Self {
        debug_assert!(close_c < open_c, "thresholds out of order");
        Self { close_c, open_c }
    }

    /// Temperature at or below which the window closes.
    pub fn close_c(&self) -> i16 {
        self.close_c
    }

    /// Temperature at or above which the window opens.
    pub fn open_c(&self) -> i16 {
        self.open_c
    }

    /// Raise the close threshold by 1 °C.  Rejected (returns `None`) when it
    /// would meet the open threshold.
    pub fn raise_close(&mut self) -> Option<i16> {
        if self.close_c == self.open_c - 1 {
            return None;
        }
        self.close_c += 1;
        Some(self.close_c)
    }

    /// Lower the close threshold by 1 °C.  No floor.
    pub fn lower_close(&mut self) -> Option<i16> {
        self.close_c = self.close_c.saturating_sub(1);
        Some(self.close_c)
    }

    /// Raise the open threshold by 1 °C.  No ceiling.
    pub fn raise_open(&mut self) -> Option<i16> {
        self.open_c = self.open_c.saturating_add(1);
        Some(self.open_c)
    }

    /// Lower the open threshold by 1 °C.  Rejected (returns `None`) when it
    /// would meet the close threshold.
    pub fn lower_open(&mut self) -> Option<i16> {
        if self.open_c == self.close_c + 1 {
            return None;
        }
        self.open_c -= 1;
        Some(self.open_c)
    }
}
