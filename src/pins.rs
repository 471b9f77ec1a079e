//! GPIO / peripheral pin assignments for the GreenVent control board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Window actuator (BTS7960 H-bridge)
// ---------------------------------------------------------------------------

/// Digital output: R_EN + L_EN tied together, HIGH = bridge enabled.
pub const MOTOR_ENABLE_GPIO: i32 = 1;
/// Digital output: LPWM — drives the actuator out (window opens).
pub const MOTOR_EXTEND_GPIO: i32 = 2;
/// Digital output: RPWM — pulls the actuator in (window closes).
pub const MOTOR_RETRACT_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Climate sensor (DHT22, single-wire)
// ---------------------------------------------------------------------------

/// Bidirectional data line with external 10 kΩ pull-up.
pub const DHT_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Threshold adjustment buttons (active-low, external pull-ups)
// ---------------------------------------------------------------------------

/// Raise the close threshold by 1 °C.
pub const BTN_LOWTEMP_UP_GPIO: i32 = 6;
/// Lower the close threshold by 1 °C.
pub const BTN_LOWTEMP_DOWN_GPIO: i32 = 7;
/// Raise the open threshold by 1 °C.
pub const BTN_HIGHTEMP_UP_GPIO: i32 = 8;
/// Lower the open threshold by 1 °C.
pub const BTN_HIGHTEMP_DOWN_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Manual override buttons (active-low, external pull-ups)
// ---------------------------------------------------------------------------

/// Retract the actuator (close the window) in Manual mode.
pub const BTN_MANUAL_RETRACT_GPIO: i32 = 10;
/// Extend the actuator (open the window) in Manual mode.
pub const BTN_MANUAL_EXTEND_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Mode switch
// ---------------------------------------------------------------------------

/// Auto/manual toggle switch. Pulled up; LOW = Manual.
pub const MODE_SWITCH_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// I²C bus (HD44780 16x2 LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;

/// 7-bit I²C address of the PCF8574 LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;
/// I²C bus clock.
pub const I2C_FREQ_HZ: u32 = 400_000;
