//! 16x2 character LCD adapter (HD44780 behind a PCF8574 I²C backpack).
//!
//! Implements [`DisplayPort`] by rendering each [`DisplayIntent`] into
//! row/column text writes.  The layout mirrors the control panel:
//!
//! ```text
//! ┌────────────────┐      ┌────────────────┐
//! │    25C OPEN    │      │OPENING WINDOWS │   (while a stroke runs)
//! │22  HUM: 55%  28│      │22  HUM: 55%  28│
//! └────────────────┘      └────────────────┘
//!   Automatic: thresholds flank the humidity readout.
//!   Manual:    `HUM: 55%  MANUAL` on the lower row.
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the panel in 4-bit mode over I²C via hw_init.
//! On host/test: renders into an in-memory frame buffer that tests can
//! read back line by line.

use core::fmt::Write as _;

use heapless::String;

use crate::app::events::DisplayIntent;
use crate::app::ports::DisplayPort;
use crate::control::travel::Direction;
use crate::fsm::context::{OperatingMode, WindowPosition};

pub const ROWS: usize = 2;
pub const COLS: usize = 16;

pub struct LcdDisplay {
    #[cfg(not(target_os = "espidf"))]
    frame: [[u8; COLS]; ROWS],
}

impl LcdDisplay {
    /// Construct the adapter and, on hardware, run the panel's 4-bit-mode
    /// init sequence.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            panel::init();
            Self {}
        }

        #[cfg(not(target_os = "espidf"))]
        Self {
            frame: [[b' '; COLS]; ROWS],
        }
    }

    /// Rendered text of one row (host only — used by tests).
    #[cfg(not(target_os = "espidf"))]
    pub fn line(&self, row: usize) -> &str {
        core::str::from_utf8(&self.frame[row]).unwrap_or("")
    }

    // ── Row/column primitives ────────────────────────────────

    fn write_at(&mut self, row: usize, col: usize, text: &str) {
        #[cfg(target_os = "espidf")]
        {
            panel::set_cursor(row as u8, col as u8);
            for &b in text.as_bytes().iter().take(COLS.saturating_sub(col)) {
                panel::write_data(b);
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            for (i, &b) in text.as_bytes().iter().enumerate() {
                let c = col + i;
                if c >= COLS {
                    break;
                }
                self.frame[row][c] = b;
            }
        }
    }

    fn blank_row(&mut self, row: usize) {
        self.write_at(row, 0, "                ");
    }

    fn clear(&mut self) {
        #[cfg(target_os = "espidf")]
        panel::clear();

        #[cfg(not(target_os = "espidf"))]
        {
            self.frame = [[b' '; COLS]; ROWS];
        }
    }

    // ── Intent rendering ─────────────────────────────────────

    fn banner(direction: Direction) -> &'static str {
        match direction {
            Direction::Extend => "OPENING WINDOWS",
            Direction::Retract => "CLOSING WINDOWS",
        }
    }

    fn render_position(&mut self, position: WindowPosition, temperature_c: i16) {
        let mut text: String<16> = String::new();
        match position {
            WindowPosition::Open => {
                let _ = write!(text, "{}C OPEN", temperature_c);
                self.write_at(0, 4, &text);
            }
            WindowPosition::Closed => {
                let _ = write!(text, "{}C CLOSED", temperature_c);
                self.write_at(0, 3, &text);
            }
        }
    }

    fn render_lower_row(
        &mut self,
        mode: OperatingMode,
        humidity_pct: u8,
        close_temp_c: i16,
        open_temp_c: i16,
    ) {
        self.blank_row(1);

        let mut hum: String<16> = String::new();
        let _ = write!(hum, "HUM: {}%", humidity_pct);

        match mode {
            OperatingMode::Automatic => {
                let mut lo: String<8> = String::new();
                let _ = write!(lo, "{}", close_temp_c);
                let mut hi: String<8> = String::new();
                let _ = write!(hi, "{}", open_temp_c);

                self.write_at(1, 0, &lo);
                self.write_at(1, 4, &hum);
                self.write_at(1, 14, &hi);
            }
            OperatingMode::Manual => {
                self.write_at(1, 0, &hum);
                self.write_at(1, 10, "MANUAL");
            }
        }
    }
}

impl Default for LcdDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for LcdDisplay {
    fn show(&mut self, intent: &DisplayIntent) {
        match *intent {
            DisplayIntent::Moving(direction) => {
                self.blank_row(0);
                self.write_at(0, 0, Self::banner(direction));
            }

            DisplayIntent::SensorFault => {
                self.clear();
                self.write_at(0, 1, "ERROR READING");
                self.write_at(1, 2, "TEMPERATURE");
            }

            DisplayIntent::Status {
                mode,
                position,
                moving,
                temperature_c,
                humidity_pct,
                close_temp_c,
                open_temp_c,
            } => {
                self.blank_row(0);
                match moving {
                    Some(direction) => self.write_at(0, 0, Self::banner(direction)),
                    None => self.render_position(position, temperature_c),
                }
                self.render_lower_row(mode, humidity_pct, close_temp_c, open_temp_c);
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// HD44780 over PCF8574, 4-bit mode
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod panel {
    use crate::drivers::hw_init;
    use crate::pins;

    // PCF8574 bit map: P0=RS, P1=RW, P2=EN, P3=backlight, P4-P7=D4-D7.
    const RS: u8 = 0x01;
    const EN: u8 = 0x04;
    const BACKLIGHT: u8 = 0x08;

    fn write_nibble(nibble: u8, flags: u8) {
        let byte = (nibble << 4) | flags | BACKLIGHT;
        let _ = hw_init::i2c_write(pins::LCD_I2C_ADDR, &[byte | EN]);
        hw_init::delay_us(1);
        let _ = hw_init::i2c_write(pins::LCD_I2C_ADDR, &[byte]);
        hw_init::delay_us(50);
    }

    fn write_command(cmd: u8) {
        write_nibble(cmd >> 4, 0);
        write_nibble(cmd & 0x0F, 0);
    }

    pub fn write_data(byte: u8) {
        write_nibble(byte >> 4, RS);
        write_nibble(byte & 0x0F, RS);
    }

    pub fn set_cursor(row: u8, col: u8) {
        let offset = if row == 0 { 0x00 } else { 0x40 };
        write_command(0x80 | (offset + col));
    }

    pub fn clear() {
        write_command(0x01);
        hw_init::delay_us(2_000);
    }

    /// Standard 4-bit-mode bring-up sequence.
    pub fn init() {
        hw_init::delay_us(50_000);
        write_nibble(0x03, 0);
        hw_init::delay_us(4_500);
        write_nibble(0x03, 0);
        hw_init::delay_us(4_500);
        write_nibble(0x03, 0);
        hw_init::delay_us(150);
        write_nibble(0x02, 0); // switch to 4-bit

        write_command(0x28); // 2 lines, 5x8 font
        write_command(0x0C); // display on, cursor off
        write_command(0x06); // entry mode: increment
        clear();
    }
}
