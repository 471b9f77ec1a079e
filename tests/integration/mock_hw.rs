//! Mock hardware adapters for integration tests.
//!
//! Records every motor call and display intent so tests can assert on the
//! full command history without touching real GPIO or I²C.

use greenvent::app::events::{AppEvent, DisplayIntent};
use greenvent::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use greenvent::control::travel::Direction;
use greenvent::error::SensorError;
use greenvent::fsm::context::ClimateReading;

// ── Motor call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCall {
    Drive(Direction),
    Stop,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    reading: Result<ClimateReading, SensorError>,
    pub read_count: usize,
    pub calls: Vec<MotorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            reading: Ok(ClimateReading {
                temperature_c: 25,
                humidity_pct: 55,
            }),
            read_count: 0,
            calls: Vec::new(),
        }
    }

    pub fn set_temperature(&mut self, temperature_c: i16) {
        self.reading = Ok(ClimateReading {
            temperature_c,
            humidity_pct: 55,
        });
    }

    pub fn fail_reads(&mut self) {
        self.reading = Err(SensorError::Timeout);
    }

    /// Direction the motor is being driven in, judging by the last call.
    pub fn motor_driving(&self) -> Option<Direction> {
        match self.calls.last() {
            Some(MotorCall::Drive(d)) => Some(*d),
            _ => None,
        }
    }

    /// Number of `Drive` calls issued so far.
    pub fn drive_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MotorCall::Drive(_)))
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.read_count += 1;
        self.reading
    }
}

impl ActuatorPort for MockHardware {
    fn drive_motor(&mut self, direction: Direction) {
        self.calls.push(MotorCall::Drive(direction));
    }

    fn stop_motor(&mut self) {
        self.calls.push(MotorCall::Stop);
    }
}

// ── CaptureDisplay ────────────────────────────────────────────

pub struct CaptureDisplay {
    pub intents: Vec<DisplayIntent>,
}

#[allow(dead_code)]
impl CaptureDisplay {
    pub fn new() -> Self {
        Self {
            intents: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&DisplayIntent> {
        self.intents.last()
    }
}

impl Default for CaptureDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for CaptureDisplay {
    fn show(&mut self, intent: &DisplayIntent) {
        self.intents.push(*intent);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
