//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! ESP-IDF logger (UART / USB-CDC in production).  Tests use a recording
//! sink instead; both sit behind the same trait.

use log::{info, warn};

use crate::app::events::{AppEvent, ThresholdKind};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_name(which: ThresholdKind) -> &'static str {
    match which {
        ThresholdKind::Close => "close",
        ThresholdKind::Open => "open",
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { state, mode } => {
                info!("START | initial_state={:?} mode={:?}", state, mode);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::ModeChanged { mode } => {
                info!("MODE  | {:?}", mode);
            }
            AppEvent::ThresholdAdjusted { which, value_c } => {
                info!("THRESH| {}={}°C", kind_name(*which), value_c);
            }
            AppEvent::ThresholdLimitReached { which } => {
                info!("THRESH| {} limit reached", kind_name(*which));
            }
            AppEvent::SensorReadFailed(e) => {
                warn!("SENSOR| read failed: {}", e);
            }
        }
    }
}
