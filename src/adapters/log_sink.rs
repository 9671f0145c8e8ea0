//! Log-based event sink and status reporter.
//!
//! Implements [`EventSink`] and [`StatusReporter`] by writing to the
//! `log` facade (ESP-IDF logger → UART in production).  Status snapshots
//! go out as one JSON object per line so a host script can tail the
//! serial port.

use log::{info, warn};

use crate::app::events::{AppEvent, StatusSnapshot};
use crate::app::ports::{EventSink, StatusReporter};

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { channels } => {
                info!("START | channels={} | all actuators off", channels);
            }
            AppEvent::IrrigationStarted { channel } => {
                info!("IRRIG | plant {} ON", channel);
            }
            AppEvent::IrrigationStopped { channel } => {
                info!("IRRIG | plant {} OFF", channel);
            }
            AppEvent::SanitationChanged { from, to } => {
                info!("SANIT | {} -> {}", from.name(), to.name());
            }
        }
    }
}

impl StatusReporter for LogEventSink {
    fn report(&mut self, status: &StatusSnapshot) {
        match serde_json::to_string(status) {
            Ok(json) => info!("STATUS | {}", json),
            Err(e) => warn!("STATUS | serialisation failed: {}", e),
        }
    }
}
