//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log today).

use heapless::Vec;
use serde::Serialize;

use crate::clock::Millis;
use crate::config::MAX_CHANNELS;
use crate::control::ChannelId;
use crate::control::sanitation::SanitationState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AppEvent {
    /// The service has started with every actuator off.
    Started { channels: usize },

    /// A channel's relay went from off to on.
    IrrigationStarted { channel: ChannelId },

    /// A channel's run window elapsed and its relay went off.
    IrrigationStopped { channel: ChannelId },

    /// The sanitation machine changed state.
    SanitationChanged {
        from: SanitationState,
        to: SanitationState,
    },
}

/// A point-in-time view of the controller, handed to status reporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub uptime_ms: Millis,
    /// Latest moisture reading per channel, index 0 = channel 1.
    pub moisture_percent: Vec<u8, MAX_CHANNELS>,
    /// Commanded relay state per channel, index 0 = channel 1.
    pub irrigating: Vec<bool, MAX_CHANNELS>,
    pub sanitation: SanitationState,
    pub sanitation_on: bool,
    pub presence: bool,
}

impl StatusSnapshot {
    /// `(channel, moisture, on)` triples in id order.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelId, u8, bool)> + '_ {
        self.moisture_percent
            .iter()
            .zip(self.irrigating.iter())
            .enumerate()
            .map(|(idx, (&m, &on))| (ChannelId::from_index(idx), m, on))
    }
}
