//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, relays, event sinks, status reporters)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the control core never touches hardware
//! directly and every port can be replaced by a recording mock in tests.

use core::fmt;

use serde::Serialize;

use super::events::{AppEvent, StatusSnapshot};
use crate::clock::Millis;
use crate::control::ChannelId;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
///
/// Reads are infallible.  A disconnected or saturated sensor simply
/// returns an extreme value.
pub trait SensorPort {
    /// Moisture of one channel as a percentage in `0..=100`.
    fn read_moisture(&mut self, channel: ChannelId) -> u8;

    /// `true` while the presence sensor reports someone nearby.
    fn read_presence(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Addressable binary actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActuatorId {
    /// Irrigation valve / pump relay of one channel.
    Irrigation(ChannelId),
    /// Sanitation flush relay.
    Sanitation,
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irrigation(ch) => write!(f, "irrigation#{ch}"),
            Self::Sanitation => write!(f, "sanitation"),
        }
    }
}

/// Write-side port: the domain calls this to command actuators.
///
/// `set` must be idempotent; the core re-asserts OFF on every tick after
/// a run window expires.
pub trait ActuatorPort {
    /// Drive one actuator on (`true`) or off (`false`).  Fire-and-forget.
    fn set(&mut self, actuator: ActuatorId, on: bool);

    /// Kill every actuator: safe state.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Status reporter port (driven adapter: domain → display)
// ───────────────────────────────────────────────────────────────

/// Consumes periodic status snapshots.  Never mutates core state.
pub trait StatusReporter {
    fn report(&mut self, status: &StatusSnapshot);
}

/// Fan-out: report to both, in order.
impl<A: StatusReporter, B: StatusReporter> StatusReporter for (A, B) {
    fn report(&mut self, status: &StatusSnapshot) {
        self.0.report(status);
        self.1.report(status);
    }
}

impl<R: StatusReporter + ?Sized> StatusReporter for &mut R {
    fn report(&mut self, status: &StatusSnapshot) {
        (**self).report(status);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond tick, wrapping at `u32::MAX`.
pub trait ClockPort {
    fn now_ms(&self) -> Millis;
}
