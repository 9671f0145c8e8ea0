//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the irrigation channels, the sanitation machine and
//! the status rate limiter.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//! ActuatorPort ◀──│ Irrigation · Sanitation  │ ──▶ StatusReporter
//!                 └──────────────────────────┘
//! ```

use heapless::Vec;
use log::info;

use crate::clock::{Interval, Millis};
use crate::config::{MAX_CHANNELS, SystemConfig};
use crate::control::irrigation::IrrigationManager;
use crate::control::sanitation::{SanitationController, SanitationState};
use crate::control::Command;

use super::events::{AppEvent, StatusSnapshot};
use super::ports::{ActuatorId, ActuatorPort, EventSink, SensorPort, StatusReporter};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    irrigation: IrrigationManager,
    sanitation: SanitationController,
    status_interval: Interval,
    /// Readings from the most recent tick, index 0 = channel 1.
    last_moisture: Vec<u8, MAX_CHANNELS>,
    last_presence: bool,
    last_tick_at: Millis,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** touch hardware: call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            irrigation: IrrigationManager::new(&config.channels),
            sanitation: SanitationController::new(&config.sanitation),
            status_interval: Interval::new(config.status_interval_ms, 0),
            last_moisture: Vec::new(),
            last_presence: false,
            last_tick_at: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every actuator off and arm the status interval from `now`.
    pub fn start(&mut self, now: Millis, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.status_interval = Interval::new(self.status_interval.period_ms(), now);
        self.last_tick_at = now;
        sink.emit(&AppEvent::Started {
            channels: self.irrigation.len(),
        });
        info!(
            "AppService started: {} irrigation channel(s), sanitation {:?}",
            self.irrigation.len(),
            self.sanitation.state()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read sensors → irrigation → sanitation.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.  Never blocks, never fails.
    pub fn tick(
        &mut self,
        now: Millis,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.last_tick_at = now;

        // 1. Sample inputs
        let presence = hw.read_presence();
        let mut moisture: Vec<u8, MAX_CHANNELS> = Vec::new();
        for channel in self.irrigation.channels() {
            let _ = moisture.push(hw.read_moisture(channel.id()));
        }

        // 2. Irrigation channels, ascending id
        for outcome in self.irrigation.advance(&moisture, now) {
            if let Some(cmd) = outcome.command {
                hw.set(ActuatorId::Irrigation(outcome.channel), cmd.is_on());
            }
            match outcome.transition {
                Some(Command::On) => sink.emit(&AppEvent::IrrigationStarted {
                    channel: outcome.channel,
                }),
                Some(Command::Off) => sink.emit(&AppEvent::IrrigationStopped {
                    channel: outcome.channel,
                }),
                None => {}
            }
        }

        // 3. Sanitation
        let from = self.sanitation.state();
        if let Some(cmd) = self.sanitation.advance(presence, now) {
            hw.set(ActuatorId::Sanitation, cmd.is_on());
        }
        let to = self.sanitation.state();
        if to != from {
            sink.emit(&AppEvent::SanitationChanged { from, to });
        }

        self.last_moisture = moisture;
        self.last_presence = presence;
    }

    // ── Status ────────────────────────────────────────────────

    /// Hand a snapshot to `reporter` when the status interval has elapsed.
    /// Returns `true` if a report was made.
    pub fn report_status(&mut self, now: Millis, reporter: &mut impl StatusReporter) -> bool {
        if !self.status_interval.poll(now) {
            return false;
        }
        reporter.report(&self.snapshot(now));
        true
    }

    /// Build a snapshot from the most recent tick.
    pub fn snapshot(&self, now: Millis) -> StatusSnapshot {
        let mut irrigating = Vec::new();
        for channel in self.irrigation.channels() {
            let _ = irrigating.push(channel.is_on());
        }
        StatusSnapshot {
            uptime_ms: now,
            moisture_percent: self.last_moisture.clone(),
            irrigating,
            sanitation: self.sanitation.state(),
            sanitation_on: self.sanitation.is_on(),
            presence: self.last_presence,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn irrigation(&self) -> &IrrigationManager {
        &self.irrigation
    }

    pub fn sanitation_state(&self) -> SanitationState {
        self.sanitation.state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Timestamp passed to the most recent `tick` (or `start`).
    pub fn last_tick_at(&self) -> Millis {
        self.last_tick_at
    }
}
