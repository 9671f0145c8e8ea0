//! Irrigation timer manager.
//!
//! Each channel is an open-loop, duration-bounded valve timer:
//!
//! ```text
//!  reading < threshold ──▶ ON, re-arm window (last_activated_at = now)
//!  now - last_activated_at >= run_duration ──▶ OFF
//! ```
//!
//! The moisture condition only gates *starting*.  Stopping is purely a
//! function of elapsed time since the most recent arming, so a channel
//! that keeps reading dry keeps postponing its own OFF, and a channel
//! that gets wet mid-run still runs out its window.
//!
//! Before the first activation `last_activated_at` is `None` and the OFF
//! branch is suppressed, so a fresh boot never emits a stray OFF.

use heapless::Vec;
use log::{debug, info};

use super::{ChannelId, Command};
use crate::clock::{Millis, has_elapsed};
use crate::config::{ChannelConfig, MAX_CHANNELS};

/// One valve: its configured constants plus the timer it owns.
#[derive(Debug, Clone)]
pub struct IrrigationChannel {
    id: ChannelId,
    moisture_threshold_percent: u8,
    run_duration_ms: Millis,
    last_activated_at: Option<Millis>,
    actuator_on: bool,
}

impl IrrigationChannel {
    pub fn new(id: ChannelId, config: &ChannelConfig) -> Self {
        Self {
            id,
            moisture_threshold_percent: config.moisture_threshold_percent,
            run_duration_ms: config.run_duration_ms,
            last_activated_at: None,
            actuator_on: false,
        }
    }

    /// Advance this channel by one tick.
    ///
    /// Evaluates the start branch, then the stop branch, and returns the
    /// last command issued this tick (`None` if neither branch fired).
    /// The stop branch keeps re-asserting OFF on every tick after expiry;
    /// actuator drivers are idempotent.
    pub fn advance(&mut self, reading_percent: u8, now: Millis) -> Option<Command> {
        let mut command = None;

        if reading_percent < self.moisture_threshold_percent {
            if self.actuator_on {
                debug!("Irrigation {}: re-armed at {}%", self.id, reading_percent);
            } else {
                info!(
                    "Irrigation {}: {}% < {}% -> ON for {}ms",
                    self.id, reading_percent, self.moisture_threshold_percent, self.run_duration_ms
                );
            }
            self.last_activated_at = Some(now);
            self.actuator_on = true;
            command = Some(Command::On);
        }

        if let Some(armed_at) = self.last_activated_at {
            if has_elapsed(now, armed_at, self.run_duration_ms) {
                if self.actuator_on {
                    info!("Irrigation {}: run window elapsed -> OFF", self.id);
                }
                self.actuator_on = false;
                command = Some(Command::Off);
            }
        }

        command
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn is_on(&self) -> bool {
        self.actuator_on
    }

    /// Timestamp of the most recent arming, `None` before the first.
    pub fn last_activated_at(&self) -> Option<Millis> {
        self.last_activated_at
    }

    pub fn moisture_threshold_percent(&self) -> u8 {
        self.moisture_threshold_percent
    }

    pub fn run_duration_ms(&self) -> Millis {
        self.run_duration_ms
    }
}

/// Result of advancing one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub channel: ChannelId,
    /// Command to forward to the actuator driver this tick.
    pub command: Option<Command>,
    /// Set only when the commanded state actually flipped.
    pub transition: Option<Command>,
}

/// Owns every irrigation channel, indexed by id.
pub struct IrrigationManager {
    channels: Vec<IrrigationChannel, MAX_CHANNELS>,
}

impl IrrigationManager {
    /// Build channels `1..=configs.len()`.  Entries past [`MAX_CHANNELS`]
    /// are ignored; `SystemConfig` cannot hold more.
    pub fn new(configs: &[ChannelConfig]) -> Self {
        let mut channels = Vec::new();
        for (idx, cfg) in configs.iter().take(MAX_CHANNELS).enumerate() {
            let _ = channels.push(IrrigationChannel::new(ChannelId::from_index(idx), cfg));
        }
        info!("Irrigation: {} channel(s) configured", channels.len());
        Self { channels }
    }

    /// Advance every channel in ascending id order.
    ///
    /// `readings[i]` belongs to channel `i + 1`.  A missing reading is
    /// treated as saturated (never below a threshold).
    pub fn advance(&mut self, readings: &[u8], now: Millis) -> Vec<ChannelOutcome, MAX_CHANNELS> {
        let mut outcomes = Vec::new();
        for (idx, channel) in self.channels.iter_mut().enumerate() {
            let reading = readings.get(idx).copied().unwrap_or(u8::MAX);
            let was_on = channel.is_on();
            let command = channel.advance(reading, now);
            let transition = match (was_on, channel.is_on()) {
                (false, true) => Some(Command::On),
                (true, false) => Some(Command::Off),
                _ => None,
            };
            let _ = outcomes.push(ChannelOutcome {
                channel: channel.id(),
                command,
                transition,
            });
        }
        outcomes
    }

    pub fn channels(&self) -> &[IrrigationChannel] {
        &self.channels
    }

    pub fn channel(&self, id: ChannelId) -> Option<&IrrigationChannel> {
        self.channels.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
