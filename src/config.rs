//! System configuration parameters
//!
//! All tunable parameters for the PlantCare controller.  Configuration is
//! fixed at init: it is built (usually from [`SystemConfig::default`]),
//! validated once, and never re-read while the control loop runs.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::clock::{MAX_DURATION_MS, Millis};
use crate::error::ConfigError;

/// Upper bound on irrigation channels (stack-allocated storage).
pub const MAX_CHANNELS: usize = 8;

/// Channels wired on the reference board.
pub const DEFAULT_CHANNEL_COUNT: usize = 5;

/// Per-channel irrigation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Irrigation starts while the reading is strictly below this (0-100%).
    pub moisture_threshold_percent: u8,
    /// How long the valve stays open after the most recent start.
    pub run_duration_ms: Millis,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            moisture_threshold_percent: 50,
            run_duration_ms: 5_000,
        }
    }
}

/// Sanitation (flush) actuator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitationConfig {
    /// Presence must stay absent this long before the flush starts.
    pub debounce_delay_ms: Millis,
    /// How long the flush relay stays energised.
    pub run_duration_ms: Millis,
}

impl Default for SanitationConfig {
    fn default() -> Self {
        Self {
            debounce_delay_ms: 60_000, // 1 min after the visitor left
            run_duration_ms: 10_000,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Irrigation ---
    /// One entry per channel; channel ids are `1..=channels.len()`.
    pub channels: Vec<ChannelConfig, MAX_CHANNELS>,

    // --- Sanitation ---
    pub sanitation: SanitationConfig,

    // --- Timing ---
    /// Status display / telemetry refresh period (milliseconds)
    pub status_interval_ms: Millis,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut channels = Vec::new();
        for _ in 0..DEFAULT_CHANNEL_COUNT {
            // DEFAULT_CHANNEL_COUNT <= MAX_CHANNELS, push cannot fail.
            let _ = channels.push(ChannelConfig::default());
        }

        Self {
            channels,
            sanitation: SanitationConfig::default(),
            status_interval_ms: 5_000,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Reject values the control core cannot honour.
    ///
    /// Durations are capped at [`MAX_DURATION_MS`] so wrapping elapsed-time
    /// arithmetic stays unambiguous; zero durations would make a start and
    /// a stop collide in the same tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }

        for (idx, ch) in self.channels.iter().enumerate() {
            let channel = (idx + 1) as u8;
            if ch.moisture_threshold_percent > 100 {
                return Err(ConfigError::ThresholdOutOfRange {
                    channel,
                    percent: ch.moisture_threshold_percent,
                });
            }
            check_duration("channel run duration", ch.run_duration_ms)?;
        }

        let san = &self.sanitation;
        check_duration("sanitation debounce delay", san.debounce_delay_ms)?;
        check_duration("sanitation run duration", san.run_duration_ms)?;
        match san.debounce_delay_ms.checked_add(san.run_duration_ms) {
            Some(total) if total <= MAX_DURATION_MS => {}
            _ => return Err(ConfigError::DurationTooLong("sanitation debounce + run")),
        }

        check_duration("status interval", self.status_interval_ms)?;
        if self.watchdog_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("watchdog timeout"));
        }

        Ok(())
    }

    /// [`validate`](Self::validate), plus the channel count must fit the
    /// `wired` probe/relay pairs of the board.
    pub fn validate_for_board(&self, wired: usize) -> Result<(), ConfigError> {
        self.validate()?;
        if self.channel_count() > wired {
            return Err(ConfigError::TooManyChannels {
                configured: self.channel_count(),
                wired,
            });
        }
        Ok(())
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

fn check_duration(field: &'static str, ms: Millis) -> Result<(), ConfigError> {
    if ms == 0 {
        Err(ConfigError::ZeroDuration(field))
    } else if ms > MAX_DURATION_MS {
        Err(ConfigError::DurationTooLong(field))
    } else {
        Ok(())
    }
}
