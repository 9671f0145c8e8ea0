//! Unified error types for the PlantCare firmware.
//!
//! Only initialisation can fail.  Once the control loop is running the
//! tick path is infallible: sensor values outside the expected range are
//! simply never below a threshold, and actuator writes are fire-and-forget.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible boot step funnels into this type.  All of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A collaborator (display, bus) failed to come up.
    Init(&'static str),
    /// Configuration is invalid.
    Config(ConfigError),
    /// One-shot peripheral setup failed.
    Hardware(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// At least one irrigation channel is required.
    NoChannels,
    /// More channels configured than the board has wired.
    TooManyChannels { configured: usize, wired: usize },
    /// Moisture threshold is a percentage.
    ThresholdOutOfRange { channel: u8, percent: u8 },
    /// The named duration is zero.
    ZeroDuration(&'static str),
    /// The named duration exceeds the wrap-safe maximum.
    DurationTooLong(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChannels => write!(f, "no irrigation channels configured"),
            Self::TooManyChannels { configured, wired } => {
                write!(f, "{configured} channels configured, board wires {wired}")
            }
            Self::ThresholdOutOfRange { channel, percent } => {
                write!(f, "channel {channel}: threshold {percent}% exceeds 100%")
            }
            Self::ZeroDuration(field) => write!(f, "{field} must be non-zero"),
            Self::DurationTooLong(field) => write!(f, "{field} too long"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
