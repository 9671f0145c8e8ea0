//! GPIO / peripheral pin assignments for the PlantCare controller board
//! (classic ESP32, 38-pin devkit).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Soil moisture probes: Analog
// ---------------------------------------------------------------------------

/// ADC unit + channel behind one GPIO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcPin {
    pub gpio: i32,
    /// 1 or 2.
    pub unit: u8,
    pub channel: u32,
}

/// Capacitive moisture probes, index 0 = plant 1.
///
/// GPIO 25 sits on ADC2, which is unusable while Wi-Fi is up.  This
/// firmware never starts Wi-Fi.
pub const MOISTURE_ADC: [AdcPin; 5] = [
    AdcPin { gpio: 34, unit: 1, channel: 6 },
    AdcPin { gpio: 35, unit: 1, channel: 7 },
    AdcPin { gpio: 32, unit: 1, channel: 4 },
    AdcPin { gpio: 33, unit: 1, channel: 5 },
    AdcPin { gpio: 25, unit: 2, channel: 8 },
];

/// Full-scale raw reading of the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

// ---------------------------------------------------------------------------
// Relays
// ---------------------------------------------------------------------------

/// Irrigation pump / valve relays, index 0 = plant 1.
pub const PLANT_RELAY_GPIO: [i32; 5] = [27, 14, 12, 13, 15];

/// Sanitation flush relay.
pub const SANITATION_RELAY_GPIO: i32 = 26;

/// The relay modules on this board energise on a HIGH input.
pub const RELAY_ACTIVE_LOW: bool = false;

/// Number of irrigation channels physically wired.
pub const WIRED_CHANNELS: usize = PLANT_RELAY_GPIO.len();

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// HC-SR501 PIR output.  HIGH = presence.
pub const PIR_GPIO: i32 = 23;

// ---------------------------------------------------------------------------
// Status display (SSD1306 128×64, I²C)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
pub const I2C_FREQ_HZ: u32 = 400_000;
pub const OLED_I2C_ADDR: u8 = 0x3C;

const _: () = assert!(MOISTURE_ADC.len() == PLANT_RELAY_GPIO.len());
