//! Capacitive soil-moisture probe driver.
//!
//! Reads the probe voltage through an ESP32 ADC oneshot channel and maps
//! it linearly onto 0–100 %.  No calibration: raw 0 is 0 %, full scale is
//! 100 %.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1/ADC2 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` per probe for injection.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::pins::{ADC_FULL_SCALE, AdcPin, MOISTURE_ADC};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_MOISTURE_RAW: [AtomicU16; MOISTURE_ADC.len()] =
    [const { AtomicU16::new(ADC_FULL_SCALE) }; MOISTURE_ADC.len()];

/// Inject a raw ADC sample for probe `index` (0-based).  Out-of-range
/// indices are ignored.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_moisture_raw(index: usize, raw: u16) {
    if let Some(slot) = SIM_MOISTURE_RAW.get(index) {
        slot.store(raw, Ordering::Relaxed);
    }
}

/// Integer linear map `0..=4095 → 0..=100`, truncating.  Values above
/// full scale clamp to 100 %.
pub fn raw_to_percent(raw: u16) -> u8 {
    let raw = u32::from(raw.min(ADC_FULL_SCALE));
    (raw * 100 / u32::from(ADC_FULL_SCALE)) as u8
}

#[derive(Debug, Clone, Copy)]
pub struct MoistureReading {
    pub raw: u16,
    pub percent: u8,
}

pub struct MoistureSensor {
    // Host reads go through the sim slot, target reads through the pin.
    #[cfg_attr(target_os = "espidf", allow(dead_code))]
    index: usize,
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    pin: AdcPin,
}

impl MoistureSensor {
    /// `index` is the probe position in [`MOISTURE_ADC`].
    pub fn new(index: usize, pin: AdcPin) -> Self {
        Self { index, pin }
    }

    pub fn read(&mut self) -> MoistureReading {
        let raw = self.read_adc();
        MoistureReading {
            raw,
            percent: raw_to_percent(raw),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc_read(self.pin.unit, self.pin.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_MOISTURE_RAW
            .get(self.index)
            .map_or(ADC_FULL_SCALE, |slot| slot.load(Ordering::Relaxed))
    }
}
