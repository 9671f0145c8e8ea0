//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC oneshot units and GPIO directions using raw ESP-IDF
//! sys calls.  Called once from `main()` before the control loop starts.
//! Every relay output is driven to its OFF level before init returns.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed { unit: u8, rc: i32 },
    AdcChannelFailed { gpio: i32, rc: i32 },
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed { unit, rc } => write!(f, "ADC{} init failed (rc={})", unit, rc),
            Self::AdcChannelFailed { gpio, rc } => {
                write!(f, "ADC channel on GPIO{} config failed (rc={})", gpio, rc)
            }
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
        init_adc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut ADC2_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc_handle(unit: u8) -> adc_oneshot_unit_handle_t {
    unsafe {
        if unit == 2 { ADC2_HANDLE } else { ADC1_HANDLE }
    }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let units = [
        (1u8, adc_unit_t_ADC_UNIT_1, &raw mut ADC1_HANDLE),
        (2u8, adc_unit_t_ADC_UNIT_2, &raw mut ADC2_HANDLE),
    ];
    for (unit, unit_id, handle) in units {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        // SAFETY: each handle is only written here, once at boot.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, handle) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed { unit, rc: ret });
        }
    }

    // 12 dB attenuation: ~0-3.1 V, full probe swing.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for pin in &pins::MOISTURE_ADC {
        let ret = unsafe { adc_oneshot_config_channel(adc_handle(pin.unit), pin.channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcChannelFailed { gpio: pin.gpio, rc: ret });
        }
    }

    info!("hw_init: ADC1/ADC2 configured ({} moisture probes)", pins::MOISTURE_ADC.len());
    Ok(())
}

/// Raw 12-bit sample.  A failed conversion reads as full scale, which is
/// never below a moisture threshold.
#[cfg(target_os = "espidf")]
pub fn adc_read(unit: u8, channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc_handle(unit), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        log::debug!("adc_read: ADC{} ch{} failed (rc={})", unit, channel, ret);
        return pins::ADC_FULL_SCALE;
    }
    raw.clamp(0, i32::from(pins::ADC_FULL_SCALE)) as u16
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // PIR module drives its output push-pull; keep a pull-down so an
    // unplugged sensor reads as "nobody there".
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PIR_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: PIR input on GPIO{}", pins::PIR_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let off_level = u32::from(pins::RELAY_ACTIVE_LOW);
    let relays = pins::PLANT_RELAY_GPIO
        .iter()
        .copied()
        .chain(core::iter::once(pins::SANITATION_RELAY_GPIO));

    for pin in relays {
        // Latch the OFF level before switching to output so the relay
        // never glitches on at boot.
        unsafe { gpio_set_level(pin, off_level) };
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, off_level) };
    }

    info!("hw_init: relay outputs configured, all OFF");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::record_write(pin, high);
}

/// Host-side record of the last level written to each GPIO.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicU64, Ordering};

    static DRIVEN: AtomicU64 = AtomicU64::new(0);
    static HIGH: AtomicU64 = AtomicU64::new(0);

    pub(super) fn record_write(pin: i32, high: bool) {
        let Some(bit) = mask(pin) else { return };
        DRIVEN.fetch_or(bit, Ordering::Relaxed);
        if high {
            HIGH.fetch_or(bit, Ordering::Relaxed);
        } else {
            HIGH.fetch_and(!bit, Ordering::Relaxed);
        }
    }

    /// Last level written to `pin`, `None` if never driven.
    pub fn level(pin: i32) -> Option<bool> {
        let bit = mask(pin)?;
        if DRIVEN.load(Ordering::Relaxed) & bit == 0 {
            return None;
        }
        Some(HIGH.load(Ordering::Relaxed) & bit != 0)
    }

    fn mask(pin: i32) -> Option<u64> {
        u32::try_from(pin).ok().filter(|&p| p < 64).map(|p| 1u64 << p)
    }
}
