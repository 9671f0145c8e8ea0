//! Task watchdog for the polling loop.
//!
//! One `tick` + status refresh per iteration should take a few ms; a
//! blocked I2C flush or ADC read that holds the loop past
//! `SystemConfig::watchdog_timeout_ms` panics and reboots, which leaves
//! every relay at its init OFF level.
//!
//! Created only after boot succeeded, so the halt loop is never reset.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Subscribe the calling (main) task with `timeout_ms`.  A failed
    /// subscription is logged and `feed` becomes a no-op.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            Self {
                timeout_ms,
                subscribed: subscribe(timeout_ms),
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): {}ms, feed is a no-op", timeout_ms);
            Self { timeout_ms }
        }
    }

    /// Once per loop iteration, after the status report.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

#[cfg(target_os = "espidf")]
fn subscribe(timeout_ms: u32) -> bool {
    let cfg = esp_task_wdt_config_t {
        timeout_ms,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    // SAFETY: boot path, single-threaded; the TWDT itself is started by
    // CONFIG_ESP_TASK_WDT_INIT in sdkconfig.defaults.
    let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
    if ret != ESP_OK {
        log::warn!("Watchdog: reconfigure to {}ms returned {}", timeout_ms, ret);
    }

    // Null handle: the calling task.
    let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
    if ret != ESP_OK {
        log::warn!("Watchdog: control loop unguarded, add returned {}", ret);
        return false;
    }
    info!("Watchdog: control loop guarded, {}ms", timeout_ms);
    true
}
