//! PlantCare Firmware: Main Entry Point
//!
//! Hexagonal architecture on a cooperative polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink     DisplayReporter  Esp32Time│
//! │  (Sensor+Actuator)  (Events+Status)  (Status)         (Clock)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  IrrigationManager · SanitationController              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use plantcare::adapters::display::DisplayReporter;
use plantcare::adapters::hardware::HardwareAdapter;
use plantcare::adapters::log_sink::LogEventSink;
use plantcare::adapters::time::Esp32TimeAdapter;
use plantcare::app::ports::{ActuatorPort, ClockPort};
use plantcare::app::service::AppService;
use plantcare::config::SystemConfig;
use plantcare::drivers::hw_init;
use plantcare::drivers::watchdog::Watchdog;
use plantcare::error::Error;
use plantcare::pins;

/// Everything the control loop owns once boot succeeded.
struct Firmware {
    app: AppService,
    hw: HardwareAdapter,
    display: DisplayReporter<I2cDriver<'static>>,
    clock: Esp32TimeAdapter,
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PlantCare v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (fixed at init) ──────────────────────
    let config = SystemConfig::default();

    // ── 3. Peripherals, display, service ──────────────────────
    let Firmware {
        mut app,
        mut hw,
        display,
        clock,
    } = match boot(&config) {
        Ok(fw) => fw,
        Err(e) => halt(&e),
    };

    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let mut events = LogEventSink::new();
    let mut status = (display, LogEventSink::new());

    app.start(clock.now_ms(), &mut hw, &mut events);
    info!("System ready. Entering control loop (watchdog {}ms).", watchdog.timeout_ms());

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();
        app.tick(now, &mut hw, &mut events);
        app.report_status(now, &mut status);

        watchdog.feed();
        // Yield one RTOS tick so the idle task runs.
        FreeRtos::delay_ms(1);
    }
}

/// Fallible part of boot.  Every error here is fatal.
fn boot(config: &SystemConfig) -> plantcare::error::Result<Firmware> {
    config.validate_for_board(pins::WIRED_CHANNELS)?;

    hw_init::init_peripherals()?;
    let hw = HardwareAdapter::for_board(config.channel_count());

    let peripherals = Peripherals::take().map_err(|e| {
        error!("Peripherals::take failed: {:?}", e);
        Error::Init("peripherals")
    })?;

    // SDA / SCL must match pins::I2C_SDA_GPIO / pins::I2C_SCL_GPIO.
    let i2c_cfg = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &i2c_cfg,
    )
    .map_err(|e| {
        error!("I2C driver init failed: {:?}", e);
        Error::Init("I2C bus")
    })?;

    let display = DisplayReporter::init(i2c, pins::OLED_I2C_ADDR).map_err(|e| {
        error!("SSD1306 init failed: {:?}", e);
        Error::Init("SSD1306 display")
    })?;

    Ok(Firmware {
        app: AppService::new(config),
        hw,
        display,
        clock: Esp32TimeAdapter::new(),
    })
}

/// Log, force every relay off, and park forever.
fn halt(err: &Error) -> ! {
    error!("Boot failed: {}, halting", err);
    HardwareAdapter::for_board(pins::WIRED_CHANNELS).all_off();
    loop {
        FreeRtos::delay_ms(1_000);
    }
}
