//! The real `HardwareAdapter` on host: sensors read from the simulation
//! hooks, relays land in the GPIO level record.
//!
//! The sim state is process-global, so these tests serialise on a lock.

use std::sync::Mutex;

use super::mock_hw::RecordingSink;

use plantcare::adapters::hardware::HardwareAdapter;
use plantcare::app::ports::{ActuatorId, ActuatorPort, SensorPort};
use plantcare::app::service::AppService;
use plantcare::config::SystemConfig;
use plantcare::control::ChannelId;
use plantcare::drivers::hw_init::{self, sim};
use plantcare::pins;
use plantcare::sensors::moisture::sim_set_moisture_raw;
use plantcare::sensors::presence::sim_set_presence;

static SIM_LOCK: Mutex<()> = Mutex::new(());

fn relay_energised(gpio: i32) -> bool {
    sim::level(gpio) == Some(!pins::RELAY_ACTIVE_LOW)
}

fn reset_sim() {
    for i in 0..pins::MOISTURE_ADC.len() {
        sim_set_moisture_raw(i, pins::ADC_FULL_SCALE);
    }
    sim_set_presence(false);
}

#[test]
fn sensor_reads_are_scaled() {
    let _guard = SIM_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_sim();

    let mut hw = HardwareAdapter::for_board(5);
    sim_set_moisture_raw(0, 0);
    sim_set_moisture_raw(1, 2_048);
    sim_set_moisture_raw(4, 9_999);
    sim_set_presence(true);

    assert_eq!(hw.read_moisture(ChannelId::new(1).unwrap()), 0);
    assert_eq!(hw.read_moisture(ChannelId::new(2).unwrap()), 50);
    assert_eq!(hw.read_moisture(ChannelId::new(3).unwrap()), 100);
    assert_eq!(hw.read_moisture(ChannelId::new(5).unwrap()), 100);
    assert!(hw.read_presence());
    reset_sim();
}

#[test]
fn service_drives_board_relays() {
    let _guard = SIM_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset_sim();
    hw_init::init_peripherals().unwrap();

    let config = SystemConfig::default();
    let mut app = AppService::new(&config);
    let mut hw = HardwareAdapter::for_board(config.channel_count());
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut sink);
    for &gpio in &pins::PLANT_RELAY_GPIO {
        assert_eq!(sim::level(gpio), Some(pins::RELAY_ACTIVE_LOW));
    }

    // Plant 2 dry (~24 %).
    sim_set_moisture_raw(1, 1_000);
    app.tick(1_000, &mut hw, &mut sink);
    assert!(relay_energised(pins::PLANT_RELAY_GPIO[1]));
    assert!(!relay_energised(pins::PLANT_RELAY_GPIO[0]));
    assert!(hw.is_on(ActuatorId::Irrigation(ChannelId::new(2).unwrap())));

    sim_set_moisture_raw(1, 4_000);
    app.tick(6_000, &mut hw, &mut sink);
    assert!(!relay_energised(pins::PLANT_RELAY_GPIO[1]));

    // Visitor, then the flush after the debounce.
    sim_set_presence(true);
    app.tick(7_000, &mut hw, &mut sink);
    sim_set_presence(false);
    app.tick(67_000, &mut hw, &mut sink);
    assert!(relay_energised(pins::SANITATION_RELAY_GPIO));
    app.tick(77_000, &mut hw, &mut sink);
    assert!(!relay_energised(pins::SANITATION_RELAY_GPIO));

    hw.all_off();
    reset_sim();
}
