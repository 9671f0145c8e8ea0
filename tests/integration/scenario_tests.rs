//! End-to-end timing scenarios, driven tick by tick through the service.

use super::mock_hw::{MockHardware, RecordingSink};

use plantcare::app::events::AppEvent;
use plantcare::app::ports::ActuatorId;
use plantcare::app::service::AppService;
use plantcare::clock::Millis;
use plantcare::config::{ChannelConfig, SanitationConfig, SystemConfig};
use plantcare::control::ChannelId;
use plantcare::control::sanitation::SanitationState;

fn single_channel(threshold: u8, run_ms: Millis, sanitation: SanitationConfig) -> SystemConfig {
    let mut config = SystemConfig {
        sanitation,
        ..SystemConfig::default()
    };
    config.channels.clear();
    config
        .channels
        .push(ChannelConfig {
            moisture_threshold_percent: threshold,
            run_duration_ms: run_ms,
        })
        .unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn irrigation_rearm_scenario() {
    // threshold=50, run=5000, readings every second: 40,40,40 then 60…
    let config = single_channel(50, 5_000, SanitationConfig::default());
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(1);
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut sink);

    let id = ChannelId::new(1).unwrap();
    let readings = [40, 40, 40, 60, 60, 60, 60, 60, 60, 60];
    let mut trace = Vec::new();
    for (i, &r) in readings.iter().enumerate() {
        let t = i as Millis * 1_000;
        hw.moisture[0] = r;
        app.tick(t, &mut hw, sink.at(t));
        trace.push((t, hw.is_on(ActuatorId::Irrigation(id))));
    }

    assert_eq!(sink.first(&AppEvent::IrrigationStarted { channel: id }), Some(0));
    assert_eq!(sink.first(&AppEvent::IrrigationStopped { channel: id }), Some(7_000));
    assert_eq!(
        app.irrigation().channel(id).unwrap().last_activated_at(),
        Some(2_000)
    );
    for (t, on) in trace {
        assert_eq!(on, t < 7_000, "t={t}");
    }
}

#[test]
fn sanitation_debounce_scenario() {
    // debounce=60000, run=10000, presence high over [0, 1000].
    let config = single_channel(
        0,
        1_000,
        SanitationConfig {
            debounce_delay_ms: 60_000,
            run_duration_ms: 10_000,
        },
    );
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(1);
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut sink);

    let mut on_at = None;
    let mut off_at = None;
    for t in (0..=90_000).step_by(1_000) {
        hw.presence = t <= 1_000;
        let was_on = hw.sanitation_on();
        app.tick(t, &mut hw, sink.at(t));
        if t == 0 {
            assert_eq!(app.sanitation_state(), SanitationState::Awaiting);
        }
        match (was_on, hw.sanitation_on()) {
            (false, true) => on_at = Some(t),
            (true, false) => off_at = Some(t),
            _ => {}
        }
    }

    assert_eq!(on_at, Some(61_000));
    assert_eq!(off_at, Some(71_000));
    assert_eq!(app.sanitation_state(), SanitationState::Idle);
    assert_eq!(hw.calls_for(ActuatorId::Sanitation), vec![true, false]);
}

#[test]
fn visitor_returning_during_debounce_postpones_flush() {
    let config = single_channel(
        0,
        1_000,
        SanitationConfig {
            debounce_delay_ms: 10_000,
            run_duration_ms: 2_000,
        },
    );
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(1);
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut sink);

    let mut on_at = None;
    for t in (0..=40_000).step_by(500) {
        // Present at 0, gone, back at 8000, gone for good.
        hw.presence = t == 0 || t == 8_000;
        let was_on = hw.sanitation_on();
        app.tick(t, &mut hw, &mut sink);
        if !was_on && hw.sanitation_on() {
            on_at.get_or_insert(t);
        }
    }
    assert_eq!(on_at, Some(18_000));
    assert_eq!(hw.calls_for(ActuatorId::Sanitation), vec![true, false]);
}

#[test]
fn both_controllers_run_across_clock_wrap() {
    let config = single_channel(
        50,
        3_000,
        SanitationConfig {
            debounce_delay_ms: 2_000,
            run_duration_ms: 2_000,
        },
    );
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(1);
    let mut sink = RecordingSink::new();

    let start = u32::MAX - 2_499;
    app.start(start, &mut hw, &mut sink);
    hw.moisture[0] = 10;
    hw.presence = true;
    app.tick(start, &mut hw, &mut sink);
    hw.moisture[0] = 90;
    hw.presence = false;

    let mut now = start;
    let mut irrigation_off_after = None;
    let mut sanitation_on_after = None;
    let mut sanitation_off_after = None;
    for step in 1..=20u32 {
        now = now.wrapping_add(500);
        let irrigating = hw.irrigation_on(1);
        let flushing = hw.sanitation_on();
        app.tick(now, &mut hw, &mut sink);
        let dt = step * 500;
        if irrigating && !hw.irrigation_on(1) {
            irrigation_off_after = Some(dt);
        }
        if !flushing && hw.sanitation_on() {
            sanitation_on_after = Some(dt);
        }
        if flushing && !hw.sanitation_on() {
            sanitation_off_after = Some(dt);
        }
    }
    assert_eq!(irrigation_off_after, Some(3_000));
    assert_eq!(sanitation_on_after, Some(2_000));
    assert_eq!(sanitation_off_after, Some(4_000));
}
