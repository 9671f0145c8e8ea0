//! Integration tests for the AppService → control core → actuators pipeline.
//!
//! These run on the host (x86_64) and verify that sensor reads, actuator
//! commands, events and status reports flow through the port traits
//! correctly without any real hardware.

use super::mock_hw::{ActuatorCall, MockHardware, RecordingReporter, RecordingSink};

use plantcare::app::events::AppEvent;
use plantcare::app::ports::ActuatorId;
use plantcare::app::service::AppService;
use plantcare::config::SystemConfig;
use plantcare::control::ChannelId;
use plantcare::control::sanitation::SanitationState;

fn ch(id: u8) -> ChannelId {
    ChannelId::new(id).unwrap()
}

fn make_app() -> (AppService, MockHardware, RecordingSink) {
    let config = SystemConfig::default();
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(config.channel_count());
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut sink);
    (app, hw, sink)
}

// ── Lifecycle ────────────────────────────────────────────────

#[test]
fn start_forces_all_off_and_announces_channels() {
    let (_app, hw, sink) = make_app();
    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert!(sink.contains(&AppEvent::Started { channels: 5 }));
}

#[test]
fn wet_boot_issues_no_commands() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.clear_calls();
    for t in (0..120_000).step_by(1_000) {
        app.tick(t, &mut hw, &mut sink);
    }
    assert!(hw.calls.is_empty(), "unexpected calls: {:?}", hw.calls);
    assert_eq!(app.tick_count(), 120);
}

#[test]
fn every_tick_samples_every_input_once() {
    let (mut app, mut hw, mut sink) = make_app();
    app.tick(10, &mut hw, &mut sink);
    app.tick(20, &mut hw, &mut sink);
    assert_eq!(hw.presence_reads, 2);
    assert_eq!(hw.moisture_reads, 10);
    assert_eq!(app.last_tick_at(), 20);
}

// ── Irrigation ───────────────────────────────────────────────

#[test]
fn dry_channel_runs_for_its_window() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_moisture(3, 20);

    app.tick(1_000, &mut hw, sink.at(1_000));
    assert!(hw.irrigation_on(3));
    assert!(!hw.irrigation_on(1));

    hw.set_moisture(3, 90);
    app.tick(5_999, &mut hw, sink.at(5_999));
    assert!(hw.irrigation_on(3));

    app.tick(6_000, &mut hw, sink.at(6_000));
    assert!(!hw.irrigation_on(3));

    assert_eq!(
        sink.first(&AppEvent::IrrigationStarted { channel: ch(3) }),
        Some(1_000)
    );
    assert_eq!(
        sink.first(&AppEvent::IrrigationStopped { channel: ch(3) }),
        Some(6_000)
    );
}

#[test]
fn rearm_reissues_on_without_duplicate_events() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_moisture(1, 10);
    for t in [0, 1_000, 2_000] {
        app.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.calls_for(ActuatorId::Irrigation(ch(1))), vec![true, true, true]);
    let starts = sink
        .events
        .iter()
        .filter(|(_, e)| matches!(e, AppEvent::IrrigationStarted { .. }))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn off_is_reasserted_after_expiry() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_moisture(2, 0);
    app.tick(0, &mut hw, &mut sink);
    hw.set_moisture(2, 100);
    for t in [5_000, 6_000, 7_000] {
        app.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(
        hw.calls_for(ActuatorId::Irrigation(ch(2))),
        vec![true, false, false, false]
    );
    let stops = sink
        .events
        .iter()
        .filter(|(_, e)| matches!(e, AppEvent::IrrigationStopped { .. }))
        .count();
    assert_eq!(stops, 1);
}

#[test]
fn commands_issue_in_ascending_channel_order_then_sanitation() {
    let config = SystemConfig {
        sanitation: plantcare::config::SanitationConfig {
            debounce_delay_ms: 1,
            run_duration_ms: 1_000,
        },
        ..SystemConfig::default()
    };
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(5);
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut sink);

    hw.presence = true;
    app.tick(0, &mut hw, &mut sink);
    hw.presence = false;
    hw.moisture = vec![0, 100, 0, 100, 0];
    hw.clear_calls();
    app.tick(10, &mut hw, &mut sink);

    let order: Vec<ActuatorId> = hw
        .calls
        .iter()
        .filter_map(|c| match c {
            ActuatorCall::Set { actuator, .. } => Some(*actuator),
            ActuatorCall::AllOff => None,
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ActuatorId::Irrigation(ch(1)),
            ActuatorId::Irrigation(ch(3)),
            ActuatorId::Irrigation(ch(5)),
            ActuatorId::Sanitation,
        ]
    );
}

// ── Sanitation ───────────────────────────────────────────────

#[test]
fn sanitation_transitions_are_emitted() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.presence = true;
    app.tick(0, &mut hw, sink.at(0));
    hw.presence = false;
    app.tick(60_000, &mut hw, sink.at(60_000));
    app.tick(70_000, &mut hw, sink.at(70_000));

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|(t, e)| match e {
            AppEvent::SanitationChanged { from, to } => Some((*t, *from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (0, SanitationState::Idle, SanitationState::Awaiting),
            (60_000, SanitationState::Awaiting, SanitationState::Active),
            (70_000, SanitationState::Active, SanitationState::Idle),
        ]
    );
    assert_eq!(hw.calls_for(ActuatorId::Sanitation), vec![true, false]);
}

// ── Status reporting ─────────────────────────────────────────

#[test]
fn status_reports_follow_interval() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut reporter = RecordingReporter::default();
    hw.set_moisture(4, 12);

    let mut fired = Vec::new();
    for t in (0..=20_000).step_by(1_000) {
        app.tick(t, &mut hw, &mut sink);
        if app.report_status(t, &mut reporter) {
            fired.push(t);
        }
    }
    assert_eq!(fired, vec![5_000, 10_000, 15_000, 20_000]);

    let last = reporter.reports.last().unwrap();
    assert_eq!(last.uptime_ms, 20_000);
    assert_eq!(last.moisture_percent.as_slice(), &[100, 100, 100, 12, 100]);
    assert_eq!(last.irrigating.as_slice(), &[false, false, false, true, false]);
    assert_eq!(last.sanitation, SanitationState::Idle);
}

#[test]
fn status_fans_out_to_both_reporters() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut pair = (RecordingReporter::default(), RecordingReporter::default());
    app.tick(5_000, &mut hw, &mut sink);
    assert!(app.report_status(5_000, &mut pair));
    assert_eq!(pair.0.reports.len(), 1);
    assert_eq!(pair.0.reports, pair.1.reports);
}

#[test]
fn status_interval_is_armed_at_start() {
    let config = SystemConfig::default();
    let mut app = AppService::new(&config);
    let mut hw = MockHardware::new(5);
    let mut sink = RecordingSink::new();
    let mut reporter = RecordingReporter::default();

    app.start(100_000, &mut hw, &mut sink);
    app.tick(100_000, &mut hw, &mut sink);
    assert!(!app.report_status(104_999, &mut reporter));
    assert!(app.report_status(105_000, &mut reporter));
}
