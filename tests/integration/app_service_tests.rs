//! Integration tests for the AppService → FSM → actuators pipeline.
//!
//! These run on the host (x86_64) and walk the rover through complete
//! missions: power switch commands and scripted gas readings in, actuator
//! calls and events out.

use super::mock_hw::{ActuatorCall, LogSink, MockActuators, ScriptedSensors};

use reconuav::app::commands::AppCommand;
use reconuav::app::events::AppEvent;
use reconuav::app::service::AppService;
use reconuav::config::SystemConfig;
use reconuav::display::{self, StatusPage};
use reconuav::drivers::buzzer::TonePattern;
use reconuav::drivers::status_led::IndicatorColor;
use reconuav::fsm::Mode;
use reconuav::scheduler::PollScheduler;

fn make_app(config: &SystemConfig) -> (AppService, MockActuators, LogSink) {
    let mut app = AppService::new(config);
    let mut hw = MockActuators::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_leaves_rover_off_with_ready_page() {
    let (app, hw, sink) = make_app(&SystemConfig::default());

    assert_eq!(app.mode(), Mode::Off);
    assert!(!hw.motor_on());
    assert_eq!(hw.indicator(), Some(IndicatorColor::Off));
    assert_eq!(hw.last_page(), Some(&StatusPage::Ready.render()));
    assert_eq!(hw.tones(), vec![TonePattern::ShortAck]);
    assert_eq!(sink.events, vec![AppEvent::Started(Mode::Off)]);
}

// ── Full mission: OFF → IDLE → ALERT → ACTIVE → OFF ──────────

#[test]
fn mission_through_gas_plume() {
    let (mut app, mut hw, mut sink) = make_app(&SystemConfig::default());
    let mut sensors = ScriptedSensors::new(&[500, 100]);

    // Power on: warm-up page, purple, motor spinning.
    hw.calls.clear();
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);
    assert_eq!(app.mode(), Mode::Idle);
    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::Tone(TonePattern::ShortAck),
            ActuatorCall::Motor(true),
            ActuatorCall::Indicator(IndicatorColor::Purple),
            ActuatorCall::Page(StatusPage::WarmingUp.render()),
        ]
    );

    // Gas 500 ≥ 460: alert.
    hw.calls.clear();
    app.poll(&mut sensors, &mut hw, &mut sink, 0);
    assert_eq!(app.mode(), Mode::Alert);
    assert_eq!(hw.indicator(), Some(IndicatorColor::Red));
    assert_eq!(hw.last_page(), Some(&StatusPage::Alert.render()));
    assert_eq!(
        hw.tones(),
        vec![TonePattern::ShortAck, TonePattern::HazardSustained]
    );
    assert_eq!(sink.hazard_count(), 1);

    // Gas 100: back to active, rotator page 1 on the display.
    hw.calls.clear();
    let snap = app.poll(&mut sensors, &mut hw, &mut sink, 1);
    assert_eq!(app.mode(), Mode::Active);
    assert!(hw.motor_on());
    assert_eq!(hw.indicator(), Some(IndicatorColor::Green));
    assert!(hw.calls.contains(&ActuatorCall::Backlight));
    assert_eq!(hw.last_page(), Some(&display::select_page(&snap, 1)));
    assert_eq!(sink.hazard_count(), 1);

    // Power off: standby.
    hw.calls.clear();
    app.handle_command(AppCommand::PowerOff, &mut hw, &mut sink);
    assert_eq!(app.mode(), Mode::Off);
    assert!(!hw.motor_on());
    assert_eq!(hw.last_page(), Some(&StatusPage::Standby.render()));

    assert_eq!(
        sink.mode_changes(),
        vec![
            (Mode::Off, Mode::Idle),
            (Mode::Idle, Mode::Alert),
            (Mode::Alert, Mode::Active),
            (Mode::Active, Mode::Off),
        ]
    );
}

#[test]
fn sustained_hazard_does_not_retrigger_alert_entry() {
    let (mut app, mut hw, mut sink) = make_app(&SystemConfig::default());
    let mut sensors = ScriptedSensors::new(&[700, 650, 600]);
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);

    app.poll(&mut sensors, &mut hw, &mut sink, 0);
    hw.calls.clear();
    app.poll(&mut sensors, &mut hw, &mut sink, 1);
    app.poll(&mut sensors, &mut hw, &mut sink, 2);

    assert_eq!(app.mode(), Mode::Alert);
    assert!(hw.calls.is_empty(), "no re-entry effects: {:?}", hw.calls);
    // Hazard is still reported on every poll.
    assert_eq!(sink.hazard_count(), 3);
}

#[test]
fn active_rotates_through_all_four_pages() {
    let (mut app, mut hw, mut sink) = make_app(&SystemConfig::default());
    let mut sensors = ScriptedSensors::new(&[120]);
    let mut scheduler = PollScheduler::new(1_000);
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);

    let mut pages = Vec::new();
    for step in 0..5u32 {
        let tick = scheduler
            .due(step * 1_000)
            .expect("a poll is due every interval");
        let snap = app.poll(&mut sensors, &mut hw, &mut sink, tick.rotation_index);
        let page = hw.last_page().cloned().expect("page shown");
        assert_eq!(page, display::select_page(&snap, tick.rotation_index));
        pages.push(page);
    }

    assert_eq!(pages[0], pages[4], "rotation wraps after four pages");
    for i in 0..4 {
        for j in (i + 1)..4 {
            assert_ne!(pages[i], pages[j]);
        }
    }
}

// ── Power switch rules ────────────────────────────────────────

#[test]
fn off_ignores_sensors_even_with_hazard() {
    let (mut app, mut hw, mut sink) = make_app(&SystemConfig::default());
    let mut sensors = ScriptedSensors::new(&[1_000]);
    hw.calls.clear();
    sink.events.clear();

    app.poll(&mut sensors, &mut hw, &mut sink, 0);

    assert_eq!(app.mode(), Mode::Off);
    assert!(hw.calls.is_empty());
    assert_eq!(sink.hazard_count(), 0);
    assert!(matches!(sink.events.as_slice(), [AppEvent::Telemetry(_)]));
}

#[test]
fn power_on_while_running_is_ignored() {
    let (mut app, mut hw, mut sink) = make_app(&SystemConfig::default());
    let mut sensors = ScriptedSensors::new(&[100]);
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);
    app.poll(&mut sensors, &mut hw, &mut sink, 0);
    assert_eq!(app.mode(), Mode::Active);

    hw.calls.clear();
    assert!(
        app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink)
            .is_none()
    );
    assert_eq!(app.mode(), Mode::Active);
    assert!(hw.calls.is_empty());
}

// ── Climate failure escalation ────────────────────────────────

#[test]
fn lost_climate_is_tolerated_by_default() {
    let (mut app, mut hw, mut sink) = make_app(&SystemConfig::default());
    let mut sensors = ScriptedSensors::new(&[100]);
    sensors.lose_climate();
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);

    let snap = app.poll(&mut sensors, &mut hw, &mut sink, 0);

    assert!(!snap.is_valid());
    assert_eq!(app.mode(), Mode::Active);
    let AppEvent::Telemetry(record) = sink.events.last().cloned().expect("telemetry") else {
        panic!("last event should be telemetry");
    };
    assert!(record.to_csv().starts_with("-999.00,-999.00,100,"));
}

#[test]
fn lost_climate_escalates_when_configured() {
    let config = SystemConfig {
        error_on_invalid_climate: true,
        ..SystemConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(&config);
    let mut sensors = ScriptedSensors::new(&[100]);
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);
    app.poll(&mut sensors, &mut hw, &mut sink, 0);
    assert_eq!(app.mode(), Mode::Active);

    sensors.lose_climate();
    hw.calls.clear();
    app.poll(&mut sensors, &mut hw, &mut sink, 1);

    assert_eq!(app.mode(), Mode::Error);
    assert!(!hw.motor_on());
    assert_eq!(hw.indicator(), Some(IndicatorColor::Yellow));
    assert_eq!(hw.last_page(), Some(&StatusPage::Error.render()));
}

#[test]
fn hazard_wins_over_lost_climate() {
    let config = SystemConfig {
        error_on_invalid_climate: true,
        ..SystemConfig::default()
    };
    let (mut app, mut hw, mut sink) = make_app(&config);
    let mut sensors = ScriptedSensors::new(&[700, 100]);
    sensors.lose_climate();
    app.handle_command(AppCommand::PowerOn, &mut hw, &mut sink);

    app.poll(&mut sensors, &mut hw, &mut sink, 0);
    assert_eq!(app.mode(), Mode::Alert);
    assert_eq!(sink.hazard_count(), 1);

    app.poll(&mut sensors, &mut hw, &mut sink, 1);
    assert_eq!(app.mode(), Mode::Error);
}
