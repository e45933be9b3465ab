//! Integration tests for the AppService → controller → actuators pipeline.

use std::sync::Arc;

use artc::app::commands::AppCommand;
use artc::app::events::AppEvent;
use artc::app::ports::SensorSnapshot;
use artc::app::service::AppService;
use artc::config::SystemConfig;
use artc::control::climate::FallbackPolicy;
use artc::control::knowledge::{CHILLER, HEATER, HUMIDITY, PRESSURE, TEMPERATURE};
use artc::error::{ConfigError, Error};
use artc::fuzzy::{DefuzzMethod, InferenceEngine, MembershipFunction, RuleBase, Universe, VariableRegistry};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

fn make_app(hw: &mut MockHardware) -> (AppService, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    app.start(hw, &mut sink);
    (app, sink)
}

fn snapshot(t: f64, p: f64, h: Option<f64>) -> SensorSnapshot {
    SensorSnapshot {
        temperature_c: t,
        pressure_hpa: p,
        humidity_percent: h,
    }
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn start_switches_everything_off() {
    let mut hw = MockHardware::constant(21.0, 1013.0, Some(40.0));
    let (app, sink) = make_app(&mut hw);

    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert_eq!(sink.events, vec![AppEvent::Started]);
    assert_eq!(app.tick_count(), 0);
    assert_eq!(hw.reads, 0);
}

// ── Per-tick orchestration ────────────────────────────────────

#[test]
fn freezing_room_commands_heater() {
    let mut hw = MockHardware::constant(5.0, 1000.0, Some(40.0));
    let (mut app, mut sink) = make_app(&mut hw);

    let t = app.tick(&mut hw, &mut sink).unwrap();

    assert_eq!(t.tick, 1);
    assert_eq!(t.heater_duty, 75);
    assert_eq!(t.chiller_duty, 0);
    assert_eq!(hw.heater(), 75);
    assert_eq!(hw.chiller(), 0);
    assert_eq!(
        &hw.calls[1..],
        &[ActuatorCall::SetHeater(75), ActuatorCall::SetChiller(0)]
    );
    assert_eq!(sink.telemetry().count(), 1);
    assert_eq!(app.last_telemetry(), Some(&t));
}

#[test]
fn missing_humidity_uses_configured_default() {
    // 75 % humidity is Wet, so a warm room gets Quick-Cool
    let mut hw = MockHardware::constant(22.0, 1000.0, None);
    let (mut app, mut sink) = make_app(&mut hw);

    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(t.reading.humidity_percent, 75.0);
    assert_eq!(t.chiller_duty, 85);
    assert_eq!(t.heater_duty, 0);
}

#[test]
fn readings_are_rounded_before_inference() {
    let mut hw = MockHardware::constant(21.004_9, 1013.256, Some(40.123));
    let (mut app, mut sink) = make_app(&mut hw);

    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(t.reading.temperature_c, 21.0);
    assert_eq!(t.reading.pressure_hpa, 1013.26);
    assert_eq!(t.reading.humidity_percent, 40.12);
    assert_eq!(
        app.controller().simulation().input("Temperature").unwrap(),
        Some(21.0)
    );
}

#[test]
fn duty_follows_the_room_over_several_polls() {
    let mut hw = MockHardware::new([
        snapshot(5.0, 1000.0, Some(40.0)),
        snapshot(16.5, 1000.0, Some(40.0)),
        snapshot(30.0, 1000.0, Some(80.0)),
    ]);
    let (mut app, mut sink) = make_app(&mut hw);

    let duties: Vec<(u8, u8)> = (0..3)
        .map(|_| {
            let t = app.tick(&mut hw, &mut sink).unwrap();
            (t.heater_duty, t.chiller_duty)
        })
        .collect();

    assert_eq!(duties, vec![(75, 0), (25, 0), (0, 85)]);
    assert_eq!(app.tick_count(), 3);
    assert_eq!(hw.reads, 3);
    assert_eq!(sink.telemetry().map(|t| t.tick).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn potency_is_never_outside_percent_range() {
    let mut hw = MockHardware::new(
        [-40.0, 0.0, 9.5, 14.0, 22.0, 60.0]
            .into_iter()
            .map(|t| snapshot(t, 700.0, Some(20.0))),
    );
    let (mut app, mut sink) = make_app(&mut hw);

    for _ in 0..6 {
        let t = app.tick(&mut hw, &mut sink).unwrap();
        assert!((0.0..=100.0).contains(&t.potency.heater_percent));
        assert!((0.0..=100.0).contains(&t.potency.chiller_percent));
        assert!(t.heater_duty <= 100 && t.chiller_duty <= 100);
    }
    assert!(
        !sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::NoRuleFired { .. })),
        "the room knowledge base covers every reading"
    );
}

#[test]
fn failed_sensor_switches_actuators_off() {
    let mut hw = MockHardware::new([
        snapshot(5.0, 1000.0, Some(40.0)),
        snapshot(f64::NAN, 1000.0, Some(40.0)),
        snapshot(5.0, 1000.0, Some(40.0)),
    ]);
    let (mut app, mut sink) = make_app(&mut hw);

    app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(hw.heater(), 75);

    let err = app.tick(&mut hw, &mut sink).unwrap_err();
    assert!(matches!(err, Error::NonFiniteInput { ref variable, .. } if variable == TEMPERATURE));
    assert_eq!(hw.last_call(), Some(&ActuatorCall::AllOff));
    assert_eq!(hw.heater(), 0);
    assert_eq!(sink.telemetry().count(), 1);
    assert_eq!(app.last_telemetry().map(|t| t.tick), Some(1));

    // sensor back: the next poll heats again
    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(t.tick, 3);
    assert_eq!(hw.heater(), 75);
}

// ── Command handling ──────────────────────────────────────────

#[test]
fn invalid_config_update_is_rejected() {
    let mut hw = MockHardware::constant(21.0, 1013.0, None);
    let (mut app, mut sink) = make_app(&mut hw);

    let bad = SystemConfig {
        poll_interval_secs: 0,
        ..SystemConfig::default()
    };
    let err = app
        .handle_command(AppCommand::UpdateConfig(bad), &mut hw, &mut sink)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(_)));
    assert_eq!(app.config(), &SystemConfig::default());
    assert!(!sink.events.contains(&AppEvent::ConfigUpdated));
}

#[test]
fn config_update_switches_defuzzification() {
    let mut hw = MockHardware::constant(5.0, 1000.0, Some(40.0));
    let (mut app, mut sink) = make_app(&mut hw);
    assert_eq!(app.tick(&mut hw, &mut sink).unwrap().heater_duty, 75);

    let config = SystemConfig {
        defuzzification: DefuzzMethod::MeanOfMaximum,
        ..SystemConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(config), &mut hw, &mut sink)
        .unwrap();

    assert!(sink.events.contains(&AppEvent::ConfigUpdated));
    assert_eq!(app.tick(&mut hw, &mut sink).unwrap().heater_duty, 77);
}

#[test]
fn coarser_potency_rounding_takes_effect() {
    let mut hw = MockHardware::constant(5.0, 1000.0, Some(40.0));
    let (mut app, mut sink) = make_app(&mut hw);

    let config = SystemConfig {
        potency_decimals: 1,
        ..SystemConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(config), &mut hw, &mut sink)
        .unwrap();

    // 0.7467 -> 0.7
    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert!((t.potency.heater_percent - 70.0).abs() < 1e-9);
}

#[test]
fn set_fallback_and_all_off() {
    let mut hw = MockHardware::constant(30.0, 1000.0, Some(80.0));
    let (mut app, mut sink) = make_app(&mut hw);
    app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(hw.chiller(), 85);

    app.handle_command(AppCommand::SetFallback(FallbackPolicy::Off), &mut hw, &mut sink)
        .unwrap();
    assert_eq!(app.config().no_rule_fallback, FallbackPolicy::Off);

    app.handle_command(AppCommand::AllOff, &mut hw, &mut sink)
        .unwrap();
    assert_eq!(hw.last_call(), Some(&ActuatorCall::AllOff));
    assert_eq!(hw.chiller(), 0);

    // next poll commands the chiller again
    app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(hw.chiller(), 85);
}

// ── Sparse rule base ──────────────────────────────────────────

/// Heats only when cold and cools only when hot; 15–25 °C fires nothing.
fn sparse_engine() -> Arc<InferenceEngine> {
    let mut reg = VariableRegistry::new();
    let t = reg.antecedent(TEMPERATURE, Universe::new(0.0, 35.0, 0.5).unwrap()).unwrap();
    reg.antecedent(PRESSURE, Universe::new(500.0, 1500.0, 1.0).unwrap())
        .unwrap();
    reg.antecedent(HUMIDITY, Universe::new(0.0, 100.0, 0.5).unwrap())
        .unwrap();
    let heater = reg.consequent(HEATER, Universe::new(0.0, 1.0, 0.01).unwrap()).unwrap();
    let chiller = reg.consequent(CHILLER, Universe::new(0.0, 1.0, 0.01).unwrap()).unwrap();

    reg.add_term(t, "Cold", MembershipFunction::trapezoidal(0.0, 0.0, 5.0, 10.0).unwrap())
        .unwrap();
    reg.add_term(t, "Hot", MembershipFunction::trapezoidal(25.0, 30.0, 35.0, 35.0).unwrap())
        .unwrap();
    for out in [heater, chiller] {
        reg.add_term(out, "On", MembershipFunction::triangular(0.4, 0.5, 0.6).unwrap())
            .unwrap();
    }

    let mut rules = RuleBase::new();
    rules.add(&reg, &[(TEMPERATURE, "Cold")], &[(HEATER, "On")]).unwrap();
    rules.add(&reg, &[(TEMPERATURE, "Hot")], &[(CHILLER, "On")]).unwrap();
    Arc::new(InferenceEngine::new(reg, rules).unwrap())
}

#[test]
fn unfired_outputs_follow_the_fallback_policy() {
    let mut hw = MockHardware::new([
        snapshot(5.0, 1000.0, Some(40.0)),
        snapshot(20.0, 1000.0, Some(40.0)),
        snapshot(20.0, 1000.0, Some(40.0)),
    ]);
    let mut app = AppService::with_engine(SystemConfig::default(), sparse_engine()).unwrap();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    assert_eq!(
        app.controller().simulation().engine().rules().len(),
        2
    );

    // cold: heater fires, nothing held for the chiller yet
    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!((t.heater_duty, t.chiller_duty), (50, 0));
    assert_eq!(
        sink.events[1],
        AppEvent::NoRuleFired {
            outputs: vec![CHILLER.to_owned()],
            fallback: FallbackPolicy::HoldLast,
        }
    );

    // mild: nothing fires, heater holds its last duty
    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!((t.heater_duty, t.chiller_duty), (50, 0));
    assert_eq!((hw.heater(), hw.chiller()), (50, 0));
    assert_eq!(
        sink.events[3],
        AppEvent::NoRuleFired {
            outputs: vec![HEATER.to_owned(), CHILLER.to_owned()],
            fallback: FallbackPolicy::HoldLast,
        }
    );

    app.handle_command(AppCommand::SetFallback(FallbackPolicy::Off), &mut hw, &mut sink)
        .unwrap();
    let t = app.tick(&mut hw, &mut sink).unwrap();
    assert_eq!((t.heater_duty, t.chiller_duty), (0, 0));
    assert_eq!((hw.heater(), hw.chiller()), (0, 0));
    assert_eq!(
        sink.events[5],
        AppEvent::NoRuleFired {
            outputs: vec![HEATER.to_owned(), CHILLER.to_owned()],
            fallback: FallbackPolicy::Off,
        }
    );
    assert_eq!(sink.telemetry().count(), 3);
}

#[test]
fn custom_engine_survives_defuzzification_switch() {
    let mut hw = MockHardware::constant(5.0, 1000.0, Some(40.0));
    let mut app = AppService::with_engine(SystemConfig::default(), sparse_engine()).unwrap();
    let mut sink = RecordingSink::new();

    let config = SystemConfig {
        defuzzification: DefuzzMethod::MeanOfMaximum,
        ..SystemConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(config), &mut hw, &mut sink)
        .unwrap();

    let engine = app.controller().simulation().engine();
    assert_eq!(engine.rules().len(), 2);
    assert_eq!(engine.defuzzification(), DefuzzMethod::MeanOfMaximum);
    assert_eq!(app.tick(&mut hw, &mut sink).unwrap().heater_duty, 50);
}
