//! Property-based tests for translation and session state machine invariants.

use logi_ffb::prelude::*;
use logi_ffb_binding::mock::MockLoader;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Ensure,
    Angle(i32),
    Stop,
    Reconfigure,
    Shutdown,
    ForceFault(bool),
    StopFault(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Ensure),
        (-600i32..=600).prop_map(Op::Angle),
        Just(Op::Stop),
        Just(Op::Reconfigure),
        Just(Op::Shutdown),
        any::<bool>().prop_map(Op::ForceFault),
        any::<bool>().prop_map(Op::StopFault),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_translate_bounded(degrees in -450.0f64..=450.0) {
        let force = translate(AngleCommand::new(degrees));
        prop_assert!((-100..=100).contains(&force.percent()));
    }

    #[test]
    fn prop_translate_bounded_outside_domain(degrees in any::<f64>()) {
        let force = translate(AngleCommand::new(degrees));
        prop_assert!((-100..=100).contains(&force.percent()));
    }

    #[test]
    fn prop_translate_monotonic(a in -450.0f64..=450.0, b in -450.0f64..=450.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(translate(AngleCommand::new(lo)) <= translate(AngleCommand::new(hi)));
    }

    #[test]
    fn prop_translate_is_odd(degrees in 0.0f64..=450.0) {
        let pos = translate(AngleCommand::new(degrees)).percent();
        let neg = translate(AngleCommand::new(-degrees)).percent();
        prop_assert_eq!(pos, -neg);
    }

    #[test]
    fn prop_dead_zone_output_never_inside_band(degrees in -450.0f64..=450.0) {
        let snapped = apply_dead_zone(AngleCommand::new(degrees)).degrees();
        prop_assert!(snapped == 0.0 || snapped.abs() >= DEAD_ZONE_DEG);
    }

    #[test]
    fn prop_session_invariants_hold(ops in prop::collection::vec(op(), 0..40)) {
        let loader = MockLoader::new();
        let mut session = DeviceSession::with_loader(loader.clone(), DeviceConfig::default());

        for op in ops {
            let before = session.state();
            let loads_before = loader.calls().loads;

            match op {
                Op::Ensure => match session.ensure_initialized() {
                    Ok(state) => prop_assert_eq!(state, session.state()),
                    Err(_) => {
                        // Only a fresh attempt can fail, and it always demotes.
                        prop_assert_eq!(before, ConnectionState::Unknown);
                        prop_assert_eq!(session.state(), ConnectionState::Disconnected);
                    }
                },
                Op::Angle(deg) => {
                    if let Ok(CommandOutcome::Sent(force)) = session.send_angle(AngleCommand::from(deg)) {
                        prop_assert!((-100..=100).contains(&force.percent()));
                    }
                }
                Op::Stop => match session.stop_all() {
                    Ok(CommandOutcome::Stopped) => {
                        prop_assert_eq!(session.state(), ConnectionState::Connected);
                    }
                    Ok(outcome) => {
                        prop_assert!(!outcome.was_forwarded());
                        prop_assert_eq!(session.state(), ConnectionState::Disconnected);
                    }
                    Err(_) => prop_assert_eq!(session.state(), ConnectionState::Disconnected),
                },
                Op::Reconfigure => {
                    session.reconfigure(DeviceConfig::default());
                    prop_assert_eq!(session.state(), ConnectionState::Unknown);
                    prop_assert!(!session.has_handle());
                }
                Op::Shutdown => {
                    session.shutdown();
                    prop_assert_eq!(session.state(), ConnectionState::Unknown);
                    prop_assert!(!session.has_handle());
                }
                Op::ForceFault(fault) => loader.set_force_fault(fault),
                Op::StopFault(fault) => loader.set_stop_fault(fault),
            }

            // A load only ever happens out of Unknown.
            if loader.calls().loads > loads_before {
                prop_assert_eq!(before, ConnectionState::Unknown);
            }
            // Never back to Connected from Disconnected without passing Unknown.
            if before == ConnectionState::Disconnected {
                prop_assert_ne!(session.state(), ConnectionState::Connected);
            }
            // A handle is only held once an attempt has been cached.
            if session.has_handle() {
                prop_assert_ne!(session.state(), ConnectionState::Unknown);
            }
            prop_assert!(loader.live_bindings() <= 1);
        }
    }

    #[test]
    fn prop_probe_mirrors_slots(slots in prop::collection::vec(any::<bool>(), 0..8)) {
        let loader = MockLoader::new().with_connected_slots(&slots);
        let count = u8::try_from(slots.len()).unwrap_or(u8::MAX);

        let report = DiagnosticProber::with_loader(loader.clone())
            .probe(&BindingSource::Default, count);
        prop_assert!(report.is_ok());
        if let Ok(report) = report {
            let observed: Vec<bool> = report.entries().iter().map(|e| e.connected).collect();
            prop_assert_eq!(&observed, &slots);
            prop_assert_eq!(report.any_device_found(), slots.iter().any(|c| *c));
        }
        prop_assert_eq!(loader.live_bindings(), 0);
    }
}
