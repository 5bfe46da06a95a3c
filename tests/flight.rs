use lightsail::flight::{
    AccelerationProfile, DESTINATION_DISTANCE_M, Integrator, LaunchParameters, NOMINAL_STEP_S,
    StepPolicy, Tick, fly,
};

fn proxima(policy: StepPolicy) -> Integrator {
    Integrator::new(LaunchParameters::proxima())
        .expect("reference parameters are valid")
        .with_policy(policy)
}

fn run_ticks(integrator: &Integrator, n: usize) -> Vec<Tick> {
    let mut state = integrator.initial_state();
    let mut ticks = Vec::with_capacity(n);
    for _ in 0..n {
        let tick = integrator.step(state).expect("step");
        state = tick.state;
        ticks.push(tick);
    }
    ticks
}

#[test]
fn reference_constants_follow_radiation_pressure_formula() {
    let params = LaunchParameters::proxima();
    let expected = 2.0 * 1e11 * 0.99 / (0.002 * 2.998e8);
    assert!((params.acceleration_m_s2 - expected).abs() / expected < 1e-12);
    assert!((params.acceleration_m_s2 - 3.3022e5).abs() < 1.0);
    assert!((params.target_velocity_m_s - 5.996e7).abs() < 1e-3);
    assert_eq!(params.nominal_step_s, 1_000.0);
    assert_eq!(params.distance_m, 4.01e16);
}

#[test]
fn velocity_stays_within_bounds_for_both_policies() {
    for policy in [StepPolicy::Persistent, StepPolicy::ResetEachTick] {
        let integrator = proxima(policy);
        let target = integrator.params().target_velocity_m_s;
        for tick in run_ticks(&integrator, 5_000) {
            let v = tick.state.velocity_m_s;
            assert!(v >= 0.0 && v <= target, "{policy:?}: velocity {v} out of range");
        }
    }
}

#[test]
fn position_never_decreases_and_grows_while_moving() {
    for policy in [StepPolicy::Persistent, StepPolicy::ResetEachTick] {
        let integrator = proxima(policy);
        let mut previous = integrator.initial_state();
        for tick in run_ticks(&integrator, 2_000) {
            assert!(tick.state.position_m >= previous.position_m, "{policy:?}");
            if tick.state.velocity_m_s > 0.0 {
                assert!(tick.state.position_m > previous.position_m, "{policy:?}");
            }
            assert!(tick.state.elapsed_s > previous.elapsed_s, "{policy:?}");
            previous = tick.state;
        }
    }
}

#[test]
fn laser_stays_off_after_cutoff() {
    for policy in [StepPolicy::Persistent, StepPolicy::ResetEachTick] {
        let integrator = proxima(policy);
        let ticks = run_ticks(&integrator, 3_000);
        let cutoff = ticks
            .iter()
            .position(|t| t.cutoff)
            .expect("laser should switch off within the run");
        assert_eq!(ticks.iter().filter(|t| t.cutoff).count(), 1);
        for tick in &ticks[cutoff..] {
            assert!(!tick.state.laser_active);
            assert_eq!(tick.acceleration_m_s2, 0.0);
        }
        for tick in &ticks[..cutoff] {
            assert!(tick.state.laser_active);
            assert_eq!(tick.acceleration_m_s2, integrator.params().acceleration_m_s2);
        }
    }
}

#[test]
fn persistent_policy_never_grows_the_step() {
    let integrator = proxima(StepPolicy::Persistent);
    let mut step = integrator.initial_state().step_s;
    for tick in run_ticks(&integrator, 1_000) {
        assert!(tick.state.step_s <= step);
        step = tick.state.step_s;
    }
    assert!(step < NOMINAL_STEP_S);
}

#[test]
fn reset_policy_coasts_at_the_nominal_step() {
    let integrator = proxima(StepPolicy::ResetEachTick);
    let ticks = run_ticks(&integrator, 500);
    let cutoff = ticks.iter().position(|t| t.cutoff).expect("cutoff");
    for tick in &ticks[cutoff + 1..] {
        assert_eq!(tick.state.step_s, NOMINAL_STEP_S);
        assert_eq!(tick.halvings, 0);
    }
}

#[test]
fn small_integer_parameters_converge_exactly_to_target() {
    let integrator = Integrator::new(LaunchParameters {
        acceleration_m_s2: 1.0,
        target_velocity_m_s: 10.0,
        nominal_step_s: 3.0,
        distance_m: 1.0e6,
    })
    .unwrap();

    let ticks = run_ticks(&integrator, 200);
    let cutoff = ticks.iter().position(|t| t.cutoff).expect("converges");
    assert_eq!(ticks[cutoff].state.velocity_m_s, 10.0);
    assert!(!ticks[cutoff].state.laser_active);
    assert_eq!(ticks[cutoff].acceleration_m_s2, 0.0);
    assert!(ticks[cutoff - 1].state.laser_active);
    assert!(ticks[cutoff - 1].state.velocity_m_s < 10.0);
    assert_eq!(ticks[cutoff - 1].acceleration_m_s2, 1.0);

    // The first three ticks run at the nominal step without halving.
    let speeds: Vec<f64> = ticks[..3].iter().map(|t| t.state.velocity_m_s).collect();
    assert_eq!(speeds, vec![3.0, 6.0, 9.0]);
}

#[test]
fn arrival_time_is_burn_time_plus_coast() {
    let integrator = proxima(StepPolicy::ResetEachTick);
    let params = *integrator.params();
    let summary = fly(&integrator, None).expect("flight");

    assert!(summary.arrived);
    assert!(summary.final_position_m >= DESTINATION_DISTANCE_M);
    assert_eq!(summary.final_velocity_m_s, params.target_velocity_m_s);

    let expected = summary.expected_arrival_s(params.distance_m, params.target_velocity_m_s);
    // Arrival lands on the first coast tick at or past the destination; allow for rounding
    // accumulated over several hundred thousand position updates.
    let overshoot = summary.elapsed_s - expected;
    assert!(
        (-1.0..=NOMINAL_STEP_S + 1.0).contains(&overshoot),
        "elapsed {} vs expected {}",
        summary.elapsed_s,
        expected
    );

    let profile = AccelerationProfile::analytic(&params).unwrap();
    assert!((summary.burn_time_s - profile.burn_time_s).abs() < 1e-3);
    assert!((summary.elapsed_s - profile.time_of_flight_s).abs() < 2.0 * NOMINAL_STEP_S);
}

#[test]
fn tick_limit_stops_headless_flight() {
    let integrator = proxima(StepPolicy::Persistent);
    let summary = fly(&integrator, Some(250)).expect("flight");
    assert_eq!(summary.ticks, 250);
    assert!(!summary.arrived);
    assert!(summary.cutoff_tick.is_some());
}

#[test]
fn stepping_is_a_pure_function() {
    let integrator = proxima(StepPolicy::Persistent);
    let mut state = integrator.initial_state();
    for _ in 0..10 {
        let a = integrator.step(state).unwrap();
        let b = integrator.step(state).unwrap();
        assert_eq!(a, b);
        state = a.state;
    }
}
