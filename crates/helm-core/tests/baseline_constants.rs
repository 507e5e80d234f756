use helm_core::{FlightTuning, RENDER_TARGET_HZ, SIM_TICK_HZ, sim_tick_dt_s};

#[test]
fn baseline_constants_match_design_defaults() {
    assert_eq!(SIM_TICK_HZ, 50);
    assert_eq!(RENDER_TARGET_HZ, 60);
    assert!((sim_tick_dt_s() - 0.02).abs() < 1e-7);
}

#[test]
fn default_tuning_matches_controller_defaults() {
    let tuning = FlightTuning::default();
    assert_eq!(tuning.attitude.pitch_strength, 1.5);
    assert_eq!(tuning.attitude.yaw_strength, 1.5);
    assert_eq!(tuning.attitude.roll_strength, 1.5);
    assert_eq!(tuning.throttle.step, 0.25);
    assert_eq!(tuning.throttle.min, -2.0);
    assert_eq!(tuning.throttle.max, 4.0);
    assert_eq!(tuning.impulse.cooldown_s, 3.0);
    assert!(!tuning.impulse.enabled);
    assert_eq!(tuning.damping.linear_rate, 0.75);
    assert_eq!(tuning.damping.angular_rate, 1.0);
    assert_eq!(tuning.deadzone, 0.1);
    assert!(!tuning.flight_assist);
    assert!(tuning.validate().is_ok());
}
