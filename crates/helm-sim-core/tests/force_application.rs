use glam::Vec3;
use helm_core::{AttitudeTuning, ImpulseTuning};
use helm_sim_core::{
    ApplyFlags, BodyAxes, BodyCommandBuffer, ControlSignal, ForceApplicator, ForceAxis, ForceMode,
    Handedness, ImpulseState, RigidBodyHandle,
};

#[derive(Debug, Default)]
struct RecordingBody {
    torques: Vec<(Vec3, ForceMode)>,
    forces: Vec<(Vec3, ForceMode)>,
}

impl RecordingBody {
    fn impulses(&self) -> usize {
        self.forces
            .iter()
            .filter(|(_, mode)| *mode == ForceMode::Impulse)
            .count()
    }
}

impl RigidBodyHandle for RecordingBody {
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        self.torques.push((torque, mode));
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.forces.push((force, mode));
    }
}

fn applicator(impulse_enabled: bool, cooldown_s: f32) -> ForceApplicator {
    ForceApplicator::new(
        AttitudeTuning::default(),
        ImpulseState::new(&ImpulseTuning {
            enabled: impulse_enabled,
            cooldown_s,
        }),
    )
}

fn forward_thrust() -> (ControlSignal, ApplyFlags) {
    let signal = ControlSignal {
        thrust: Vec3::new(0.0, 0.0, 1.0),
        ..Default::default()
    };
    let flags = ApplyFlags::derive(&signal, 0.1);
    (signal, flags)
}

#[test]
fn idle_signal_applies_nothing() {
    let mut applicator = applicator(false, 3.0);
    let mut body = RecordingBody::default();
    let signal = ControlSignal::default();
    let outcome = applicator.apply_step(
        &signal,
        &ApplyFlags::derive(&signal, 0.1),
        4.0,
        0.02,
        &BodyAxes::default(),
        &mut body,
    );
    assert!(body.torques.is_empty());
    assert!(body.forces.is_empty());
    assert_eq!(outcome.torque_axes, 0);
    assert_eq!(outcome.impulse, None);
}

#[test]
fn torques_follow_body_axes_and_strengths() {
    let mut applicator = ForceApplicator::new(
        AttitudeTuning {
            pitch_strength: 2.0,
            yaw_strength: 3.0,
            roll_strength: 4.0,
        },
        ImpulseState::new(&ImpulseTuning::default()),
    );
    let mut body = RecordingBody::default();
    let signal = ControlSignal {
        pitch: 0.5,
        yaw: -1.0,
        roll: 1.0,
        thrust: Vec3::ZERO,
    };
    let axes = BodyAxes {
        right: Vec3::X,
        up: Vec3::Y,
        forward: Vec3::Z,
        handedness: Handedness::Left,
    };
    let outcome = applicator.apply_step(
        &signal,
        &ApplyFlags::derive(&signal, 0.1),
        1.0,
        0.02,
        &axes,
        &mut body,
    );

    assert_eq!(outcome.torque_axes, 3);
    assert_eq!(
        body.torques,
        vec![
            (Vec3::new(-1.0, 0.0, 0.0), ForceMode::Force),
            (Vec3::new(0.0, -3.0, 0.0), ForceMode::Force),
            (Vec3::new(0.0, 0.0, 4.0), ForceMode::Force),
        ]
    );
}

#[test]
fn right_handed_hosts_mirror_torque_but_not_thrust() {
    let signal = ControlSignal {
        pitch: 1.0,
        yaw: 1.0,
        roll: 1.0,
        thrust: Vec3::new(0.0, 0.0, 1.0),
    };
    let flags = ApplyFlags::derive(&signal, 0.1);
    let mut applicator = applicator(false, 3.0);
    let mut body = RecordingBody::default();
    applicator.apply_step(&signal, &flags, 1.0, 0.02, &BodyAxes::default(), &mut body);

    // Pointer up pitches the nose (-Z) toward +Y: positive rotation about +X.
    assert_eq!(body.torques[0].0, Vec3::new(1.5, 0.0, 0.0));
    // Pointer right turns the nose toward +X: negative rotation about +Y.
    assert_eq!(body.torques[1].0, Vec3::new(0.0, -1.5, 0.0));
    assert_eq!(body.torques[2].0, Vec3::new(0.0, 0.0, 1.5));
    assert_eq!(body.forces, vec![(Vec3::new(0.0, 0.0, -1.0), ForceMode::Force)]);
}

#[test]
fn unflagged_axes_are_skipped_even_with_signal() {
    let mut applicator = applicator(false, 3.0);
    let mut body = RecordingBody::default();
    let signal = ControlSignal {
        pitch: 0.8,
        thrust: Vec3::new(0.0, 0.0, 0.8),
        ..Default::default()
    };
    applicator.apply_step(
        &signal,
        &ApplyFlags::default(),
        4.0,
        0.02,
        &BodyAxes::default(),
        &mut body,
    );
    assert!(body.torques.is_empty());
    assert!(body.forces.is_empty());
}

#[test]
fn continuous_thrust_scales_with_throttle_every_tick() {
    let mut applicator = applicator(false, 3.0);
    let mut body = RecordingBody::default();
    let (signal, flags) = forward_thrust();
    let axes = BodyAxes::default();
    for _ in 0..3 {
        applicator.apply_step(&signal, &flags, 2.5, 0.02, &axes, &mut body);
    }
    assert_eq!(body.forces.len(), 3);
    for (force, mode) in &body.forces {
        assert_eq!(*mode, ForceMode::Force);
        assert_eq!(*force, Vec3::new(0.0, 0.0, -2.5));
    }
}

#[test]
fn negative_throttle_reverses_thrust() {
    let mut applicator = applicator(false, 3.0);
    let mut body = RecordingBody::default();
    let (signal, flags) = forward_thrust();
    applicator.apply_step(&signal, &flags, -2.0, 0.02, &BodyAxes::default(), &mut body);
    assert_eq!(body.forces, vec![(Vec3::new(0.0, 0.0, 2.0), ForceMode::Force)]);
}

#[test]
fn impulse_fires_once_at_cooldown_over_four_seconds() {
    let mut applicator = applicator(true, 3.0);
    let (signal, flags) = forward_thrust();
    let axes = BodyAxes::default();

    let mut fired_at = Vec::new();
    for tick in 1..=4 {
        let mut body = RecordingBody::default();
        let outcome = applicator.apply_step(&signal, &flags, 4.0, 1.0, &axes, &mut body);
        if outcome.impulse.is_some() {
            fired_at.push(tick);
            assert_eq!(
                body.forces,
                vec![(Vec3::new(0.0, 0.0, -4.0), ForceMode::Impulse)]
            );
        } else {
            assert!(body.forces.is_empty());
        }
    }
    assert_eq!(fired_at, vec![3]);
    assert_eq!(applicator.impulse.elapsed_since_last(), 1.0);
}

#[test]
fn impulse_timer_advances_without_thrust() {
    let mut applicator = applicator(true, 3.0);
    let mut body = RecordingBody::default();
    let idle = ControlSignal::default();
    for _ in 0..5 {
        applicator.apply_step(
            &idle,
            &ApplyFlags::default(),
            4.0,
            1.0,
            &BodyAxes::default(),
            &mut body,
        );
    }
    assert_eq!(applicator.impulse.elapsed_since_last(), 5.0);
    assert!(applicator.impulse.ready());

    let (signal, flags) = forward_thrust();
    let outcome =
        applicator.apply_step(&signal, &flags, 4.0, 1.0, &BodyAxes::default(), &mut body);
    assert_eq!(outcome.impulse, Some(ForceAxis::ThrustZ));
    assert_eq!(applicator.impulse.elapsed_since_last(), 0.0);
}

#[test]
fn thrust_axes_share_one_cooldown() {
    let mut applicator = applicator(true, 2.0);
    let signal = ControlSignal {
        thrust: Vec3::new(1.0, 1.0, 1.0),
        ..Default::default()
    };
    let flags = ApplyFlags::derive(&signal, 0.1);
    let axes = BodyAxes::default();

    let mut body = RecordingBody::default();
    let first = applicator.apply_step(&signal, &flags, 1.0, 2.0, &axes, &mut body);
    assert_eq!(first.impulse, Some(ForceAxis::ThrustZ));
    assert_eq!(body.impulses(), 1);

    let mut body = RecordingBody::default();
    let second = applicator.apply_step(&signal, &flags, 1.0, 1.0, &axes, &mut body);
    assert_eq!(second.impulse, None);
    assert_eq!(body.impulses(), 0);
}

#[test]
fn strafe_wins_the_cooldown_when_forward_is_idle() {
    let mut applicator = applicator(true, 1.0);
    let signal = ControlSignal {
        thrust: Vec3::new(-1.0, 1.0, 0.0),
        ..Default::default()
    };
    let flags = ApplyFlags::derive(&signal, 0.1);
    let mut body = RecordingBody::default();
    let outcome = applicator.apply_step(&signal, &flags, 3.0, 1.0, &BodyAxes::default(), &mut body);
    assert_eq!(outcome.impulse, Some(ForceAxis::ThrustX));
    assert_eq!(body.forces, vec![(Vec3::new(-3.0, 0.0, 0.0), ForceMode::Impulse)]);
}

#[test]
fn vertical_thrust_applies_once_per_tick_in_either_mode() {
    let signal = ControlSignal {
        thrust: Vec3::new(0.0, -1.0, 0.0),
        ..Default::default()
    };
    let flags = ApplyFlags::derive(&signal, 0.1);

    let mut continuous = applicator(false, 0.0);
    let mut body = RecordingBody::default();
    let outcome =
        continuous.apply_step(&signal, &flags, 2.0, 0.02, &BodyAxes::default(), &mut body);
    assert_eq!(body.forces, vec![(Vec3::new(0.0, -2.0, 0.0), ForceMode::Force)]);
    assert_eq!(outcome.continuous_thrust_axes, 1);
    assert_eq!(outcome.impulse, None);

    let mut impulsive = applicator(true, 0.0);
    let mut body = RecordingBody::default();
    let outcome =
        impulsive.apply_step(&signal, &flags, 2.0, 0.02, &BodyAxes::default(), &mut body);
    assert_eq!(body.forces, vec![(Vec3::new(0.0, -2.0, 0.0), ForceMode::Impulse)]);
    assert_eq!(outcome.continuous_thrust_axes, 0);
    assert_eq!(outcome.impulse, Some(ForceAxis::ThrustY));
}

#[test]
fn continuous_outcome_counts_every_active_thrust_axis() {
    let signal = ControlSignal {
        thrust: Vec3::new(0.5, 1.0, -0.5),
        ..Default::default()
    };
    let flags = ApplyFlags::derive(&signal, 0.1);
    let mut applicator = applicator(false, 3.0);
    let mut body = RecordingBody::default();
    let outcome = applicator.apply_step(&signal, &flags, 1.0, 0.02, &BodyAxes::default(), &mut body);
    assert_eq!(outcome.continuous_thrust_axes, 3);
    assert_eq!(outcome.torque_axes, 0);
    assert_eq!(body.forces.len(), 3);
}

#[test]
fn command_buffer_accumulates_by_mode() {
    let mut buffer = BodyCommandBuffer::default();
    assert!(buffer.is_empty());
    buffer.add_force(Vec3::X, ForceMode::Force);
    buffer.add_force(Vec3::X, ForceMode::Force);
    buffer.add_force(Vec3::Y, ForceMode::Impulse);
    buffer.add_torque(Vec3::Z, ForceMode::Force);
    buffer.add_torque(Vec3::NEG_Z, ForceMode::Impulse);
    assert_eq!(buffer.force, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(buffer.linear_impulse, Vec3::Y);
    assert_eq!(buffer.torque, Vec3::Z);
    assert_eq!(buffer.angular_impulse, Vec3::NEG_Z);
    assert!(!buffer.is_empty());
}
