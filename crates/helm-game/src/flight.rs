//! Flight Control Systems
//!
//! Frame phase (`Update`, chained):
//! 1. `sample_pilot_input` fills [`PilotInput`] from the host devices
//! 2. [`map_pilot_controls`] maps it into signal + apply flags, steps the
//!    throttle and toggles flight assist on key release
//! 3. [`apply_flight_assist`] damps velocities of assisted ships
//! 4. [`refresh_flight_telemetry`] snapshots state for HUD/inspection
//!
//! Physics phase (`FixedUpdate`):
//! - [`apply_flight_forces`] advances the impulse cooldown and forwards the
//!   resulting torque/force/impulse to Avian's `Forces` helper, which the
//!   integrator consumes in the same fixed step.
//!
//! Damping overwrites velocity, so it never runs between force application
//! and integration.

use avian3d::prelude::*;
use bevy::prelude::*;
use helm_input_map::map_raw_input;
use helm_sim_core::{
    BodyAxes, BodyCommandBuffer, BodyVelocity, FlightAssistFilter, Handedness,
};

use crate::components::{
    CapturedScreen, FlightAssist, FlightController, FlightControls, FlightTelemetry, PilotInput,
    ShipTuning, Throttle, Thrusters,
};

/// Maps the pilot's input onto every ship under local control.
#[allow(clippy::type_complexity)]
pub fn map_pilot_controls(
    pilot: Res<PilotInput>,
    screen: Res<CapturedScreen>,
    mut ships: Query<
        (
            Entity,
            &ShipTuning,
            &mut FlightControls,
            &mut Throttle,
            &mut FlightAssist,
        ),
        With<FlightController>,
    >,
) {
    for (entity, tuning, mut controls, mut throttle, mut assist) in &mut ships {
        let command = map_raw_input(&pilot.0, &screen.frame, tuning.0.deadzone);
        controls.signal = command.signal;
        controls.flags = command.flags;

        // Repeats every frame while held.
        let bound_before = throttle.0.bound();
        if command.throttle_up {
            throttle.0.increment();
        }
        if command.throttle_down {
            throttle.0.decrement();
        }
        let bound_after = throttle.0.bound();
        if bound_after.is_some() && bound_after != bound_before {
            debug!(
                entity = ?entity,
                bound = ?bound_after,
                level = throttle.0.level(),
                "throttle reached bound"
            );
        }

        if command.toggle_assist {
            assist.engaged = !assist.engaged;
            debug!(entity = ?entity, engaged = assist.engaged, "flight assist toggled");
        }
    }
}

pub fn apply_flight_assist(
    time: Res<Time>,
    mut ships: Query<(
        &ShipTuning,
        &FlightAssist,
        &mut LinearVelocity,
        &mut AngularVelocity,
    )>,
) {
    let dt = time.delta_secs();
    for (tuning, assist, mut linear, mut angular) in &mut ships {
        if !assist.engaged {
            continue;
        }
        let mut body = AvianVelocity {
            linear: &mut linear.0,
            angular: &mut angular.0,
        };
        FlightAssistFilter::new(tuning.0.damping).apply_to(&mut body, dt);
    }
}

/// Avian's velocity components seen through the core's velocity interface.
struct AvianVelocity<'a> {
    linear: &'a mut Vec3,
    angular: &'a mut Vec3,
}

impl BodyVelocity for AvianVelocity<'_> {
    fn velocity(&self) -> Vec3 {
        *self.linear
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        *self.linear = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        *self.angular
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        *self.angular = angular_velocity;
    }
}

/// Applies the latest mapped controls to each ship's rigid body.
pub fn apply_flight_forces(
    time: Res<Time>,
    mut ships: Query<(
        Entity,
        &FlightControls,
        &Throttle,
        &mut Thrusters,
        &Transform,
        Forces,
    )>,
) {
    let dt = time.delta_secs();
    for (entity, controls, throttle, mut thrusters, transform, mut forces) in &mut ships {
        let axes = BodyAxes {
            right: transform.right().as_vec3(),
            up: transform.up().as_vec3(),
            forward: transform.forward().as_vec3(),
            handedness: Handedness::Right,
        };

        let mut commands = BodyCommandBuffer::default();
        let outcome = thrusters.0.apply_step(
            &controls.signal,
            &controls.flags,
            throttle.0.level(),
            dt,
            &axes,
            &mut commands,
        );
        if let Some(axis) = outcome.impulse {
            debug!(
                entity = ?entity,
                axis = ?axis,
                at_s = time.elapsed_secs(),
                "impulse thrust fired"
            );
        }

        if commands.is_empty() {
            continue;
        }
        forces.apply_force(commands.force);
        forces.apply_torque(commands.torque);
        forces.apply_linear_impulse(commands.linear_impulse);
        forces.apply_angular_impulse(commands.angular_impulse);
    }
}

#[allow(clippy::type_complexity)]
pub fn refresh_flight_telemetry(
    pilot: Res<PilotInput>,
    mut ships: Query<(
        &FlightControls,
        &Throttle,
        &Thrusters,
        &FlightAssist,
        Option<&LinearVelocity>,
        Has<FlightController>,
        &mut FlightTelemetry,
    )>,
) {
    for (controls, throttle, thrusters, assist, velocity, piloted, mut telemetry) in &mut ships {
        if piloted {
            telemetry.pointer = pilot.0.pointer;
        }
        telemetry.pitch = controls.signal.pitch;
        telemetry.yaw = controls.signal.yaw;
        telemetry.roll = controls.signal.roll;
        telemetry.thrust = controls.signal.thrust;
        telemetry.throttle = throttle.0.level();
        telemetry.flight_assist = assist.engaged;
        telemetry.impulse_mode = thrusters.0.impulse.enabled;
        telemetry.impulse_ready = thrusters.0.impulse.ready();
        telemetry.speed_mps = velocity.map(|v| v.0.length()).unwrap_or(0.0);
    }
}

/// Ships without a dynamic body silently ignore every force command.
pub fn warn_missing_rigid_body(
    added: Query<(Entity, Option<&Name>), (Added<FlightControls>, Without<RigidBody>)>,
) {
    for (entity, name) in &added {
        warn!(
            entity = ?entity,
            name = ?name.map(Name::as_str),
            "flight controller attached to an entity without a RigidBody"
        );
    }
}
