//! Physics-phase force application.
//!
//! Rotational axes always use continuous torque. Thrust axes use continuous
//! force, or cooldown-gated impulses when impulse mode is enabled. All three
//! thrust axes share one [`ImpulseState`]: an impulse on any axis restarts the
//! cooldown for every axis.

use glam::Vec3;
use helm_core::{AttitudeTuning, ImpulseTuning};
use serde::{Deserialize, Serialize};

use crate::body::{BodyAxes, ForceMode, RigidBodyHandle};
use crate::signal::{ApplyFlags, ControlSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceAxis {
    ThrustX,
    ThrustY,
    ThrustZ,
}

/// Shared cooldown for impulsive thrust.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpulseState {
    pub enabled: bool,
    pub cooldown: f32,
    elapsed_since_last: f32,
}

impl ImpulseState {
    pub fn new(tuning: &ImpulseTuning) -> Self {
        Self {
            enabled: tuning.enabled,
            cooldown: tuning.cooldown_s,
            elapsed_since_last: 0.0,
        }
    }

    pub fn elapsed_since_last(&self) -> f32 {
        self.elapsed_since_last
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed_since_last += dt;
    }

    pub fn ready(&self) -> bool {
        self.elapsed_since_last >= self.cooldown
    }

    fn reset(&mut self) {
        self.elapsed_since_last = 0.0;
    }
}

/// What a single [`ForceApplicator::apply_step`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub torque_axes: u8,
    pub continuous_thrust_axes: u8,
    pub impulse: Option<ForceAxis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceApplicator {
    pub strengths: AttitudeTuning,
    pub impulse: ImpulseState,
}

impl ForceApplicator {
    pub fn new(strengths: AttitudeTuning, impulse: ImpulseState) -> Self {
        Self { strengths, impulse }
    }

    /// Runs one physics tick: advances the impulse timer by `dt`, then issues
    /// torque for each flagged rotational axis and force for each flagged
    /// thrust axis. Thrust axes are evaluated Z, X, Y; with impulse mode on,
    /// the first ready axis in that order consumes the shared cooldown.
    pub fn apply_step<B: RigidBodyHandle + ?Sized>(
        &mut self,
        signal: &ControlSignal,
        flags: &ApplyFlags,
        throttle: f32,
        dt: f32,
        axes: &BodyAxes,
        body: &mut B,
    ) -> StepOutcome {
        self.impulse.advance(dt);
        let mut outcome = StepOutcome::default();

        if flags.pitch {
            body.add_torque(
                axes.torque(axes.right, -signal.pitch * self.strengths.pitch_strength),
                ForceMode::Force,
            );
            outcome.torque_axes += 1;
        }
        if flags.yaw {
            body.add_torque(
                axes.torque(axes.up, signal.yaw * self.strengths.yaw_strength),
                ForceMode::Force,
            );
            outcome.torque_axes += 1;
        }
        if flags.roll {
            body.add_torque(
                axes.torque(axes.forward, signal.roll * self.strengths.roll_strength),
                ForceMode::Force,
            );
            outcome.torque_axes += 1;
        }

        let thrust_axes = [
            (flags.thrust_z, ForceAxis::ThrustZ, axes.forward * (signal.thrust.z * throttle)),
            (flags.thrust_x, ForceAxis::ThrustX, axes.right * (signal.thrust.x * throttle)),
            (flags.thrust_y, ForceAxis::ThrustY, axes.up * (throttle * signal.thrust.y)),
        ];
        for (active, axis, force) in thrust_axes {
            if active {
                self.apply_thrust(axis, force, body, &mut outcome);
            }
        }

        outcome
    }

    fn apply_thrust<B: RigidBodyHandle + ?Sized>(
        &mut self,
        axis: ForceAxis,
        force: Vec3,
        body: &mut B,
        outcome: &mut StepOutcome,
    ) {
        if !self.impulse.enabled {
            body.add_force(force, ForceMode::Force);
            outcome.continuous_thrust_axes += 1;
        } else if self.impulse.ready() {
            body.add_force(force, ForceMode::Impulse);
            self.impulse.reset();
            outcome.impulse = Some(axis);
        }
    }
}
