//! Narrow interface to the host's rigid body.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceMode {
    /// Continuous force integrated over the physics step.
    Force,
    /// Instantaneous momentum change.
    Impulse,
}

/// Coordinate-system convention of the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

/// The body's local axes expressed in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyAxes {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    pub handedness: Handedness,
}

impl Default for BodyAxes {
    fn default() -> Self {
        Self {
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::NEG_Z,
            handedness: Handedness::Right,
        }
    }
}

impl BodyAxes {
    /// Torque about `axis` scaled by `amount`, expressed for this host. Control
    /// torques are defined in left-handed terms; a right-handed host mirrors
    /// them so the same command turns the body the same way on screen.
    pub fn torque(&self, axis: Vec3, amount: f32) -> Vec3 {
        match self.handedness {
            Handedness::Left => axis * amount,
            Handedness::Right => -(axis * amount),
        }
    }
}

pub trait RigidBodyHandle {
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode);
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
}

pub trait BodyVelocity {
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);
}

/// Sums every command issued during one physics step so the host can forward
/// them to its integrator in one go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyCommandBuffer {
    pub force: Vec3,
    pub torque: Vec3,
    pub linear_impulse: Vec3,
    pub angular_impulse: Vec3,
}

impl BodyCommandBuffer {
    pub fn is_empty(&self) -> bool {
        self.force == Vec3::ZERO
            && self.torque == Vec3::ZERO
            && self.linear_impulse == Vec3::ZERO
            && self.angular_impulse == Vec3::ZERO
    }
}

impl RigidBodyHandle for BodyCommandBuffer {
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.torque += torque,
            ForceMode::Impulse => self.angular_impulse += torque,
        }
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.force += force,
            ForceMode::Impulse => self.linear_impulse += force,
        }
    }
}
