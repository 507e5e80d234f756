use glam::Vec3;
use helm_core::DampingConfig;
use serde::{Deserialize, Serialize};

use crate::body::BodyVelocity;

/// Flight assist: pulls linear and angular velocity toward rest. Stateless; the
/// caller decides whether it is engaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightAssistFilter {
    pub damping: DampingConfig,
}

impl FlightAssistFilter {
    pub fn new(damping: DampingConfig) -> Self {
        Self { damping }
    }

    /// Interpolates each component toward zero by `dt * rate`, clamped to
    /// `[0, 1]`. Repeated every frame this decays exponentially.
    pub fn apply(&self, velocity: Vec3, angular_velocity: Vec3, dt: f32) -> (Vec3, Vec3) {
        (
            lerp_to_rest(velocity, dt * self.damping.linear_rate),
            lerp_to_rest(angular_velocity, dt * self.damping.angular_rate),
        )
    }

    pub fn apply_to<B: BodyVelocity + ?Sized>(&self, body: &mut B, dt: f32) {
        let (velocity, angular_velocity) =
            self.apply(body.velocity(), body.angular_velocity(), dt);
        body.set_velocity(velocity);
        body.set_angular_velocity(angular_velocity);
    }
}

fn lerp_to_rest(value: Vec3, t: f32) -> Vec3 {
    value.lerp(Vec3::ZERO, t.clamp(0.0, 1.0))
}
