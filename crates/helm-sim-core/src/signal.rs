use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Control signal for the current frame. Rotational axes lie in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSignal {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub thrust: Vec3,
}

/// Per-axis gate telling the force applicator whether to act this physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyFlags {
    pub pitch: bool,
    pub yaw: bool,
    pub roll: bool,
    pub thrust_x: bool,
    pub thrust_y: bool,
    pub thrust_z: bool,
}

impl ApplyFlags {
    /// Continuous axes (pitch, yaw, thrust x/z) must exceed `deadzone` in
    /// magnitude. Digital axes (roll, thrust y) only need to be non-zero.
    pub fn derive(signal: &ControlSignal, deadzone: f32) -> Self {
        Self {
            pitch: continuous_active(signal.pitch, deadzone),
            yaw: continuous_active(signal.yaw, deadzone),
            roll: digital_active(signal.roll),
            thrust_x: continuous_active(signal.thrust.x, deadzone),
            thrust_y: digital_active(signal.thrust.y),
            thrust_z: continuous_active(signal.thrust.z, deadzone),
        }
    }

    pub fn any(&self) -> bool {
        self.pitch || self.yaw || self.roll || self.thrust_x || self.thrust_y || self.thrust_z
    }
}

fn continuous_active(value: f32, deadzone: f32) -> bool {
    value.abs() > deadzone
}

fn digital_active(value: f32) -> bool {
    value != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadzone_boundary_is_exclusive() {
        assert!(!continuous_active(0.1, 0.1));
        assert!(continuous_active(0.1001, 0.1));
        assert!(continuous_active(-0.5, 0.1));
    }

    #[test]
    fn digital_axes_ignore_the_deadzone() {
        let signal = ControlSignal {
            roll: 0.05,
            thrust: Vec3::new(0.0, -0.05, 0.0),
            ..Default::default()
        };
        let flags = ApplyFlags::derive(&signal, 0.1);
        assert!(flags.roll);
        assert!(flags.thrust_y);
        assert!(!flags.pitch && !flags.yaw && !flags.thrust_x && !flags.thrust_z);
    }
}
