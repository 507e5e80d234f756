use serde::{Deserialize, Serialize};

/// Turns a pair of digital keys into a continuous axis that ramps instead of
/// jumping, so the analog deadzone also applies to keyboard thrust.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSmoother {
    /// Units per second toward a held direction.
    pub sensitivity: f32,
    /// Units per second back to zero once released.
    pub gravity: f32,
    /// Jump to zero first when the held direction reverses.
    pub snap: bool,
    value: f32,
}

impl Default for AxisSmoother {
    fn default() -> Self {
        Self {
            sensitivity: 3.0,
            gravity: 3.0,
            snap: true,
            value: 0.0,
        }
    }
}

impl AxisSmoother {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn update(&mut self, positive: bool, negative: bool, dt: f32) -> f32 {
        let target = match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };

        if target == 0.0 {
            self.value = move_toward(self.value, 0.0, self.gravity * dt);
        } else {
            if self.snap && self.value != 0.0 && self.value.signum() != target {
                self.value = 0.0;
            }
            self.value = move_toward(self.value, target, self.sensitivity * dt);
        }
        self.value
    }
}

fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_toward_does_not_overshoot() {
        assert_eq!(move_toward(0.9, 1.0, 0.5), 1.0);
        assert_eq!(move_toward(0.0, -1.0, 0.25), -0.25);
    }
}
