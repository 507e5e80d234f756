use helm_core::ThrottleTuning;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrottleBound {
    Min,
    Max,
}

/// Accumulated throttle level. `min <= level <= max` holds after every public
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrottleGovernor {
    level: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl ThrottleGovernor {
    pub fn new(tuning: &ThrottleTuning) -> Self {
        let mut governor = Self {
            level: tuning.initial,
            min: tuning.min,
            max: tuning.max,
            step: tuning.step,
        };
        governor.clamp();
        governor
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Raises the level by one step. Called every frame the key is held.
    pub fn increment(&mut self) -> f32 {
        self.level += self.step;
        self.clamp()
    }

    /// Lowers the level by one step. Called every frame the key is held.
    pub fn decrement(&mut self) -> f32 {
        self.level -= self.step;
        self.clamp()
    }

    /// Clamps the level into `[min, max]` and returns it.
    pub fn clamp(&mut self) -> f32 {
        // max/min instead of f32::clamp, which panics on an inverted range.
        self.level = self.level.max(self.min).min(self.max);
        self.level
    }

    /// Which bound the level currently sits on, if any.
    pub fn bound(&self) -> Option<ThrottleBound> {
        if self.level >= self.max {
            Some(ThrottleBound::Max)
        } else if self.level <= self.min {
            Some(ThrottleBound::Min)
        } else {
            None
        }
    }
}
