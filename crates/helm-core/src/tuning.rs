use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{key} has an unparseable value {value:?}")]
    InvalidEnv { key: String, value: String },
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("throttle min {min} is above throttle max {max}")]
    InvertedThrottleRange { min: f32, max: f32 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("tuning json is malformed: {0}")]
    Json(String),
}

/// Torque strength per rotational axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttitudeTuning {
    pub pitch_strength: f32,
    pub yaw_strength: f32,
    pub roll_strength: f32,
}

impl Default for AttitudeTuning {
    fn default() -> Self {
        Self {
            pitch_strength: 1.5,
            yaw_strength: 1.5,
            roll_strength: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleTuning {
    /// Starting level, clamped into `[min, max]` when the governor is built.
    pub initial: f32,
    pub step: f32,
    /// May be negative for reverse thrust.
    pub min: f32,
    pub max: f32,
}

impl Default for ThrottleTuning {
    fn default() -> Self {
        Self {
            initial: 4.0,
            step: 0.25,
            min: -2.0,
            max: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulseTuning {
    pub enabled: bool,
    pub cooldown_s: f32,
}

impl Default for ImpulseTuning {
    fn default() -> Self {
        Self {
            enabled: false,
            cooldown_s: 3.0,
        }
    }
}

/// Rates for the flight-assist velocity decay. Each tick interpolates toward
/// zero by `dt * rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DampingConfig {
    pub linear_rate: f32,
    pub angular_rate: f32,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            linear_rate: 0.75,
            angular_rate: 1.0,
        }
    }
}

/// Every tunable constant of the flight controller, supplied at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub attitude: AttitudeTuning,
    pub throttle: ThrottleTuning,
    pub impulse: ImpulseTuning,
    pub damping: DampingConfig,
    /// Continuous axes below this magnitude are treated as inactive.
    pub deadzone: f32,
    /// Whether flight assist starts engaged.
    pub flight_assist: bool,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            attitude: AttitudeTuning::default(),
            throttle: ThrottleTuning::default(),
            impulse: ImpulseTuning::default(),
            damping: DampingConfig::default(),
            deadzone: 0.1,
            flight_assist: false,
        }
    }
}

impl FlightTuning {
    /// Defaults overlaid with any `HELM_*` variables from the process environment.
    pub fn from_env() -> Result<Self, TuningError> {
        Self::default().overlay(|key| env::var(key).ok())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(raw).map_err(|err| TuningError::Json(err.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Applies `HELM_*` overrides read through `lookup` on top of `self`, then validates.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, TuningError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = EnvSource(lookup);

        if let Some(v) = vars.f32("HELM_PITCH_STRENGTH")? {
            self.attitude.pitch_strength = v;
        }
        if let Some(v) = vars.f32("HELM_YAW_STRENGTH")? {
            self.attitude.yaw_strength = v;
        }
        if let Some(v) = vars.f32("HELM_ROLL_STRENGTH")? {
            self.attitude.roll_strength = v;
        }
        if let Some(v) = vars.f32("HELM_THROTTLE_INITIAL")? {
            self.throttle.initial = v;
        }
        if let Some(v) = vars.f32("HELM_THROTTLE_STEP")? {
            self.throttle.step = v;
        }
        if let Some(v) = vars.f32("HELM_THROTTLE_MIN")? {
            self.throttle.min = v;
        }
        if let Some(v) = vars.f32("HELM_THROTTLE_MAX")? {
            self.throttle.max = v;
        }
        if let Some(v) = vars.bool("HELM_IMPULSE_MODE")? {
            self.impulse.enabled = v;
        }
        if let Some(v) = vars.f32("HELM_IMPULSE_COOLDOWN_S")? {
            self.impulse.cooldown_s = v;
        }
        if let Some(v) = vars.f32("HELM_LINEAR_DAMPING")? {
            self.damping.linear_rate = v;
        }
        if let Some(v) = vars.f32("HELM_ANGULAR_DAMPING")? {
            self.damping.angular_rate = v;
        }
        if let Some(v) = vars.f32("HELM_DEADZONE")? {
            self.deadzone = v;
        }
        if let Some(v) = vars.bool("HELM_FLIGHT_ASSIST")? {
            self.flight_assist = v;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        check_range("throttle.step", self.throttle.step, 0.0, 50.0)?;
        check_range("throttle.max", self.throttle.max, 0.0, 500.0)?;
        check_range("throttle.min", self.throttle.min, -500.0, 100.0)?;
        if self.throttle.min > self.throttle.max {
            return Err(TuningError::InvertedThrottleRange {
                min: self.throttle.min,
                max: self.throttle.max,
            });
        }
        check_finite("throttle.initial", self.throttle.initial)?;

        check_range("attitude.pitch_strength", self.attitude.pitch_strength, 0.0, 100.0)?;
        check_range("attitude.yaw_strength", self.attitude.yaw_strength, 0.0, 100.0)?;
        check_range("attitude.roll_strength", self.attitude.roll_strength, 0.0, 10.0)?;

        check_range("impulse.cooldown_s", self.impulse.cooldown_s, 0.0, f32::MAX)?;
        check_range("damping.linear_rate", self.damping.linear_rate, 0.0, f32::MAX)?;
        check_range("damping.angular_rate", self.damping.angular_rate, 0.0, f32::MAX)?;

        check_finite("deadzone", self.deadzone)?;
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(TuningError::OutOfRange {
                field: "deadzone",
                value: self.deadzone,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NonFinite { field })
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), TuningError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(TuningError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

struct EnvSource<F>(F);

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn present(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn f32(&self, key: &str) -> Result<Option<f32>, TuningError> {
        let Some(raw) = self.present(key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|_| invalid(key, raw))
    }

    fn bool(&self, key: &str) -> Result<Option<bool>, TuningError> {
        let Some(raw) = self.present(key) else {
            return Ok(None);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(invalid(key, raw)),
        }
    }
}

fn invalid(key: &str, value: String) -> TuningError {
    TuningError::InvalidEnv {
        key: key.to_string(),
        value,
    }
}
