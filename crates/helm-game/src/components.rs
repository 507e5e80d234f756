use bevy::prelude::*;
use bevy::reflect::Reflect;
use helm_core::FlightTuning;
use helm_input_map::{AxisSmoother, PointerFrame, RawInputState, ScreenMetrics};
use helm_sim_core::{
    ApplyFlags, ControlSignal, ForceApplicator, ImpulseState, ThrottleGovernor,
};
use serde::{Deserialize, Serialize};

/// Screen used when no primary window exists (headless hosts, tests).
pub const HEADLESS_SCREEN: ScreenMetrics = ScreenMetrics {
    width: 1280.0,
    height: 720.0,
};

/// Marks the ship steered by the local [`PilotInput`].
#[derive(Debug, Clone, Copy, Default, Component, Reflect, Serialize, Deserialize, PartialEq, Eq)]
#[reflect(Component, Serialize, Deserialize)]
pub struct FlightController;

#[derive(Debug, Clone, Copy, Default, Component, PartialEq)]
pub struct ShipTuning(pub FlightTuning);

/// Latest mapped signal, written every frame and consumed every physics tick.
#[derive(Debug, Clone, Copy, Default, Component, PartialEq)]
pub struct FlightControls {
    pub signal: ControlSignal,
    pub flags: ApplyFlags,
}

#[derive(Debug, Clone, Copy, Component, PartialEq)]
pub struct Throttle(pub ThrottleGovernor);

/// Torque strengths plus the shared impulse cooldown of one ship.
#[derive(Debug, Clone, Copy, Component, PartialEq)]
pub struct Thrusters(pub ForceApplicator);

#[derive(Debug, Clone, Copy, Default, Component, Reflect, Serialize, Deserialize, PartialEq)]
#[reflect(Component, Serialize, Deserialize)]
pub struct FlightAssist {
    pub engaged: bool,
}

#[derive(Debug, Clone, Copy, Default, Component, Reflect, PartialEq)]
#[reflect(Component)]
pub struct FlightTelemetry {
    pub pointer: Vec2,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub thrust: Vec3,
    pub throttle: f32,
    pub flight_assist: bool,
    pub impulse_mode: bool,
    pub impulse_ready: bool,
    pub speed_mps: f32,
}

/// Every controller component for one ship, derived from a single tuning.
#[derive(Bundle, Debug, Clone)]
pub struct FlightControllerBundle {
    pub tuning: ShipTuning,
    pub controls: FlightControls,
    pub throttle: Throttle,
    pub thrusters: Thrusters,
    pub assist: FlightAssist,
    pub telemetry: FlightTelemetry,
}

impl FlightControllerBundle {
    pub fn new(tuning: FlightTuning) -> Self {
        Self {
            tuning: ShipTuning(tuning),
            controls: FlightControls::default(),
            throttle: Throttle(ThrottleGovernor::new(&tuning.throttle)),
            thrusters: Thrusters(ForceApplicator::new(
                tuning.attitude,
                ImpulseState::new(&tuning.impulse),
            )),
            assist: FlightAssist {
                engaged: tuning.flight_assist,
            },
            telemetry: FlightTelemetry::default(),
        }
    }
}

/// Input sampled this frame for the locally piloted ship.
#[derive(Debug, Clone, Copy, Default, Resource, PartialEq)]
pub struct PilotInput(pub RawInputState);

/// Screen geometry captured once at startup.
#[derive(Debug, Clone, Copy, Resource, PartialEq)]
pub struct CapturedScreen {
    pub metrics: ScreenMetrics,
    pub frame: PointerFrame,
}

impl CapturedScreen {
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            metrics,
            frame: PointerFrame::from_metrics(metrics),
        }
    }
}

impl Default for CapturedScreen {
    fn default() -> Self {
        Self::new(HEADLESS_SCREEN)
    }
}

/// Smoothing state for the keyboard-driven strafe and forward axes.
#[derive(Debug, Clone, Copy, Default, Resource, PartialEq)]
pub struct KeyboardAxes {
    pub strafe: AxisSmoother,
    pub forward: AxisSmoother,
}
