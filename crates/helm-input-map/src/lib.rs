//! Maps a host-agnostic snapshot of pilot input into control signals.

mod axis;

pub use axis::AxisSmoother;

use glam::Vec2;
use helm_sim_core::{ApplyFlags, ControlSignal, map_pitch, map_roll, map_thrust, map_yaw};
use serde::{Deserialize, Serialize};

/// Logical pilot actions bound to digital inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightAction {
    ThrottleUp,
    ThrottleDown,
    ToggleAssist,
    /// Produces a roll of +1.
    RollNegative,
    /// Produces a roll of -1.
    RollPositive,
    VerticalUp,
    VerticalDown,
}

impl FlightAction {
    pub const ALL: [FlightAction; 7] = [
        FlightAction::ThrottleUp,
        FlightAction::ThrottleDown,
        FlightAction::ToggleAssist,
        FlightAction::RollNegative,
        FlightAction::RollPositive,
        FlightAction::VerticalUp,
        FlightAction::VerticalDown,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn insert(&mut self, action: FlightAction) {
        self.0 |= action.bit();
    }

    pub fn contains(self, action: FlightAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn with(mut self, action: FlightAction) -> Self {
        self.insert(action);
        self
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// One frame of sampled input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputState {
    /// Pointer position in screen pixels, bottom-left origin.
    pub pointer: Vec2,
    /// Actions held this frame.
    pub held: ActionSet,
    /// Actions whose input went from held to released this frame.
    pub released: ActionSet,
    /// Strafe axis in `[-1, 1]`, right positive.
    pub strafe: f32,
    /// Forward/back axis in `[-1, 1]`, forward positive.
    pub forward: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
}

/// Screen geometry captured once when the controller attaches. Resizing
/// afterwards is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerFrame {
    pub center: Vec2,
    pub quarter: Vec2,
}

impl PointerFrame {
    pub fn from_metrics(metrics: ScreenMetrics) -> Self {
        Self {
            center: Vec2::new(metrics.width / 2.0, metrics.height / 2.0),
            quarter: Vec2::new(metrics.width * 0.25, metrics.height * 0.25),
        }
    }
}

/// Everything the frame phase derives from one [`RawInputState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotCommand {
    pub signal: ControlSignal,
    pub flags: ApplyFlags,
    pub throttle_up: bool,
    pub throttle_down: bool,
    pub toggle_assist: bool,
}

pub fn map_raw_input(raw: &RawInputState, frame: &PointerFrame, deadzone: f32) -> PilotCommand {
    let signal = ControlSignal {
        pitch: map_pitch(raw.pointer.y, frame.center.y, frame.quarter.y),
        yaw: map_yaw(raw.pointer.x, frame.center.x, frame.quarter.x),
        roll: map_roll(
            raw.held.contains(FlightAction::RollNegative),
            raw.held.contains(FlightAction::RollPositive),
        ),
        thrust: map_thrust(
            raw.strafe,
            raw.forward,
            raw.held.contains(FlightAction::VerticalUp),
            raw.held.contains(FlightAction::VerticalDown),
        ),
    };

    PilotCommand {
        signal,
        flags: ApplyFlags::derive(&signal, deadzone),
        throttle_up: raw.held.contains(FlightAction::ThrottleUp),
        throttle_down: raw.held.contains(FlightAction::ThrottleDown),
        toggle_assist: raw.released.contains(FlightAction::ToggleAssist),
    }
}
