//! Host input sampling.
//!
//! Keyboard, pointer and gamepad state → [`PilotInput`] once per frame. The
//! mapping into control signals lives in `helm-input-map` so it stays
//! independent of Bevy.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use helm_input_map::{FlightAction, ScreenMetrics};

use crate::components::{CapturedScreen, HEADLESS_SCREEN, KeyboardAxes, PilotInput};

/// Stick deflection below this is ignored so a resting gamepad does not
/// override the keyboard axes.
const STICK_DEADZONE: f32 = 0.1;

#[derive(Debug, Clone, Resource, PartialEq, Eq)]
pub struct KeyBindings {
    pub throttle_up: KeyCode,
    pub throttle_down: KeyCode,
    pub toggle_assist: KeyCode,
    pub roll_negative: KeyCode,
    pub roll_positive: KeyCode,
    pub vertical_up: KeyCode,
    pub vertical_down: KeyCode,
    pub strafe_left: KeyCode,
    pub strafe_right: KeyCode,
    pub forward: KeyCode,
    pub back: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            throttle_up: KeyCode::Equal,
            throttle_down: KeyCode::Minus,
            toggle_assist: KeyCode::CapsLock,
            roll_negative: KeyCode::KeyQ,
            roll_positive: KeyCode::KeyE,
            vertical_up: KeyCode::Space,
            vertical_down: KeyCode::ShiftLeft,
            strafe_left: KeyCode::KeyA,
            strafe_right: KeyCode::KeyD,
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
        }
    }
}

impl KeyBindings {
    pub fn key(&self, action: FlightAction) -> KeyCode {
        match action {
            FlightAction::ThrottleUp => self.throttle_up,
            FlightAction::ThrottleDown => self.throttle_down,
            FlightAction::ToggleAssist => self.toggle_assist,
            FlightAction::RollNegative => self.roll_negative,
            FlightAction::RollPositive => self.roll_positive,
            FlightAction::VerticalUp => self.vertical_up,
            FlightAction::VerticalDown => self.vertical_down,
        }
    }
}

/// Captures the primary window size once. Later resizes are not tracked.
pub fn capture_screen_metrics(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut screen: ResMut<CapturedScreen>,
    mut pilot: ResMut<PilotInput>,
) {
    let metrics = match windows.single() {
        Ok(window) if window.width() > 0.0 && window.height() > 0.0 => ScreenMetrics {
            width: window.width(),
            height: window.height(),
        },
        Ok(window) => {
            warn!(
                width = window.width(),
                height = window.height(),
                "primary window has no area; using headless screen metrics"
            );
            HEADLESS_SCREEN
        }
        Err(_) => HEADLESS_SCREEN,
    };

    *screen = CapturedScreen::new(metrics);
    pilot.0.pointer = screen.frame.center;
    info!(
        width = metrics.width,
        height = metrics.height,
        "captured screen metrics for pointer attitude control"
    );
}

pub fn sample_pilot_input(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    gamepads: Query<&Gamepad>,
    mut axes: ResMut<KeyboardAxes>,
    mut pilot: ResMut<PilotInput>,
) {
    let dt = time.delta_secs();
    let raw = &mut pilot.0;

    // Window coordinates are top-left origin; the mapper expects bottom-left.
    // Outside the window the last known position is kept.
    if let Ok(window) = windows.single()
        && let Some(cursor) = window.cursor_position()
    {
        raw.pointer = Vec2::new(cursor.x, window.height() - cursor.y);
    }

    raw.held.clear();
    raw.released.clear();
    for action in FlightAction::ALL {
        let key = bindings.key(action);
        if keys.pressed(key) {
            raw.held.insert(action);
        }
        if keys.just_released(key) {
            raw.released.insert(action);
        }
    }

    let mut strafe = axes.strafe.update(
        keys.pressed(bindings.strafe_right),
        keys.pressed(bindings.strafe_left),
        dt,
    );
    let mut forward = axes.forward.update(
        keys.pressed(bindings.forward),
        keys.pressed(bindings.back),
        dt,
    );
    for gamepad in &gamepads {
        let stick_x = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
        let stick_y = gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
        if stick_x.abs() > STICK_DEADZONE {
            strafe = stick_x.clamp(-1.0, 1.0);
        }
        if stick_y.abs() > STICK_DEADZONE {
            forward = stick_y.clamp(-1.0, 1.0);
        }
    }
    raw.strafe = strafe;
    raw.forward = forward;
}
