use bevy::prelude::*;
use helm_core::SIM_TICK_HZ;

pub mod bindings;
pub mod components;
pub mod flight;
pub mod ship;

// Re-export commonly used items
pub use bindings::*;
pub use components::*;
pub use flight::{
    apply_flight_assist, apply_flight_forces, map_pilot_controls, refresh_flight_telemetry,
    warn_missing_rigid_body,
};
pub use ship::*;

pub struct HelmFlightPlugin;

impl Plugin for HelmFlightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FlightController>()
            .register_type::<FlightAssist>()
            .register_type::<FlightTelemetry>();

        app.insert_resource(Time::<Fixed>::from_hz(f64::from(SIM_TICK_HZ)))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<KeyBindings>()
            .init_resource::<KeyboardAxes>()
            .init_resource::<PilotInput>()
            .init_resource::<CapturedScreen>();

        app.add_systems(Startup, capture_screen_metrics);

        // Frame phase
        app.add_systems(
            Update,
            (
                sample_pilot_input,
                map_pilot_controls,
                apply_flight_assist,
                refresh_flight_telemetry,
            )
                .chain(),
        );
        app.add_systems(Update, warn_missing_rigid_body);

        // Physics phase, consumed by Avian in FixedPostUpdate
        app.add_systems(FixedUpdate, apply_flight_forces);
    }
}
