pub mod tuning;

pub use tuning::{
    AttitudeTuning, DampingConfig, FlightTuning, ImpulseTuning, ThrottleTuning, TuningError,
};

/// Fixed physics rate the force applicator runs at.
pub const SIM_TICK_HZ: u16 = 50;
pub const RENDER_TARGET_HZ: u16 = 60;

/// Fixed timestep in seconds derived from [`SIM_TICK_HZ`].
pub fn sim_tick_dt_s() -> f32 {
    1.0 / f32::from(SIM_TICK_HZ)
}
