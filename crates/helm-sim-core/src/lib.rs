//! Engine-independent flight control math.
//!
//! Frame phase: raw input is mapped by [`attitude`] and [`thrust`] into a
//! [`ControlSignal`] plus [`ApplyFlags`], and the [`ThrottleGovernor`] updates
//! the throttle level. [`FlightAssistFilter`] damps the body's velocities.
//!
//! Physics phase: [`ForceApplicator::apply_step`] consumes the latest signal
//! and emits torque/force commands through a [`RigidBodyHandle`].

pub mod assist;
pub mod attitude;
pub mod body;
pub mod force;
pub mod signal;
pub mod throttle;
pub mod thrust;

pub use assist::FlightAssistFilter;
pub use attitude::{map_pitch, map_roll, map_yaw};
pub use body::{
    BodyAxes, BodyCommandBuffer, BodyVelocity, ForceMode, Handedness, RigidBodyHandle,
};
pub use force::{ForceApplicator, ForceAxis, ImpulseState, StepOutcome};
pub use signal::{ApplyFlags, ControlSignal};
pub use throttle::{ThrottleBound, ThrottleGovernor};
pub use thrust::map_thrust;
