//! Light sail flight model.
//!
//! A forward-Euler integrator advances a single [`SailState`] under constant radiation-pressure
//! acceleration until cruise speed, then coasts. The step is a pure function so it can be
//! exercised without any rendering attached.

pub mod integrator;
pub mod profile;

pub use integrator::{
    DESTINATION_DISTANCE_M, FlightError, Integrator, LaunchParameters, MAX_HALVINGS,
    NOMINAL_STEP_S, SailState, StepPolicy, TARGET_FRACTION_C, Tick, VELOCITY_TOLERANCE,
};
pub use profile::{AccelerationProfile, FlightSummary, fly};
