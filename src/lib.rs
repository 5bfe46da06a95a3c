//! Light sail flight to Proxima Centauri b.
//!
//! The workspace crates are re-exported here so front-ends (the `lightsail` binary, tests)
//! share one entry point. [`mission`] couples the flight integrator to the scene binder.

pub mod mission;

pub use sail_config as config;
pub use sail_core as common;
pub use sail_flight as flight;
pub use sail_propulsion as propulsion;
pub use sail_scene as scene;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
