//! Forward-Euler integrator for the laser-boost and coast phases.

use sail_core::constants::SPEED_OF_LIGHT_M_S;
use sail_core::units::m_to_scene;
use sail_propulsion::{Laser, LightSail};
use thiserror::Error;
use tracing::{debug, trace};

/// Cruise speed as a fraction of light speed.
pub const TARGET_FRACTION_C: f64 = 0.2;
/// Earth to Proxima Centauri (m).
pub const DESTINATION_DISTANCE_M: f64 = 4.01e16;
/// Starting integration step (s).
pub const NOMINAL_STEP_S: f64 = 1_000.0;
/// Upper bound on step halvings within one tick.
pub const MAX_HALVINGS: u32 = 64;
/// Relative velocity gap at which the sail counts as having reached cruise speed.
pub const VELOCITY_TOLERANCE: f64 = 1.0e-9;

/// Fixed inputs of a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParameters {
    pub acceleration_m_s2: f64,
    pub target_velocity_m_s: f64,
    pub nominal_step_s: f64,
    pub distance_m: f64,
}

impl LaunchParameters {
    /// Reference sail and laser flying to Proxima Centauri b.
    pub fn proxima() -> Self {
        Self::from_hardware(&LightSail::reference(), &Laser::reference())
    }

    /// Parameters for an arbitrary sail/laser pairing on the Proxima route.
    pub fn from_hardware(sail: &LightSail, laser: &Laser) -> Self {
        Self {
            acceleration_m_s2: sail.acceleration_m_s2(laser),
            target_velocity_m_s: TARGET_FRACTION_C * SPEED_OF_LIGHT_M_S,
            nominal_step_s: NOMINAL_STEP_S,
            distance_m: DESTINATION_DISTANCE_M,
        }
    }
}

/// How the step size carries over between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPolicy {
    /// A halved step is kept for every later tick.
    #[default]
    Persistent,
    /// Every tick starts again from the nominal step.
    ResetEachTick,
}

/// Mutable flight state advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SailState {
    pub position_m: f64,
    pub velocity_m_s: f64,
    pub elapsed_s: f64,
    pub laser_active: bool,
    pub step_s: f64,
}

impl SailState {
    /// At rest at the origin with the laser on.
    pub fn at_launch(step_s: f64) -> Self {
        Self {
            position_m: 0.0,
            velocity_m_s: 0.0,
            elapsed_s: 0.0,
            laser_active: true,
            step_s,
        }
    }
}

/// Outcome of a single integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub state: SailState,
    /// Acceleration applied during this tick; zero once the laser is off.
    pub acceleration_m_s2: f64,
    /// Number of times the step was halved during this tick.
    pub halvings: u32,
    /// True only on the tick where the laser switched off.
    pub cutoff: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum FlightError {
    #[error("sail acceleration must be positive (got {0} m/s²)")]
    NonPositiveAcceleration(f64),
    #[error("target velocity must be positive (got {0} m/s)")]
    NonPositiveTargetVelocity(f64),
    #[error("integration step must be positive (got {0} s)")]
    NonPositiveStep(f64),
    #[error("destination distance must be positive (got {0} m)")]
    NonPositiveDistance(f64),
    #[error(
        "step still overshoots after {halvings} halvings \
         (velocity {velocity_m_s} m/s, target {target_m_s} m/s, step {step_s} s)"
    )]
    StepHalvingExhausted {
        halvings: u32,
        velocity_m_s: f64,
        target_m_s: f64,
        step_s: f64,
    },
}

/// Pure state-transition function over [`SailState`].
#[derive(Debug, Clone)]
pub struct Integrator {
    params: LaunchParameters,
    policy: StepPolicy,
}

impl Integrator {
    /// Validate `params` and build an integrator with the default [`StepPolicy`].
    pub fn new(params: LaunchParameters) -> Result<Self, FlightError> {
        // Written as negated comparisons so NaN is rejected too.
        if !(params.acceleration_m_s2 > 0.0) {
            return Err(FlightError::NonPositiveAcceleration(params.acceleration_m_s2));
        }
        if !(params.target_velocity_m_s > 0.0) {
            return Err(FlightError::NonPositiveTargetVelocity(params.target_velocity_m_s));
        }
        if !(params.nominal_step_s > 0.0) {
            return Err(FlightError::NonPositiveStep(params.nominal_step_s));
        }
        if !(params.distance_m > 0.0) {
            return Err(FlightError::NonPositiveDistance(params.distance_m));
        }
        Ok(Self {
            params,
            policy: StepPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn params(&self) -> &LaunchParameters {
        &self.params
    }

    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    pub fn initial_state(&self) -> SailState {
        SailState::at_launch(self.params.nominal_step_s)
    }

    /// True once the sail has covered the trip, compared in scene units.
    pub fn has_arrived(&self, state: &SailState) -> bool {
        m_to_scene(state.position_m) >= m_to_scene(self.params.distance_m)
    }

    /// Advance `state` by one tick.
    pub fn step(&self, state: SailState) -> Result<Tick, FlightError> {
        let a = self.params.acceleration_m_s2;
        let target = self.params.target_velocity_m_s;

        let mut next = state;
        if self.policy == StepPolicy::ResetEachTick {
            next.step_s = self.params.nominal_step_s;
        }

        let mut halvings = 0;
        let mut cutoff = false;
        let acceleration_m_s2 = if next.laser_active {
            if self.reached_cruise(next.velocity_m_s) {
                cutoff = true;
            } else {
                while next.velocity_m_s + a * next.step_s >= target {
                    if halvings == MAX_HALVINGS {
                        return Err(FlightError::StepHalvingExhausted {
                            halvings,
                            velocity_m_s: next.velocity_m_s,
                            target_m_s: target,
                            step_s: next.step_s,
                        });
                    }
                    next.step_s *= 0.5;
                    halvings += 1;
                }
                if halvings > 0 {
                    debug!(halvings, step_s = next.step_s, "step halved to stay below cruise speed");
                }
                next.velocity_m_s += a * next.step_s;
                cutoff = self.reached_cruise(next.velocity_m_s);
            }

            if cutoff {
                next.velocity_m_s = target;
                next.laser_active = false;
                debug!(
                    elapsed_s = next.elapsed_s + next.step_s,
                    velocity_m_s = target,
                    "cruise speed reached, laser off"
                );
                0.0
            } else {
                a
            }
        } else {
            0.0
        };

        next.position_m += next.velocity_m_s * next.step_s;
        next.elapsed_s += next.step_s;
        trace!(
            position_m = next.position_m,
            velocity_m_s = next.velocity_m_s,
            elapsed_s = next.elapsed_s,
            step_s = next.step_s,
            "tick"
        );

        Ok(Tick {
            state: next,
            acceleration_m_s2,
            halvings,
            cutoff,
        })
    }

    fn reached_cruise(&self, velocity_m_s: f64) -> bool {
        let target = self.params.target_velocity_m_s;
        target - velocity_m_s <= VELOCITY_TOLERANCE * target
    }
}
