//! Closed-form boost/coast profile and headless flight summaries.

use sail_core::constants::SPEED_OF_LIGHT_M_S;

use crate::integrator::{FlightError, Integrator, LaunchParameters};

/// Ideal constant-acceleration boost followed by a coast at cruise speed.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationProfile {
    pub acceleration_m_s2: f64,
    pub cruise_velocity_m_s: f64,
    pub cruise_fraction_c: f64,
    pub burn_time_s: f64,
    pub burn_distance_m: f64,
    pub coast_time_s: f64,
    pub time_of_flight_s: f64,
}

impl AccelerationProfile {
    /// Returns `None` when the parameters cannot produce a flight.
    pub fn analytic(params: &LaunchParameters) -> Option<Self> {
        let a = params.acceleration_m_s2;
        let v = params.target_velocity_m_s;
        if a <= 0.0 || v <= 0.0 || params.distance_m <= 0.0 {
            return None;
        }

        let burn_time = v / a;
        let burn_distance = 0.5 * v * v / a;
        // Trips shorter than the boost never reach cruise speed.
        if burn_distance >= params.distance_m {
            let burn_time = (2.0 * params.distance_m / a).sqrt();
            return Some(Self {
                acceleration_m_s2: a,
                cruise_velocity_m_s: a * burn_time,
                cruise_fraction_c: a * burn_time / SPEED_OF_LIGHT_M_S,
                burn_time_s: burn_time,
                burn_distance_m: params.distance_m,
                coast_time_s: 0.0,
                time_of_flight_s: burn_time,
            });
        }

        let coast_time = (params.distance_m - burn_distance) / v;
        Some(Self {
            acceleration_m_s2: a,
            cruise_velocity_m_s: v,
            cruise_fraction_c: v / SPEED_OF_LIGHT_M_S,
            burn_time_s: burn_time,
            burn_distance_m: burn_distance,
            coast_time_s: coast_time,
            time_of_flight_s: burn_time + coast_time,
        })
    }
}

/// Totals gathered while stepping a flight without rendering it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub ticks: u64,
    pub arrived: bool,
    /// Tick on which the laser switched off, if it did.
    pub cutoff_tick: Option<u64>,
    pub burn_time_s: f64,
    pub burn_distance_m: f64,
    pub elapsed_s: f64,
    pub final_position_m: f64,
    pub final_velocity_m_s: f64,
    pub final_step_s: f64,
}

impl FlightSummary {
    /// Burn time plus the time needed to coast the remaining distance at `cruise_velocity_m_s`.
    pub fn expected_arrival_s(&self, distance_m: f64, cruise_velocity_m_s: f64) -> f64 {
        self.burn_time_s + (distance_m - self.burn_distance_m) / cruise_velocity_m_s
    }
}

/// Step `integrator` from launch until arrival or `max_ticks`, whichever comes first.
pub fn fly(integrator: &Integrator, max_ticks: Option<u64>) -> Result<FlightSummary, FlightError> {
    let mut state = integrator.initial_state();
    let mut ticks = 0u64;
    let mut cutoff_tick = None;
    let mut burn_time_s = 0.0;
    let mut burn_distance_m = 0.0;

    while !integrator.has_arrived(&state) {
        if max_ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }
        let tick = integrator.step(state)?;
        ticks += 1;
        state = tick.state;
        if tick.cutoff {
            cutoff_tick = Some(ticks);
        }
        if cutoff_tick.is_none() || tick.cutoff {
            burn_time_s = state.elapsed_s;
            burn_distance_m = state.position_m;
        }
    }

    Ok(FlightSummary {
        ticks,
        arrived: integrator.has_arrived(&state),
        cutoff_tick,
        burn_time_s,
        burn_distance_m,
        elapsed_s: state.elapsed_s,
        final_position_m: state.position_m,
        final_velocity_m_s: state.velocity_m_s,
        final_step_s: state.step_s,
    })
}
