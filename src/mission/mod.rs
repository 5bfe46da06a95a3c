//! Mission loop: one integrator step, one scene sync and one render per tick.
//!
//! The loop owns the only mutable flight state. It stops when the sail reaches the destination
//! or when an optional tick limit is hit.

pub mod pacing;

use sail_flight::{FlightError, Integrator, LaunchParameters, SailState, StepPolicy, Tick};
use sail_scene::{RenderError, RenderPort, Scene, SceneBinder, SceneOptions, Telemetry};
use tracing::info;

pub use pacing::FramePacer;

/// Top-level mission error.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("flight integration failed: {0}")]
    Flight(#[from] FlightError),
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    Arrived,
    TickLimit,
}

/// Laser cutoff moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoff {
    pub tick: u64,
    pub elapsed_s: f64,
    pub position_m: f64,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionReport {
    pub outcome: MissionOutcome,
    pub ticks: u64,
    pub final_state: SailState,
    pub cutoff: Option<Cutoff>,
    /// Status text of the last frame, including the arrival message when applicable.
    pub final_status: String,
}

/// Static scene plus the flight and binding state for one run.
#[derive(Debug)]
pub struct Mission {
    integrator: Integrator,
    scene: Scene,
    binder: SceneBinder,
    max_ticks: Option<u64>,
}

impl Mission {
    pub fn new(integrator: Integrator, scene: Scene) -> Self {
        let binder = SceneBinder::new(&scene, integrator.params().distance_m);
        Self {
            integrator,
            scene,
            binder,
            max_ticks: None,
        }
    }

    /// Reference sail flying to Proxima Centauri b.
    pub fn proxima(policy: StepPolicy, star_count: usize, star_seed: u64) -> Result<Self, MissionError> {
        let params = LaunchParameters::proxima();
        let integrator = Integrator::new(params)?.with_policy(policy);
        let scene = Scene::build(&SceneOptions {
            distance_m: params.distance_m,
            star_count,
            star_seed,
        });
        Ok(Self::new(integrator, scene))
    }

    /// Stop after `max_ticks` ticks even if the sail has not arrived. At least one tick always runs.
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Run from launch to arrival (or the tick limit), presenting every tick through `renderer`.
    pub fn run<R: RenderPort + ?Sized>(
        &mut self,
        renderer: &mut R,
        pacer: &mut FramePacer,
    ) -> Result<MissionReport, MissionError> {
        let params = *self.integrator.params();
        info!(
            acceleration_m_s2 = params.acceleration_m_s2,
            target_velocity_m_s = params.target_velocity_m_s,
            distance_m = params.distance_m,
            policy = ?self.integrator.policy(),
            "launch"
        );

        let mut state = self.integrator.initial_state();
        let mut ticks = 0u64;
        let mut cutoff = None;

        loop {
            let tick = self.integrator.step(state)?;
            state = tick.state;
            ticks += 1;
            if tick.cutoff {
                info!(tick = ticks, elapsed_s = state.elapsed_s, "laser off, coasting");
                cutoff = Some(Cutoff {
                    tick: ticks,
                    elapsed_s: state.elapsed_s,
                    position_m: state.position_m,
                });
            }

            let mut frame = self.binder.sync(&self.scene, &telemetry(&tick));
            renderer.render(&self.scene, &frame)?;

            let arrived = self.integrator.has_arrived(&state);
            let limit_hit = self.max_ticks.is_some_and(|limit| ticks >= limit);
            if arrived || limit_hit {
                let outcome = if arrived {
                    frame.mark_arrived();
                    MissionOutcome::Arrived
                } else {
                    MissionOutcome::TickLimit
                };
                renderer.finish(&self.scene, &frame)?;
                info!(?outcome, ticks, elapsed_s = state.elapsed_s, "mission over");
                return Ok(MissionReport {
                    outcome,
                    ticks,
                    final_state: state,
                    cutoff,
                    final_status: frame.status,
                });
            }

            pacer.wait();
        }
    }
}

fn telemetry(tick: &Tick) -> Telemetry {
    Telemetry {
        position_m: tick.state.position_m,
        velocity_m_s: tick.state.velocity_m_s,
        elapsed_s: tick.state.elapsed_s,
        acceleration_m_s2: tick.acceleration_m_s2,
        laser_active: tick.state.laser_active,
    }
}
