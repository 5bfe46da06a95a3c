//! Per-tick mapping from flight telemetry to scene transforms and the status readout.

use sail_core::time::seconds_to_days;
use sail_core::units::{m_to_gm, m_to_scene, ms_to_kms, percent_of_light_speed};
use sail_core::vector::{Vector3, add, norm, sub};

use crate::setup::{ORBIT_RADIUS, ORBIT_STEP_RAD, Scene};

/// Appended to the status text once the sail arrives.
pub const ARRIVAL_MESSAGE: &str = "\n\nARRIVED at Proxima Centauri b";

/// Oldest trail points are dropped past this length.
pub const MAX_TRAIL_POINTS: usize = 1_024;
/// Minimum spacing between recorded trail points (scene units).
pub const TRAIL_SPACING: f64 = 0.5;

/// What the binder needs to know about the sail each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub position_m: f64,
    pub velocity_m_s: f64,
    pub elapsed_s: f64,
    pub acceleration_m_s2: f64,
    pub laser_active: bool,
}

/// Laser beam transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamFrame {
    pub origin: Vector3,
    pub axis: Vector3,
    pub visible: bool,
}

/// Transforms and text for one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame<'a> {
    pub tick: u64,
    pub sail: Vector3,
    pub payload: Vector3,
    pub beam: BeamFrame,
    pub camera_center: Vector3,
    pub info_position: Vector3,
    pub planet: Vector3,
    pub orbit_angle: f64,
    pub status: String,
    pub arrived: bool,
    pub sail_trail: &'a [Vector3],
    pub planet_trail: &'a [Vector3],
}

impl SceneFrame<'_> {
    /// Append the arrival message; repeated calls have no further effect.
    pub fn mark_arrived(&mut self) {
        if !self.arrived {
            self.status.push_str(ARRIVAL_MESSAGE);
            self.arrived = true;
        }
    }
}

/// Owns the animation state that lives outside the flight model.
#[derive(Debug, Clone)]
pub struct SceneBinder {
    distance_m: f64,
    orbit_angle: f64,
    ticks: u64,
    sail_trail: Trail,
    planet_trail: Trail,
}

impl SceneBinder {
    pub fn new(scene: &Scene, distance_m: f64) -> Self {
        let mut planet_trail = Trail::default();
        planet_trail.record(scene.planet.position);
        let mut sail_trail = Trail::default();
        sail_trail.record([0.0, 0.0, 0.0]);
        Self {
            distance_m,
            orbit_angle: 0.0,
            ticks: 0,
            sail_trail,
            planet_trail,
        }
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the planet and place every moving object for this tick.
    pub fn sync(&mut self, scene: &Scene, telemetry: &Telemetry) -> SceneFrame<'_> {
        self.ticks += 1;
        let viewport = &scene.viewport;

        let sail = [m_to_scene(telemetry.position_m), 0.0, 0.0];
        let payload = add(&sail, &scene.sail.axis);
        let beam = BeamFrame {
            origin: scene.laser.source,
            axis: sub(&sail, &scene.laser.source),
            visible: telemetry.laser_active,
        };
        let camera_center = add(&sail, &viewport.camera_lead);
        let info_position = add(&sail, &viewport.info_offset);

        self.orbit_angle += ORBIT_STEP_RAD;
        let planet = orbit_position(scene.proxima.position, self.orbit_angle);

        self.sail_trail.record(sail);
        self.planet_trail.record(planet);

        SceneFrame {
            tick: self.ticks,
            sail,
            payload,
            beam,
            camera_center,
            info_position,
            planet,
            orbit_angle: self.orbit_angle,
            status: status_text(telemetry, self.distance_m),
            arrived: false,
            sail_trail: self.sail_trail.points(),
            planet_trail: self.planet_trail.points(),
        }
    }
}

/// Planet position on its circular orbit in the x–z plane.
pub fn orbit_position(center: Vector3, angle: f64) -> Vector3 {
    add(
        &center,
        &[ORBIT_RADIUS * angle.cos(), 0.0, ORBIT_RADIUS * angle.sin()],
    )
}

/// Four-line telemetry readout.
///
/// Figures use fixed decimals: `59960.00`, not a rounded-then-trimmed `59960.0`.
pub fn status_text(telemetry: &Telemetry, distance_m: f64) -> String {
    format!(
        "Time: {:.1} days\n\
         Velocity: {:.2} km/s ({:.2}% c)\n\
         Accel: {} m/s²\n\
         Distance: {:.1} Gm ({:.4}%)",
        seconds_to_days(telemetry.elapsed_s),
        ms_to_kms(telemetry.velocity_m_s),
        percent_of_light_speed(telemetry.velocity_m_s),
        scientific(telemetry.acceleration_m_s2, 4),
        m_to_gm(telemetry.position_m),
        telemetry.position_m / distance_m * 100.0
    )
}

/// Scientific notation with a signed two-digit exponent, e.g. `3.3020e+05`.
pub fn scientific(value: f64, precision: usize) -> String {
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

#[derive(Debug, Clone, Default)]
struct Trail {
    points: Vec<Vector3>,
}

impl Trail {
    fn record(&mut self, point: Vector3) {
        if let Some(last) = self.points.last() {
            if norm(&sub(&point, last)) < TRAIL_SPACING {
                return;
            }
        }
        if self.points.len() == MAX_TRAIL_POINTS {
            self.points.drain(..MAX_TRAIL_POINTS / 2);
        }
        self.points.push(point);
    }

    fn points(&self) -> &[Vector3] {
        &self.points
    }
}
