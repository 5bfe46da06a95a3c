//! One-time construction of the static scene.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sail_core::units::m_to_scene;
use sail_core::vector::{Vector3, add};
use tracing::debug;

/// Linear RGB in `[0, 1]`.
pub type Rgb = [f64; 3];

pub const CYAN: Rgb = [0.0, 1.0, 1.0];
pub const WHITE: Rgb = [1.0, 1.0, 1.0];
pub const RED: Rgb = [1.0, 0.0, 0.0];
pub const GREEN: Rgb = [0.0, 1.0, 0.0];

/// Near edge of the starfield along x, behind the laser.
pub const STARFIELD_START: f64 = -100.0;
pub const STARFIELD_MARGIN: f64 = 300.0;
pub const ORBIT_RADIUS: f64 = 8.0;
/// Radians the planet advances per tick.
pub const ORBIT_STEP_RAD: f64 = 0.002;
pub const PLANET_NAME: &str = "Proxima Centauri b";

/// Inputs to [`Scene::build`].
#[derive(Debug, Clone)]
pub struct SceneOptions {
    /// Trip length (m).
    pub distance_m: f64,
    pub star_count: usize,
    pub star_seed: u64,
}

/// Background star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vector3,
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f64,
}

/// Emissive sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub position: Vector3,
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f64,
}

/// Cone-shaped sail with its payload sphere at the tip.
#[derive(Debug, Clone, PartialEq)]
pub struct SailModel {
    pub axis: Vector3,
    pub radius: f64,
    pub color: Rgb,
    pub payload_radius: f64,
    pub payload_color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaserModel {
    pub source: Vector3,
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f64,
}

/// Directional light shining from the destination back along the route.
#[derive(Debug, Clone, PartialEq)]
pub struct DistantLight {
    pub direction: Vector3,
    pub color: Rgb,
}

/// Fixed text attached to a point in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub offset: Vector3,
    pub color: Rgb,
}

/// Window and camera defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Half-extent of the visible region around the camera centre, in scene units.
    pub range: f64,
    pub forward: Vector3,
    pub background: Rgb,
    pub camera_lead: Vector3,
    pub info_offset: Vector3,
}

/// Everything created once before the first tick.
#[derive(Debug, Clone)]
pub struct Scene {
    pub viewport: Viewport,
    pub stars: Vec<Star>,
    pub proxima: Sphere,
    pub halo: Sphere,
    pub planet: Sphere,
    pub planet_label: Label,
    pub light: DistantLight,
    pub sail: SailModel,
    pub laser: LaserModel,
    /// Destination distance in scene units.
    pub destination_x: f64,
}

impl Scene {
    pub fn build(options: &SceneOptions) -> Self {
        let destination_x = m_to_scene(options.distance_m);
        let star_pos = [destination_x, 0.0, 0.0];
        // Degenerate trips still get a non-empty field in front of the launch point.
        let field_end = (destination_x + STARFIELD_MARGIN).max(STARFIELD_START + STARFIELD_MARGIN);
        let stars = starfield(options.star_count, options.star_seed, field_end);
        debug!(stars = stars.len(), destination_x, "scene built");

        Self {
            viewport: Viewport {
                title: "Light Sail to Proxima Centauri b".to_string(),
                width: 1_200,
                height: 700,
                range: 80.0,
                forward: [-1.0, -0.2, -0.1],
                background: [0.0, 0.0, 0.0],
                camera_lead: [10.0, 0.0, 0.0],
                info_offset: [0.0, 25.0, 0.0],
            },
            stars,
            proxima: Sphere {
                position: star_pos,
                radius: 12.0,
                color: [1.0, 0.35, 0.35],
                opacity: 1.0,
            },
            halo: Sphere {
                position: star_pos,
                radius: 20.0,
                color: [1.0, 0.1, 0.1],
                opacity: 0.15,
            },
            planet: Sphere {
                position: add(&star_pos, &[ORBIT_RADIUS, 0.0, 0.0]),
                radius: 2.2,
                color: [0.5, 1.0, 0.5],
                opacity: 1.0,
            },
            planet_label: Label {
                text: PLANET_NAME.to_string(),
                offset: [0.0, 3.0, 0.0],
                color: GREEN,
            },
            light: DistantLight {
                direction: [-1.0, 0.0, 0.0],
                color: [1.0, 0.2, 0.2],
            },
            sail: SailModel {
                axis: [4.0, 0.0, 0.0],
                radius: 1.5,
                color: CYAN,
                payload_radius: 0.7,
                payload_color: WHITE,
            },
            laser: LaserModel {
                source: [-10.0, 0.0, 0.0],
                radius: 0.2,
                color: RED,
                opacity: 0.3,
            },
            destination_x,
        }
    }
}

/// Reproducible starfield spread along the route.
fn starfield(count: usize, seed: u64, x_max: f64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Star {
            position: [
                rng.gen_range(STARFIELD_START..x_max),
                rng.gen_range(-150.0..150.0),
                rng.gen_range(-150.0..150.0),
            ],
            radius: rng.gen_range(0.05..0.13),
            color: [rng.gen_range(0.6..1.0), rng.gen_range(0.6..1.0), 1.0],
            opacity: rng.gen_range(0.3..1.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(seed: u64) -> SceneOptions {
        SceneOptions {
            distance_m: 4.01e16,
            star_count: 200,
            star_seed: seed,
        }
    }

    #[test]
    fn starfield_is_seeded() {
        assert_eq!(Scene::build(&options(7)).stars, Scene::build(&options(7)).stars);
        assert_ne!(Scene::build(&options(7)).stars, Scene::build(&options(8)).stars);
    }

    #[test]
    fn stars_stay_inside_the_field() {
        let scene = Scene::build(&options(1));
        assert_eq!(scene.stars.len(), 200);
        for star in &scene.stars {
            assert!(star.position[0] >= -100.0 && star.position[0] < 401_300.0);
            assert!(star.position[1].abs() <= 150.0 && star.position[2].abs() <= 150.0);
            assert!((0.05..0.13).contains(&star.radius));
            assert!((0.3..1.0).contains(&star.opacity));
            assert_eq!(star.color[2], 1.0);
        }
    }

    #[test]
    fn destination_system_sits_at_trip_distance() {
        let scene = Scene::build(&options(1));
        assert!((scene.proxima.position[0] - 401_000.0).abs() < 1e-6);
        assert!((scene.planet.position[0] - scene.proxima.position[0] - ORBIT_RADIUS).abs() < 1e-9);
        assert_eq!(scene.halo.position, scene.proxima.position);
    }

    #[test]
    fn degenerate_distance_still_builds_a_starfield() {
        for distance_m in [-5.0e13, 0.0, f64::NAN] {
            let scene = Scene::build(&SceneOptions {
                distance_m,
                star_count: 50,
                star_seed: 3,
            });
            assert_eq!(scene.stars.len(), 50);
            for star in &scene.stars {
                assert!(star.position[0] >= STARFIELD_START);
                assert!(star.position[0] < STARFIELD_START + STARFIELD_MARGIN);
            }
        }
    }

    #[test]
    fn destination_light_points_back_towards_earth() {
        let scene = Scene::build(&options(1));
        assert_eq!(scene.light.direction, [-1.0, 0.0, 0.0]);
        assert_eq!(scene.light.color, [1.0, 0.2, 0.2]);
    }
}
