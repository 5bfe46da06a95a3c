//! Core units, constants, and shared primitives for the light sail workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Speed of light as used throughout the flight model (m/s).
    ///
    /// Rounded to four significant figures; the whole mission is tuned against this value.
    pub const SPEED_OF_LIGHT_M_S: f64 = 2.998e8;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Metres per giga-metre.
    pub const METERS_PER_GIGAMETER: f64 = 1.0e9;
    /// Metres represented by one unit of scene space.
    pub const METERS_PER_SCENE_UNIT: f64 = 1.0e11;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{METERS_PER_GIGAMETER, METERS_PER_SCENE_UNIT, SPEED_OF_LIGHT_M_S};

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres to giga-metres.
    #[inline]
    pub fn m_to_gm(v: f64) -> f64 {
        v / METERS_PER_GIGAMETER
    }

    /// Convert metres to scene units.
    #[inline]
    pub fn m_to_scene(v: f64) -> f64 {
        v / METERS_PER_SCENE_UNIT
    }

    /// Speed expressed as a percentage of light speed.
    #[inline]
    pub fn percent_of_light_speed(v_m_s: f64) -> f64 {
        v_m_s / SPEED_OF_LIGHT_M_S * 100.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Split a duration into whole (days, hours, minutes).
    pub fn split_duration(seconds: f64) -> (i64, i64, i64) {
        let total_seconds = seconds.max(0.0);
        let days = (total_seconds / SECONDS_PER_DAY).floor() as i64;
        let remaining = total_seconds - (days as f64 * SECONDS_PER_DAY);
        let hours = (remaining / 3_600.0).floor() as i64;
        let minutes = ((remaining - hours as f64 * 3_600.0) / 60.0).floor() as i64;
        (days, hours, minutes)
    }
}

/// Minimal vector helpers for scene-space positions and axes.
pub mod vector {
    /// Alias for a 3D vector in scene units.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector in the direction of `v`, or `v` itself when it has no length.
    pub fn normalize(v: &Vector3) -> Vector3 {
        let n = norm(v);
        if n == 0.0 { *v } else { scale(v, 1.0 / n) }
    }
}
