//! Laser and light sail descriptors for radiation-pressure propulsion.

use sail_core::constants::SPEED_OF_LIGHT_M_S;

/// Ground-based laser array power (W).
pub const LASER_POWER_W: f64 = 1.0e11;
/// Sail mass including payload (kg).
pub const SAIL_MASS_KG: f64 = 0.002;
/// Fraction of incident light the sail reflects.
pub const SAIL_REFLECTIVITY: f64 = 0.99;

/// Directed-energy source pushing the sail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laser {
    pub power_watts: f64,
}

impl Laser {
    /// The 100 GW array used for the Proxima mission.
    pub fn reference() -> Self {
        Self {
            power_watts: LASER_POWER_W,
        }
    }
}

/// Reflective sail carrying the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSail {
    pub mass_kg: f64,
    pub reflectivity: f64,
}

impl LightSail {
    /// The 2 g sail used for the Proxima mission.
    pub fn reference() -> Self {
        Self {
            mass_kg: SAIL_MASS_KG,
            reflectivity: SAIL_REFLECTIVITY,
        }
    }

    /// Constant acceleration under `laser` (m/s²), assuming every photon strikes the sail.
    pub fn acceleration_m_s2(&self, laser: &Laser) -> f64 {
        radiation_pressure_acceleration(laser.power_watts, self.reflectivity, self.mass_kg)
    }
}

/// `2 × power × reflectivity / (mass × c)`. A reflected photon transfers twice its momentum.
#[inline]
pub fn radiation_pressure_acceleration(power_watts: f64, reflectivity: f64, mass_kg: f64) -> f64 {
    2.0 * power_watts * reflectivity / (mass_kg * SPEED_OF_LIGHT_M_S)
}
