//! # Wind and Solar Resource Formulas
//!
//! Point estimates for available power at a site. These are resource
//! figures (what the wind or sun delivers), not turbine or inverter output:
//! no power coefficient, no Betz limit, no temperature derating.
//!
//! ## Notation
//!
//! - `V` = Wind speed (m/s)
//! - `ρ` = Air density (kg/m³)
//! - `r` = Rotor radius (m)
//! - `A` = Swept or panel area (m²)
//! - `G` = Solar irradiance (W/m²)
//! - `η` = Panel efficiency (%)
//! - `H` = Peak sun hours (h/day)

use std::f64::consts::PI;

/// Standard sea-level air density at 15 °C (kg/m³)
pub const STANDARD_AIR_DENSITY_KGM3: f64 = 1.225;

/// Typical crystalline-silicon panel efficiency (%)
pub const DEFAULT_PANEL_EFFICIENCY_PCT: f64 = 20.0;

/// Default peak sun hours per day
pub const DEFAULT_SUN_HOURS: f64 = 5.0;

// =============================================================================
// WIND
// =============================================================================

/// Rotor swept area A = πr²
#[inline]
pub fn swept_area(radius_m: f64) -> f64 {
    PI * radius_m.powi(2)
}

/// Kinetic power flux through the rotor disc
///
/// ```text
/// P = ½ ρ A V³      (W)
/// ```
#[inline]
pub fn wind_power_w(air_density: f64, swept_area_m2: f64, wind_speed: f64) -> f64 {
    0.5 * air_density * swept_area_m2 * wind_speed.powi(3)
}

/// Wind power density E = ½ ρ V³ (W/m²)
#[inline]
pub fn wind_power_density(air_density: f64, wind_speed: f64) -> f64 {
    0.5 * air_density * wind_speed.powi(3)
}

// =============================================================================
// SOLAR
// =============================================================================

/// Instantaneous panel output P = G·A·η/100 (W)
#[inline]
pub fn solar_power_w(irradiance: f64, panel_area_m2: f64, efficiency_pct: f64) -> f64 {
    irradiance * panel_area_m2 * efficiency_pct / 100.0
}

/// Daily energy Q = P·H/1000 (kWh)
#[inline]
pub fn daily_energy_kwh(power_w: f64, sun_hours: f64) -> f64 {
    power_w * sun_hours / 1000.0
}
