//! # Wind Resource Calculation
//!
//! Available kinetic power through a rotor disc and the site's wind power
//! density.
//!
//! ## Assumptions
//!
//! - Uniform wind speed over the swept area
//! - No power coefficient (the figure is the resource, not turbine output)
//! - Air density defaults to the sea-level standard 1.225 kg/m³
//!
//! Inputs are not range-checked: zero or negative values go through the
//! formula unchanged.
//!
//! ## Example
//!
//! ```rust
//! use eco_core::calculations::wind::{calculate, WindInput};
//!
//! let result = calculate(&WindInput::new(10.0, 40.0)).into_option().unwrap();
//! assert!((result.swept_area_m2 - 5026.55).abs() < 0.01);
//! assert_eq!(result.power_kw_display(), "3078.76");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::{format_fixed, Outcome};
use crate::equations::energy::{
    swept_area, wind_power_density, wind_power_w, STANDARD_AIR_DENSITY_KGM3,
};

/// Input parameters for the wind resource estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wind_speed_ms": 10.0,
///   "air_density_kgm3": 1.225,
///   "rotor_radius_m": 40.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindInput {
    /// Wind speed V (m/s)
    pub wind_speed_ms: Option<f64>,

    /// Air density ρ (kg/m³); blank uses 1.225
    #[serde(default)]
    pub air_density_kgm3: Option<f64>,

    /// Rotor radius r (m)
    pub rotor_radius_m: Option<f64>,
}

impl WindInput {
    /// Input with standard air density
    pub fn new(wind_speed_ms: f64, rotor_radius_m: f64) -> Self {
        WindInput {
            wind_speed_ms: Some(wind_speed_ms),
            air_density_kgm3: None,
            rotor_radius_m: Some(rotor_radius_m),
        }
    }

    pub fn with_air_density(mut self, air_density_kgm3: f64) -> Self {
        self.air_density_kgm3 = Some(air_density_kgm3);
        self
    }

    /// Air density used in the calculation
    pub fn effective_air_density(&self) -> f64 {
        self.air_density_kgm3.unwrap_or(STANDARD_AIR_DENSITY_KGM3)
    }
}

/// Wind speed classification of a site.
///
/// | Zone | Speed (m/s) | Resource |
/// |---|---|---|
/// | 1 | < 4 | Poor |
/// | 2 | 4 – 5 | Fair |
/// | 3 | 5 – 6 | Good |
/// | 4 | 6 – 7 | Very good |
/// | 5 | > 7 | Excellent |
///
/// Each band includes its lower bound; 7 m/s itself is zone 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindZone {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl WindZone {
    /// Zone for a wind speed in m/s; `None` for NaN
    pub fn classify(speed_ms: f64) -> Option<WindZone> {
        if speed_ms.is_nan() {
            return None;
        }
        let zone = if speed_ms < 4.0 {
            WindZone::Poor
        } else if speed_ms < 5.0 {
            WindZone::Fair
        } else if speed_ms < 6.0 {
            WindZone::Good
        } else if speed_ms <= 7.0 {
            WindZone::VeryGood
        } else {
            WindZone::Excellent
        };
        Some(zone)
    }

    /// Zone number, 1 through 5
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn description(&self) -> &'static str {
        match self {
            WindZone::Poor => "Poor wind resource",
            WindZone::Fair => "Fair wind resource",
            WindZone::Good => "Good wind resource",
            WindZone::VeryGood => "Very good wind resource",
            WindZone::Excellent => "Excellent wind resource",
        }
    }
}

impl fmt::Display for WindZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone {} ({})", self.number(), self.description())
    }
}

/// Results from the wind resource estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResult {
    /// Swept area A = πr² (m²)
    pub swept_area_m2: f64,

    /// Air density used (kg/m³)
    pub air_density_kgm3: f64,

    /// Available power P = ½ρAV³ (W)
    pub power_w: f64,

    /// Available power (kW)
    pub power_kw: f64,

    /// Wind power density E = ½ρV³ (W/m²)
    pub energy_density_wm2: f64,

    /// Speed classification of the site
    pub zone: Option<WindZone>,
}

impl WindResult {
    /// Power in kW with two decimals
    pub fn power_kw_display(&self) -> String {
        format_fixed(self.power_kw, 2)
    }

    /// Power density in W/m² with two decimals
    pub fn energy_density_display(&self) -> String {
        format_fixed(self.energy_density_wm2, 2)
    }

    pub fn is_finite(&self) -> bool {
        self.power_w.is_finite() && self.energy_density_wm2.is_finite()
    }
}

/// Estimate the wind resource. Blank speed or radius gives `Incomplete`.
pub fn calculate(input: &WindInput) -> Outcome<WindResult> {
    let (Some(speed), Some(radius)) = (input.wind_speed_ms, input.rotor_radius_m) else {
        debug!("wind estimate skipped: speed or radius missing");
        return Outcome::Incomplete;
    };
    let rho = input.effective_air_density();

    let area = swept_area(radius);
    let power_w = wind_power_w(rho, area, speed);
    let result = WindResult {
        swept_area_m2: area,
        air_density_kgm3: rho,
        power_w,
        power_kw: power_w / 1000.0,
        energy_density_wm2: wind_power_density(rho, speed),
        zone: WindZone::classify(speed),
    };

    if !result.is_finite() {
        warn!(speed, radius, rho, "wind estimate is not finite");
    }
    debug!(speed, radius, rho, power_kw = result.power_kw, "wind estimate");

    Outcome::Computed(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_turbine() {
        let result = calculate(&WindInput::new(10.0, 40.0)).into_option().unwrap();
        // A = 1600π
        assert!((result.swept_area_m2 - 1600.0 * std::f64::consts::PI).abs() < 1e-9);
        // P = ½ · 1.225 · 5026.55 · 1000 ≈ 3,078,761 W
        assert!((result.power_w - 3_078_760.8).abs() < 1.0);
        assert_eq!(result.power_kw_display(), "3078.76");
        assert_eq!(result.energy_density_display(), "612.50");
    }

    #[test]
    fn test_wind_zone_bands() {
        assert_eq!(WindZone::classify(3.9), Some(WindZone::Poor));
        assert_eq!(WindZone::classify(4.0), Some(WindZone::Fair));
        assert_eq!(WindZone::classify(5.5), Some(WindZone::Good));
        assert_eq!(WindZone::classify(6.0), Some(WindZone::VeryGood));
        assert_eq!(WindZone::classify(7.0), Some(WindZone::VeryGood));
        assert_eq!(WindZone::classify(7.1), Some(WindZone::Excellent));
        assert_eq!(WindZone::classify(-2.0), Some(WindZone::Poor));
        assert_eq!(WindZone::classify(f64::NAN), None);

        assert_eq!(WindZone::Poor.number(), 1);
        assert_eq!(WindZone::Excellent.to_string(), "Zone 5 (Excellent wind resource)");
    }

    #[test]
    fn test_result_carries_zone() {
        let result = calculate(&WindInput::new(10.0, 40.0)).into_option().unwrap();
        assert_eq!(result.zone, Some(WindZone::Excellent));

        let result = calculate(&WindInput::new(4.5, 20.0)).into_option().unwrap();
        assert_eq!(result.zone, Some(WindZone::Fair));
        assert_eq!(serde_json::to_value(&result).unwrap()["zone"], "fair");
    }

    #[test]
    fn test_custom_air_density() {
        let input = WindInput::new(8.0, 20.0).with_air_density(1.0);
        let result = calculate(&input).into_option().unwrap();
        // ½ · 1 · 512
        assert!((result.energy_density_wm2 - 256.0).abs() < 1e-9);
        assert_eq!(result.air_density_kgm3, 1.0);
    }

    #[test]
    fn test_missing_fields_are_incomplete() {
        let mut input = WindInput::new(10.0, 40.0);
        input.wind_speed_ms = None;
        assert!(calculate(&input).is_incomplete());

        let mut input = WindInput::new(10.0, 40.0);
        input.rotor_radius_m = None;
        assert!(calculate(&input).is_incomplete());

        assert!(calculate(&WindInput::default()).is_incomplete());
    }

    #[test]
    fn test_zero_and_negative_are_evaluated() {
        let result = calculate(&WindInput::new(0.0, 40.0)).into_option().unwrap();
        assert_eq!(result.power_w, 0.0);

        // Negative speed cubes to a negative power; not rejected.
        let result = calculate(&WindInput::new(-10.0, 40.0)).into_option().unwrap();
        assert!(result.power_w < 0.0);
    }

    #[test]
    fn test_air_density_defaults_when_absent_in_json() {
        let input: WindInput =
            serde_json::from_str(r#"{ "wind_speed_ms": 10.0, "rotor_radius_m": 40.0 }"#).unwrap();
        assert_eq!(input.effective_air_density(), 1.225);
    }
}
