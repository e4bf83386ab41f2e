//! # Settings
//!
//! User-adjustable defaults for the calculators and the printed report.
//! Every field has a default, so a partial JSON document (or `{}`) is valid.
//!
//! ```rust
//! use eco_core::settings::Settings;
//!
//! let settings = Settings::from_json(r#"{ "defaults": { "sun_hours": 6.0 } }"#).unwrap();
//! assert_eq!(settings.defaults.sun_hours, 6.0);
//! assert_eq!(settings.defaults.air_density_kgm3, 1.225);
//! ```
//!
//! The water-quality limits are fixed by IS 456:2000 and are not part of the
//! settings.

use serde::{Deserialize, Serialize};

use crate::calculations::density::{BulkMaterial, WeightUnit};
use crate::equations::energy::{
    DEFAULT_PANEL_EFFICIENCY_PCT, DEFAULT_SUN_HOURS, STANDARD_AIR_DENSITY_KGM3,
};
use crate::errors::CalcResult;

/// Default report generator line
pub const DEFAULT_GENERATOR: &str = "VR Eco Energy Engineering Tools";

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Values prefilled into blank calculator fields
    pub defaults: CalculatorDefaults,

    /// Printed report options
    pub report: ReportSettings,
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Defaults for optional calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorDefaults {
    /// Air density ρ (kg/m³)
    pub air_density_kgm3: f64,

    /// Panel efficiency (%)
    pub panel_efficiency_pct: f64,

    /// Peak sun hours per day
    pub sun_hours: f64,

    /// Unit for the weighed quantity
    pub weight_unit: WeightUnit,

    /// Material preselected in the volume calculator
    pub material: BulkMaterial,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        CalculatorDefaults {
            air_density_kgm3: STANDARD_AIR_DENSITY_KGM3,
            panel_efficiency_pct: DEFAULT_PANEL_EFFICIENCY_PCT,
            sun_hours: DEFAULT_SUN_HOURS,
            weight_unit: WeightUnit::Ton,
            material: BulkMaterial::Water,
        }
    }
}

/// Printed report options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// "Report Generated by" line
    pub generator: String,

    /// Report heading
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            generator: DEFAULT_GENERATOR.to_string(),
            title: "Water Quality Test Report".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.defaults.air_density_kgm3, 1.225);
        assert_eq!(settings.defaults.panel_efficiency_pct, 20.0);
        assert_eq!(settings.defaults.sun_hours, 5.0);
        assert_eq!(settings.defaults.weight_unit, WeightUnit::Ton);
        assert_eq!(settings.defaults.material, BulkMaterial::Water);
        assert_eq!(settings.report.generator, DEFAULT_GENERATOR);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_document() {
        let settings = Settings::from_json(
            r#"{ "defaults": { "material": "hard-rock", "weight_unit": "kg" },
                 "report": { "generator": "Site Lab 4" } }"#,
        )
        .unwrap();
        assert_eq!(settings.defaults.material, BulkMaterial::HardRock);
        assert_eq!(settings.defaults.weight_unit, WeightUnit::Kg);
        assert_eq!(settings.defaults.sun_hours, 5.0);
        assert_eq!(settings.report.generator, "Site Lab 4");
        assert_eq!(settings.report.title, "Water Quality Test Report");
    }

    #[test]
    fn test_invalid_json() {
        let err = Settings::from_json("{ defaults: ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let err = Settings::from_json(r#"{ "defaults": { "material": "lava" } }"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_roundtrip() {
        let mut settings = Settings::default();
        settings.defaults.sun_hours = 4.5;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
