//! # Soil Bearing Capacity Calculation
//!
//! Safe bearing capacity of a shallow strip footing using the simplified
//! Terzaghi formulation.
//!
//! ## Assumptions
//!
//! - Reference footing width B = 1 m and depth D = 1 m
//! - General shear failure
//! - Factor of safety 3
//!
//! ## Domain
//!
//! A friction angle of 0° (pure cohesive soil) divides by `tan φ = 0`. The
//! result is then not finite; it is returned as-is and flagged by
//! [`BearingResult::is_finite`].
//!
//! ## Example
//!
//! ```rust
//! use eco_core::calculations::bearing::{calculate, BearingInput};
//!
//! let input = BearingInput::new(10.0, 30.0, 18.0);
//! let result = calculate(&input).into_option().unwrap();
//! assert!(result.is_finite());
//! assert!((result.safe_capacity_kpa - 271.15).abs() < 0.01);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::{format_fixed, Outcome};
use crate::equations::geotechnical::{
    bearing_factors, safe_bearing_capacity, ultimate_bearing_capacity, FACTOR_OF_SAFETY,
    REFERENCE_DEPTH_M, REFERENCE_WIDTH_M,
};
use crate::errors::CalcError;

/// Soil classification recorded with a test.
///
/// Informational only; the formula uses the measured c, φ and γ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    #[default]
    Clay,
    Sand,
    Silt,
    Gravel,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [SoilType::Clay, SoilType::Sand, SoilType::Silt, SoilType::Gravel];

    pub fn display_name(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Sand => "Sand",
            SoilType::Silt => "Silt",
            SoilType::Gravel => "Gravel",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SoilType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        SoilType::ALL
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CalcError::unknown_option("soil type", name))
    }
}

/// Input parameters for the bearing capacity estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "soil_type": "sand",
///   "cohesion_kpa": 5.0,
///   "friction_angle_deg": 32.0,
///   "dry_unit_weight_knm3": 17.5
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingInput {
    #[serde(default)]
    pub soil_type: SoilType,

    /// Cohesion c (kPa)
    pub cohesion_kpa: Option<f64>,

    /// Angle of internal friction φ (degrees)
    pub friction_angle_deg: Option<f64>,

    /// Dry unit weight γ (kN/m³)
    pub dry_unit_weight_knm3: Option<f64>,
}

impl BearingInput {
    pub fn new(cohesion_kpa: f64, friction_angle_deg: f64, dry_unit_weight_knm3: f64) -> Self {
        BearingInput {
            soil_type: SoilType::default(),
            cohesion_kpa: Some(cohesion_kpa),
            friction_angle_deg: Some(friction_angle_deg),
            dry_unit_weight_knm3: Some(dry_unit_weight_knm3),
        }
    }

    pub fn with_soil_type(mut self, soil_type: SoilType) -> Self {
        self.soil_type = soil_type;
        self
    }
}

/// Results from the bearing capacity estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingResult {
    pub soil_type: SoilType,

    /// Bearing capacity factor Nc
    pub nc: f64,

    /// Bearing capacity factor Nq
    pub nq: f64,

    /// Bearing capacity factor Nγ
    pub n_gamma: f64,

    /// Ultimate bearing capacity q_ult (kPa)
    pub ultimate_capacity_kpa: f64,

    /// Safe bearing capacity q_ult / FS (kPa)
    pub safe_capacity_kpa: f64,

    /// Factor of safety applied
    pub factor_of_safety: f64,
}

impl BearingResult {
    /// Safe capacity in kPa with two decimals
    pub fn safe_capacity_display(&self) -> String {
        format_fixed(self.safe_capacity_kpa, 2)
    }

    pub fn is_finite(&self) -> bool {
        self.safe_capacity_kpa.is_finite()
    }
}

/// Estimate safe bearing capacity. Any blank parameter gives `Incomplete`.
pub fn calculate(input: &BearingInput) -> Outcome<BearingResult> {
    let (Some(c), Some(phi), Some(gamma)) = (
        input.cohesion_kpa,
        input.friction_angle_deg,
        input.dry_unit_weight_knm3,
    ) else {
        debug!("bearing estimate skipped: c, phi or gamma missing");
        return Outcome::Incomplete;
    };

    let factors = bearing_factors(phi);
    let q_ult = ultimate_bearing_capacity(c, gamma, &factors, REFERENCE_WIDTH_M, REFERENCE_DEPTH_M);
    let q_safe = safe_bearing_capacity(q_ult, FACTOR_OF_SAFETY);

    let result = BearingResult {
        soil_type: input.soil_type,
        nc: factors.nc,
        nq: factors.nq,
        n_gamma: factors.n_gamma,
        ultimate_capacity_kpa: q_ult,
        safe_capacity_kpa: q_safe,
        factor_of_safety: FACTOR_OF_SAFETY,
    };

    if !result.is_finite() {
        warn!(c, phi, gamma, "bearing capacity is not finite");
    }
    debug!(c, phi, gamma, q_safe, "bearing estimate");

    Outcome::Computed(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sand_at_30_degrees() {
        let result = calculate(&BearingInput::new(0.0, 30.0, 18.0)).into_option().unwrap();
        // q_ult = 18·18.401 + ½·18·20.093 = 331.22 + 180.84
        assert!((result.ultimate_capacity_kpa - 512.05).abs() < 0.05);
        assert!((result.safe_capacity_kpa - 170.68).abs() < 0.05);
        assert_eq!(result.factor_of_safety, 3.0);
    }

    #[test]
    fn test_cohesion_term() {
        let without = calculate(&BearingInput::new(0.0, 25.0, 17.0)).into_option().unwrap();
        let with = calculate(&BearingInput::new(10.0, 25.0, 17.0)).into_option().unwrap();
        let expected = 10.0 * with.nc / 3.0;
        assert!((with.safe_capacity_kpa - without.safe_capacity_kpa - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_friction_angle_propagates() {
        let result = calculate(&BearingInput::new(25.0, 0.0, 18.0)).into_option().unwrap();
        assert!(!result.is_finite());
    }

    #[test]
    fn test_missing_fields_are_incomplete() {
        for blank in 0..3 {
            let mut input = BearingInput::new(10.0, 30.0, 18.0);
            match blank {
                0 => input.cohesion_kpa = None,
                1 => input.friction_angle_deg = None,
                _ => input.dry_unit_weight_knm3 = None,
            }
            assert!(calculate(&input).is_incomplete());
        }
    }

    #[test]
    fn test_soil_type_carried_through() {
        let input = BearingInput::new(5.0, 32.0, 17.5).with_soil_type(SoilType::Gravel);
        let result = calculate(&input).into_option().unwrap();
        assert_eq!(result.soil_type, SoilType::Gravel);
        assert_eq!("Sand".parse::<SoilType>().unwrap(), SoilType::Sand);
        assert!("peat".parse::<SoilType>().is_err());
    }
}
