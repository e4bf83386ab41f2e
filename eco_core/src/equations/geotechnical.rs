//! # Geotechnical Formulas
//!
//! Simplified Terzaghi bearing capacity for a strip footing, and bulk
//! volume from weight and density.
//!
//! ## Notation
//!
//! - `c` = Cohesion (kPa)
//! - `φ` = Angle of internal friction
//! - `γ` = Unit weight of soil (kN/m³)
//! - `B` = Footing width (m)
//! - `D` = Footing depth (m)
//! - `Nc`, `Nq`, `Nγ` = Bearing capacity factors
//!
//! ## Domain
//!
//! `Nc` divides by `tan φ`, so φ = 0 gives a non-finite `Nc`. The functions
//! here do not guard against it; the value propagates to the caller.
//!
//! ## References
//!
//! - Terzaghi, K. (1943). Theoretical Soil Mechanics
//! - IS 6403:1981 Code of Practice for Determination of Bearing Capacity of Shallow Foundations

use std::f64::consts::PI;

/// Reference footing width B (m)
pub const REFERENCE_WIDTH_M: f64 = 1.0;

/// Reference footing depth D (m)
pub const REFERENCE_DEPTH_M: f64 = 1.0;

/// Factor of safety applied to ultimate capacity
pub const FACTOR_OF_SAFETY: f64 = 3.0;

/// Terzaghi bearing capacity factors for one friction angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingFactors {
    pub nc: f64,
    pub nq: f64,
    pub n_gamma: f64,
}

/// Compute bearing capacity factors
///
/// ```text
/// Nq = e^(π tan φ) · tan²(45° + φ/2)
/// Nc = (Nq − 1) / tan φ
/// Nγ = 2 (Nq − 1) tan φ
/// ```
pub fn bearing_factors(friction_angle_deg: f64) -> BearingFactors {
    let phi = friction_angle_deg.to_radians();
    let tan_phi = phi.tan();

    let nq = (PI * tan_phi).exp() * (PI / 4.0 + phi / 2.0).tan().powi(2);
    let nc = (nq - 1.0) / tan_phi;
    let n_gamma = 2.0 * (nq - 1.0) * tan_phi;

    BearingFactors { nc, nq, n_gamma }
}

/// Ultimate bearing capacity
///
/// ```text
/// q_ult = c·Nc + γ·D·Nq + ½·γ·B·Nγ     (kPa)
/// ```
#[inline]
pub fn ultimate_bearing_capacity(
    cohesion_kpa: f64,
    unit_weight_knm3: f64,
    factors: &BearingFactors,
    width_m: f64,
    depth_m: f64,
) -> f64 {
    cohesion_kpa * factors.nc
        + unit_weight_knm3 * depth_m * factors.nq
        + 0.5 * unit_weight_knm3 * width_m * factors.n_gamma
}

/// Safe bearing capacity q_safe = q_ult / FS
#[inline]
pub fn safe_bearing_capacity(q_ult_kpa: f64, factor_of_safety: f64) -> f64 {
    q_ult_kpa / factor_of_safety
}

/// Bulk volume V = W / ρ (m³) for weight in kg and density in kg/m³
#[inline]
pub fn volume_from_weight(weight_kg: f64, density_kgm3: f64) -> f64 {
    weight_kg / density_kgm3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_at_30_degrees() {
        // Published Reissner/Prandtl values: Nq ≈ 18.40, Nc ≈ 30.14
        let f = bearing_factors(30.0);
        assert!((f.nq - 18.40).abs() < 0.01, "Nq = {}", f.nq);
        assert!((f.nc - 30.14).abs() < 0.01, "Nc = {}", f.nc);
        // 2 (Nq − 1) tan φ
        assert!((f.n_gamma - 20.09).abs() < 0.01, "Nγ = {}", f.n_gamma);
    }

    #[test]
    fn test_zero_friction_angle_is_not_finite() {
        let f = bearing_factors(0.0);
        assert!((f.nq - 1.0).abs() < 1e-12);
        assert!(!f.nc.is_finite());
        assert_eq!(f.n_gamma, 0.0);
    }

    #[test]
    fn test_ultimate_and_safe() {
        let f = BearingFactors { nc: 10.0, nq: 5.0, n_gamma: 4.0 };
        // 20·10 + 18·1·5 + ½·18·1·4 = 200 + 90 + 36
        let q_ult = ultimate_bearing_capacity(20.0, 18.0, &f, 1.0, 1.0);
        assert!((q_ult - 326.0).abs() < 1e-9);
        assert!((safe_bearing_capacity(q_ult, FACTOR_OF_SAFETY) - 108.666_666).abs() < 1e-5);
    }

    #[test]
    fn test_volume() {
        assert_eq!(volume_from_weight(1000.0, 1000.0), 1.0);
        assert!(volume_from_weight(1.0, 0.0).is_infinite());
    }
}
