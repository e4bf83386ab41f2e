//! # Engineering Equations
//!
//! Closed-form formulas used by the calculators. Keeping them apart from the
//! input/result types lets each formula be checked against its reference on
//! its own.
//!
//! ## Modules
//!
//! - [`energy`] - Wind and solar resource estimates
//! - [`geotechnical`] - Bearing capacity factors, bulk volume

pub mod energy;
pub mod geotechnical;

pub use energy::{
    daily_energy_kwh,
    solar_power_w,
    swept_area,
    wind_power_density,
    wind_power_w,
    DEFAULT_PANEL_EFFICIENCY_PCT,
    DEFAULT_SUN_HOURS,
    STANDARD_AIR_DENSITY_KGM3,
};

pub use geotechnical::{
    bearing_factors,
    safe_bearing_capacity,
    ultimate_bearing_capacity,
    volume_from_weight,
    BearingFactors,
    FACTOR_OF_SAFETY,
    REFERENCE_DEPTH_M,
    REFERENCE_WIDTH_M,
};
