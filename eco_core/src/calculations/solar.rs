//! # Solar Resource Calculation
//!
//! Panel output at a given irradiance and the energy collected over the
//! day's peak sun hours.
//!
//! ```text
//! P = G · A · η / 100          (W)
//! Q = P · H / 1000             (kWh)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::{format_fixed, Outcome};
use crate::equations::energy::{
    daily_energy_kwh, solar_power_w, DEFAULT_PANEL_EFFICIENCY_PCT, DEFAULT_SUN_HOURS,
};

/// Input parameters for the solar resource estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "irradiance_wm2": 1000.0,
///   "panel_area_m2": 2.0,
///   "efficiency_pct": 20.0,
///   "sun_hours": 5.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarInput {
    /// Solar irradiance G (W/m²)
    pub irradiance_wm2: Option<f64>,

    /// Panel area A (m²)
    pub panel_area_m2: Option<f64>,

    /// Panel efficiency η (%); blank uses 20
    #[serde(default)]
    pub efficiency_pct: Option<f64>,

    /// Peak sun hours H; blank uses 5
    #[serde(default)]
    pub sun_hours: Option<f64>,
}

impl SolarInput {
    pub fn new(irradiance_wm2: f64, panel_area_m2: f64) -> Self {
        SolarInput {
            irradiance_wm2: Some(irradiance_wm2),
            panel_area_m2: Some(panel_area_m2),
            efficiency_pct: None,
            sun_hours: None,
        }
    }

    pub fn with_efficiency(mut self, efficiency_pct: f64) -> Self {
        self.efficiency_pct = Some(efficiency_pct);
        self
    }

    pub fn with_sun_hours(mut self, sun_hours: f64) -> Self {
        self.sun_hours = Some(sun_hours);
        self
    }
}

/// Results from the solar resource estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarResult {
    /// Instantaneous output (W)
    pub power_w: f64,

    /// Energy over the peak sun hours (kWh/day)
    pub daily_energy_kwh: f64,

    /// Efficiency used (%)
    pub efficiency_pct: f64,

    /// Peak sun hours used
    pub sun_hours: f64,
}

impl SolarResult {
    pub fn power_display(&self) -> String {
        format_fixed(self.power_w, 2)
    }

    pub fn daily_energy_display(&self) -> String {
        format_fixed(self.daily_energy_kwh, 2)
    }
}

/// Estimate panel output. Blank irradiance or area gives `Incomplete`.
pub fn calculate(input: &SolarInput) -> Outcome<SolarResult> {
    let (Some(irradiance), Some(area)) = (input.irradiance_wm2, input.panel_area_m2) else {
        debug!("solar estimate skipped: irradiance or area missing");
        return Outcome::Incomplete;
    };
    let efficiency = input.efficiency_pct.unwrap_or(DEFAULT_PANEL_EFFICIENCY_PCT);
    let hours = input.sun_hours.unwrap_or(DEFAULT_SUN_HOURS);

    let power_w = solar_power_w(irradiance, area, efficiency);
    let daily = daily_energy_kwh(power_w, hours);

    if !(power_w.is_finite() && daily.is_finite()) {
        warn!(irradiance, area, efficiency, hours, "solar estimate is not finite");
    }
    debug!(irradiance, area, efficiency, hours, power_w, "solar estimate");

    Outcome::Computed(SolarResult {
        power_w,
        daily_energy_kwh: daily,
        efficiency_pct: efficiency,
        sun_hours: hours,
    })
}
