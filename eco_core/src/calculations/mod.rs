//! # Utility Calculations
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable). User-entered fields are
//!   `Option<f64>`; `None` means the field was left blank.
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(&input) -> Outcome<*Result>` - Pure calculation function
//!
//! ## Incomplete Input
//!
//! A calculator never errors on missing input. When a required field is
//! blank it returns [`Outcome::Incomplete`] and the caller keeps whatever it
//! was showing before; [`ResultSlot`] implements exactly that.
//!
//! ```rust
//! use eco_core::calculations::{ResultSlot, wind::{self, WindInput}};
//!
//! let mut slot = ResultSlot::default();
//! slot.apply(wind::calculate(&WindInput::new(10.0, 40.0)));
//! assert!(slot.get().is_some());
//!
//! // Radius cleared: nothing is computed, the previous result stays.
//! let mut blank = WindInput::new(12.0, 40.0);
//! blank.rotor_radius_m = None;
//! assert!(!slot.apply(wind::calculate(&blank)));
//! assert!((slot.get().unwrap().power_kw - 3078.76).abs() < 0.01);
//! ```
//!
//! ## Available Calculations
//!
//! - [`conversion`] - Unit conversion within a category
//! - [`wind`] - Wind power resource
//! - [`solar`] - Solar power resource
//! - [`bearing`] - Soil bearing capacity (simplified Terzaghi)
//! - [`water_quality`] - Mixing-water compliance per IS 456:2000
//! - [`density`] - Volume from weight and material density

pub mod bearing;
pub mod conversion;
pub mod density;
pub mod solar;
pub mod water_quality;
pub mod wind;

use serde::{Deserialize, Serialize};

pub use bearing::{BearingInput, BearingResult, SoilType};
pub use conversion::{ConversionInput, ConversionResult};
pub use density::{BulkMaterial, VolumeInput, VolumeResult, WeightUnit};
pub use solar::{SolarInput, SolarResult};
pub use water_quality::{
    ComplianceStatus, Verdict, WaterParameter, WaterQualityReport, WaterSample,
};
pub use wind::{WindInput, WindResult, WindZone};

/// Result of running a calculator.
///
/// Serializes with a `status` discriminator:
///
/// ```json
/// { "status": "incomplete" }
/// { "status": "computed", "result": { "power_kw": 3078.76 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// A required input was blank; nothing was computed
    Incomplete,
    /// All required inputs were present
    Computed(T),
}

impl<T> Outcome<T> {
    pub fn is_computed(&self) -> bool {
        matches!(self, Outcome::Computed(_))
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Outcome::Incomplete)
    }

    /// Borrow the computed result, if any
    pub fn computed(&self) -> Option<&T> {
        match self {
            Outcome::Computed(value) => Some(value),
            Outcome::Incomplete => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Computed(value) => Some(value),
            Outcome::Incomplete => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Computed(value) => Outcome::Computed(f(value)),
            Outcome::Incomplete => Outcome::Incomplete,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Outcome::Computed(v),
            None => Outcome::Incomplete,
        }
    }
}

/// The displayed result of one calculator panel.
///
/// Last write wins; an incomplete outcome is not a write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSlot<T> {
    value: Option<T>,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        ResultSlot { value: None }
    }
}

impl<T> ResultSlot<T> {
    /// Apply an outcome. Returns `true` if the slot was overwritten.
    pub fn apply(&mut self, outcome: Outcome<T>) -> bool {
        match outcome {
            Outcome::Computed(value) => {
                self.value = Some(value);
                true
            }
            Outcome::Incomplete => false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

/// Parse a user-entered field.
///
/// Blank, unparseable, or non-finite text is treated as "not supplied".
///
/// ```rust
/// use eco_core::calculations::parse_field;
///
/// assert_eq!(parse_field(" 12.5 "), Some(12.5));
/// assert_eq!(parse_field("0"), Some(0.0));
/// assert_eq!(parse_field(""), None);
/// assert_eq!(parse_field("abc"), None);
/// assert_eq!(parse_field("inf"), None);
/// ```
pub fn parse_field(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format with a fixed number of fractional digits.
///
/// Negative zero prints as zero.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// Enum wrapper for all calculator inputs.
///
/// Lets a caller submit any calculation as one JSON document:
///
/// ```json
/// { "type": "Wind", "wind_speed_ms": 10.0, "rotor_radius_m": 40.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Conversion(ConversionInput),
    Wind(WindInput),
    Solar(SolarInput),
    Bearing(BearingInput),
    WaterQuality(WaterSample),
    Volume(VolumeInput),
}

/// Enum wrapper for all calculator results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Conversion(ConversionResult),
    Wind(WindResult),
    Solar(SolarResult),
    Bearing(BearingResult),
    WaterQuality(WaterQualityReport),
    Volume(VolumeResult),
}

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Conversion(_) => "Conversion",
            CalculationItem::Wind(_) => "Wind",
            CalculationItem::Solar(_) => "Solar",
            CalculationItem::Bearing(_) => "Bearing",
            CalculationItem::WaterQuality(_) => "WaterQuality",
            CalculationItem::Volume(_) => "Volume",
        }
    }

    /// Run the wrapped calculator.
    ///
    /// A conversion with nothing to show (unknown unit, blank value) is
    /// reported as incomplete.
    pub fn evaluate(&self) -> Outcome<CalculationOutput> {
        match self {
            CalculationItem::Conversion(input) => {
                let result = conversion::convert_units(input);
                if result.is_empty() {
                    Outcome::Incomplete
                } else {
                    Outcome::Computed(CalculationOutput::Conversion(result))
                }
            }
            CalculationItem::Wind(input) => wind::calculate(input).map(CalculationOutput::Wind),
            CalculationItem::Solar(input) => solar::calculate(input).map(CalculationOutput::Solar),
            CalculationItem::Bearing(input) => {
                bearing::calculate(input).map(CalculationOutput::Bearing)
            }
            CalculationItem::WaterQuality(sample) => {
                water_quality::assess(sample).map(CalculationOutput::WaterQuality)
            }
            CalculationItem::Volume(input) => {
                density::calculate(input).map(CalculationOutput::Volume)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let incomplete: Outcome<f64> = Outcome::Incomplete;
        assert_eq!(serde_json::to_string(&incomplete).unwrap(), r#"{"status":"incomplete"}"#);

        let computed = Outcome::Computed(2.5);
        assert_eq!(
            serde_json::to_string(&computed).unwrap(),
            r#"{"status":"computed","result":2.5}"#
        );
    }

    #[test]
    fn test_slot_keeps_prior_value_on_incomplete() {
        let mut slot = ResultSlot::default();
        assert!(slot.get().is_none());
        assert!(!slot.apply(Outcome::<i32>::Incomplete));
        assert!(slot.get().is_none());

        assert!(slot.apply(Outcome::Computed(1)));
        assert!(!slot.apply(Outcome::Incomplete));
        assert_eq!(slot.get(), Some(&1));

        assert!(slot.apply(Outcome::Computed(2)));
        assert_eq!(slot.get(), Some(&2));

        slot.clear();
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1.0, 6), "1.000000");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(3078.763, 2), "3078.76");
    }

    #[test]
    fn test_item_dispatch_from_json() {
        let item: CalculationItem = serde_json::from_str(
            r#"{ "type": "Wind", "wind_speed_ms": 10.0, "rotor_radius_m": 40.0 }"#,
        )
        .unwrap();
        assert_eq!(item.calc_type(), "Wind");
        match item.evaluate() {
            Outcome::Computed(CalculationOutput::Wind(r)) => {
                assert!((r.power_kw - 3078.76).abs() < 0.01)
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_volume_item_uses_material_density() {
        let item: CalculationItem =
            serde_json::from_str(r#"{ "type": "Volume", "material": "soil", "weight": 8.0 }"#).unwrap();
        match item.evaluate() {
            Outcome::Computed(CalculationOutput::Volume(r)) => {
                assert_eq!(r.density_kgm3, 1600.0);
                assert_eq!(r.volume_display(), "5.000000");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let item: CalculationItem =
            serde_json::from_str(r#"{ "type": "Volume", "weight": 1.0 }"#).unwrap();
        assert!(item.evaluate().is_computed());

        let item: CalculationItem = serde_json::from_str(
            r#"{ "type": "Volume", "material": "soil", "density_kgm3": null, "weight": 8.0 }"#,
        )
        .unwrap();
        assert!(item.evaluate().is_incomplete());
    }

    #[test]
    fn test_item_dispatch_incomplete() {
        let item: CalculationItem =
            serde_json::from_str(r#"{ "type": "Solar", "irradiance_wm2": 800.0 }"#).unwrap();
        assert!(item.evaluate().is_incomplete());

        let item: CalculationItem = serde_json::from_str(
            r#"{ "type": "Conversion", "value": 1.0, "from_unit": "furlong" }"#,
        )
        .unwrap();
        assert!(item.evaluate().is_incomplete());
    }
}
