//! # Unit Conversion
//!
//! Converts one value to every other unit of its category. The value goes to
//! the category base unit first, then out to each target:
//!
//! ```text
//! base     = v * factor(from)
//! value(u) = base / factor(u)      for every u ≠ from in the category
//! ```
//!
//! Results are shown with six fractional digits.
//!
//! ## Nothing To Show
//!
//! A blank value or an unknown unit produces an empty result set rather than
//! an error.
//!
//! ## Example
//!
//! ```rust
//! use eco_core::calculations::conversion::convert_text;
//! use eco_core::units::Unit;
//!
//! let result = convert_text("1000", "meter");
//! assert_eq!(result.formatted(Unit::Kilometer).as_deref(), Some("1.000000"));
//! assert!(result.get(Unit::Meter).is_none()); // source unit is not repeated
//!
//! assert!(convert_text("", "meter").is_empty());
//! assert!(convert_text("5", "furlong").is_empty());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{format_fixed, parse_field};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Unit, UnitCategory};

/// Fractional digits shown for converted values
pub const DISPLAY_DECIMALS: usize = 6;

/// Input for a conversion request.
///
/// ## JSON Example
///
/// ```json
/// { "value": 1.0, "from_unit": "hectare" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionInput {
    /// Value to convert; `None` when the field is blank
    pub value: Option<f64>,

    /// Source unit slug (e.g. "meter", "kg-per-cm2")
    pub from_unit: String,
}

impl ConversionInput {
    pub fn new(value: f64, from_unit: Unit) -> Self {
        ConversionInput {
            value: Some(value),
            from_unit: from_unit.slug().to_string(),
        }
    }
}

/// Every other unit of the source category with its equivalent value.
///
/// ## JSON Example
///
/// ```json
/// {
///   "category": "length",
///   "from_unit": "meter",
///   "base_value": 1000.0,
///   "values": { "kilometer": 1.0, "centimeter": 100000.0 },
///   "display": { "kilometer": "1.000000", "centimeter": "100000.000000" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Category of the source unit (absent for an empty result)
    pub category: Option<UnitCategory>,

    /// Source unit (absent for an empty result)
    pub from_unit: Option<Unit>,

    /// Source value expressed in the category base unit
    pub base_value: Option<f64>,

    /// Unrounded converted values, in category order
    pub values: BTreeMap<Unit, f64>,

    /// Converted values rounded to six fractional digits
    pub display: BTreeMap<Unit, String>,
}

impl ConversionResult {
    /// The "nothing to show" result
    pub fn empty() -> Self {
        ConversionResult::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Unrounded value for a target unit
    pub fn get(&self, unit: Unit) -> Option<f64> {
        self.values.get(&unit).copied()
    }

    /// Display string for a target unit
    pub fn formatted(&self, unit: Unit) -> Option<String> {
        self.display.get(&unit).cloned()
    }

    /// (unit, display string) pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (Unit, &str)> {
        self.display.iter().map(|(u, s)| (*u, s.as_str()))
    }
}

/// Convert a value to every other unit of its category.
pub fn convert(value: f64, from: Unit) -> ConversionResult {
    let category = from.category();
    let base_value = value * from.factor();

    let values: BTreeMap<Unit, f64> = category
        .units()
        .filter(|u| *u != from)
        .map(|u| (u, base_value / u.factor()))
        .collect();

    let display = values
        .iter()
        .map(|(u, v)| (*u, format_fixed(*v, DISPLAY_DECIMALS)))
        .collect();

    debug!(%from, value, base_value, targets = values.len(), "converted units");

    ConversionResult {
        category: Some(category),
        from_unit: Some(from),
        base_value: Some(base_value),
        values,
        display,
    }
}

/// Run a conversion request. Unknown unit or blank value gives an empty result.
pub fn convert_units(input: &ConversionInput) -> ConversionResult {
    let Some(value) = input.value.filter(|v| v.is_finite()) else {
        debug!(from_unit = %input.from_unit, "conversion skipped: no value");
        return ConversionResult::empty();
    };
    match input.from_unit.parse::<Unit>() {
        Ok(unit) => convert(value, unit),
        Err(_) => {
            debug!(from_unit = %input.from_unit, "conversion skipped: unknown unit");
            ConversionResult::empty()
        }
    }
}

/// Convert raw form text (value field and unit picker).
pub fn convert_text(value: &str, from_unit: &str) -> ConversionResult {
    convert_units(&ConversionInput {
        value: parse_field(value),
        from_unit: from_unit.to_string(),
    })
}

/// Convert between two specific units of the same category.
///
/// ```rust
/// use eco_core::calculations::conversion::convert_between;
/// use eco_core::units::Unit;
///
/// let bar = convert_between(250.0, Unit::Kilopascal, Unit::Bar).unwrap();
/// assert!((bar - 2.5).abs() < 1e-12);
/// assert!(convert_between(1.0, Unit::Meter, Unit::Liter).is_err());
/// ```
pub fn convert_between(value: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    if from.category() != to.category() {
        return Err(CalcError::invalid_input(
            "to_unit",
            to.slug(),
            format!(
                "Cannot convert {} ({}) to {} ({})",
                from,
                from.category(),
                to,
                to.category()
            ),
        ));
    }
    Ok(value * from.factor() / to.factor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::units_in;

    #[test]
    fn test_length_scenario() {
        let result = convert(1000.0, Unit::Meter);
        assert_eq!(result.formatted(Unit::Kilometer).unwrap(), "1.000000");
        assert_eq!(result.formatted(Unit::Centimeter).unwrap(), "100000.000000");
        assert_eq!(result.category, Some(UnitCategory::Length));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_area_scenario() {
        let result = convert(1.0, Unit::Hectare);
        assert_eq!(result.formatted(Unit::SquareMeter).unwrap(), "10000.000000");
        assert_eq!(result.formatted(Unit::SquareKilometer).unwrap(), "0.010000");
        assert!(result.get(Unit::Hectare).is_none());
    }

    #[test]
    fn test_pressure_kg_per_cm2() {
        let result = convert(1.0, Unit::KgPerCm2);
        assert_eq!(result.formatted(Unit::Pascal).unwrap(), "98066.500000");
        assert_eq!(result.formatted(Unit::Kilopascal).unwrap(), "98.066500");
    }

    #[test]
    fn test_zero_converts_to_zero() {
        for unit in Unit::ALL {
            let result = convert(0.0, unit);
            for (_, text) in result.iter() {
                assert_eq!(text.trim_end_matches('0'), "0.");
            }
        }
        assert_eq!(convert_text("-0", "meter").formatted(Unit::Foot).unwrap(), "0.000000");
    }

    #[test]
    fn test_results_stay_in_category() {
        for unit in Unit::ALL {
            let result = convert(3.5, unit);
            assert_eq!(result.len(), units_in(unit.category()).len() - 1);
            assert!(result.values.keys().all(|u| u.category() == unit.category()));
        }
    }

    #[test]
    fn test_round_trip_every_pair() {
        let samples = [0.0, 1.0, 12.345, 1000.0, 0.0042];
        for a in Unit::ALL {
            for b in units_in(a.category()) {
                for v in samples {
                    let there = convert_between(v, a, b).unwrap();
                    let back = convert_between(there, b, a).unwrap();
                    assert!((back - v).abs() < 1e-6, "{} -> {} -> {}: {} vs {}", a, b, a, v, back);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_through_result_set() {
        let forward = convert(7.25, Unit::Acre);
        let vigha = forward.get(Unit::Vigha).unwrap();
        let back = convert(vigha, Unit::Vigha).get(Unit::Acre).unwrap();
        assert!((back - 7.25).abs() < 1e-6);
    }

    #[test]
    fn test_nothing_to_show() {
        assert!(convert_text("", "meter").is_empty());
        assert!(convert_text("   ", "meter").is_empty());
        assert!(convert_text("abc", "meter").is_empty());
        assert!(convert_text("10", "furlong").is_empty());
        assert!(convert_units(&ConversionInput { value: None, from_unit: "bar".into() }).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(convert_text("42.5", "liter"), convert_text("42.5", "liter"));
    }

    #[test]
    fn test_serialization() {
        let result = convert(1.0, Unit::CubicMeter);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "volume");
        assert_eq!(json["display"]["liter"], "1000.000000");
        let roundtrip: ConversionResult = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
