//! # Unit Types
//!
//! The metric unit set offered by the utility converter, grouped into
//! categories. Each unit carries a conversion factor relative to its
//! category's base unit, so any two units of one category convert through
//! the base:
//!
//! ```text
//! base   = value * factor(from)
//! result = base / factor(to)
//! ```
//!
//! ## Base Units
//!
//! - Length: meter
//! - Area: square meter
//! - Weight: kilogram
//! - Volume: liter
//! - Pressure: pascal
//!
//! ## Example
//!
//! ```rust
//! use eco_core::units::{Unit, UnitCategory};
//!
//! let unit: Unit = "hectare".parse().unwrap();
//! assert_eq!(unit.category(), UnitCategory::Area);
//! assert_eq!(unit.factor(), 10_000.0);
//! assert_eq!(UnitCategory::Area.base_unit(), Unit::SquareMeter);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// Categories
// ============================================================================

/// A group of units convertible among themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Area,
    Length,
    Weight,
    Volume,
    Pressure,
}

impl UnitCategory {
    /// All categories in picker order
    pub const ALL: [UnitCategory; 5] = [
        UnitCategory::Area,
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Volume,
        UnitCategory::Pressure,
    ];

    /// The pivot unit for conversion arithmetic (factor exactly 1)
    pub fn base_unit(&self) -> Unit {
        match self {
            UnitCategory::Area => Unit::SquareMeter,
            UnitCategory::Length => Unit::Meter,
            UnitCategory::Weight => Unit::Kilogram,
            UnitCategory::Volume => Unit::Liter,
            UnitCategory::Pressure => Unit::Pascal,
        }
    }

    /// Human-readable category name
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitCategory::Area => "Area",
            UnitCategory::Length => "Length",
            UnitCategory::Weight => "Weight",
            UnitCategory::Volume => "Volume",
            UnitCategory::Pressure => "Pressure",
        }
    }

    /// Units of this category in declared order
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        Unit::ALL.into_iter().filter(move |u| u.category() == *self)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UnitCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        UnitCategory::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CalcError::unknown_option("unit category", name))
    }
}

// ============================================================================
// Units
// ============================================================================

/// A unit known to the converter.
///
/// Serializes as its kebab-case slug (`"square-meter"`, `"kg-per-cm2"`).
/// Ordering follows declaration order, which groups units by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    // Area
    SquareMeter,
    Hectare,
    Acre,
    /// Regional land measure used in Gujarat
    Vigha,
    SquareKilometer,
    SquareCentimeter,

    // Length
    Meter,
    Kilometer,
    Centimeter,
    Millimeter,
    Foot,

    // Weight
    Kilogram,
    Gram,
    Tonne,

    // Volume
    Liter,
    Milliliter,
    CubicMeter,

    // Pressure
    Pascal,
    Kilopascal,
    Bar,
    #[serde(rename = "kg-per-cm2")]
    KgPerCm2,
}

impl Unit {
    /// Every unit, grouped by category
    pub const ALL: [Unit; 21] = [
        Unit::SquareMeter,
        Unit::Hectare,
        Unit::Acre,
        Unit::Vigha,
        Unit::SquareKilometer,
        Unit::SquareCentimeter,
        Unit::Meter,
        Unit::Kilometer,
        Unit::Centimeter,
        Unit::Millimeter,
        Unit::Foot,
        Unit::Kilogram,
        Unit::Gram,
        Unit::Tonne,
        Unit::Liter,
        Unit::Milliliter,
        Unit::CubicMeter,
        Unit::Pascal,
        Unit::Kilopascal,
        Unit::Bar,
        Unit::KgPerCm2,
    ];

    /// The category this unit belongs to
    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::SquareMeter
            | Unit::Hectare
            | Unit::Acre
            | Unit::Vigha
            | Unit::SquareKilometer
            | Unit::SquareCentimeter => UnitCategory::Area,
            Unit::Meter | Unit::Kilometer | Unit::Centimeter | Unit::Millimeter | Unit::Foot => {
                UnitCategory::Length
            }
            Unit::Kilogram | Unit::Gram | Unit::Tonne => UnitCategory::Weight,
            Unit::Liter | Unit::Milliliter | Unit::CubicMeter => UnitCategory::Volume,
            Unit::Pascal | Unit::Kilopascal | Unit::Bar | Unit::KgPerCm2 => UnitCategory::Pressure,
        }
    }

    /// Multiplier taking a value in this unit to the category base unit
    pub fn factor(&self) -> f64 {
        match self {
            // Area (m²)
            Unit::SquareMeter => 1.0,
            Unit::SquareKilometer => 1_000_000.0,
            Unit::SquareCentimeter => 0.0001,
            Unit::Hectare => 10_000.0,
            Unit::Acre => 4046.86,
            Unit::Vigha => 1629.88,

            // Length (m)
            Unit::Meter => 1.0,
            Unit::Kilometer => 1000.0,
            Unit::Centimeter => 0.01,
            Unit::Millimeter => 0.001,
            Unit::Foot => 0.3048,

            // Weight (kg)
            Unit::Kilogram => 1.0,
            Unit::Gram => 0.001,
            Unit::Tonne => 1000.0,

            // Volume (L)
            Unit::Liter => 1.0,
            Unit::Milliliter => 0.001,
            Unit::CubicMeter => 1000.0,

            // Pressure (Pa)
            Unit::Pascal => 1.0,
            Unit::Kilopascal => 1000.0,
            Unit::Bar => 100_000.0,
            Unit::KgPerCm2 => 98_066.5,
        }
    }

    /// Kebab-case identifier used in JSON and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Unit::SquareMeter => "square-meter",
            Unit::Hectare => "hectare",
            Unit::Acre => "acre",
            Unit::Vigha => "vigha",
            Unit::SquareKilometer => "square-kilometer",
            Unit::SquareCentimeter => "square-centimeter",
            Unit::Meter => "meter",
            Unit::Kilometer => "kilometer",
            Unit::Centimeter => "centimeter",
            Unit::Millimeter => "millimeter",
            Unit::Foot => "foot",
            Unit::Kilogram => "kilogram",
            Unit::Gram => "gram",
            Unit::Tonne => "tonne",
            Unit::Liter => "liter",
            Unit::Milliliter => "milliliter",
            Unit::CubicMeter => "cubic-meter",
            Unit::Pascal => "pascal",
            Unit::Kilopascal => "kilopascal",
            Unit::Bar => "bar",
            Unit::KgPerCm2 => "kg-per-cm2",
        }
    }

    /// Label shown next to converted values
    pub fn display_name(&self) -> &'static str {
        match self {
            Unit::SquareMeter => "Square Meter (m²)",
            Unit::Hectare => "Hectare (ha)",
            Unit::Acre => "Acre (ac)",
            Unit::Vigha => "Vigha (Gujarat)",
            Unit::SquareKilometer => "Square Kilometer (km²)",
            Unit::SquareCentimeter => "Square Centimeter (cm²)",
            Unit::Meter => "Meter (m)",
            Unit::Kilometer => "Kilometer (km)",
            Unit::Centimeter => "Centimeter (cm)",
            Unit::Millimeter => "Millimeter (mm)",
            Unit::Foot => "Foot (ft)",
            Unit::Kilogram => "Kilogram (kg)",
            Unit::Gram => "Gram (g)",
            Unit::Tonne => "Tonne (t)",
            Unit::Liter => "Liter (L)",
            Unit::Milliliter => "Milliliter (mL)",
            Unit::CubicMeter => "Cubic Meter (m³)",
            Unit::Pascal => "Pascal (Pa)",
            Unit::Kilopascal => "Kilopascal (kPa)",
            Unit::Bar => "Bar",
            Unit::KgPerCm2 => "kg/cm²",
        }
    }

    /// Whether this unit is its category's base unit
    pub fn is_base(&self) -> bool {
        self.category().base_unit() == *self
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        Unit::ALL
            .into_iter()
            .find(|u| u.slug() == slug)
            .ok_or_else(|| CalcError::unknown_unit(slug))
    }
}

/// Units belonging to `category`, in declared order.
///
/// ```rust
/// use eco_core::units::{units_in, Unit, UnitCategory};
///
/// assert_eq!(units_in(UnitCategory::Weight), vec![Unit::Kilogram, Unit::Gram, Unit::Tonne]);
/// ```
pub fn units_in(category: UnitCategory) -> Vec<Unit> {
    category.units().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!("pressure".parse::<UnitCategory>().unwrap(), UnitCategory::Pressure);
        assert_eq!(" Area ".parse::<UnitCategory>().unwrap(), UnitCategory::Area);
        assert!(matches!(
            "speed".parse::<UnitCategory>(),
            Err(CalcError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_every_unit_has_one_category() {
        let total: usize = UnitCategory::ALL.iter().map(|c| units_in(*c).len()).sum();
        assert_eq!(total, Unit::ALL.len());
    }

    #[test]
    fn test_base_factor_is_exactly_one() {
        for category in UnitCategory::ALL {
            let base = category.base_unit();
            assert_eq!(base.factor(), 1.0);
            assert_eq!(base.category(), category);
            assert!(base.is_base());
        }
    }

    #[test]
    fn test_factors_positive_and_finite() {
        for unit in Unit::ALL {
            let f = unit.factor();
            assert!(f.is_finite() && f > 0.0, "{} has factor {}", unit, f);
        }
    }

    #[test]
    fn test_slug_parse() {
        for unit in Unit::ALL {
            assert_eq!(unit.slug().parse::<Unit>().unwrap(), unit);
        }
        assert_eq!(" meter ".parse::<Unit>().unwrap(), Unit::Meter);
        assert!(matches!("furlong".parse::<Unit>(), Err(CalcError::UnknownUnit { .. })));
    }

    #[test]
    fn test_serialization_matches_slug() {
        for unit in Unit::ALL {
            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit.slug()));
        }
    }

    #[test]
    fn test_units_ordered_by_category() {
        let mut sorted = Unit::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Unit::ALL.to_vec());
        assert_eq!(
            units_in(UnitCategory::Pressure),
            vec![Unit::Pascal, Unit::Kilopascal, Unit::Bar, Unit::KgPerCm2]
        );
    }
}
