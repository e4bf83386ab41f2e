//! # Volume From Weight
//!
//! Converts a weighed quantity of bulk material (water, soil, murrum, rock)
//! to its volume using the material's density.
//!
//! ```text
//! W_kg = W · 1000   if W is in metric tons
//! V    = W_kg / ρ   (m³)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use eco_core::calculations::density::{calculate, BulkMaterial, VolumeInput, WeightUnit};
//!
//! let input = VolumeInput::for_material(BulkMaterial::Soil).with_weight(8.0, WeightUnit::Ton);
//! let result = calculate(&input).into_option().unwrap();
//! assert_eq!(result.volume_display(), "5.000000");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::calculations::{format_fixed, Outcome};
use crate::equations::geotechnical::volume_from_weight;
use crate::errors::CalcError;

/// Fractional digits shown for volume
pub const VOLUME_DECIMALS: usize = 6;

/// Bulk material with a default density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkMaterial {
    #[default]
    Water,
    Soil,
    /// Lateritic gravel fill
    Murrum,
    HardRock,
    Other,
}

impl BulkMaterial {
    pub const ALL: [BulkMaterial; 5] = [
        BulkMaterial::Water,
        BulkMaterial::Soil,
        BulkMaterial::Murrum,
        BulkMaterial::HardRock,
        BulkMaterial::Other,
    ];

    /// Typical density (kg/m³)
    pub fn default_density_kgm3(&self) -> f64 {
        match self {
            BulkMaterial::Water => 1000.0,
            BulkMaterial::Soil => 1600.0,
            BulkMaterial::Murrum => 1800.0,
            BulkMaterial::HardRock => 2700.0,
            BulkMaterial::Other => 1000.0,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            BulkMaterial::Water => "water",
            BulkMaterial::Soil => "soil",
            BulkMaterial::Murrum => "murrum",
            BulkMaterial::HardRock => "hard-rock",
            BulkMaterial::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BulkMaterial::Water => "Water",
            BulkMaterial::Soil => "Soil",
            BulkMaterial::Murrum => "Murrum",
            BulkMaterial::HardRock => "Hard Rock",
            BulkMaterial::Other => "Other Material",
        }
    }
}

impl fmt::Display for BulkMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BulkMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        BulkMaterial::ALL
            .into_iter()
            .find(|m| m.slug() == slug)
            .ok_or_else(|| CalcError::unknown_material(slug))
    }
}

/// Unit of the weighed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    /// Metric ton (1000 kg)
    #[default]
    Ton,
}

impl WeightUnit {
    /// Multiplier to kilograms
    pub fn to_kg(&self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Ton => 1000.0,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kg" | "kilogram" => Ok(WeightUnit::Kg),
            "ton" | "t" | "tonne" => Ok(WeightUnit::Ton),
            other => Err(CalcError::unknown_option("weight unit", other)),
        }
    }
}

/// Input parameters for the volume calculation.
///
/// `density_kgm3` is what the user sees in the density field: selecting a
/// material fills it with that material's default, and the user may
/// overwrite or clear it. In JSON an absent `density_kgm3` takes the
/// material's default; an explicit `null` is a cleared field.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "murrum",
///   "density_kgm3": 1800.0,
///   "weight": 12.0,
///   "weight_unit": "ton"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VolumeInputFields")]
pub struct VolumeInput {
    pub material: BulkMaterial,

    /// Density ρ (kg/m³)
    pub density_kgm3: Option<f64>,

    /// Weighed quantity W
    pub weight: Option<f64>,

    pub weight_unit: WeightUnit,
}

impl Default for VolumeInput {
    fn default() -> Self {
        VolumeInput::for_material(BulkMaterial::default())
    }
}

/// Wire form of [`VolumeInput`], telling an absent density from a null one.
#[derive(Deserialize)]
struct VolumeInputFields {
    #[serde(default)]
    material: BulkMaterial,
    #[serde(default, deserialize_with = "present")]
    density_kgm3: Option<Option<f64>>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    weight_unit: WeightUnit,
}

/// Wraps a present field (including `null`) in `Some`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<f64>>, D::Error> {
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl From<VolumeInputFields> for VolumeInput {
    fn from(fields: VolumeInputFields) -> Self {
        let material = fields.material;
        VolumeInput {
            material,
            density_kgm3: fields
                .density_kgm3
                .unwrap_or(Some(material.default_density_kgm3())),
            weight: fields.weight,
            weight_unit: fields.weight_unit,
        }
    }
}

impl VolumeInput {
    /// Blank weight, density prefilled from `material`
    pub fn for_material(material: BulkMaterial) -> Self {
        VolumeInput {
            material,
            density_kgm3: Some(material.default_density_kgm3()),
            weight: None,
            weight_unit: WeightUnit::default(),
        }
    }

    /// Switch material and reset density to its default
    pub fn select_material(&mut self, material: BulkMaterial) {
        self.material = material;
        self.density_kgm3 = Some(material.default_density_kgm3());
    }

    pub fn with_weight(mut self, weight: f64, unit: WeightUnit) -> Self {
        self.weight = Some(weight);
        self.weight_unit = unit;
        self
    }

    pub fn with_density(mut self, density_kgm3: f64) -> Self {
        self.density_kgm3 = Some(density_kgm3);
        self
    }
}

/// Results from the volume calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    pub material: BulkMaterial,

    /// Weight normalized to kilograms
    pub weight_kg: f64,

    /// Density used (kg/m³)
    pub density_kgm3: f64,

    /// Volume (m³)
    pub volume_m3: f64,
}

impl VolumeResult {
    /// Volume in m³ with six decimals
    pub fn volume_display(&self) -> String {
        format_fixed(self.volume_m3, VOLUME_DECIMALS)
    }
}

/// Compute volume. Blank weight or density gives `Incomplete`.
pub fn calculate(input: &VolumeInput) -> Outcome<VolumeResult> {
    let (Some(weight), Some(density)) = (input.weight, input.density_kgm3) else {
        debug!("volume skipped: weight or density missing");
        return Outcome::Incomplete;
    };

    let weight_kg = weight * input.weight_unit.to_kg();
    let volume_m3 = volume_from_weight(weight_kg, density);

    if !volume_m3.is_finite() {
        warn!(weight_kg, density, "volume is not finite");
    }
    debug!(material = input.material.slug(), weight_kg, density, volume_m3, "volume");

    Outcome::Computed(VolumeResult {
        material: input.material,
        weight_kg,
        density_kgm3: density,
        volume_m3,
    })
}
