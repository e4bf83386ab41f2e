use std::process::ExitCode;

use anyhow::{Context, Result};
use eco_core::calculations::bearing::{self, BearingInput, SoilType};
use eco_core::calculations::density::{self, BulkMaterial, VolumeInput, WeightUnit};
use eco_core::calculations::parse_field;
use eco_core::Settings;

use super::finish;
use crate::output;
use crate::OutputFormat;

pub fn bearing(
    cohesion: Option<&str>,
    friction_angle: Option<&str>,
    unit_weight: Option<&str>,
    soil: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let soil_type = match soil {
        Some(name) => name.parse::<SoilType>()?,
        None => SoilType::default(),
    };
    let input = BearingInput {
        soil_type,
        cohesion_kpa: cohesion.and_then(parse_field),
        friction_angle_deg: friction_angle.and_then(parse_field),
        dry_unit_weight_knm3: unit_weight.and_then(parse_field),
    };
    finish(&bearing::calculate(&input), format, output::text::write_bearing)
}

pub fn volume(
    weight: Option<&str>,
    weight_unit: Option<&str>,
    material: Option<&str>,
    density_kgm3: Option<&str>,
    settings: &Settings,
    format: OutputFormat,
) -> Result<ExitCode> {
    let material = match material {
        Some(name) => name.parse::<BulkMaterial>()?,
        None => settings.defaults.material,
    };
    let weight_unit = match weight_unit {
        Some(name) => name
            .parse::<WeightUnit>()
            .context("Weight unit must be kg or ton")?,
        None => settings.defaults.weight_unit,
    };

    let mut input = VolumeInput::for_material(material);
    input.weight = weight.and_then(parse_field);
    input.weight_unit = weight_unit;
    // An explicit density replaces the material default, even when blank
    if let Some(text) = density_kgm3 {
        input.density_kgm3 = parse_field(text);
    }

    finish(&density::calculate(&input), format, output::text::write_volume)
}
