use std::process::ExitCode;

use anyhow::Result;
use eco_core::calculations::parse_field;
use eco_core::calculations::solar::{self, SolarInput};
use eco_core::calculations::wind::{self, WindInput};
use eco_core::Settings;

use super::finish;
use crate::output;
use crate::OutputFormat;

pub fn wind(
    speed: Option<&str>,
    radius: Option<&str>,
    air_density: Option<&str>,
    settings: &Settings,
    format: OutputFormat,
) -> Result<ExitCode> {
    let input = WindInput {
        wind_speed_ms: speed.and_then(parse_field),
        rotor_radius_m: radius.and_then(parse_field),
        air_density_kgm3: air_density
            .and_then(parse_field)
            .or(Some(settings.defaults.air_density_kgm3)),
    };
    finish(&wind::calculate(&input), format, output::text::write_wind)
}

pub fn solar(
    irradiance: Option<&str>,
    area: Option<&str>,
    efficiency: Option<&str>,
    sun_hours: Option<&str>,
    settings: &Settings,
    format: OutputFormat,
) -> Result<ExitCode> {
    let input = SolarInput {
        irradiance_wm2: irradiance.and_then(parse_field),
        panel_area_m2: area.and_then(parse_field),
        efficiency_pct: efficiency
            .and_then(parse_field)
            .or(Some(settings.defaults.panel_efficiency_pct)),
        sun_hours: sun_hours
            .and_then(parse_field)
            .or(Some(settings.defaults.sun_hours)),
    };
    finish(&solar::calculate(&input), format, output::text::write_solar)
}
