//! # eco-tools
//!
//! Command-line front end for the eco_core calculators.
//!
//! Exit codes: 0 when a result was computed, 2 when a required input was
//! blank or unparseable, 1 on errors.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eco_core::Settings;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "ECO_TOOLS_CONFIG";

#[derive(Parser)]
#[command(name = "eco-tools")]
#[command(about = "Renewable energy and site engineering calculators")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    #[arg(long, short, value_enum, default_value = "text", global = true, help = "Output format")]
    pub format: OutputFormat,
    #[arg(long, value_name = "PATH", global = true, help = "Settings JSON (overrides ECO_TOOLS_CONFIG)")]
    pub config: Option<PathBuf>,
    #[arg(long, short, global = true, help = "Log calculator activity to stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Convert a value to every unit of its category")]
    Convert {
        #[arg(help = "Value to convert", allow_hyphen_values = true)]
        value: String,
        #[arg(help = "Source unit (e.g. meter, hectare, kg-per-cm2)")]
        unit: String,
        #[arg(long, value_name = "UNIT", help = "Show only this target unit")]
        to: Option<String>,
    },
    #[command(about = "List unit categories and units")]
    Units {
        #[arg(help = "Only list this category")]
        category: Option<String>,
    },
    #[command(about = "Wind power resource through a rotor")]
    Wind {
        #[arg(long, value_name = "M/S", allow_hyphen_values = true, help = "Wind speed")]
        speed: Option<String>,
        #[arg(long, value_name = "M", allow_hyphen_values = true, help = "Rotor radius")]
        radius: Option<String>,
        #[arg(long, value_name = "KG/M3", allow_hyphen_values = true, help = "Air density")]
        air_density: Option<String>,
    },
    #[command(about = "Solar panel output")]
    Solar {
        #[arg(long, value_name = "W/M2", allow_hyphen_values = true, help = "Solar irradiance")]
        irradiance: Option<String>,
        #[arg(long, value_name = "M2", allow_hyphen_values = true, help = "Panel area")]
        area: Option<String>,
        #[arg(long, value_name = "PCT", allow_hyphen_values = true, help = "Panel efficiency")]
        efficiency: Option<String>,
        #[arg(long, value_name = "HOURS", allow_hyphen_values = true, help = "Peak sun hours")]
        sun_hours: Option<String>,
    },
    #[command(about = "Safe bearing capacity of soil (simplified Terzaghi)")]
    Bearing {
        #[arg(long, value_name = "KPA", allow_hyphen_values = true, help = "Cohesion c")]
        cohesion: Option<String>,
        #[arg(long, value_name = "DEG", allow_hyphen_values = true, help = "Friction angle phi")]
        friction_angle: Option<String>,
        #[arg(long, value_name = "KN/M3", allow_hyphen_values = true, help = "Dry unit weight gamma")]
        unit_weight: Option<String>,
        #[arg(long, help = "Soil type (clay, sand, silt, gravel)")]
        soil: Option<String>,
    },
    #[command(about = "Check mixing water against IS 456:2000")]
    Water(commands::water::WaterArgs),
    #[command(about = "Volume of bulk material from its weight")]
    Volume {
        #[arg(long, value_name = "WEIGHT", allow_hyphen_values = true, help = "Weighed quantity")]
        weight: Option<String>,
        #[arg(long, help = "Weight unit (kg, ton)")]
        weight_unit: Option<String>,
        #[arg(long, help = "Material (water, soil, murrum, hard-rock, other)")]
        material: Option<String>,
        #[arg(long, value_name = "KG/M3", allow_hyphen_values = true, help = "Density (defaults to the material's)")]
        density: Option<String>,
    },
    #[command(about = "Evaluate a JSON calculation item")]
    Eval {
        #[arg(help = "Path to the JSON document, or - for stdin")]
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_settings(explicit: Option<&PathBuf>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => Some(path.clone()),
        None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
    };
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings = Settings::from_json(&json)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(cli.global.config.as_ref())?;
    let format = cli.global.format;

    match cli.command {
        Commands::Convert { value, unit, to } => {
            commands::convert::run(&value, &unit, to.as_deref(), format)
        }
        Commands::Units { category } => commands::convert::list_units(category.as_deref(), format),
        Commands::Wind {
            speed,
            radius,
            air_density,
        } => commands::energy::wind(
            speed.as_deref(),
            radius.as_deref(),
            air_density.as_deref(),
            &settings,
            format,
        ),
        Commands::Solar {
            irradiance,
            area,
            efficiency,
            sun_hours,
        } => commands::energy::solar(
            irradiance.as_deref(),
            area.as_deref(),
            efficiency.as_deref(),
            sun_hours.as_deref(),
            &settings,
            format,
        ),
        Commands::Bearing {
            cohesion,
            friction_angle,
            unit_weight,
            soil,
        } => commands::site::bearing(
            cohesion.as_deref(),
            friction_angle.as_deref(),
            unit_weight.as_deref(),
            soil.as_deref(),
            format,
        ),
        Commands::Water(args) => commands::water::run(&args, &settings, format),
        Commands::Volume {
            weight,
            weight_unit,
            material,
            density,
        } => commands::site::volume(
            weight.as_deref(),
            weight_unit.as_deref(),
            material.as_deref(),
            density.as_deref(),
            &settings,
            format,
        ),
        Commands::Eval { path } => commands::eval::run(&path, format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
