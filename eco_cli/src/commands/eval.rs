use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use eco_core::{CalculationItem, CalculationOutput};

use super::finish;
use crate::output;
use crate::OutputFormat;

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path))
    }
}

fn write_output(w: &mut dyn Write, result: &CalculationOutput) -> io::Result<()> {
    match result {
        CalculationOutput::Conversion(r) => {
            let value = match (r.base_value, r.from_unit) {
                (Some(base), Some(unit)) => base / unit.factor(),
                _ => 0.0,
            };
            output::text::write_conversion(w, value, r)
        }
        CalculationOutput::Wind(r) => output::text::write_wind(w, r),
        CalculationOutput::Solar(r) => output::text::write_solar(w, r),
        CalculationOutput::Bearing(r) => output::text::write_bearing(w, r),
        CalculationOutput::WaterQuality(r) => output::text::write_water(w, r),
        CalculationOutput::Volume(r) => output::text::write_volume(w, r),
    }
}

pub fn run(path: &str, format: OutputFormat) -> Result<ExitCode> {
    let json = read_source(path)?;
    let item: CalculationItem =
        serde_json::from_str(&json).context("Not a valid calculation item")?;
    tracing::debug!(calc_type = item.calc_type(), "evaluating item");
    finish(&item.evaluate(), format, write_output)
}
