use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use eco_core::calculations::conversion::{convert, convert_between, DISPLAY_DECIMALS};
use eco_core::calculations::{format_fixed, parse_field, Outcome};
use eco_core::units::{Unit, UnitCategory};
use serde::Serialize;

use super::finish;
use crate::output;
use crate::OutputFormat;

#[derive(Serialize)]
struct SingleConversion {
    from_unit: Unit,
    to_unit: Unit,
    value: f64,
    converted: f64,
    display: String,
}

pub fn run(value: &str, unit: &str, to: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let from: Unit = unit.parse().context("Unrecognized source unit")?;
    let target: Option<Unit> = to
        .map(str::parse::<Unit>)
        .transpose()
        .context("Unrecognized target unit")?;

    let Some(value) = parse_field(value) else {
        return finish(&Outcome::<()>::Incomplete, format, |_, _| Ok(()));
    };

    match target {
        Some(to_unit) => {
            let converted = convert_between(value, from, to_unit)?;
            let single = SingleConversion {
                from_unit: from,
                to_unit,
                value,
                converted,
                display: format_fixed(converted, DISPLAY_DECIMALS),
            };
            finish(&Outcome::Computed(single), format, |w, s| {
                writeln!(
                    w,
                    "{} {} = {} {}",
                    s.value,
                    s.from_unit.display_name(),
                    s.display,
                    s.to_unit.display_name()
                )
            })
        }
        None => {
            let result = convert(value, from);
            finish(&Outcome::Computed(result), format, |w, r| {
                output::text::write_conversion(w, value, r)
            })
        }
    }
}

#[derive(Serialize)]
struct CategoryListing {
    category: UnitCategory,
    base_unit: Unit,
    units: Vec<Unit>,
}

pub fn list_units(category: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let categories: Vec<UnitCategory> = match category {
        Some(name) => vec![name.parse()?],
        None => UnitCategory::ALL.to_vec(),
    };

    let listings: Vec<CategoryListing> = categories
        .into_iter()
        .map(|category| CategoryListing {
            category,
            base_unit: category.base_unit(),
            units: category.units().collect(),
        })
        .collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Json => output::json::write_json(&mut handle, &listings)?,
        OutputFormat::Text => {
            for listing in &listings {
                writeln!(handle, "{}:", listing.category)?;
                for unit in &listing.units {
                    let marker = if unit.is_base() { " (base)" } else { "" };
                    writeln!(handle, "  {:<16} {}{}", unit.slug(), unit.display_name(), marker)?;
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
