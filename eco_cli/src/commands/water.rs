use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use eco_core::calculations::parse_field;
use eco_core::calculations::water_quality::{assess, WaterSample};
use eco_core::pdf::render_water_quality_pdf;
use eco_core::report::render_water_quality_text;
use eco_core::{Outcome, Settings};
use tracing::info;

use super::finish;
use crate::output;
use crate::OutputFormat;

#[derive(Args)]
pub struct WaterArgs {
    #[arg(long, allow_hyphen_values = true, help = "pH value")]
    pub ph: Option<String>,
    #[arg(long, value_name = "MG/L", allow_hyphen_values = true, help = "Total dissolved solids")]
    pub tds: Option<String>,
    #[arg(long, value_name = "NTU", allow_hyphen_values = true, help = "Turbidity")]
    pub turbidity: Option<String>,
    #[arg(long, value_name = "MG/L", allow_hyphen_values = true, help = "Chloride")]
    pub chloride: Option<String>,
    #[arg(long, value_name = "MG/L", allow_hyphen_values = true, help = "Sulphate")]
    pub sulphate: Option<String>,
    #[arg(long, value_name = "MG/L", allow_hyphen_values = true, help = "Total hardness as CaCO3 (optional)")]
    pub total_hardness: Option<String>,
    #[arg(long, value_name = "MG/L", allow_hyphen_values = true, help = "Alkalinity as CaCO3 (optional)")]
    pub alkalinity: Option<String>,
    #[arg(long, value_name = "MG/L", allow_hyphen_values = true, help = "Organic matter (optional)")]
    pub organic_matter: Option<String>,
    #[arg(long, help = "Print the full test report")]
    pub report: bool,
    #[arg(long, value_name = "PATH", help = "Write the test report as PDF")]
    pub pdf: Option<PathBuf>,
}

impl WaterArgs {
    fn sample(&self) -> WaterSample {
        let field = |value: &Option<String>| value.as_deref().and_then(parse_field);
        WaterSample {
            ph: field(&self.ph),
            tds_mgl: field(&self.tds),
            turbidity_ntu: field(&self.turbidity),
            chloride_mgl: field(&self.chloride),
            sulphate_mgl: field(&self.sulphate),
            total_hardness_mgl: field(&self.total_hardness),
            alkalinity_mgl: field(&self.alkalinity),
            organic_matter_mgl: field(&self.organic_matter),
        }
    }
}

pub fn run(args: &WaterArgs, settings: &Settings, format: OutputFormat) -> Result<ExitCode> {
    let outcome = assess(&args.sample());

    if let (Some(path), Outcome::Computed(report)) = (&args.pdf, &outcome) {
        let bytes = render_water_quality_pdf(report, settings)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write PDF: {}", path.display()))?;
        info!(path = %path.display(), "pdf report written");
    }

    match (&outcome, args.report, format) {
        (Outcome::Computed(report), true, OutputFormat::Text) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{}", render_water_quality_text(report, settings))?;
            Ok(super::exit_code(&outcome))
        }
        _ => finish(&outcome, format, output::text::write_water),
    }
}
