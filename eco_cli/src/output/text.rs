use std::io::{self, Write};

use eco_core::calculations::{
    BearingResult, ConversionResult, SolarResult, VolumeResult, WaterQualityReport, WindResult,
};
use eco_core::calculations::water_quality::ComplianceStatus;

const RULE: &str = "═══════════════════════════════════════";

fn banner(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w, "{}", RULE)?;
    writeln!(w, "  {}", title)?;
    writeln!(w, "{}", RULE)
}

fn non_finite_note(w: &mut dyn Write, finite: bool) -> io::Result<()> {
    if !finite {
        writeln!(w)?;
        writeln!(w, "  Note: result is not a finite number; check the inputs.")?;
    }
    Ok(())
}

pub fn write_conversion(w: &mut dyn Write, value: f64, result: &ConversionResult) -> io::Result<()> {
    let (Some(category), Some(from)) = (result.category, result.from_unit) else {
        return Ok(());
    };
    banner(w, &format!("{} CONVERSION", category.display_name().to_uppercase()))?;
    writeln!(w, "  {} {}", value, from.display_name())?;
    writeln!(w)?;
    for (unit, shown) in result.iter() {
        writeln!(w, "  {:<22} {:>24}", unit.display_name(), shown)?;
    }
    Ok(())
}

pub fn write_wind(w: &mut dyn Write, result: &WindResult) -> io::Result<()> {
    banner(w, "WIND POWER")?;
    writeln!(w, "  Air density:       {} kg/m³", result.air_density_kgm3)?;
    writeln!(w, "  Swept area:        {:.2} m²", result.swept_area_m2)?;
    writeln!(w)?;
    writeln!(w, "  Power Output:      {} kW", result.power_kw_display())?;
    writeln!(w, "  Energy Density:    {} W/m²", result.energy_density_display())?;
    if let Some(zone) = result.zone {
        writeln!(w, "  Wind Zone:         {}", zone)?;
    }
    non_finite_note(w, result.is_finite())
}

pub fn write_solar(w: &mut dyn Write, result: &SolarResult) -> io::Result<()> {
    banner(w, "SOLAR POWER")?;
    writeln!(w, "  Efficiency:        {} %", result.efficiency_pct)?;
    writeln!(w, "  Sun hours:         {} h", result.sun_hours)?;
    writeln!(w)?;
    writeln!(w, "  Power Output:      {} W", result.power_display())?;
    writeln!(w, "  Daily Energy:      {} kWh", result.daily_energy_display())?;
    non_finite_note(w, result.power_w.is_finite() && result.daily_energy_kwh.is_finite())
}

pub fn write_bearing(w: &mut dyn Write, result: &BearingResult) -> io::Result<()> {
    banner(w, "SOIL BEARING CAPACITY")?;
    writeln!(w, "  Soil type:         {}", result.soil_type)?;
    writeln!(
        w,
        "  Nc / Nq / Nγ:      {:.2} / {:.2} / {:.2}",
        result.nc, result.nq, result.n_gamma
    )?;
    writeln!(w, "  Ultimate q_ult:    {:.2} kPa", result.ultimate_capacity_kpa)?;
    writeln!(w)?;
    writeln!(
        w,
        "  Safe Bearing Capacity: {} kPa (FS = {})",
        result.safe_capacity_display(),
        result.factor_of_safety
    )?;
    non_finite_note(w, result.is_finite())
}

pub fn write_volume(w: &mut dyn Write, result: &VolumeResult) -> io::Result<()> {
    banner(w, "VOLUME FROM WEIGHT")?;
    writeln!(w, "  Material:          {}", result.material)?;
    writeln!(w, "  Weight:            {} kg", result.weight_kg)?;
    writeln!(w, "  Density:           {} kg/m³", result.density_kgm3)?;
    writeln!(w)?;
    writeln!(w, "  Volume:            {} m³", result.volume_display())?;
    non_finite_note(w, result.volume_m3.is_finite())
}

pub fn write_water(w: &mut dyn Write, report: &WaterQualityReport) -> io::Result<()> {
    banner(w, "WATER QUALITY (IS 456:2000)")?;
    for check in &report.checks {
        let icon = match check.status {
            ComplianceStatus::Pass => "✓",
            ComplianceStatus::Fail => "✗",
        };
        writeln!(
            w,
            "  {} {:<24} {:>10}  {}",
            icon,
            check.parameter.report_name(),
            check.value,
            check.status
        )?;
    }
    writeln!(w)?;
    writeln!(w, "{}", RULE)?;
    writeln!(w, "  {}", report.summary())?;
    writeln!(w, "{}", RULE)
}
