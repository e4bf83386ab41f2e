//! # Plain-Text Water Quality Report
//!
//! Printable rendering of a [`WaterQualityReport`]. The PDF in
//! [`crate::pdf`] carries the same sections.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use eco_core::calculations::water_quality::{assess_at, WaterSample};
//! use eco_core::report::render_water_quality_text;
//! use eco_core::settings::Settings;
//!
//! let at = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
//! let report = assess_at(&WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0), at)
//!     .into_option()
//!     .unwrap();
//! let text = render_water_quality_text(&report, &Settings::default());
//! assert!(text.contains("Water Suitability: SUITABLE"));
//! ```

use std::fmt::Write;

use crate::calculations::water_quality::{
    ParameterCheck, WaterQualityReport, IS_456_2000,
};
use crate::settings::Settings;

pub const DISCLAIMER: &str = "This report is generated for reference purposes only. \
For official certification, please consult an accredited laboratory.";

const RULE_WIDTH: usize = 78;

/// Test date as printed on reports
pub fn test_date(report: &WaterQualityReport) -> String {
    report.tested_at.format("%d/%m/%Y").to_string()
}

/// Test time as printed on reports
pub fn test_time(report: &WaterQualityReport) -> String {
    report.tested_at.format("%H:%M:%S UTC").to_string()
}

/// Subtitle line naming both standards
pub fn standards_line() -> String {
    format!(
        "As per {} & {} Indian Standards",
        IS_456_2000.name, IS_456_2000.test_method
    )
}

/// One table row: parameter, result, limit, unit, status
pub(crate) fn table_row(check: &ParameterCheck) -> [String; 5] {
    let limit = IS_456_2000.limit(check.parameter);
    let unit = if limit.unit.is_empty() { "-" } else { limit.unit };
    [
        check.parameter.report_name().to_string(),
        check.value.to_string(),
        limit.limit_text(),
        unit.to_string(),
        check.status.to_string(),
    ]
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "─".repeat(title.chars().count()));
}

/// Render the report as plain text.
pub fn render_water_quality_text(report: &WaterQualityReport, settings: &Settings) -> String {
    let mut out = String::new();
    let rule = "═".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  {}", settings.report.title.to_uppercase());
    let _ = writeln!(out, "  {}", standards_line());
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Test Date:           {}", test_date(report));
    let _ = writeln!(out, "Test Time:           {}", test_time(report));
    let _ = writeln!(out, "Report Generated by: {}", settings.report.generator);

    heading(&mut out, "OVERALL ASSESSMENT");
    let _ = writeln!(out, "Water Suitability: {}", report.verdict);

    heading(&mut out, "TEST RESULTS & COMPLIANCE");
    let header = [
        "Parameter".to_string(),
        "Test Result".to_string(),
        format!("{} Limit", IS_456_2000.name),
        "Unit".to_string(),
        "Compliance Status".to_string(),
    ];
    let rows: Vec<[String; 5]> = report.checks.iter().map(table_row).collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let write_row = |out: &mut String, cells: &[String; 5]| {
        let line = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    };
    write_row(&mut out, &header);
    let _ = writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    for row in &rows {
        write_row(&mut out, row);
    }

    if !report.issues.is_empty() {
        heading(&mut out, "ISSUES IDENTIFIED");
        for issue in &report.issues {
            let _ = writeln!(out, "  • {}", issue);
        }
    }

    heading(&mut out, "REFERENCE STANDARDS");
    let _ = writeln!(out, "{} - {}", IS_456_2000.name, IS_456_2000.title);
    let _ = writeln!(out, "{} - {}", IS_456_2000.test_method, IS_456_2000.test_method_title);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);
    let _ = writeln!(out, "{}", rule);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::water_quality::{assess_at, WaterParameter, WaterSample};
    use chrono::{TimeZone, Utc};

    fn report_for(sample: WaterSample) -> WaterQualityReport {
        let at = Utc.with_ymd_and_hms(2025, 6, 30, 14, 5, 9).unwrap();
        assess_at(&sample, at).into_option().unwrap()
    }

    #[test]
    fn test_sections_present() {
        let report = report_for(WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0));
        let text = render_water_quality_text(&report, &Settings::default());

        assert!(text.contains("WATER QUALITY TEST REPORT"));
        assert!(text.contains("As per IS 456:2000 & IS 3025 Indian Standards"));
        assert!(text.contains("Test Date:           30/06/2025"));
        assert!(text.contains("Test Time:           14:05:09 UTC"));
        assert!(text.contains("Report Generated by: VR Eco Energy Engineering Tools"));
        assert!(text.contains("Water Suitability: SUITABLE"));
        assert!(text.contains("Total Dissolved Solids"));
        assert!(text.contains("IS 3025 - Methods of Sampling"));
        assert!(text.contains(DISCLAIMER));
        // No failures, no issues section
        assert!(!text.contains("ISSUES IDENTIFIED"));
    }

    #[test]
    fn test_optional_rows_only_when_supplied() {
        let base = WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0);
        let text = render_water_quality_text(&report_for(base.clone()), &Settings::default());
        assert!(!text.contains("Total Hardness"));

        let sample = base.with(WaterParameter::TotalHardness, 320.0);
        let text = render_water_quality_text(&report_for(sample), &Settings::default());
        assert!(text.contains("Total Hardness"));
        assert!(text.contains("mg/L as CaCO₃"));
    }

    #[test]
    fn test_issues_listed() {
        let sample = WaterSample::new(9.0, 500.0, 12.0, 200.0, 100.0);
        let text = render_water_quality_text(&report_for(sample), &Settings::default());
        assert!(text.contains("Water Suitability: NOT SUITABLE"));
        assert!(text.contains("ISSUES IDENTIFIED"));
        assert!(text.contains("  • pH: 9 (should be 6.0-8.5)"));
        assert!(text.contains("  • Turbidity: 12 NTU (max 10 NTU)"));
    }

    #[test]
    fn test_custom_generator() {
        let mut settings = Settings::default();
        settings.report.generator = "Site Lab 4".to_string();
        let report = report_for(WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0));
        let text = render_water_quality_text(&report, &settings);
        assert!(text.contains("Report Generated by: Site Lab 4"));
    }

    #[test]
    fn test_ph_row_has_dash_unit() {
        let report = report_for(WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0));
        let row = table_row(&report.checks[0]);
        assert_eq!(row, ["pH Value", "7", "6.0 - 8.5", "-", "PASS"].map(String::from));
    }
}
