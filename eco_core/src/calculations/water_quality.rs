//! # Water Quality Compliance
//!
//! Checks a water sample for use in concrete mixing and curing against the
//! limits of IS 456:2000 (test methods per IS 3025).
//!
//! ## Parameters
//!
//! | Parameter | Required | Limit | On failure |
//! |---|---|---|---|
//! | pH | yes | 6.0 – 8.5 | NOT SUITABLE |
//! | TDS | yes | ≤ 2000 mg/L | NOT SUITABLE |
//! | Turbidity | yes | ≤ 10 NTU | CAUTION |
//! | Chloride | yes | ≤ 1000 mg/L | NOT SUITABLE |
//! | Sulphate | yes | ≤ 400 mg/L | NOT SUITABLE |
//! | Total Hardness | no | ≤ 600 mg/L as CaCO₃ | CAUTION |
//! | Alkalinity | no | ≤ 200 mg/L as CaCO₃ | CAUTION |
//! | Organic Matter | no | ≤ 200 mg/L | CAUTION |
//!
//! Optional parameters are only checked when a value greater than zero was
//! supplied.
//!
//! ## Verdict
//!
//! Severities form the lattice `SUITABLE < CAUTION < NOT SUITABLE`. The
//! overall verdict is the maximum severity over all failed checks, so it
//! does not depend on the order the checks run in.
//!
//! ## Example
//!
//! ```rust
//! use eco_core::calculations::water_quality::{assess, Verdict, WaterSample};
//!
//! let sample = WaterSample::new(9.0, 500.0, 5.0, 200.0, 100.0);
//! let report = assess(&sample).into_option().unwrap();
//! assert_eq!(report.verdict, Verdict::NotSuitable);
//! assert_eq!(report.issues, vec!["pH: 9 (should be 6.0-8.5)".to_string()]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Outcome;

// ============================================================================
// Verdict and Status
// ============================================================================

/// Overall suitability, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Verdict {
    #[default]
    #[serde(rename = "SUITABLE")]
    Suitable,
    #[serde(rename = "CAUTION")]
    Caution,
    #[serde(rename = "NOT SUITABLE")]
    NotSuitable,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Suitable => "SUITABLE",
            Verdict::Caution => "CAUTION",
            Verdict::NotSuitable => "NOT SUITABLE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of checking one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceStatus {
    Pass,
    Fail,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Pass => f.write_str("PASS"),
            ComplianceStatus::Fail => f.write_str("FAIL"),
        }
    }
}

// ============================================================================
// Parameters and the Standard
// ============================================================================

/// A measured water-quality parameter. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterParameter {
    Ph,
    Tds,
    Turbidity,
    Chloride,
    Sulphate,
    TotalHardness,
    Alkalinity,
    OrganicMatter,
}

impl WaterParameter {
    pub const ALL: [WaterParameter; 8] = [
        WaterParameter::Ph,
        WaterParameter::Tds,
        WaterParameter::Turbidity,
        WaterParameter::Chloride,
        WaterParameter::Sulphate,
        WaterParameter::TotalHardness,
        WaterParameter::Alkalinity,
        WaterParameter::OrganicMatter,
    ];

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            WaterParameter::Ph
                | WaterParameter::Tds
                | WaterParameter::Turbidity
                | WaterParameter::Chloride
                | WaterParameter::Sulphate
        )
    }

    /// Short name used in issue messages
    pub fn label(&self) -> &'static str {
        match self {
            WaterParameter::Ph => "pH",
            WaterParameter::Tds => "TDS",
            WaterParameter::Turbidity => "Turbidity",
            WaterParameter::Chloride => "Chloride",
            WaterParameter::Sulphate => "Sulphate",
            WaterParameter::TotalHardness => "Total Hardness",
            WaterParameter::Alkalinity => "Alkalinity",
            WaterParameter::OrganicMatter => "Organic Matter",
        }
    }

    /// Row title in the printed report
    pub fn report_name(&self) -> &'static str {
        match self {
            WaterParameter::Ph => "pH Value",
            WaterParameter::Tds => "Total Dissolved Solids",
            WaterParameter::Turbidity => "Turbidity",
            WaterParameter::Chloride => "Chloride Content",
            WaterParameter::Sulphate => "Sulphate Content",
            WaterParameter::TotalHardness => "Total Hardness",
            WaterParameter::Alkalinity => "Alkalinity",
            WaterParameter::OrganicMatter => "Organic Matter",
        }
    }

    /// This parameter's row of the IS 456:2000 table
    pub fn limit(&self) -> &'static ParameterLimit {
        IS_456_2000.limit(*self)
    }
}

impl fmt::Display for WaterParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Acceptance limit for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterLimit {
    pub parameter: WaterParameter,

    /// Lower bound, for range limits (pH)
    pub min: Option<f64>,

    /// Upper bound
    pub max: f64,

    /// Unit label for the report table ("" for pH)
    pub unit: &'static str,

    /// Unit used in issue messages
    pub short_unit: &'static str,

    /// Severity contributed when this limit is exceeded
    pub failure: Verdict,
}

impl ParameterLimit {
    /// Whether `value` is within the limit
    pub fn is_satisfied_by(&self, value: f64) -> bool {
        match self.min {
            Some(min) => value >= min && value <= self.max,
            None => value <= self.max,
        }
    }

    /// Limit as printed in the report table
    pub fn limit_text(&self) -> String {
        match self.min {
            Some(min) => format!("{:.1} - {:.1}", min, self.max),
            None => format!("≤ {}", self.max),
        }
    }

    /// Issue message for a failing value
    pub fn violation_message(&self, value: f64) -> String {
        let label = self.parameter.label();
        match self.min {
            Some(min) => format!("{}: {} (should be {:.1}-{:.1})", label, value, min, self.max),
            None => format!(
                "{}: {} {} (max {} {})",
                label, value, self.short_unit, self.max, self.short_unit
            ),
        }
    }
}

/// A fixed table of parameter limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterQualityStandard {
    /// Standard designation
    pub name: &'static str,

    /// Full title of the standard
    pub title: &'static str,

    /// Test method reference
    pub test_method: &'static str,

    /// Title of the test method standard
    pub test_method_title: &'static str,

    /// One row per parameter, in [`WaterParameter::ALL`] order
    pub limits: [ParameterLimit; 8],
}

impl WaterQualityStandard {
    pub fn limit(&self, parameter: WaterParameter) -> &ParameterLimit {
        // limits is laid out in declaration order of WaterParameter
        &self.limits[parameter as usize]
    }
}

const fn ceiling(parameter: WaterParameter, max: f64, unit: &'static str, short_unit: &'static str, failure: Verdict) -> ParameterLimit {
    ParameterLimit {
        parameter,
        min: None,
        max,
        unit,
        short_unit,
        failure,
    }
}

/// Limits for concrete mixing water per IS 456:2000.
pub static IS_456_2000: WaterQualityStandard = WaterQualityStandard {
    name: "IS 456:2000",
    title: "Plain and Reinforced Concrete - Code of Practice",
    test_method: "IS 3025",
    test_method_title: "Methods of Sampling and Test (Physical and Chemical) for Water and Wastewater",
    limits: [
        ParameterLimit {
            parameter: WaterParameter::Ph,
            min: Some(6.0),
            max: 8.5,
            unit: "",
            short_unit: "",
            failure: Verdict::NotSuitable,
        },
        ceiling(WaterParameter::Tds, 2000.0, "mg/L", "mg/L", Verdict::NotSuitable),
        ceiling(WaterParameter::Turbidity, 10.0, "NTU", "NTU", Verdict::Caution),
        ceiling(WaterParameter::Chloride, 1000.0, "mg/L", "mg/L", Verdict::NotSuitable),
        ceiling(WaterParameter::Sulphate, 400.0, "mg/L", "mg/L", Verdict::NotSuitable),
        ceiling(WaterParameter::TotalHardness, 600.0, "mg/L as CaCO₃", "mg/L", Verdict::Caution),
        ceiling(WaterParameter::Alkalinity, 200.0, "mg/L as CaCO₃", "mg/L", Verdict::Caution),
        ceiling(WaterParameter::OrganicMatter, 200.0, "mg/L", "mg/L", Verdict::Caution),
    ],
};

// ============================================================================
// Sample and Report
// ============================================================================

/// Measured values for one water sample.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ph": 7.2,
///   "tds_mgl": 850.0,
///   "turbidity_ntu": 4.0,
///   "chloride_mgl": 250.0,
///   "sulphate_mgl": 120.0,
///   "total_hardness_mgl": 300.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterSample {
    pub ph: Option<f64>,
    pub tds_mgl: Option<f64>,
    pub turbidity_ntu: Option<f64>,
    pub chloride_mgl: Option<f64>,
    pub sulphate_mgl: Option<f64>,
    #[serde(default)]
    pub total_hardness_mgl: Option<f64>,
    #[serde(default)]
    pub alkalinity_mgl: Option<f64>,
    #[serde(default)]
    pub organic_matter_mgl: Option<f64>,
}

impl WaterSample {
    /// Sample with the five required parameters
    pub fn new(ph: f64, tds_mgl: f64, turbidity_ntu: f64, chloride_mgl: f64, sulphate_mgl: f64) -> Self {
        WaterSample {
            ph: Some(ph),
            tds_mgl: Some(tds_mgl),
            turbidity_ntu: Some(turbidity_ntu),
            chloride_mgl: Some(chloride_mgl),
            sulphate_mgl: Some(sulphate_mgl),
            ..WaterSample::default()
        }
    }

    /// Set any parameter
    pub fn with(mut self, parameter: WaterParameter, value: f64) -> Self {
        *self.slot_mut(parameter) = Some(value);
        self
    }

    pub fn get(&self, parameter: WaterParameter) -> Option<f64> {
        match parameter {
            WaterParameter::Ph => self.ph,
            WaterParameter::Tds => self.tds_mgl,
            WaterParameter::Turbidity => self.turbidity_ntu,
            WaterParameter::Chloride => self.chloride_mgl,
            WaterParameter::Sulphate => self.sulphate_mgl,
            WaterParameter::TotalHardness => self.total_hardness_mgl,
            WaterParameter::Alkalinity => self.alkalinity_mgl,
            WaterParameter::OrganicMatter => self.organic_matter_mgl,
        }
    }

    fn slot_mut(&mut self, parameter: WaterParameter) -> &mut Option<f64> {
        match parameter {
            WaterParameter::Ph => &mut self.ph,
            WaterParameter::Tds => &mut self.tds_mgl,
            WaterParameter::Turbidity => &mut self.turbidity_ntu,
            WaterParameter::Chloride => &mut self.chloride_mgl,
            WaterParameter::Sulphate => &mut self.sulphate_mgl,
            WaterParameter::TotalHardness => &mut self.total_hardness_mgl,
            WaterParameter::Alkalinity => &mut self.alkalinity_mgl,
            WaterParameter::OrganicMatter => &mut self.organic_matter_mgl,
        }
    }

    /// Required parameters that are blank
    pub fn missing_required(&self) -> Vec<WaterParameter> {
        WaterParameter::ALL
            .into_iter()
            .filter(|p| p.is_required() && self.get(*p).is_none())
            .collect()
    }
}

/// One evaluated row of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterCheck {
    pub parameter: WaterParameter,
    pub value: f64,
    pub status: ComplianceStatus,
}

/// Compliance report for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterQualityReport {
    /// Standard the sample was checked against
    pub standard: String,

    /// Overall suitability
    pub verdict: Verdict,

    /// Evaluated parameters in report order. Optional parameters that were
    /// not supplied (or ≤ 0) are absent.
    pub checks: Vec<ParameterCheck>,

    /// One message per failed check, in report order
    pub issues: Vec<String>,

    /// When the assessment was made
    pub tested_at: DateTime<Utc>,
}

impl WaterQualityReport {
    /// Status of one parameter, if it was evaluated
    pub fn status(&self, parameter: WaterParameter) -> Option<ComplianceStatus> {
        self.checks
            .iter()
            .find(|c| c.parameter == parameter)
            .map(|c| c.status)
    }

    /// Per-parameter PASS/FAIL
    pub fn compliance(&self) -> BTreeMap<WaterParameter, ComplianceStatus> {
        self.checks.iter().map(|c| (c.parameter, c.status)).collect()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ParameterCheck> {
        self.checks.iter().filter(|c| c.status == ComplianceStatus::Fail)
    }

    /// One-line summary, e.g. `CAUTION - Issues: Turbidity: 12 NTU (max 10 NTU)`
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            self.verdict.to_string()
        } else {
            format!("{} - Issues: {}", self.verdict, self.issues.join(", "))
        }
    }
}

// ============================================================================
// Assessment
// ============================================================================

/// Check a sample now. Any blank required parameter gives `Incomplete`.
pub fn assess(sample: &WaterSample) -> Outcome<WaterQualityReport> {
    assess_at(sample, Utc::now())
}

/// Check a sample with an explicit assessment time.
pub fn assess_at(sample: &WaterSample, tested_at: DateTime<Utc>) -> Outcome<WaterQualityReport> {
    let missing = sample.missing_required();
    if !missing.is_empty() {
        debug!(?missing, "water assessment skipped: required parameters missing");
        return Outcome::Incomplete;
    }

    let checks: Vec<ParameterCheck> = WaterParameter::ALL
        .into_iter()
        .filter_map(|parameter| evaluate(&IS_456_2000, sample, parameter))
        .collect();

    let verdict = checks
        .iter()
        .filter(|c| c.status == ComplianceStatus::Fail)
        .map(|c| IS_456_2000.limit(c.parameter).failure)
        .max()
        .unwrap_or(Verdict::Suitable);

    let issues = checks
        .iter()
        .filter(|c| c.status == ComplianceStatus::Fail)
        .map(|c| IS_456_2000.limit(c.parameter).violation_message(c.value))
        .collect::<Vec<_>>();

    debug!(%verdict, failed = issues.len(), "water assessment");

    Outcome::Computed(WaterQualityReport {
        standard: IS_456_2000.name.to_string(),
        verdict,
        checks,
        issues,
        tested_at,
    })
}

/// Evaluate one parameter, or `None` when an optional one was not supplied.
fn evaluate(
    standard: &WaterQualityStandard,
    sample: &WaterSample,
    parameter: WaterParameter,
) -> Option<ParameterCheck> {
    let limit = standard.limit(parameter);
    let value = if parameter.is_required() {
        sample.get(parameter)?
    } else {
        sample.get(parameter).unwrap_or(0.0)
    };

    let status = if limit.is_satisfied_by(value) {
        ComplianceStatus::Pass
    } else {
        ComplianceStatus::Fail
    };

    // Optional parameters only appear when failing or supplied above zero
    if !parameter.is_required() && status == ComplianceStatus::Pass && value <= 0.0 {
        return None;
    }

    Some(ParameterCheck {
        parameter,
        value,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn suitable_sample() -> WaterSample {
        WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0)
    }

    fn report(sample: &WaterSample) -> WaterQualityReport {
        assess(sample).into_option().expect("required parameters present")
    }

    #[test]
    fn test_suitable() {
        let r = report(&suitable_sample());
        assert_eq!(r.verdict, Verdict::Suitable);
        assert!(r.issues.is_empty());
        assert_eq!(r.checks.len(), 5);
        assert!(r.checks.iter().all(|c| c.status == ComplianceStatus::Pass));
        assert_eq!(r.summary(), "SUITABLE");
    }

    #[test]
    fn test_high_ph_not_suitable() {
        let r = report(&suitable_sample().with(WaterParameter::Ph, 9.0));
        assert_eq!(r.verdict, Verdict::NotSuitable);
        assert_eq!(r.status(WaterParameter::Ph), Some(ComplianceStatus::Fail));
        assert_eq!(r.issues, vec!["pH: 9 (should be 6.0-8.5)"]);
    }

    #[test]
    fn test_compliance_map_and_failed_checks() {
        let r = report(&suitable_sample().with(WaterParameter::Ph, 9.0));
        let compliance = r.compliance();
        assert_eq!(compliance.len(), 5);
        assert_eq!(compliance[&WaterParameter::Ph], ComplianceStatus::Fail);
        assert_eq!(compliance[&WaterParameter::Tds], ComplianceStatus::Pass);
        assert!(!compliance.contains_key(&WaterParameter::Alkalinity));

        let failed: Vec<WaterParameter> = r.failed().map(|c| c.parameter).collect();
        assert_eq!(failed, vec![WaterParameter::Ph]);

        let ok = report(&suitable_sample());
        assert_eq!(ok.failed().count(), 0);
        assert!(ok.compliance().values().all(|s| *s == ComplianceStatus::Pass));
    }

    #[test]
    fn test_ph_bounds_inclusive() {
        assert_eq!(report(&suitable_sample().with(WaterParameter::Ph, 6.0)).verdict, Verdict::Suitable);
        assert_eq!(report(&suitable_sample().with(WaterParameter::Ph, 8.5)).verdict, Verdict::Suitable);
        assert_eq!(
            report(&suitable_sample().with(WaterParameter::Ph, 5.9)).verdict,
            Verdict::NotSuitable
        );
    }

    #[test]
    fn test_turbidity_is_caution() {
        let r = report(&suitable_sample().with(WaterParameter::Turbidity, 12.5));
        assert_eq!(r.verdict, Verdict::Caution);
        assert_eq!(r.summary(), "CAUTION - Issues: Turbidity: 12.5 NTU (max 10 NTU)");
    }

    #[test]
    fn test_turbidity_does_not_downgrade() {
        let r = report(
            &suitable_sample()
                .with(WaterParameter::Tds, 2500.0)
                .with(WaterParameter::Turbidity, 15.0),
        );
        assert_eq!(r.verdict, Verdict::NotSuitable);
        assert_eq!(
            r.issues,
            vec!["TDS: 2500 mg/L (max 2000 mg/L)", "Turbidity: 15 NTU (max 10 NTU)"]
        );
    }

    #[test]
    fn test_chloride_and_sulphate_messages() {
        let r = report(
            &suitable_sample()
                .with(WaterParameter::Chloride, 1200.0)
                .with(WaterParameter::Sulphate, 450.0),
        );
        assert_eq!(r.verdict, Verdict::NotSuitable);
        assert_eq!(
            r.issues,
            vec![
                "Chloride: 1200 mg/L (max 1000 mg/L)",
                "Sulphate: 450 mg/L (max 400 mg/L)"
            ]
        );
    }

    #[test]
    fn test_optional_parameters() {
        // Absent: not in the table
        let r = report(&suitable_sample());
        assert_eq!(r.status(WaterParameter::TotalHardness), None);

        // Supplied and passing
        let r = report(&suitable_sample().with(WaterParameter::Alkalinity, 150.0));
        assert_eq!(r.status(WaterParameter::Alkalinity), Some(ComplianceStatus::Pass));

        // Zero counts as not supplied
        let r = report(&suitable_sample().with(WaterParameter::OrganicMatter, 0.0));
        assert_eq!(r.status(WaterParameter::OrganicMatter), None);

        // Failing optional only raises to CAUTION
        let r = report(&suitable_sample().with(WaterParameter::TotalHardness, 700.0));
        assert_eq!(r.verdict, Verdict::Caution);
        assert_eq!(r.issues, vec!["Total Hardness: 700 mg/L (max 600 mg/L)"]);
    }

    #[test]
    fn test_optional_failure_keeps_not_suitable() {
        let r = report(
            &suitable_sample()
                .with(WaterParameter::Sulphate, 500.0)
                .with(WaterParameter::OrganicMatter, 250.0),
        );
        assert_eq!(r.verdict, Verdict::NotSuitable);
        assert_eq!(r.issues.len(), 2);
    }

    #[test]
    fn test_missing_required_is_incomplete() {
        for parameter in WaterParameter::ALL.into_iter().filter(|p| p.is_required()) {
            let mut sample = suitable_sample();
            *sample.slot_mut(parameter) = None;
            assert!(assess(&sample).is_incomplete(), "{} blank", parameter);
        }
        assert!(assess(&WaterSample::default()).is_incomplete());
    }

    /// Sequential escalation as the rules were first written: required
    /// checks in table order, then optional ones, never downgrading.
    fn sequential_verdict(failing: &[WaterParameter]) -> Verdict {
        let mut overall = Verdict::Suitable;
        for p in WaterParameter::ALL {
            if !failing.contains(&p) {
                continue;
            }
            overall = match p {
                WaterParameter::Ph
                | WaterParameter::Tds
                | WaterParameter::Chloride
                | WaterParameter::Sulphate => Verdict::NotSuitable,
                WaterParameter::Turbidity => {
                    if overall == Verdict::Suitable {
                        Verdict::Caution
                    } else {
                        Verdict::NotSuitable
                    }
                }
                _ => {
                    if overall == Verdict::Suitable {
                        Verdict::Caution
                    } else {
                        overall
                    }
                }
            };
        }
        overall
    }

    #[test]
    fn test_max_severity_matches_sequential_escalation() {
        let failing_values = [9.0, 2500.0, 20.0, 1500.0, 600.0, 900.0, 300.0, 300.0];
        for mask in 0u32..(1 << 8) {
            let mut sample = suitable_sample();
            let mut failing = Vec::new();
            for (i, p) in WaterParameter::ALL.into_iter().enumerate() {
                if mask & (1 << i) != 0 {
                    sample = sample.with(p, failing_values[i]);
                    failing.push(p);
                }
            }
            let r = report(&sample);
            assert_eq!(r.verdict, sequential_verdict(&failing), "mask {:08b}", mask);
            assert_eq!(r.issues.len(), failing.len());
        }
    }

    #[test]
    fn test_standard_table_order() {
        for (i, p) in WaterParameter::ALL.into_iter().enumerate() {
            assert_eq!(IS_456_2000.limits[i].parameter, p);
        }
        assert_eq!(WaterParameter::Ph.limit().limit_text(), "6.0 - 8.5");
        assert_eq!(WaterParameter::Tds.limit().limit_text(), "≤ 2000");
    }

    #[test]
    fn test_report_serialization() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 10, 30, 0).unwrap();
        let sample = suitable_sample().with(WaterParameter::Turbidity, 11.0);
        let r = assess_at(&sample, at).into_option().unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["verdict"], "CAUTION");
        assert_eq!(json["checks"][2]["parameter"], "turbidity");
        assert_eq!(json["checks"][2]["status"], "FAIL");
        let roundtrip: WaterQualityReport = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, r);
    }
}
