//! # PDF Generation Module
//!
//! Compiles the water quality report to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via string replacement before compilation
//! - Fonts come from `typst-assets`, nothing is read from disk
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use eco_core::calculations::water_quality::{assess, WaterSample};
//! use eco_core::pdf::render_water_quality_pdf;
//! use eco_core::settings::Settings;
//!
//! let report = assess(&WaterSample::new(7.2, 850.0, 4.0, 250.0, 120.0))
//!     .into_option()
//!     .unwrap();
//! let pdf_bytes = render_water_quality_pdf(&report, &Settings::default()).unwrap();
//! std::fs::write("water_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, Utc};
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::water_quality::{Verdict, WaterQualityReport, IS_456_2000};
use crate::errors::{CalcError, CalcResult};
use crate::report::{self, DISCLAIMER};
use crate::settings::Settings;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Template
// ============================================================================

const WATER_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 8pt)[{{GENERATOR}}]],
      align(right)[#text(size: 8pt)[Page #counter(page).display()]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10.5pt)

#align(center)[
  #text(size: 17pt, weight: "bold")[{{TITLE}}]
  #v(2pt)
  #text(size: 10pt)[{{STANDARDS_LINE}}]
]

#v(8pt)

#grid(
  columns: (auto, 1fr),
  gutter: 6pt,
  [*Test Date:*], [{{DATE}}],
  [*Test Time:*], [{{TIME}}],
  [*Report Generated by:*], [{{GENERATOR}}],
)

== Overall Assessment

#block(width: 100%, fill: rgb("{{VERDICT_FILL}}"), inset: 10pt, radius: 4pt)[
  #text(size: 13pt, weight: "bold")[Water Suitability: {{VERDICT}}]
]

== Test Results & Compliance

#table(
  columns: (2fr, 1fr, 1.2fr, 1.4fr, 1.2fr),
  stroke: 0.5pt + gray,
  inset: 6pt,
  table.header([*Parameter*], [*Test Result*], [*{{STANDARD}} Limit*], [*Unit*], [*Compliance Status*]),
{{ROWS}}
)

{{ISSUES}}

== Reference Standards

*{{STANDARD}}* - {{STANDARD_TITLE}}

*{{TEST_METHOD}}* - {{TEST_METHOD_TITLE}}

#v(12pt)
#text(size: 9pt)[_{{DISCLAIMER}}_]
"##;

/// Background color of the verdict banner
fn verdict_fill(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Suitable => "#d4edda",
        Verdict::Caution => "#fff3cd",
        Verdict::NotSuitable => "#f8d7da",
    }
}

fn build_rows(report: &WaterQualityReport) -> String {
    report
        .checks
        .iter()
        .map(|check| {
            let cells = report::table_row(check)
                .map(|cell| format!("[{}]", escape_typst(&cell)))
                .join(", ");
            format!("  {},", cells)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_issues(report: &WaterQualityReport) -> String {
    if report.issues.is_empty() {
        return String::new();
    }
    let items = report
        .issues
        .iter()
        .map(|issue| format!("- {}", escape_typst(issue)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("== Issues Identified\n\n{}\n", items)
}

/// Compile the water quality report to PDF bytes.
pub fn render_water_quality_pdf(report: &WaterQualityReport, settings: &Settings) -> CalcResult<Vec<u8>> {
    let source = WATER_TEMPLATE
        .replace("{{TITLE}}", &escape_typst(&settings.report.title.to_uppercase()))
        .replace("{{STANDARDS_LINE}}", &escape_typst(&report::standards_line()))
        .replace("{{DATE}}", &report::test_date(report))
        .replace("{{TIME}}", &report::test_time(report))
        .replace("{{GENERATOR}}", &escape_typst(&settings.report.generator))
        .replace("{{VERDICT_FILL}}", verdict_fill(report.verdict))
        .replace("{{VERDICT}}", report.verdict.label())
        .replace("{{ROWS}}", &build_rows(report))
        .replace("{{ISSUES}}", &build_issues(report))
        .replace("{{STANDARD_TITLE}}", &escape_typst(IS_456_2000.title))
        .replace("{{STANDARD}}", &escape_typst(&report.standard))
        .replace("{{TEST_METHOD_TITLE}}", &escape_typst(IS_456_2000.test_method_title))
        .replace("{{TEST_METHOD}}", IS_456_2000.test_method)
        .replace("{{DISCLAIMER}}", &escape_typst(DISCLAIMER));

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_failed(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_failed(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })?;

    debug!(bytes = pdf_bytes.len(), verdict = %report.verdict, "water quality pdf");
    Ok(pdf_bytes)
}

/// Escape Typst markup characters in user-visible text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::water_quality::{assess, WaterParameter, WaterSample};

    #[test]
    fn test_pdf_generation() {
        let sample = WaterSample::new(9.0, 2500.0, 12.0, 200.0, 100.0)
            .with(WaterParameter::Alkalinity, 150.0);
        let report = assess(&sample).into_option().unwrap();
        let pdf = render_water_quality_pdf(&report, &Settings::default());

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_generator_with_markup_characters() {
        let mut settings = Settings::default();
        settings.report.generator = "Lab #3 <site_a> [east]".to_string();
        let report = assess(&WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0))
            .into_option()
            .unwrap();
        let pdf = render_water_quality_pdf(&report, &settings).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("a*b_c"), "a\\*b\\_c");
        assert_eq!(escape_typst("≤ 2000"), "≤ 2000");
    }

    #[test]
    fn test_issue_list_only_on_failure() {
        let ok = assess(&WaterSample::new(7.0, 500.0, 5.0, 200.0, 100.0))
            .into_option()
            .unwrap();
        assert!(build_issues(&ok).is_empty());

        let bad = assess(&WaterSample::new(7.0, 500.0, 5.0, 1200.0, 100.0))
            .into_option()
            .unwrap();
        assert!(build_issues(&bad).contains("Chloride: 1200 mg/L (max 1000 mg/L)"));
    }
}
