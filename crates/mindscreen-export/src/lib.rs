//! mindscreen-export
//!
//! Paginated PDF reports for a completed screening. Template rendering via
//! Tera, layout and drawing via printpdf. Produces bytes only; nothing is
//! written to disk.

pub mod error;
pub mod pdf;
pub mod render;
pub mod styles;

use serde::{Deserialize, Serialize};

use mindscreen_core::models::outcome::ItemSummary;
use mindscreen_core::models::patient::PatientRecord;
use mindscreen_core::models::score::Score;
use mindscreen_core::models::severity::Severity;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

pub const CONTENT_TYPE: &str = "application/pdf";

pub const DEFAULT_TITLE: &str = "BDI-II Depression Screening Report";

/// Fixed footer printed on every report.
pub const DISCLAIMER: &str = "This report is informational only and is not a diagnosis. \
If you are in danger or thinking about harming yourself, contact your local emergency \
services immediately.";

/// Everything a report needs, gathered from a submitted session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub title: String,
    pub patient: PatientRecord,
    pub score: Score,
    pub severity: Severity,
    pub advisory: String,
    pub crisis_advisory: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemSummary>,
    pub generated_at: jiff::Timestamp,
}

/// A finished report ready to be offered for download.
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render and draw the report for `input`.
pub fn export_report(input: &ReportInput, styles: &DocumentStyles) -> Result<Report, ExportError> {
    let rendered = render::render_report(input)?;
    let bytes = pdf::generate_pdf(&input.title, &rendered, styles)?;

    tracing::info!(
        bytes = bytes.len(),
        severity = %input.severity,
        "report generated"
    );

    Ok(Report {
        filename: report_filename(&input.patient),
        content_type: CONTENT_TYPE,
        bytes,
    })
}

/// Download filename built from the patient name and assessment date.
///
/// Characters outside `[A-Za-z0-9-]` collapse to single underscores; an
/// empty name falls back to `patient`.
pub fn report_filename(patient: &PatientRecord) -> String {
    let mut name = String::new();
    for c in patient.name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            name.push(c);
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    let name = name.trim_matches('_');
    let name = if name.is_empty() { "patient" } else { name };

    format!("bdi-ii-report_{name}_{}.pdf", patient.assessment_date)
}
