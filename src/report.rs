//! Report generation: context assembly composed with template rendering.

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::context::{DOCUMENT_DATE_FORMAT, ReportContext};
use crate::error::AppError;
use crate::form::ExamForm;
use crate::renderer::{RenderedDocument, render_docx};

/// MIME type of the rendered document, for the delivery layer.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A rendered report together with its suggested download filename.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub filename: String,
    pub document: RenderedDocument,
}

/// Generate one report from the submitted form.
///
/// Today's date is captured here, at render time, so consecutive calls
/// never reuse a stale date. Render failures are logged with detail and
/// returned as errors; no partially filled document is ever produced.
pub fn generate(config: &AppConfig, form: &ExamForm) -> Result<GeneratedReport, AppError> {
    generate_as_of(config, form, Local::now().date_naive())
}

/// Generate a report as of an explicit date.
///
/// The date is injected for deterministic tests; [`generate`] is the
/// production entry point.
pub fn generate_as_of(
    config: &AppConfig,
    form: &ExamForm,
    today: NaiveDate,
) -> Result<GeneratedReport, AppError> {
    let context = ReportContext::build(form, config, today);
    let template_path = config.template_path();

    match render_docx(&template_path, &context) {
        Ok(document) => {
            let filename = suggested_filename(&form.run, today);
            info!(filename = %filename, size = document.len(), "report generated");
            Ok(GeneratedReport { filename, document })
        }
        Err(err) => {
            error!(template = %template_path.display(), error = %err, "report generation failed");
            Err(err.into())
        }
    }
}

/// Download filename: `Informe_{run}_{DD-MM-YYYY}.docx`, with `SIN_RUN`
/// standing in when no RUN was submitted.
pub fn suggested_filename(run: &str, today: NaiveDate) -> String {
    let run = if run.trim().is_empty() { "SIN_RUN" } else { run };
    format!("Informe_{}_{}.docx", run, today.format(DOCUMENT_DATE_FORMAT))
}
