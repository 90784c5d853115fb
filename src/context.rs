//! Context assembly: derived dates, patient age, and fixed fields.
//!
//! A context is created per request, fully populated before rendering,
//! and discarded afterwards. Nothing here survives between calls.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::config::AppConfig;
use crate::form::ExamForm;

/// Date format used throughout the rendered document.
pub const DOCUMENT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Birth date input format (HTML `<input type="date">` submits ISO dates).
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Patient age outcome.
///
/// `Unknown` is an explicit sentinel rendered as `N/A`, distinct from the
/// key being absent from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    /// Whole years completed as of the reference date.
    Years(i32),
    /// Birth date missing or unparseable.
    Unknown,
}

impl Age {
    /// Whole years between `birth` and `today`, one less when the
    /// birthday has not yet been reached this year.
    pub fn from_birth_date(birth: NaiveDate, today: NaiveDate) -> Self {
        let mut years = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        Age::Years(years)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Age::Years(years) => write!(f, "{years}"),
            Age::Unknown => write!(f, "N/A"),
        }
    }
}

impl Serialize for Age {
    /// Known ages substitute as integers, the sentinel as the string `N/A`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Years(years) => serializer.serialize_i32(*years),
            Age::Unknown => serializer.serialize_str("N/A"),
        }
    }
}

/// Finalized key-value mapping consumed by the renderer.
///
/// Field names match the template placeholders exactly, including the
/// uppercase `TIPO_EXAMEN` key kept for template compatibility.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub centro_medico: String,
    pub nombre: String,
    pub run: String,
    /// `DD-MM-YYYY` when the submitted birth date parsed, otherwise the
    /// raw input unchanged.
    pub fecha_nacimiento: String,
    #[serde(rename = "TIPO_EXAMEN")]
    pub tipo_examen: String,
    pub antecedentes: String,
    pub hallazgos: String,
    pub conclusion: String,
    pub medico_tratante: String,
    pub fecha_actual: String,
    pub fecha_examen: String,
    pub edad: Age,
}

impl ReportContext {
    /// Assemble the context for one report as of `today`.
    ///
    /// An unparseable birth date is recovered locally: the age becomes
    /// `Age::Unknown` and the raw input is carried into the document
    /// unchanged. The failure never reaches the caller.
    pub fn build(form: &ExamForm, config: &AppConfig, today: NaiveDate) -> Self {
        let (fecha_nacimiento, edad) = if form.fecnac.is_empty() {
            (String::new(), Age::Unknown)
        } else {
            match NaiveDate::parse_from_str(&form.fecnac, ISO_DATE_FORMAT) {
                Ok(birth) => (
                    birth.format(DOCUMENT_DATE_FORMAT).to_string(),
                    Age::from_birth_date(birth, today),
                ),
                Err(_) => (form.fecnac.clone(), Age::Unknown),
            }
        };

        let hoy = today.format(DOCUMENT_DATE_FORMAT).to_string();

        Self {
            centro_medico: config.centro_medico.clone(),
            nombre: form.nombre.clone(),
            run: form.run.clone(),
            fecha_nacimiento,
            tipo_examen: format!("{} {}", form.tipo_examen, form.region_examen),
            antecedentes: form.antecedentes.clone(),
            hallazgos: form.hallazgos.clone(),
            conclusion: form.conclusion.clone(),
            medico_tratante: config.medico_tratante.clone(),
            fecha_actual: hoy.clone(),
            // The exam is assumed to take place today.
            fecha_examen: hoy,
            edad,
        }
    }
}
