//! Inbound exam form fields.

use serde::Deserialize;

/// Raw form fields as submitted by the delivery layer.
///
/// Every field is optional on deserialization. Absent fields default to
/// the empty string, except the exam type and region which default to a
/// cranial CT (`TC` / `Cerebral`), matching the form's preselected
/// options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExamForm {
    /// Patient name.
    pub nombre: String,
    /// Patient RUN (national identifier).
    pub run: String,
    /// Birth date as submitted, expected ISO `YYYY-MM-DD`.
    pub fecnac: String,
    /// Exam type, e.g. `TC` or `RM`.
    pub tipo_examen: String,
    /// Anatomical region, e.g. `Cerebral` or `Columna`.
    pub region_examen: String,
    /// Clinical background.
    pub antecedentes: String,
    /// Findings.
    pub hallazgos: String,
    /// Conclusion.
    pub conclusion: String,
}

impl Default for ExamForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            run: String::new(),
            fecnac: String::new(),
            tipo_examen: "TC".to_string(),
            region_examen: "Cerebral".to_string(),
            antecedentes: String::new(),
            hallazgos: String::new(),
            conclusion: String::new(),
        }
    }
}

impl ExamForm {
    /// Parse a form from its JSON representation (the delivery layer's
    /// mapping of named string fields).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
