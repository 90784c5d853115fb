//! Deployment configuration for report generation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

/// Deployment configuration loaded from `informe.toml`.
///
/// Constructed once at process start and passed explicitly into the
/// generation path; the core never consults global state. Holds the
/// template location and the two fixed fields injected into every
/// context.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base directory the template file is resolved against.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Name of the template file inside `template_dir`.
    #[serde(default = "default_template_file")]
    pub template_file: String,

    /// Medical center printed on every report.
    #[serde(default = "default_centro_medico")]
    pub centro_medico: String,

    /// Treating physician printed on every report.
    #[serde(default = "default_medico_tratante")]
    pub medico_tratante: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            template_file: default_template_file(),
            centro_medico: default_centro_medico(),
            medico_tratante: default_medico_tratante(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to the deployment defaults, so a partial
    /// file overriding only the template location is valid.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| AppError::Configuration {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }

    /// Full path of the template file: the single named template resolved
    /// against the deployment-provided base directory.
    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template_file)
    }
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_template_file() -> String {
    "plantilla_informe.docx".to_string()
}

fn default_centro_medico() -> String {
    "Hospital Clinico Viña del Mar".to_string()
}

fn default_medico_tratante() -> String {
    "Dr. Alejandro Venegas D.".to_string()
}
