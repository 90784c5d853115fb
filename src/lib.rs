//! informegen: fill a fixed .docx template with medical exam data.
//!
//! Two components composed linearly: the context builder derives dates
//! and patient age from the submitted form, and the document renderer
//! substitutes the finalized context into the deployment-provided
//! template, yielding the finished document as an in-memory buffer plus
//! a suggested download filename. No state is shared between calls.

pub mod config;
pub mod context;
pub mod error;
pub mod form;
pub mod renderer;
pub mod report;

pub use config::AppConfig;
pub use context::{Age, ReportContext};
pub use error::AppError;
pub use form::ExamForm;
pub use renderer::{RenderError, RenderedDocument};
pub use report::{DOCX_MIME, GeneratedReport, generate, generate_as_of, suggested_filename};
