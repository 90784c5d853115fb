//! Document renderer: fills the .docx template with a built context.
//!
//! The template archive is re-read on every call; nothing is cached
//! across invocations apart from the immutable template environment.
//! Substitution is strict: a placeholder with no matching context key
//! fails the whole render, so a partially filled document is never
//! produced.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::sync::OnceLock;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::context::ReportContext;

/// Failure while producing a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file could not be read.
    #[error("Failed to read template {path}: {source}")]
    TemplateRead { path: String, source: std::io::Error },

    /// The template is not a valid .docx container.
    #[error("Malformed template archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A templated part is not valid UTF-8.
    #[error("Template part {part} is not valid UTF-8")]
    PartEncoding { part: String },

    /// Control-structure syntax is not supported in templates.
    #[error("Template syntax '{token}' is not allowed in {part}")]
    SyntaxNotAllowed { part: String, token: String },

    /// Placeholder substitution failed (undefined key, bad expression).
    #[error("Failed to render template part {part}: {reason}")]
    Substitution { part: String, reason: String },

    /// Reading an entry or writing the output archive failed.
    #[error("Document I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished document held in memory, scoped to one request.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the document, yielding a reader positioned at the start
    /// so a full read returns the entire document.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Archive parts that carry body text and receive substitution.
///
/// These are the parts the original template was authored against:
/// the main document plus headers and footers.
fn is_templated_part(name: &str) -> bool {
    name == "word/document.xml"
        || (name.starts_with("word/header") && name.ends_with(".xml"))
        || (name.starts_with("word/footer") && name.ends_with(".xml"))
}

/// Fill the template at `template_path` with `context`.
///
/// Loads the template fresh, substitutes every placeholder in the
/// templated parts, copies all other entries through untouched, and
/// returns the finished document as an in-memory buffer.
pub fn render_docx(
    template_path: &Path,
    context: &ReportContext,
) -> Result<RenderedDocument, RenderError> {
    let raw = fs::read(template_path).map_err(|source| RenderError::TemplateRead {
        path: template_path.display().to_string(),
        source,
    })?;

    let mut archive = ZipArchive::new(Cursor::new(raw))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            writer.add_directory(name.as_str(), options)?;
            continue;
        }

        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents)?;

        writer.start_file(name.as_str(), options)?;
        if is_templated_part(&name) {
            let xml = String::from_utf8(contents)
                .map_err(|_| RenderError::PartEncoding { part: name.clone() })?;
            let rendered = render_part(&xml, context, &name)?;
            writer.write_all(rendered.as_bytes())?;
        } else {
            writer.write_all(&contents)?;
        }
    }

    let bytes = writer.finish()?.into_inner();
    debug!(template = %template_path.display(), size = bytes.len(), "document rendered");
    Ok(RenderedDocument { bytes })
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Substitute placeholders in one document part.
///
/// Only `{{ ... }}` interpolation is allowed; control structures are
/// rejected. Substituted values are escaped so user text cannot break
/// the surrounding XML.
fn render_part(
    part: &str,
    context: &ReportContext,
    part_name: &str,
) -> Result<String, RenderError> {
    if let Some(token) = disallowed_template_token(part) {
        return Err(RenderError::SyntaxNotAllowed {
            part: part_name.to_string(),
            token: token.to_string(),
        });
    }

    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env
    });

    env.render_str(part, context).map_err(|err| RenderError::Substitution {
        part: part_name.to_string(),
        reason: err.to_string(),
    })
}

fn disallowed_template_token(part: &str) -> Option<&'static str> {
    if part.contains("{%") {
        return Some("{%");
    }
    if part.contains("{#") {
        return Some("{#");
    }
    None
}
