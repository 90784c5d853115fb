//! Shared fixtures for informegen integration tests.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use informegen::AppConfig;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Main document part referencing every key the context builder produces.
pub const FULL_BODY: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#,
    r#"<w:p><w:r><w:t>{{ centro_medico }}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Paciente: {{ nombre }} ({{ run }})</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Nacimiento: {{ fecha_nacimiento }} / Edad: {{ edad }}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>{{ TIPO_EXAMEN }}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Antecedentes: {{ antecedentes }}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Hallazgos: {{ hallazgos }}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Conclusion: {{ conclusion }}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>{{ medico_tratante }} / {{ fecha_actual }} / {{ fecha_examen }}</w:t></w:r></w:p>"#,
    r#"</w:body>"#,
    r#"</w:document>"#,
);

/// Testing harness providing an isolated template directory, output
/// directory, and configuration file.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("plantillas")).expect("Failed to create template dir");
        fs::create_dir_all(root.path().join("salida")).expect("Failed to create output dir");
        Self { root }
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root.path().join("plantillas")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.path().join("salida")
    }

    /// Fabricate a minimal template .docx with the given main document part.
    pub fn write_template(&self, document_xml: &str) -> PathBuf {
        let path = self.template_dir().join("plantilla_informe.docx");
        write_docx(&path, document_xml);
        path
    }

    /// Write an `informe.toml` pointing at the harness template directory.
    pub fn write_config(&self) -> PathBuf {
        let path = self.root.path().join("informe.toml");
        let content = format!("template_dir = {:?}\n", self.template_dir().display().to_string());
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Write a JSON form file with the given content.
    pub fn write_form(&self, json: &str) -> PathBuf {
        let path = self.root.path().join("datos.json");
        fs::write(&path, json).expect("Failed to write form");
        path
    }

    /// Library-level configuration pointing at the harness template directory.
    pub fn config(&self) -> AppConfig {
        AppConfig { template_dir: self.template_dir(), ..AppConfig::default() }
    }

    /// Build a command invoking the compiled `informegen` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("informegen").expect("Failed to locate informegen binary");
        cmd.current_dir(self.root.path());
        cmd
    }
}

/// Write a minimal but well-formed .docx container to `path`.
#[allow(dead_code)]
pub fn write_docx(path: &Path, document_xml: &str) {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"</Types>"#,
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
            r#"</Relationships>"#,
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();

    let bytes = zip.finish().unwrap().into_inner();
    fs::write(path, bytes).unwrap();
}

/// Extract one part of a rendered document as UTF-8 text.
#[allow(dead_code)]
pub fn read_part(document: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(document.to_vec())).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}
