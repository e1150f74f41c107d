// src/export/pdf.rs
//! PDF export through an external rasterize-and-paginate tool

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::process::{find_executable, spawn_detached};
use crate::render::render_document;

/// Options handed to the PDF tool. The defaults are the only ones the builder uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub filename: String,
    pub image: ImageOptions,
    pub rasterize: RasterizeOptions,
    pub page: PageOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub format: String,
    pub quality: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterizeOptions {
    pub scale: u32,
    pub cors_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub format: String,
    pub orientation: String,
    pub unit: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            filename: "resume.pdf".to_string(),
            image: ImageOptions {
                format: "jpeg".to_string(),
                quality: 0.98,
            },
            rasterize: RasterizeOptions {
                scale: 2,
                cors_enabled: true,
            },
            page: PageOptions {
                format: "a4".to_string(),
                orientation: "portrait".to_string(),
                unit: "mm".to_string(),
            },
        }
    }
}

pub trait PdfExporter {
    /// False when the underlying tool cannot be found
    fn is_available(&self) -> bool;

    /// Start converting the preview fragment; does not wait for the file
    fn export(&self, fragment: &str, options: &PdfOptions) -> Result<()>;
}

/// Runs a wkhtmltopdf-compatible converter on the rendered page
pub struct CommandPdfExporter {
    program: String,
    output_dir: PathBuf,
}

impl CommandPdfExporter {
    pub fn new(program: String, output_dir: PathBuf) -> Self {
        Self {
            program,
            output_dir,
        }
    }

    fn source_path(&self, options: &PdfOptions) -> PathBuf {
        let stem = options
            .filename
            .strip_suffix(".pdf")
            .unwrap_or(&options.filename);
        self.output_dir.join(format!("{}.html", stem))
    }

    pub fn command(&self, source: &Path, options: &PdfOptions) -> Command {
        let mut command = Command::new(&self.program);
        command.args(converter_args(options));
        command.arg(source).arg(self.output_dir.join(&options.filename));
        command
    }
}

/// Translate the options into converter flags
pub fn converter_args(options: &PdfOptions) -> Vec<String> {
    let mut args = vec![
        "--quiet".to_string(),
        "--page-size".to_string(),
        capitalize(&options.page.format),
        "--orientation".to_string(),
        capitalize(&options.page.orientation),
        "--zoom".to_string(),
        options.rasterize.scale.to_string(),
        "--image-quality".to_string(),
        ((options.image.quality * 100.0).round() as u32).to_string(),
    ];
    if options.rasterize.cors_enabled {
        args.push("--enable-local-file-access".to_string());
    }
    args
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl PdfExporter for CommandPdfExporter {
    fn is_available(&self) -> bool {
        find_executable(&self.program).is_some()
    }

    fn export(&self, fragment: &str, options: &PdfOptions) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let source = self.source_path(options);
        std::fs::write(&source, render_document(fragment))
            .with_context(|| format!("Failed to write file: {}", source.display()))?;

        spawn_detached(self.command(&source, options), "pdf export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_serialize_like_the_export_contract() {
        let value = serde_json::to_value(PdfOptions::default()).unwrap();
        assert_eq!(value["filename"], "resume.pdf");
        assert_eq!(value["image"]["type"], "jpeg");
        assert_eq!(value["rasterize"]["scale"], 2);
        assert_eq!(value["rasterize"]["corsEnabled"], true);
        assert_eq!(value["page"]["format"], "a4");
        assert_eq!(value["page"]["orientation"], "portrait");
        assert_eq!(value["page"]["unit"], "mm");
        assert!((value["image"]["quality"].as_f64().unwrap() - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_converter_args() {
        assert_eq!(
            converter_args(&PdfOptions::default()),
            vec![
                "--quiet",
                "--page-size",
                "A4",
                "--orientation",
                "Portrait",
                "--zoom",
                "2",
                "--image-quality",
                "98",
                "--enable-local-file-access",
            ]
        );
    }

    #[test]
    fn test_command_writes_next_to_output() {
        let exporter = CommandPdfExporter::new("wkhtmltopdf".to_string(), PathBuf::from("out"));
        let options = PdfOptions::default();
        let source = exporter.source_path(&options);
        assert_eq!(source, PathBuf::from("out/resume.html"));

        let command = exporter.command(&source, &options);
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args[args.len() - 2], "out/resume.html");
        assert_eq!(args[args.len() - 1], "out/resume.pdf");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let exporter = CommandPdfExporter::new(
            "no-such-pdf-tool-4711".to_string(),
            PathBuf::from("out"),
        );
        assert!(!exporter.is_available());
    }
}
