// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::{AppConfig, FileStorage};
use crate::dialogs::ConsoleDialogs;
use crate::export::{CommandPdfExporter, CommandPrinter, ExportOutcome};
use crate::form::{ProfileField, SectionKind};
use crate::render::render_document;
use crate::session::ResumeBuilder;
use crate::types::SavedResumeDocument;

#[derive(Parser)]
#[command(name = "cvform")]
#[command(about = "Build a resume from form fields, preview it as HTML, print it or export a PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the saved resume
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Directory for rendered pages and PDFs
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the form fields; required ones are marked with *
    Fields,
    /// Print the saved resume as JSON
    Show,
    /// Set a profile field (full-name, email, phone-number, ...)
    Set { field: ProfileField, value: String },
    /// Append a blank entry to a section (work, education, project, certification)
    Add { kind: SectionKind },
    /// Set a field of one section entry, e.g. `edit work 0 job-title "Engineer"`
    Edit {
        kind: SectionKind,
        index: usize,
        field: String,
        value: String,
    },
    /// Mark a work entry as the current position, or unmark it with --off
    Current {
        index: usize,
        #[arg(long)]
        off: bool,
    },
    /// Remove a section entry after confirmation
    Remove { kind: SectionKind, index: usize },
    /// Replace the form with a saved-resume JSON file
    Import { file: PathBuf },
    /// Render the resume as a standalone HTML page
    Render {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render and open the print flow
    Print,
    /// Render and export a PDF
    Pdf,
    /// Reset every field and delete the saved resume
    Clear,
}

pub fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let mut config = config;
    if let Some(dir) = cli.storage_dir {
        config = config.with_storage_dir(dir);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    config.ensure_directories()?;

    app_log!(
        debug,
        "Using storage {} and output {}",
        config.storage_dir.display(),
        config.output_dir.display()
    );

    let mut builder = ResumeBuilder::open(
        Box::new(FileStorage::new(config.storage_dir.clone())),
        Box::new(ConsoleDialogs::new().assume_yes(cli.yes)),
    )
    .with_printer(Box::new(CommandPrinter::new(
        config.print_command.clone(),
        config.output_dir.clone(),
    )))
    .with_pdf_exporter(Box::new(CommandPdfExporter::new(
        config.pdf_command.clone(),
        config.output_dir.clone(),
    )));

    match cli.command {
        Command::Fields => {
            println!("profile:");
            for field in ProfileField::ALL {
                let marker = if field.is_required() { " *" } else { "" };
                println!("  {}{}", field, marker);
            }
            for kind in SectionKind::ALL {
                println!("{}:", kind);
                for spec in kind.fields() {
                    let marker = if spec.required { " *" } else { "" };
                    println!("  {}{} ({})", spec.name, marker, spec.label);
                }
            }
        }

        Command::Show => {
            let json = serde_json::to_string_pretty(&builder.document())
                .context("Failed to serialize resume")?;
            println!("{}", json);
        }

        Command::Set { field, value } => {
            builder.set_field(field, value);
            save(&mut builder)?;
        }

        Command::Add { kind } => {
            let index = builder.add(kind);
            println!("Added {} entry #{}", kind, index);
            save(&mut builder)?;
        }

        Command::Edit {
            kind,
            index,
            field,
            value,
        } => {
            builder
                .sections_mut()
                .set_field(kind, index, &field, &value)?;
            save(&mut builder)?;
        }

        Command::Current { index, off } => {
            builder.set_current(index, !off)?;
            save(&mut builder)?;
        }

        Command::Remove { kind, index } => {
            if builder.remove(kind, index)? {
                save(&mut builder)?;
            }
        }

        Command::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let doc = SavedResumeDocument::from_json(&content)
                .with_context(|| format!("Failed to parse resume JSON: {}", file.display()))?;
            builder.import(doc);
            save(&mut builder)?;
        }

        Command::Render { out } => {
            let page = render_document(builder.submit());
            match out {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent).with_context(|| {
                            format!("Failed to create directory: {}", parent.display())
                        })?;
                    }
                    std::fs::write(&path, page)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                    app_log!(info, "Rendered resume to {}", path.display());
                    println!("Rendered {}", path.display());
                }
                None => print!("{}", page),
            }
        }

        Command::Print => {
            builder.submit();
            exported(builder.print(), "print")?;
        }

        Command::Pdf => {
            builder.submit();
            exported(builder.export_pdf(), "PDF export")?;
            println!(
                "Writing {}",
                config.output_dir.join("resume.pdf").display()
            );
        }

        Command::Clear => {
            builder.clear();
        }
    }

    Ok(())
}

fn save(builder: &mut ResumeBuilder) -> Result<()> {
    if !builder.save() {
        anyhow::bail!("Saving the resume failed");
    }
    Ok(())
}

fn exported(outcome: ExportOutcome, action: &str) -> Result<()> {
    match outcome {
        ExportOutcome::Started => Ok(()),
        other => anyhow::bail!("{} did not start: {:?}", action, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PersistencePort;
    use crate::types::STORAGE_KEY;

    fn config(dir: &std::path::Path) -> AppConfig {
        AppConfig::load_from(dir, "local", |_| None).unwrap()
    }

    fn run_args(dir: &std::path::Path, args: &[&str]) -> Result<()> {
        let mut argv = vec!["cvform", "--yes"];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv)?, config(dir))
    }

    fn saved(dir: &std::path::Path) -> SavedResumeDocument {
        let raw = FileStorage::new(dir.join(".cvform"))
            .get_item(STORAGE_KEY)
            .unwrap()
            .unwrap();
        SavedResumeDocument::from_json(&raw).unwrap()
    }

    #[test]
    fn test_edit_commands_persist() {
        let dir = tempfile::tempdir().unwrap();
        run_args(dir.path(), &["set", "full-name", "Ada"]).unwrap();
        run_args(dir.path(), &["edit", "work", "0", "job-title", "Analyst"]).unwrap();
        run_args(dir.path(), &["edit", "work", "0", "end-date", "2020-01"]).unwrap();
        run_args(dir.path(), &["current", "0"]).unwrap();
        run_args(dir.path(), &["add", "project"]).unwrap();

        let doc = saved(dir.path());
        assert_eq!(doc.basic.unwrap().full_name, "Ada");
        let work = doc.work_experiences.unwrap();
        assert_eq!(work[0].job_title, "Analyst");
        assert!(work[0].is_current);
        assert_eq!(work[0].end_date, "");
        assert_eq!(doc.projects.unwrap().len(), 2);

        run_args(dir.path(), &["remove", "project", "1"]).unwrap();
        assert_eq!(saved(dir.path()).projects.unwrap().len(), 1);
    }

    #[test]
    fn test_removed_last_entry_stays_removed_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        run_args(dir.path(), &["set", "full-name", "Ada"]).unwrap();
        run_args(dir.path(), &["remove", "education", "0"]).unwrap();
        assert_eq!(saved(dir.path()).educations, Some(Vec::new()));

        run_args(dir.path(), &["set", "email", "a@b.c"]).unwrap();
        let doc = saved(dir.path());
        assert_eq!(doc.educations, Some(Vec::new()));
        assert_eq!(doc.basic.unwrap().email, "a@b.c");
        assert_eq!(doc.work_experiences.unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_names_are_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["cvform", "set", "nickname", "x"]).is_err());
        assert!(Cli::try_parse_from(["cvform", "add", "hobby"]).is_err());
    }

    #[test]
    fn test_render_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        run_args(dir.path(), &["set", "full-name", "Ada <3"]).unwrap();

        let out = dir.path().join("page/resume.html");
        run_args(dir.path(), &["render", "--out", out.to_str().unwrap()]).unwrap();
        let page = std::fs::read_to_string(out).unwrap();
        assert!(page.contains("<h2>Ada &lt;3</h2>"));
    }

    #[test]
    fn test_import_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("resume.json");
        std::fs::write(
            &file,
            r#"{"basic": {"fullName": "Grace"}, "certifications": [{"name": "A"}, {"name": "B"}]}"#,
        )
        .unwrap();

        run_args(dir.path(), &["import", file.to_str().unwrap()]).unwrap();
        let doc = saved(dir.path());
        assert_eq!(doc.basic.unwrap().full_name, "Grace");
        assert_eq!(doc.certifications.unwrap().len(), 2);

        run_args(dir.path(), &["clear"]).unwrap();
        assert!(!dir.path().join(".cvform/resumeData.json").exists());
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.json");
        std::fs::write(&file, "{").unwrap();
        assert!(run_args(dir.path(), &["import", file.to_str().unwrap()]).is_err());
    }

    #[test]
    fn test_pdf_without_converter_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.pdf_command = "no-such-pdf-tool-4711".to_string();
        let cli = Cli::try_parse_from(["cvform", "--yes", "pdf"]).unwrap();
        assert!(run(cli, config).is_err());
    }
}
