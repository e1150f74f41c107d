// src/export/print.rs
//! Printing: hand the rendered page to the platform's print flow

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use super::process::spawn_detached;

pub trait PrintPort {
    /// Start printing a complete HTML document; does not wait for the dialog
    fn print(&self, document: &str) -> Result<()>;
}

/// Writes the page to the output directory and opens it with a command
/// (a browser opener or a print spooler) without waiting for it
pub struct CommandPrinter {
    program: String,
    output_dir: PathBuf,
}

impl CommandPrinter {
    pub fn new(program: String, output_dir: PathBuf) -> Self {
        Self {
            program,
            output_dir,
        }
    }

    pub fn document_path(&self) -> PathBuf {
        self.output_dir.join("resume-print.html")
    }
}

impl PrintPort for CommandPrinter {
    fn print(&self, document: &str) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let path = self.document_path();
        std::fs::write(&path, document)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        let mut command = Command::new(&self.program);
        command.arg(&path);
        spawn_detached(command, "print")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_fails_when_program_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let printer = CommandPrinter::new(
            "no-such-print-tool-4711".to_string(),
            dir.path().to_path_buf(),
        );

        let err = printer.print("<html></html>").unwrap_err();
        assert!(err.to_string().contains("no-such-print-tool-4711"));
        assert_eq!(
            std::fs::read_to_string(printer.document_path()).unwrap(),
            "<html></html>"
        );
    }
}
