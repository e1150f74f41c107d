// src/core/config.rs
//! Application configuration: environment name, optional cvform.yaml, env overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cvform.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: String,
    /// Directory of the file-backed storage
    pub storage_dir: PathBuf,
    /// Where rendered pages and PDFs are written
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    /// HTML to PDF converter, invoked with wkhtmltopdf-style flags
    pub pdf_command: String,
    /// Opens the rendered page for printing
    pub print_command: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    storage_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
    pdf_command: Option<String>,
    print_command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

impl AppConfig {
    /// Load configuration for the current environment from the working directory
    pub fn load() -> Result<Self> {
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(&base_dir, &Self::get_environment(), |name| {
            std::env::var(name).ok()
        })
    }

    fn get_environment() -> String {
        std::env::var("CVFORM_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Resolve the configuration rooted at `base_dir`. `var` looks up overrides.
    pub fn load_from<F>(base_dir: &Path, environment: &str, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::defaults(base_dir, environment);

        let config_path = base_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let file: ConfigFile = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;

            let section = match environment {
                "production" => file.production,
                _ => file.local,
            };
            config.apply(section, base_dir);
        }

        if let Some(dir) = var("CVFORM_STORAGE_DIR") {
            config.storage_dir = resolve_path(base_dir, Path::new(&dir));
        }
        if let Some(dir) = var("CVFORM_OUTPUT_DIR") {
            config.output_dir = resolve_path(base_dir, Path::new(&dir));
        }
        if let Some(command) = var("CVFORM_PDF_COMMAND") {
            config.pdf_command = command;
        }
        if let Some(command) = var("CVFORM_PRINT_COMMAND") {
            config.print_command = command;
        }

        if config.pdf_command.trim().is_empty() {
            anyhow::bail!("pdf_command must not be empty");
        }
        if config.print_command.trim().is_empty() {
            anyhow::bail!("print_command must not be empty");
        }

        Ok(config)
    }

    fn defaults(base_dir: &Path, environment: &str) -> Self {
        let (storage_dir, log_file) = if environment == "production" {
            (
                PathBuf::from("/var/lib/cvform"),
                PathBuf::from("/var/log/cvform.log"),
            )
        } else {
            (base_dir.join(".cvform"), std::env::temp_dir().join("cvform.log"))
        };

        Self {
            environment: environment.to_string(),
            storage_dir,
            output_dir: base_dir.join("out"),
            log_file,
            pdf_command: "wkhtmltopdf".to_string(),
            print_command: "xdg-open".to_string(),
        }
    }

    fn apply(&mut self, section: EnvironmentSection, base_dir: &Path) {
        if let Some(dir) = section.storage_dir {
            self.storage_dir = resolve_path(base_dir, &dir);
        }
        if let Some(dir) = section.output_dir {
            self.output_dir = resolve_path(base_dir, &dir);
        }
        if let Some(file) = section.log_file {
            self.log_file = resolve_path(base_dir, &file);
        }
        if let Some(command) = section.pdf_command {
            self.pdf_command = command;
        }
        if let Some(command) = section.print_command {
            self.print_command = command;
        }
    }

    pub fn with_storage_dir(mut self, dir: PathBuf) -> Self {
        self.storage_dir = dir;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Ensure storage and output directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.storage_dir, &self.output_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        app_log!(info, "All configured directories ensured to exist");
        Ok(())
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
