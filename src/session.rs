// src/session.rs
//! The resume builder session: form state, preview pane and the injected ports

use anyhow::Result;

use crate::core::PersistencePort;
use crate::dialogs::Dialogs;
use crate::export::{
    ExportOutcome, PdfExporter, PdfOptions, PrintPort, NOTHING_TO_DOWNLOAD, NOTHING_TO_PRINT,
    PDF_LIBRARY_MISSING,
};
use crate::form::{FormState, FormStore, ProfileField, SectionKind, Sections};
use crate::persistence::{self, StoredDocument};
use crate::render::{render_document, render_preview, RenderModel, PREVIEW_PLACEHOLDER};
use crate::types::SavedResumeDocument;

pub const SAVED_MESSAGE: &str = "Resume saved successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Resume could not be saved.";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear all fields? This cannot be undone.";

/// Content of the preview pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder,
    Rendered(String),
}

impl Preview {
    pub fn html(&self) -> &str {
        match self {
            Preview::Placeholder => PREVIEW_PLACEHOLDER,
            Preview::Rendered(html) => html,
        }
    }

    /// Only a real, non-blank render can be printed or exported
    pub fn has_resume(&self) -> bool {
        matches!(self, Preview::Rendered(html) if !html.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    NothingSaved,
    /// Stored data could not be used; the form was left as it was
    Ignored,
    Restored,
}

/// Printer used until one is injected; always fails
struct NoPrinter;

impl PrintPort for NoPrinter {
    fn print(&self, _document: &str) -> Result<()> {
        anyhow::bail!("No printer configured")
    }
}

/// Exporter used until one is injected; reports itself unavailable
struct NoPdfExporter;

impl PdfExporter for NoPdfExporter {
    fn is_available(&self) -> bool {
        false
    }

    fn export(&self, _fragment: &str, _options: &PdfOptions) -> Result<()> {
        anyhow::bail!("No PDF exporter configured")
    }
}

pub struct ResumeBuilder {
    form: FormState,
    sections: Sections,
    preview: Preview,
    actions_visible: bool,
    storage: Box<dyn PersistencePort>,
    dialogs: Box<dyn Dialogs>,
    printer: Box<dyn PrintPort>,
    pdf_exporter: Box<dyn PdfExporter>,
}

impl ResumeBuilder {
    /// Start a session with a blank form, then restore whatever is saved
    pub fn open(storage: Box<dyn PersistencePort>, dialogs: Box<dyn Dialogs>) -> Self {
        let mut builder = Self {
            form: FormState::new(),
            sections: Sections::new(),
            preview: Preview::Placeholder,
            actions_visible: false,
            storage,
            dialogs,
            printer: Box::new(NoPrinter),
            pdf_exporter: Box::new(NoPdfExporter),
        };
        builder.load();
        builder
    }

    pub fn with_printer(mut self, printer: Box<dyn PrintPort>) -> Self {
        self.printer = printer;
        self
    }

    pub fn with_pdf_exporter(mut self, exporter: Box<dyn PdfExporter>) -> Self {
        self.pdf_exporter = exporter;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut Sections {
        &mut self.sections
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Save/load/clear/print/export controls are shown only after a render
    pub fn actions_visible(&self) -> bool {
        self.actions_visible
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.form.set_value(field, value.into());
    }

    /// Submit the form: rebuild the render model and refresh the preview
    pub fn submit(&mut self) -> &str {
        let model = RenderModel::build(&self.form, &self.sections);
        let html = render_preview(&model);
        app_log!(
            debug,
            "Rendered preview: {} work, {} education, {} projects, {} certifications, {} bytes",
            model.work.len(),
            model.education.len(),
            model.projects.len(),
            model.certifications.len(),
            html.len()
        );

        self.preview = Preview::Rendered(html);
        self.actions_visible = true;
        self.preview.html()
    }

    pub fn add(&mut self, kind: SectionKind) -> usize {
        self.sections.add(kind)
    }

    /// Remove an entry after confirmation; returns whether it was removed
    pub fn remove(&mut self, kind: SectionKind, index: usize) -> Result<bool> {
        self.sections.remove(kind, index, self.dialogs.as_mut())
    }

    pub fn set_current(&mut self, index: usize, current: bool) -> Result<()> {
        self.sections.set_current(index, current)
    }

    pub fn document(&self) -> SavedResumeDocument {
        persistence::snapshot(&self.form, &self.sections)
    }

    /// Persist the whole form and acknowledge it
    pub fn save(&mut self) -> bool {
        let doc = self.document();
        match persistence::write_document(self.storage.as_mut(), &doc) {
            Ok(()) => {
                app_log!(info, "Resume saved");
                self.dialogs.alert(SAVED_MESSAGE);
                true
            }
            Err(e) => {
                app_log!(error, "Failed to save resume: {:#}", e);
                self.dialogs.alert(SAVE_FAILED_MESSAGE);
                false
            }
        }
    }

    /// Restore the saved resume, if any. Unreadable data is logged and ignored.
    pub fn load(&mut self) -> LoadOutcome {
        match persistence::read_document(self.storage.as_ref()) {
            Ok(StoredDocument::Missing) => LoadOutcome::NothingSaved,
            Ok(StoredDocument::Malformed(reason)) => {
                app_log!(warn, "Error loading resume: {}", reason);
                LoadOutcome::Ignored
            }
            Ok(StoredDocument::Found(doc)) => {
                self.import(doc);
                app_log!(info, "Resume loaded");
                LoadOutcome::Restored
            }
            Err(e) => {
                app_log!(warn, "Error loading resume: {:#}", e);
                LoadOutcome::Ignored
            }
        }
    }

    /// Populate the form from a document without touching storage
    pub fn import(&mut self, doc: SavedResumeDocument) {
        persistence::restore(doc, &mut self.form, &mut self.sections);
    }

    /// Wipe the form and the saved copy after confirmation
    pub fn clear(&mut self) -> bool {
        if !self.dialogs.confirm(CLEAR_PROMPT) {
            return false;
        }

        self.form.reset();
        self.sections.reset();
        self.preview = Preview::Placeholder;
        self.actions_visible = false;
        if let Err(e) = persistence::delete_document(self.storage.as_mut()) {
            app_log!(error, "Failed to delete saved resume: {:#}", e);
        }
        app_log!(info, "Resume cleared");
        true
    }

    pub fn print(&mut self) -> ExportOutcome {
        if !self.preview.has_resume() {
            app_log!(warn, "Print requested before a resume was created");
            self.dialogs.alert(NOTHING_TO_PRINT);
            return ExportOutcome::NothingRendered;
        }

        let document = render_document(self.preview.html());
        match self.printer.print(&document) {
            Ok(()) => ExportOutcome::Started,
            Err(e) => {
                app_log!(error, "Print failed: {:#}", e);
                self.dialogs.alert(&format!("Printing failed: {}", e));
                ExportOutcome::Failed
            }
        }
    }

    pub fn export_pdf(&mut self) -> ExportOutcome {
        if !self.pdf_exporter.is_available() {
            app_log!(warn, "PDF export requested but no exporter is available");
            self.dialogs.alert(PDF_LIBRARY_MISSING);
            return ExportOutcome::LibraryUnavailable;
        }
        if !self.preview.has_resume() {
            app_log!(warn, "PDF export requested before a resume was created");
            self.dialogs.alert(NOTHING_TO_DOWNLOAD);
            return ExportOutcome::NothingRendered;
        }

        let options = PdfOptions::default();
        match self.pdf_exporter.export(self.preview.html(), &options) {
            Ok(()) => {
                app_log!(info, "PDF export started: {}", options.filename);
                ExportOutcome::Started
            }
            Err(e) => {
                app_log!(error, "PDF export failed: {:#}", e);
                self.dialogs.alert(&format!("PDF export failed: {}", e));
                ExportOutcome::Failed
            }
        }
    }
}
