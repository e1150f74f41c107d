//! Resume builder: form state, HTML preview rendering, local persistence and export.

/// Log through `tracing` at the given level: `app_log!(info, "Saved {}", key)`
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

pub mod cli;
pub mod core;
pub mod dialogs;
pub mod export;
pub mod form;
pub mod persistence;
pub mod render;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use crate::core::{AppConfig, FileStorage, MemoryStorage, PersistencePort};
pub use dialogs::{ConsoleDialogs, Dialogs};
pub use export::{CommandPdfExporter, CommandPrinter, ExportOutcome, PdfExporter, PrintPort};
pub use form::{FormState, FormStore, ProfileField, SectionKind, Sections};
pub use render::{render_preview, RenderModel};
pub use session::{LoadOutcome, Preview, ResumeBuilder};
pub use types::SavedResumeDocument;
