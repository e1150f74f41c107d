// src/export/mod.rs
//! Print and PDF export of the rendered preview

pub mod pdf;
pub mod print;
mod process;

pub use pdf::{CommandPdfExporter, PdfExporter, PdfOptions};
pub use print::{CommandPrinter, PrintPort};

pub const NOTHING_TO_PRINT: &str = "Please create a resume first before printing.";
pub const NOTHING_TO_DOWNLOAD: &str = "Please create a resume first before downloading.";
pub const PDF_LIBRARY_MISSING: &str =
    "PDF library not loaded. Please wait for the page to fully load.";

/// Result of a print or PDF request as seen by the caller. `Started` only
/// means the work was handed off; completion is never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Started,
    NothingRendered,
    LibraryUnavailable,
    Failed,
}
