// src/testing.rs
//! Recording fakes for the session ports, shared by the unit tests

use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dialogs::Dialogs;
use crate::export::{PdfExporter, PdfOptions, PrintPort};

#[derive(Clone, Default)]
pub struct RecordingDialogs {
    answer: Rc<Cell<bool>>,
    confirmations: Rc<RefCell<Vec<String>>>,
    alerts: Rc<RefCell<Vec<String>>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Self {
        let dialogs = Self::default();
        dialogs.answer.set(answer);
        dialogs
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[derive(Clone, Default)]
pub struct RecordingPrinter {
    documents: Rc<RefCell<Vec<String>>>,
}

impl RecordingPrinter {
    pub fn documents(&self) -> Vec<String> {
        self.documents.borrow().clone()
    }
}

impl PrintPort for RecordingPrinter {
    fn print(&self, document: &str) -> Result<()> {
        self.documents.borrow_mut().push(document.to_string());
        Ok(())
    }
}

#[derive(Clone)]
pub struct RecordingPdfExporter {
    available: bool,
    exports: Rc<RefCell<Vec<(String, PdfOptions)>>>,
}

impl RecordingPdfExporter {
    pub fn new() -> Self {
        Self {
            available: true,
            exports: Rc::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            exports: Rc::default(),
        }
    }

    pub fn exports(&self) -> Vec<(String, PdfOptions)> {
        self.exports.borrow().clone()
    }
}

impl PdfExporter for RecordingPdfExporter {
    fn is_available(&self) -> bool {
        self.available
    }

    fn export(&self, fragment: &str, options: &PdfOptions) -> Result<()> {
        self.exports
            .borrow_mut()
            .push((fragment.to_string(), options.clone()));
        Ok(())
    }
}
