// src/persistence.rs
//! Whole-form snapshots to and from the persistence port

use anyhow::{Context, Result};

use crate::core::PersistencePort;
use crate::form::{FormStore, Sections};
use crate::types::{SavedResumeDocument, WorkEntry, STORAGE_KEY};

/// What a load attempt found under the storage key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredDocument {
    Missing,
    /// Present but not a resume document; the parse error is kept for logging
    Malformed(String),
    Found(SavedResumeDocument),
}

/// Capture the whole form, raw and unescaped. Every section is written,
/// including the ones the user emptied.
pub fn snapshot(form: &dyn FormStore, sections: &Sections) -> SavedResumeDocument {
    SavedResumeDocument {
        basic: Some(form.contact_profile()),
        work_experiences: Some(sections.work().to_vec()),
        educations: Some(sections.education().to_vec()),
        projects: Some(sections.projects().to_vec()),
        certifications: Some(sections.certifications().to_vec()),
    }
}

/// Put a saved document back into the form. Every section present in the
/// document replaces the corresponding list from scratch, even when it is
/// empty; a missing one leaves the current entries alone.
pub fn restore(doc: SavedResumeDocument, form: &mut dyn FormStore, sections: &mut Sections) {
    if let Some(basic) = &doc.basic {
        form.apply_profile(basic);
    }

    if let Some(work) = doc.work_experiences {
        sections.replace(work.into_iter().map(WorkEntry::normalized).collect());
    }
    if let Some(educations) = doc.educations {
        sections.replace(educations);
    }
    if let Some(projects) = doc.projects {
        sections.replace(projects);
    }
    if let Some(certifications) = doc.certifications {
        sections.replace(certifications);
    }
}

/// Serialize and write the document, overwriting whatever was stored
pub fn write_document(port: &mut dyn PersistencePort, doc: &SavedResumeDocument) -> Result<()> {
    let json = doc
        .to_json()
        .context("Failed to serialize resume document")?;
    port.set_item(STORAGE_KEY, &json)
        .with_context(|| format!("Failed to store {}", STORAGE_KEY))?;
    app_log!(debug, "Stored resume document, {} bytes", json.len());
    Ok(())
}

/// Read the document. Only storage access failures are errors; bad content
/// comes back as [`StoredDocument::Malformed`].
pub fn read_document(port: &dyn PersistencePort) -> Result<StoredDocument> {
    let Some(raw) = port
        .get_item(STORAGE_KEY)
        .with_context(|| format!("Failed to read {}", STORAGE_KEY))?
    else {
        return Ok(StoredDocument::Missing);
    };

    Ok(match SavedResumeDocument::from_json(&raw) {
        Ok(doc) => StoredDocument::Found(doc),
        Err(e) => StoredDocument::Malformed(e.to_string()),
    })
}

pub fn delete_document(port: &mut dyn PersistencePort) -> Result<()> {
    port.remove_item(STORAGE_KEY)
        .with_context(|| format!("Failed to delete {}", STORAGE_KEY))
}
