// src/form/sections.rs
//! Repeatable sections: ordered lists of work, education, project and certification sub-forms

use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

use crate::dialogs::Dialogs;
use crate::types::{CertificationEntry, EducationEntry, ProjectEntry, WorkEntry};

pub const REMOVE_ITEM_PROMPT: &str = "Are you sure you want to remove this item?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Work,
    Education,
    Project,
    Certification,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Work,
        SectionKind::Education,
        SectionKind::Project,
        SectionKind::Certification,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Work => "work",
            SectionKind::Education => "education",
            SectionKind::Project => "project",
            SectionKind::Certification => "certification",
        }
    }

    /// Field set of one sub-form of this kind, in display order
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            SectionKind::Work => WorkEntry::FIELDS,
            SectionKind::Education => EducationEntry::FIELDS,
            SectionKind::Project => ProjectEntry::FIELDS,
            SectionKind::Certification => CertificationEntry::FIELDS,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "work" | "experience" | "job" => Ok(SectionKind::Work),
            "education" | "degree" => Ok(SectionKind::Education),
            "project" | "projects" => Ok(SectionKind::Project),
            "certification" | "cert" | "certifications" => Ok(SectionKind::Certification),
            other => anyhow::bail!(
                "Unknown section: {}. Use work, education, project or certification",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Month,
    Url,
    TextArea,
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
    pub placeholder: &'static str,
}

const fn field(
    name: &'static str,
    label: &'static str,
    input: InputKind,
    required: bool,
    placeholder: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        required,
        placeholder,
    }
}

/// One entry of a repeatable section, addressed by sub-form field name.
pub trait SubForm: Default + Clone {
    const KIND: SectionKind;
    const FIELDS: &'static [FieldSpec];

    fn field(&self, name: &str) -> Option<String>;

    /// Returns false when the field name is unknown or the input is disabled
    fn set_field(&mut self, name: &str, value: &str) -> bool;

    /// Whether every required-for-display field is filled
    fn is_displayable(&self) -> bool;

    fn list(sections: &Sections) -> &Vec<Self>;

    fn list_mut(sections: &mut Sections) -> &mut Vec<Self>;
}

fn parse_checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "on" | "yes" | "1" | "checked"
    )
}

impl SubForm for WorkEntry {
    const KIND: SectionKind = SectionKind::Work;
    const FIELDS: &'static [FieldSpec] = &[
        field("job-title", "Job Title", InputKind::Text, true, "Software Engineer"),
        field("company", "Company", InputKind::Text, true, "Tech Company Inc."),
        field("start-date", "Start Date", InputKind::Month, false, ""),
        field("end-date", "End Date", InputKind::Month, false, ""),
        field("current-job", "Current Position", InputKind::Checkbox, false, ""),
        field(
            "job-description",
            "Description",
            InputKind::TextArea,
            true,
            "Describe your responsibilities and achievements...",
        ),
    ];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "job-title" => Some(self.job_title.clone()),
            "company" => Some(self.company.clone()),
            "start-date" => Some(self.start_date.clone()),
            "end-date" => Some(self.end_date.clone()),
            "current-job" => Some(self.is_current.to_string()),
            "job-description" => Some(self.description.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        match name {
            "job-title" => self.job_title = value.to_string(),
            "company" => self.company = value.to_string(),
            "start-date" => self.start_date = value.to_string(),
            "end-date" => {
                if !self.end_date_enabled() {
                    return false;
                }
                self.set_end_date(value);
            }
            "current-job" => self.set_current(parse_checkbox(value)),
            "job-description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }

    // Description is marked required on the form but does not gate display
    fn is_displayable(&self) -> bool {
        !self.job_title.is_empty() && !self.company.is_empty()
    }

    fn list(sections: &Sections) -> &Vec<Self> {
        &sections.work
    }

    fn list_mut(sections: &mut Sections) -> &mut Vec<Self> {
        &mut sections.work
    }
}

impl SubForm for EducationEntry {
    const KIND: SectionKind = SectionKind::Education;
    const FIELDS: &'static [FieldSpec] = &[
        field(
            "degree",
            "Degree/Certification",
            InputKind::Text,
            true,
            "Bachelor of Science in Computer Science",
        ),
        field("institution", "Institution", InputKind::Text, true, "University Name"),
        field("grad-date", "Graduation Date", InputKind::Month, false, ""),
        field("gpa", "GPA (Optional)", InputKind::Text, false, "3.8/4.0"),
    ];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "degree" => Some(self.degree.clone()),
            "institution" => Some(self.institution.clone()),
            "grad-date" => Some(self.grad_date.clone()),
            "gpa" => Some(self.gpa.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "degree" => &mut self.degree,
            "institution" => &mut self.institution,
            "grad-date" => &mut self.grad_date,
            "gpa" => &mut self.gpa,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    fn is_displayable(&self) -> bool {
        !self.degree.is_empty() && !self.institution.is_empty()
    }

    fn list(sections: &Sections) -> &Vec<Self> {
        &sections.education
    }

    fn list_mut(sections: &mut Sections) -> &mut Vec<Self> {
        &mut sections.education
    }
}

impl SubForm for ProjectEntry {
    const KIND: SectionKind = SectionKind::Project;
    const FIELDS: &'static [FieldSpec] = &[
        field("project-name", "Project Name", InputKind::Text, false, "E-Commerce Platform"),
        field(
            "project-link",
            "Project Link",
            InputKind::Url,
            false,
            "https://project-demo.com",
        ),
        field(
            "project-description",
            "Description",
            InputKind::TextArea,
            false,
            "Brief description of the project...",
        ),
    ];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "project-name" => Some(self.name.clone()),
            "project-link" => Some(self.link.clone()),
            "project-description" => Some(self.description.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "project-name" => &mut self.name,
            "project-link" => &mut self.link,
            "project-description" => &mut self.description,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    fn is_displayable(&self) -> bool {
        !self.name.is_empty()
    }

    fn list(sections: &Sections) -> &Vec<Self> {
        &sections.projects
    }

    fn list_mut(sections: &mut Sections) -> &mut Vec<Self> {
        &mut sections.projects
    }
}

impl SubForm for CertificationEntry {
    const KIND: SectionKind = SectionKind::Certification;
    const FIELDS: &'static [FieldSpec] = &[
        field(
            "cert-name",
            "Certification Name",
            InputKind::Text,
            false,
            "AWS Certified Solutions Architect",
        ),
        field(
            "cert-org",
            "Issuing Organization",
            InputKind::Text,
            false,
            "Amazon Web Services",
        ),
        field("cert-date", "Date", InputKind::Month, false, ""),
    ];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "cert-name" => Some(self.name.clone()),
            "cert-org" => Some(self.org.clone()),
            "cert-date" => Some(self.date.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "cert-name" => &mut self.name,
            "cert-org" => &mut self.org,
            "cert-date" => &mut self.date,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    fn is_displayable(&self) -> bool {
        !self.name.is_empty()
    }

    fn list(sections: &Sections) -> &Vec<Self> {
        &sections.certifications
    }

    fn list_mut(sections: &mut Sections) -> &mut Vec<Self> {
        &mut sections.certifications
    }
}

/// All four repeatable sections of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    work: Vec<WorkEntry>,
    education: Vec<EducationEntry>,
    projects: Vec<ProjectEntry>,
    certifications: Vec<CertificationEntry>,
}

impl Default for Sections {
    /// A fresh form: one blank entry per section
    fn default() -> Self {
        Self {
            work: vec![WorkEntry::default()],
            education: vec![EducationEntry::default()],
            projects: vec![ProjectEntry::default()],
            certifications: vec![CertificationEntry::default()],
        }
    }
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            work: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
        }
    }

    pub fn work(&self) -> &[WorkEntry] {
        &self.work
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn certifications(&self) -> &[CertificationEntry] {
        &self.certifications
    }

    pub fn entries<E: SubForm>(&self) -> &[E] {
        E::list(self)
    }

    pub fn len(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Work => self.work.len(),
            SectionKind::Education => self.education.len(),
            SectionKind::Project => self.projects.len(),
            SectionKind::Certification => self.certifications.len(),
        }
    }

    pub fn is_empty(&self, kind: SectionKind) -> bool {
        self.len(kind) == 0
    }

    /// Append a blank sub-form and return its index
    pub fn add(&mut self, kind: SectionKind) -> usize {
        let index = match kind {
            SectionKind::Work => push_blank(&mut self.work),
            SectionKind::Education => push_blank(&mut self.education),
            SectionKind::Project => push_blank(&mut self.projects),
            SectionKind::Certification => push_blank(&mut self.certifications),
        };
        app_log!(debug, "Added {} entry at index {}", kind, index);
        index
    }

    /// Remove one sub-form after the user confirms. Removing the last entry
    /// of a section is allowed and leaves the section empty.
    pub fn remove(
        &mut self,
        kind: SectionKind,
        index: usize,
        dialogs: &mut dyn Dialogs,
    ) -> Result<bool> {
        let len = self.len(kind);
        if index >= len {
            anyhow::bail!("No {} entry at index {} ({} present)", kind, index, len);
        }

        if !dialogs.confirm(REMOVE_ITEM_PROMPT) {
            app_log!(debug, "Removal of {} entry {} cancelled", kind, index);
            return Ok(false);
        }

        match kind {
            SectionKind::Work => drop(self.work.remove(index)),
            SectionKind::Education => drop(self.education.remove(index)),
            SectionKind::Project => drop(self.projects.remove(index)),
            SectionKind::Certification => drop(self.certifications.remove(index)),
        }
        app_log!(debug, "Removed {} entry at index {}", kind, index);
        Ok(true)
    }

    /// Replace a whole section, e.g. when restoring a saved document
    pub fn replace<E: SubForm>(&mut self, entries: Vec<E>) {
        *E::list_mut(self) = entries;
    }

    /// Back to one blank entry per section
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn entry_mut<E: SubForm>(&mut self, index: usize) -> Result<&mut E> {
        let list = E::list_mut(self);
        let len = list.len();
        list.get_mut(index)
            .with_context(|| format!("No {} entry at index {} ({} present)", E::KIND, index, len))
    }

    /// Toggle "current position" on a work entry
    pub fn set_current(&mut self, index: usize, current: bool) -> Result<()> {
        self.entry_mut::<WorkEntry>(index)?.set_current(current);
        Ok(())
    }

    /// Write one sub-form field addressed by its form name
    pub fn set_field(
        &mut self,
        kind: SectionKind,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<()> {
        let accepted = match kind {
            SectionKind::Work => self.entry_mut::<WorkEntry>(index)?.set_field(name, value),
            SectionKind::Education => self
                .entry_mut::<EducationEntry>(index)?
                .set_field(name, value),
            SectionKind::Project => self.entry_mut::<ProjectEntry>(index)?.set_field(name, value),
            SectionKind::Certification => self
                .entry_mut::<CertificationEntry>(index)?
                .set_field(name, value),
        };

        if !accepted {
            if kind.fields().iter().any(|spec| spec.name == name) {
                anyhow::bail!("Field {} of {} entry {} is disabled", name, kind, index);
            }
            anyhow::bail!(
                "Unknown {} field: {}. Use one of: {}",
                kind,
                name,
                kind.fields()
                    .iter()
                    .map(|spec| spec.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(())
    }
}

fn push_blank<E: Default>(list: &mut Vec<E>) -> usize {
    list.push(E::default());
    list.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDialogs;

    #[test]
    fn test_new_form_has_one_blank_entry_per_section() {
        let sections = Sections::new();
        for kind in SectionKind::ALL {
            assert_eq!(sections.len(kind), 1);
        }
        assert!(!sections.work()[0].is_displayable());
        assert!(!sections.education()[0].is_displayable());
        assert!(!sections.projects()[0].is_displayable());
        assert!(!sections.certifications()[0].is_displayable());
    }

    #[test]
    fn test_add_appends_blank_entry() {
        let mut sections = Sections::new();
        let index = sections.add(SectionKind::Project);
        assert_eq!(index, 1);
        assert_eq!(sections.projects()[1], ProjectEntry::default());
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut sections = Sections::new();
        let mut dialogs = RecordingDialogs::answering(false);

        assert!(!sections.remove(SectionKind::Work, 0, &mut dialogs).unwrap());
        assert_eq!(sections.len(SectionKind::Work), 1);
        assert_eq!(dialogs.confirmations(), vec![REMOVE_ITEM_PROMPT.to_string()]);

        let mut dialogs = RecordingDialogs::answering(true);
        assert!(sections.remove(SectionKind::Work, 0, &mut dialogs).unwrap());
        assert!(sections.is_empty(SectionKind::Work));
    }

    #[test]
    fn test_remove_out_of_range_does_not_prompt() {
        let mut sections = Sections::new();
        let mut dialogs = RecordingDialogs::answering(true);
        assert!(sections
            .remove(SectionKind::Certification, 3, &mut dialogs)
            .is_err());
        assert!(dialogs.confirmations().is_empty());
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_entries() {
        let mut sections = Sections::empty();
        sections.replace(
            ["a", "b", "c"]
                .into_iter()
                .map(|name| ProjectEntry {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
        );
        let mut dialogs = RecordingDialogs::answering(true);
        sections.remove(SectionKind::Project, 1, &mut dialogs).unwrap();

        let names: Vec<_> = sections.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_current_position_disables_end_date() {
        let mut sections = Sections::new();
        sections
            .set_field(SectionKind::Work, 0, "end-date", "2022-12")
            .unwrap();
        sections.set_current(0, true).unwrap();
        assert_eq!(sections.work()[0].end_date, "");

        let err = sections
            .set_field(SectionKind::Work, 0, "end-date", "2023-01")
            .unwrap_err();
        assert!(err.to_string().contains("disabled"));

        sections.set_current(0, false).unwrap();
        assert_eq!(sections.work()[0].end_date, "");
        sections
            .set_field(SectionKind::Work, 0, "end-date", "2023-01")
            .unwrap();
        assert_eq!(sections.work()[0].end_date, "2023-01");
    }

    #[test]
    fn test_checkbox_field_accepts_form_values() {
        let mut sections = Sections::new();
        sections
            .set_field(SectionKind::Work, 0, "current-job", "on")
            .unwrap();
        assert!(sections.work()[0].is_current);
        assert_eq!(
            sections.work()[0].field("current-job").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut sections = Sections::new();
        let err = sections
            .set_field(SectionKind::Education, 0, "major", "CS")
            .unwrap_err();
        assert!(err.to_string().contains("grad-date"));
    }

    #[test]
    fn test_reset_and_replace() {
        let mut sections = Sections::empty();
        sections.replace(vec![
            CertificationEntry {
                name: "CKA".to_string(),
                ..Default::default()
            },
            CertificationEntry::default(),
        ]);
        assert_eq!(sections.entries::<CertificationEntry>().len(), 2);

        sections.reset();
        assert_eq!(sections, Sections::new());
    }

    #[test]
    fn test_required_fields_gate_display() {
        let mut work = WorkEntry {
            job_title: "Engineer".to_string(),
            ..Default::default()
        };
        assert!(!work.is_displayable());
        work.company = "Acme".to_string();
        assert!(work.is_displayable());

        let edu = EducationEntry {
            institution: "MIT".to_string(),
            ..Default::default()
        };
        assert!(!edu.is_displayable());

        let cert = CertificationEntry {
            org: "AWS".to_string(),
            ..Default::default()
        };
        assert!(!cert.is_displayable());
    }

    #[test]
    fn test_parse_section_kind() {
        assert_eq!("Work".parse::<SectionKind>().unwrap(), SectionKind::Work);
        assert_eq!("cert".parse::<SectionKind>().unwrap(), SectionKind::Certification);
        assert!("hobbies".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_field_schema_marks_required_fields() {
        let required: Vec<_> = SectionKind::Work
            .fields()
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(required, vec!["job-title", "company", "job-description"]);
        assert!(SectionKind::Project.fields().iter().all(|spec| !spec.required));
    }
}
