// src/render/model.rs
//! Render model: form state escaped, formatted and filtered, ready for the HTML renderer

use chrono::NaiveDate;

use crate::form::{FormStore, ProfileField, Sections, SubForm};
use crate::types::{CertificationEntry, EducationEntry, ProjectEntry, WorkEntry};

/// Escape the five characters that matter for HTML text and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escape, then keep line breaks visible
pub fn escape_multiline(text: &str) -> String {
    escape_html(text).replace("\r\n", "\n").replace('\n', "<br>")
}

/// `YYYY-MM` to `Mon YYYY`; anything else becomes the empty string
pub fn format_date(value: &str) -> String {
    let Some((year, month)) = value.trim().split_once('-') else {
        return String::new();
    };
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return String::new();
    }
    let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) else {
        return String::new();
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Link target for a user-supplied URL: `https://` is prepended unless the value
/// already uses http or https, and the result is attribute-escaped. Any other
/// scheme (`javascript:`, `data:`) ends up as part of an https URL.
pub fn normalize_url(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    let absolute = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    escape_html(&absolute)
}

/// Split on commas and newlines, trim, drop empties
pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split([',', '\n'])
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactItem {
    Email(String),
    Phone(String),
    Address(String),
    Link { label: &'static str, href: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWork {
    pub job_title: String,
    pub company: String,
    pub date_range: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEducation {
    pub degree: String,
    pub institution: String,
    pub grad_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProject {
    pub name: String,
    /// Normalized, escaped href; empty when no link was given
    pub href: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCertification {
    pub name: String,
    pub org: String,
    pub date: String,
}

/// Everything the renderer needs. All text is already escaped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderModel {
    pub full_name: String,
    pub contact: Vec<ContactItem>,
    pub summary: String,
    pub work: Vec<RenderedWork>,
    pub education: Vec<RenderedEducation>,
    pub skills: Vec<String>,
    pub projects: Vec<RenderedProject>,
    pub certifications: Vec<RenderedCertification>,
}

impl RenderModel {
    pub fn build(form: &dyn FormStore, sections: &Sections) -> Self {
        Self {
            full_name: escape_html(&form.value(ProfileField::FullName)),
            contact: contact_items(form),
            summary: escape_multiline(&form.value(ProfileField::Summary)),
            work: displayable(sections.work()).map(render_work).collect(),
            education: displayable(sections.education())
                .map(render_education)
                .collect(),
            skills: split_skills(&form.value(ProfileField::Skills))
                .iter()
                .map(|skill| escape_html(skill))
                .collect(),
            projects: displayable(sections.projects())
                .map(render_project)
                .collect(),
            certifications: displayable(sections.certifications())
                .map(render_certification)
                .collect(),
        }
    }
}

fn displayable<E: SubForm>(entries: &[E]) -> impl Iterator<Item = &E> {
    entries.iter().filter(|entry| entry.is_displayable())
}

fn contact_items(form: &dyn FormStore) -> Vec<ContactItem> {
    let mut items = Vec::new();

    let email = form.value(ProfileField::Email);
    if !email.is_empty() {
        items.push(ContactItem::Email(escape_html(&email)));
    }
    let phone = form.value(ProfileField::PhoneNumber);
    if !phone.is_empty() {
        items.push(ContactItem::Phone(escape_html(&phone)));
    }
    let address = form.value(ProfileField::Address);
    if !address.is_empty() {
        items.push(ContactItem::Address(escape_html(&address)));
    }

    for (field, label) in [
        (ProfileField::Linkedin, "LinkedIn"),
        (ProfileField::Github, "GitHub"),
        (ProfileField::Website, "Website"),
    ] {
        let url = form.value(field);
        if !url.trim().is_empty() {
            items.push(ContactItem::Link {
                label,
                href: normalize_url(&url),
            });
        }
    }

    items
}

fn work_date_range(entry: &WorkEntry) -> String {
    let start = format_date(&entry.start_date);
    if start.is_empty() {
        return String::new();
    }
    if entry.is_current {
        return format!("{} - Present", start);
    }
    let end = format_date(&entry.end_date);
    if end.is_empty() {
        start
    } else {
        format!("{} - {}", start, end)
    }
}

fn render_work(entry: &WorkEntry) -> RenderedWork {
    RenderedWork {
        job_title: escape_html(&entry.job_title),
        company: escape_html(&entry.company),
        date_range: work_date_range(entry),
        description: escape_multiline(&entry.description),
    }
}

fn render_education(entry: &EducationEntry) -> RenderedEducation {
    RenderedEducation {
        degree: escape_html(&entry.degree),
        institution: escape_html(&entry.institution),
        grad_date: format_date(&entry.grad_date),
        gpa: escape_html(&entry.gpa),
    }
}

fn render_project(entry: &ProjectEntry) -> RenderedProject {
    RenderedProject {
        name: escape_html(&entry.name),
        href: if entry.link.trim().is_empty() {
            String::new()
        } else {
            normalize_url(&entry.link)
        },
        description: escape_multiline(&entry.description),
    }
}

fn render_certification(entry: &CertificationEntry) -> RenderedCertification {
    RenderedCertification {
        name: escape_html(&entry.name),
        org: escape_html(&entry.org),
        date: format_date(&entry.date),
    }
}
