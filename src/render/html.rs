// src/render/html.rs
//! HTML renderer for the resume preview

use std::fmt::Write;

use super::model::{ContactItem, RenderModel};

/// Shown in the preview pane until a resume has been generated
pub const PREVIEW_PLACEHOLDER: &str = r#"<div class="preview-placeholder"><p>Fill out the form and click "Create Resume" to see your preview here</p></div>"#;

const CONTACT_SEPARATOR: &str = " • ";

const PREVIEW_STYLES: &str = r#"
body { font-family: "Helvetica Neue", Arial, sans-serif; color: #222; margin: 0; padding: 24px; }
.resume-preview { max-width: 800px; margin: 0 auto; }
.resume-preview h2 { margin-bottom: 4px; font-size: 28px; }
.resume-preview h3 { border-bottom: 2px solid #14A4E6; padding-bottom: 4px; margin-top: 24px; }
.contact-info { color: #555; font-size: 14px; }
.contact-info a { color: #14A4E6; text-decoration: none; }
.summary { margin-top: 12px; }
.job-header, .edu-header, .cert-header, .project-header { display: flex; justify-content: space-between; }
.job-title, .degree-name, .cert-name, .project-name { font-weight: bold; }
.company-name, .institution-name, .cert-org { color: #555; }
.date-range { color: #757575; white-space: nowrap; text-align: right; }
.experience-entry, .education-entry, .project-entry, .cert-entry { margin-bottom: 12px; }
.skills-list { display: flex; flex-wrap: wrap; gap: 6px; }
.skill-tag { background: #eef7fc; border-radius: 4px; padding: 2px 8px; }
@media print { body { padding: 0; } }
"#;

/// Render the preview fragment. Sections come in a fixed order and a heading
/// is only written when the section has at least one entry.
pub fn render_preview(model: &RenderModel) -> String {
    let mut html = String::new();

    html.push_str(r#"<div class="resume-preview">"#);
    let _ = write!(html, "<h2>{}</h2>", model.full_name);
    let _ = write!(
        html,
        r#"<div class="contact-info">{}</div>"#,
        model
            .contact
            .iter()
            .map(render_contact)
            .collect::<Vec<_>>()
            .join(CONTACT_SEPARATOR)
    );

    if !model.summary.is_empty() {
        let _ = write!(html, r#"<div class="summary">{}</div>"#, model.summary);
    }

    if !model.work.is_empty() {
        html.push_str("<h3>Work Experience</h3>");
        for exp in &model.work {
            html.push_str(r#"<div class="experience-entry"><div class="job-header"><div>"#);
            let _ = write!(
                html,
                r#"<div class="job-title">{}</div><div class="company-name">{}</div></div>"#,
                exp.job_title, exp.company
            );
            push_date_range(&mut html, &exp.date_range);
            html.push_str("</div>");
            if !exp.description.is_empty() {
                let _ = write!(html, "<div>{}</div>", exp.description);
            }
            html.push_str("</div>");
        }
    }

    if !model.education.is_empty() {
        html.push_str("<h3>Education</h3>");
        for edu in &model.education {
            html.push_str(r#"<div class="education-entry"><div class="edu-header"><div>"#);
            let _ = write!(
                html,
                r#"<div class="degree-name">{}</div><div class="institution-name">{}</div></div>"#,
                edu.degree, edu.institution
            );
            push_date_range(&mut html, &edu.grad_date);
            html.push_str("</div>");
            if !edu.gpa.is_empty() {
                let _ = write!(html, "<div>GPA: {}</div>", edu.gpa);
            }
            html.push_str("</div>");
        }
    }

    if !model.skills.is_empty() {
        html.push_str(r#"<h3>Skills</h3><div class="skills-list">"#);
        for skill in &model.skills {
            let _ = write!(html, r#"<span class="skill-tag">{}</span>"#, skill);
        }
        html.push_str("</div>");
    }

    if !model.projects.is_empty() {
        html.push_str("<h3>Projects</h3>");
        for project in &model.projects {
            html.push_str(
                r#"<div class="project-entry"><div class="project-header"><div class="project-name">"#,
            );
            if project.href.is_empty() {
                html.push_str(&project.name);
            } else {
                let _ = write!(
                    html,
                    r#"<a href="{}" target="_blank">{}</a>"#,
                    project.href, project.name
                );
            }
            html.push_str("</div></div>");
            if !project.description.is_empty() {
                let _ = write!(html, "<div>{}</div>", project.description);
            }
            html.push_str("</div>");
        }
    }

    if !model.certifications.is_empty() {
        html.push_str("<h3>Certifications</h3>");
        for cert in &model.certifications {
            html.push_str(r#"<div class="cert-entry"><div class="cert-header"><div>"#);
            let _ = write!(html, r#"<div class="cert-name">{}</div>"#, cert.name);
            if !cert.org.is_empty() {
                let _ = write!(html, r#"<div class="cert-org">{}</div>"#, cert.org);
            }
            html.push_str("</div>");
            push_date_range(&mut html, &cert.date);
            html.push_str("</div></div>");
        }
    }

    html.push_str("</div>");
    html
}

/// Wrap a preview fragment into a standalone page for printing and PDF conversion
pub fn render_document(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Resume</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        PREVIEW_STYLES, fragment
    )
}

fn render_contact(item: &ContactItem) -> String {
    match item {
        ContactItem::Email(email) => format!(r#"<a href="mailto:{}">{}</a>"#, email, email),
        ContactItem::Phone(text) | ContactItem::Address(text) => text.clone(),
        ContactItem::Link { label, href } => {
            format!(r#"<a href="{}" target="_blank">{}</a>"#, href, label)
        }
    }
}

fn push_date_range(html: &mut String, date: &str) {
    if !date.is_empty() {
        let _ = write!(html, r#"<div class="date-range">{}</div>"#, date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormState, FormStore, ProfileField, Sections};
    use crate::types::{CertificationEntry, EducationEntry, ProjectEntry, WorkEntry};

    fn render(form: &FormState, sections: &Sections) -> String {
        render_preview(&RenderModel::build(form, sections))
    }

    #[test]
    fn test_name_and_current_job_only() {
        let mut form = FormState::new();
        form.set_value(ProfileField::FullName, "Ada Lovelace".to_string());

        let mut sections = Sections::new();
        sections.replace(vec![WorkEntry {
            job_title: "Analyst".to_string(),
            company: "Engine Co".to_string(),
            start_date: "2021-04".to_string(),
            is_current: true,
            ..Default::default()
        }]);

        let html = render(&form, &sections);
        assert!(html.contains("<h2>Ada Lovelace</h2>"));
        assert_eq!(html.matches(r#"class="experience-entry""#).count(), 1);
        assert!(html.contains(r#"<div class="date-range">Apr 2021 - Present</div>"#));
        for heading in ["Education", "Skills", "Projects", "Certifications"] {
            assert!(!html.contains(&format!("<h3>{}</h3>", heading)));
        }
        assert!(!html.contains(r#"class="summary""#));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let mut form = FormState::new();
        form.set_value(ProfileField::FullName, "A".to_string());
        form.set_value(ProfileField::Summary, "Hello".to_string());
        form.set_value(ProfileField::Skills, "Rust".to_string());

        let mut sections = Sections::empty();
        sections.replace(vec![CertificationEntry {
            name: "CKA".to_string(),
            ..Default::default()
        }]);
        sections.replace(vec![ProjectEntry {
            name: "cvform".to_string(),
            ..Default::default()
        }]);
        sections.replace(vec![EducationEntry {
            degree: "BSc".to_string(),
            institution: "ETH".to_string(),
            ..Default::default()
        }]);
        sections.replace(vec![WorkEntry {
            job_title: "Dev".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        }]);

        let html = render(&form, &sections);
        let positions: Vec<usize> = [
            "<h2>",
            r#"class="summary""#,
            "<h3>Work Experience</h3>",
            "<h3>Education</h3>",
            "<h3>Skills</h3>",
            "<h3>Projects</h3>",
            "<h3>Certifications</h3>",
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_markup_in_every_text_field_is_escaped() {
        let payload = r#"<img src=x onerror='alert(1)'>&"#;
        let mut form = FormState::new();
        for field in ProfileField::ALL {
            form.set_value(field, payload.to_string());
        }

        let mut sections = Sections::empty();
        sections.replace(vec![WorkEntry {
            job_title: payload.to_string(),
            company: payload.to_string(),
            description: payload.to_string(),
            ..Default::default()
        }]);
        sections.replace(vec![EducationEntry {
            degree: payload.to_string(),
            institution: payload.to_string(),
            gpa: payload.to_string(),
            ..Default::default()
        }]);
        sections.replace(vec![ProjectEntry {
            name: payload.to_string(),
            link: payload.to_string(),
            description: payload.to_string(),
        }]);
        sections.replace(vec![CertificationEntry {
            name: payload.to_string(),
            org: payload.to_string(),
            ..Default::default()
        }]);

        let html = render(&form, &sections);
        assert!(!html.contains("<img"));
        assert!(!html.contains("'alert"));
        assert!(html.contains("&lt;img src=x onerror=&#039;alert(1)&#039;&gt;&amp;"));
    }

    #[test]
    fn test_contact_line_and_links() {
        let mut form = FormState::new();
        form.set_value(ProfileField::Email, "ada@example.com".to_string());
        form.set_value(ProfileField::PhoneNumber, "+41 00".to_string());
        form.set_value(ProfileField::Github, "github.com/ada".to_string());

        let html = render(&form, &Sections::new());
        assert!(html.contains(
            r#"<div class="contact-info"><a href="mailto:ada@example.com">ada@example.com</a> • +41 00 • <a href="https://github.com/ada" target="_blank">GitHub</a></div>"#
        ));
    }

    #[test]
    fn test_optional_parts_are_omitted() {
        let mut sections = Sections::empty();
        sections.replace(vec![EducationEntry {
            degree: "MSc".to_string(),
            institution: "EPFL".to_string(),
            ..Default::default()
        }]);
        sections.replace(vec![ProjectEntry {
            name: "site".to_string(),
            ..Default::default()
        }]);

        let html = render(&FormState::new(), &sections);
        assert!(!html.contains("date-range"));
        assert!(!html.contains("GPA"));
        assert!(!html.contains("<a href"));
        assert!(html.contains(r#"<div class="project-name">site</div>"#));
    }

    #[test]
    fn test_render_document_wraps_fragment() {
        let page = render_document("<div>x</div>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<body>\n<div>x</div>\n</body>"));
        assert!(page.contains(".resume-preview"));
    }
}
