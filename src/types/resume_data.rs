// src/types/resume_data.rs
//! Resume data structures shared by the form, the persisted document and the renderer

use serde::{Deserialize, Deserializer, Serialize};

/// Storage key holding the whole saved resume
pub const STORAGE_KEY: &str = "resumeData";

// ===== Raw form values =====

/// Profile block of the form. Values are raw user input, never escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub github: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    /// Comma or newline separated
    #[serde(deserialize_with = "null_as_default")]
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    /// `YYYY-MM`
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    /// `YYYY-MM`, always empty while `is_current` is set
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_current: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

impl WorkEntry {
    /// Check or uncheck "current position". Checking wipes the end date;
    /// unchecking leaves it empty and editable again.
    pub fn set_current(&mut self, current: bool) {
        self.is_current = current;
        if current {
            self.end_date.clear();
        }
    }

    pub fn end_date_enabled(&self) -> bool {
        !self.is_current
    }

    /// Writes to a disabled end date are dropped.
    pub fn set_end_date(&mut self, value: &str) {
        if self.end_date_enabled() {
            self.end_date = value.to_string();
        }
    }

    /// Re-establish the current/end-date exclusion on data coming from storage
    pub fn normalized(mut self) -> Self {
        if self.is_current {
            self.end_date.clear();
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub grad_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

// ===== Persisted document =====

/// Everything the form holds, stored wholesale under [`STORAGE_KEY`].
/// There is no version field; unknown keys are ignored. A section list is
/// `None` when its key is missing or null, and `Some(vec![])` when the
/// section was saved empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedResumeDocument {
    /// `None` when the stored object had no usable `basic` block
    pub basic: Option<ContactProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experiences: Option<Vec<WorkEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educations: Option<Vec<EducationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<CertificationEntry>>,
}

impl SavedResumeDocument {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
