// src/form/fields.rs
//! Named profile fields and the store that holds their values

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::types::ContactProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FullName,
    Email,
    PhoneNumber,
    Address,
    Linkedin,
    Github,
    Website,
    Summary,
    Skills,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::FullName,
        ProfileField::Email,
        ProfileField::PhoneNumber,
        ProfileField::Address,
        ProfileField::Linkedin,
        ProfileField::Github,
        ProfileField::Website,
        ProfileField::Summary,
        ProfileField::Skills,
    ];

    /// Name of the input element in the form
    pub fn form_name(self) -> &'static str {
        match self {
            ProfileField::FullName => "full-name",
            ProfileField::Email => "email",
            ProfileField::PhoneNumber => "phone-number",
            ProfileField::Address => "address",
            ProfileField::Linkedin => "linkedin",
            ProfileField::Github => "github",
            ProfileField::Website => "website",
            ProfileField::Summary => "summary",
            ProfileField::Skills => "skills",
        }
    }

    /// Whether the value ends up in an `href` rather than in text content
    pub fn is_url(self) -> bool {
        matches!(
            self,
            ProfileField::Linkedin | ProfileField::Github | ProfileField::Website
        )
    }

    pub fn is_required(self) -> bool {
        self == ProfileField::FullName
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

impl FromStr for ProfileField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        ProfileField::ALL
            .into_iter()
            .find(|field| field.form_name() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown field: {}. Use one of: {}",
                    s,
                    ProfileField::ALL.map(|f| f.form_name()).join(", ")
                )
            })
    }
}

/// Read/write access to the profile fields of the form.
///
/// A field that was never written is absent and reads as the empty string.
pub trait FormStore {
    fn value(&self, field: ProfileField) -> String;

    fn set_value(&mut self, field: ProfileField, value: String);

    /// Blank every field
    fn reset(&mut self);

    fn contact_profile(&self) -> ContactProfile {
        ContactProfile {
            full_name: self.value(ProfileField::FullName),
            email: self.value(ProfileField::Email),
            phone_number: self.value(ProfileField::PhoneNumber),
            address: self.value(ProfileField::Address),
            linkedin: self.value(ProfileField::Linkedin),
            github: self.value(ProfileField::Github),
            website: self.value(ProfileField::Website),
            summary: self.value(ProfileField::Summary),
            skills: self.value(ProfileField::Skills),
        }
    }

    fn apply_profile(&mut self, profile: &ContactProfile) {
        self.set_value(ProfileField::FullName, profile.full_name.clone());
        self.set_value(ProfileField::Email, profile.email.clone());
        self.set_value(ProfileField::PhoneNumber, profile.phone_number.clone());
        self.set_value(ProfileField::Address, profile.address.clone());
        self.set_value(ProfileField::Linkedin, profile.linkedin.clone());
        self.set_value(ProfileField::Github, profile.github.clone());
        self.set_value(ProfileField::Website, profile.website.clone());
        self.set_value(ProfileField::Summary, profile.summary.clone());
        self.set_value(ProfileField::Skills, profile.skills.clone());
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<ProfileField, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormStore for FormState {
    fn value(&self, field: ProfileField) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: ProfileField, value: String) {
        self.values.insert(field, value);
    }

    fn reset(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_reads_empty() {
        let form = FormState::new();
        for field in ProfileField::ALL {
            assert_eq!(form.value(field), "");
        }
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!("full-name".parse::<ProfileField>().unwrap(), ProfileField::FullName);
        assert_eq!("Phone_Number".parse::<ProfileField>().unwrap(), ProfileField::PhoneNumber);
        assert!("nickname".parse::<ProfileField>().is_err());
    }

    #[test]
    fn test_profile_roundtrip_through_store() {
        let profile = ContactProfile {
            full_name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            skills: "COBOL, Compilers".to_string(),
            ..Default::default()
        };

        let mut form = FormState::new();
        form.apply_profile(&profile);
        assert_eq!(form.contact_profile(), profile);

        form.reset();
        assert_eq!(form.contact_profile(), ContactProfile::default());
    }

    #[test]
    fn test_url_fields() {
        let urls: Vec<_> = ProfileField::ALL.into_iter().filter(|f| f.is_url()).collect();
        assert_eq!(
            urls,
            vec![ProfileField::Linkedin, ProfileField::Github, ProfileField::Website]
        );
    }
}
