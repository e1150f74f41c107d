pub mod resume_data;

pub use resume_data::{
    CertificationEntry, ContactProfile, EducationEntry, ProjectEntry, SavedResumeDocument,
    WorkEntry, STORAGE_KEY,
};
