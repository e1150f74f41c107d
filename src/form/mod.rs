// src/form/mod.rs
//! Form state: profile fields and repeatable sections

pub mod fields;
pub mod sections;

pub use fields::{FormState, FormStore, ProfileField};
pub use sections::{FieldSpec, InputKind, SectionKind, Sections, SubForm};
