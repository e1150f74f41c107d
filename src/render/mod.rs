// src/render/mod.rs
//! Form state to HTML: the render model builder and the preview renderer

pub mod html;
pub mod model;

pub use html::{render_document, render_preview, PREVIEW_PLACEHOLDER};
pub use model::{escape_html, format_date, normalize_url, split_skills, RenderModel};
