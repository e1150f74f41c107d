// src/core/mod.rs
//! Infrastructure shared by the session and the CLI

pub mod config;
pub mod storage;

pub use config::AppConfig;
pub use storage::{FileStorage, MemoryStorage, PersistencePort};
