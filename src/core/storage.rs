// src/core/storage.rs
//! Key/value persistence port with in-memory and file-backed implementations

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// Local persistent storage addressed by string keys. Values are whole documents;
/// there are no partial updates.
pub trait PersistencePort {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Storage kept in memory. Clones share the same map, so a second session
/// built from a clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl PersistencePort for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a storage directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn ensure_dir_exists(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create storage directory: {}", self.dir.display())
            })?;
            app_log!(info, "Created storage directory: {}", self.dir.display());
        }
        Ok(())
    }
}

impl PersistencePort for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        self.ensure_dir_exists()?;

        // Write next to the target and rename so a crash never leaves half a document
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        app_log!(debug, "Written storage item: {}", path.display());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {}", path.display()))?;
            app_log!(debug, "Removed storage item: {}", path.display());
        }
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        anyhow::bail!("Storage key must not be empty");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!(
            "Invalid storage key: {}. Use letters, digits, '-' or '_'",
            key
        );
    }
    Ok(())
}
