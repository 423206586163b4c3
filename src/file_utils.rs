use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Write a string to a file, replacing any previous content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Serialize as UTF-8 JSON with 4-space indentation.
    ///
    /// serde_json never escapes non-ASCII characters, so Japanese text is
    /// written as-is.
    pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        value
            .serialize(&mut serializer)
            .context("Failed to serialize JSON")?;

        String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
    }

    /// Serialize and write in one step
    pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
        let content = Self::to_pretty_json(value)?;
        Self::write_to_file(path, &content)
    }

    /// Remove a file if it exists. Returns whether something was removed.
    pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Ok(false);
        }
        fs::remove_file(path).with_context(|| format!("Failed to remove file: {:?}", path))?;
        Ok(true)
    }
}

/// Directories a run writes into.
///
/// Created once, before any artifact is written, by `ensure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLocations {
    pub output_dir: PathBuf,
    pub success_log_dir: PathBuf,
    pub error_log_dir: PathBuf,
}

impl RunLocations {
    /// Lay out `<log_root>/success` and `<log_root>/error` next to the
    /// output directory
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(output_dir: P1, log_root: P2) -> Self {
        let log_root = log_root.as_ref();
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            success_log_dir: log_root.join("success"),
            error_log_dir: log_root.join("error"),
        }
    }

    /// Create every directory of the run
    pub fn ensure(&self) -> Result<()> {
        FileManager::ensure_dir(&self.output_dir)?;
        FileManager::ensure_dir(&self.success_log_dir)?;
        FileManager::ensure_dir(&self.error_log_dir)?;
        Ok(())
    }
}
