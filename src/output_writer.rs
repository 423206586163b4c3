/*!
 * Output document writer.
 *
 * The translated mapping is written as UTF-8 JSON with 4-space indentation
 * and unescaped non-ASCII text, keys in input order. An existing file of
 * the same name is overwritten.
 */

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::translation::unit::OutputDocument;

/// Default output file name
pub const DEFAULT_OUTPUT_FILENAME: &str = "ja_jp.json";

/// Writes the output document into a fixed directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    directory: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Destination of a document written under `filename`
    pub fn path(&self, filename: &str) -> PathBuf {
        self.directory.join(filename)
    }

    /// Write the document, creating the directory if needed.
    ///
    /// Returns the path written.
    pub fn write(&self, document: &OutputDocument, filename: &str) -> Result<PathBuf> {
        FileManager::ensure_dir(&self.directory)?;

        let path = self.path(filename);
        FileManager::write_json(&path, document)?;
        debug!("Wrote {} entries to {}", document.len(), path.display());

        Ok(path)
    }
}
