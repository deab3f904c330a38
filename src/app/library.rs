use std::path::{Path, PathBuf};

use super::file_io::DiagramFile;
use crate::error::Result;

/// Default store location, relative to the working directory unless
/// overridden in settings.
pub const DEFAULT_LIBRARY_PATH: &str = "diagramflow_diagrams.json";

/// Flat store of saved diagrams: one JSON file holding the whole array,
/// read and rewritten wholesale on every operation. Saves upsert by
/// `fileName`, mirroring how the browser build kept its diagram list
/// under a single storage key.
pub struct DiagramLibrary {
    path: PathBuf,
}

impl DiagramLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved diagrams; a missing store file reads as empty.
    pub fn load_all(&self) -> Result<Vec<DiagramFile>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts or replaces the entry with the same file name. On any
    /// failure the store file is left as it was.
    pub fn save(&self, entry: DiagramFile) -> Result<()> {
        let mut all = self.load_all()?;
        match all.iter_mut().find(|d| d.file_name == entry.file_name) {
            Some(existing) => *existing = entry,
            None => all.push(entry),
        }
        self.write_all(&all)
    }

    /// Removes the entry with the given file name, reporting whether one
    /// existed.
    pub fn remove(&self, file_name: &str) -> Result<bool> {
        let mut all = self.load_all()?;
        let before = all.len();
        all.retain(|d| d.file_name != file_name);
        if all.len() == before {
            return Ok(false);
        }
        self.write_all(&all)?;
        Ok(true)
    }

    fn write_all(&self, all: &[DiagramFile]) -> Result<()> {
        let json = serde_json::to_string_pretty(all)?;
        std::fs::write(&self.path, json)?;
        log::info!("library now holds {} diagram(s)", all.len());
        Ok(())
    }
}
