use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json;

use data::Books;
use errors::*;

/// Reads and writes the book list as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Storage {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty list, not an error. Records that do not
    /// hold the store's invariants make the whole file malformed.
    pub fn load(&self) -> Result<Books> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no book list at {}, starting empty", self.path.display());
                return Ok(Books::new());
            }
            Err(e) => return Err(e.into()),
        };

        let books: Books = serde_json::from_str(&text)
            .chain_err(|| ErrorKind::Deserialization(self.path.display().to_string()))?;
        books.check()
            .chain_err(|| ErrorKind::Deserialization(self.path.display().to_string()))?;

        debug!("loaded {} book(s) from {}", books.len(), self.path.display());

        Ok(books)
    }

    /// Overwrites the file with the full list.
    pub fn save(&self, books: &Books) -> Result<()> {
        let text = serde_json::to_string_pretty(books)
            .chain_err(|| ErrorKind::Serialization(self.path.display().to_string()))?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        fs::write(&self.path, text)?;

        debug!("saved {} book(s) to {}", books.len(), self.path.display());

        Ok(())
    }
}
