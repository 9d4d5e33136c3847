use std::fs;
use std::path::{Path, PathBuf};

use fbharvest_core::naming::{self, DOM_DIR, OCR_DIR, URL_HASH_CSV};

use crate::error::StoreError;

/// Where each artifact of a run lives under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root and its `DOM/` and `OCR/` sub-directories.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<(), StoreError> {
        for dir in [self.root.clone(), self.dom_dir(), self.ocr_dir()] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn url_hash_csv(&self) -> PathBuf {
        self.root.join(URL_HASH_CSV)
    }

    #[must_use]
    pub fn dom_dir(&self) -> PathBuf {
        self.root.join(DOM_DIR)
    }

    #[must_use]
    pub fn ocr_dir(&self) -> PathBuf {
        self.root.join(OCR_DIR)
    }

    #[must_use]
    pub fn dom_triples(&self, identity_hash: &str) -> PathBuf {
        self.dom_dir().join(naming::triples_csv(identity_hash))
    }

    /// Location of a capture whose file name came from
    /// [`naming::reaction_capture`].
    #[must_use]
    pub fn reaction_capture(&self, file_name: &str) -> PathBuf {
        self.ocr_dir().join(file_name)
    }

    /// Resolves a `DOM`/`OCR` style argument against the root. Absolute
    /// paths are taken as-is.
    #[must_use]
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        }
    }
}
