use crate::error::{Result, SplitError};
use crate::models::SectionKind;
use crate::utils::{ensure_directory_exists, sanitize_filename};
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Fixed middle part of every output file name.
pub const OUTPUT_SUFFIX: &str = "TEEMAInc";

/// Handle to the directory processed documents are written to.
///
/// Writes are not locked: two runs producing the same name overwrite each
/// other and the last one wins.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{identifier}_{suffix}_{section}.pdf`
    pub fn output_name(identifier: &str, section: SectionKind) -> String {
        format!(
            "{}_{}_{}.pdf",
            sanitize_filename(identifier),
            OUTPUT_SUFFIX,
            section.display_name()
        )
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, doc: &mut Document) -> Result<PathBuf> {
        ensure_directory_exists(&self.root)?;
        let path = self.output_path(name);
        doc.save(&path).map_err(|e| SplitError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Resolve a previously written output by its bare file name.
    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let is_bare_name = !name.is_empty()
            && !name.starts_with('.')
            && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name);
        if !is_bare_name {
            return Err(SplitError::OutputNotFound(name.to_string()));
        }

        let path = self.output_path(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SplitError::OutputNotFound(name.to_string()))
        }
    }
}
