use crate::sections::ReopenPolicy;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Run settings for the command-line front end.
pub struct Config {
    pub output_dir: PathBuf,
    pub manifest_path: Option<PathBuf>,
    pub reopen_policy: ReopenPolicy,
}

impl Config {
    /// Defaults: outputs go to `./processed`, no manifest, restart on reopen.
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self {
            output_dir: current_dir.join("processed"),
            manifest_path: None,
            reopen_policy: ReopenPolicy::default(),
        })
    }

    /// Expand directories into the PDF files they contain, sorted by name.
    /// Plain file arguments are passed through untouched.
    pub fn collect_input_paths(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for input in inputs {
            if !input.is_dir() {
                paths.push(input.clone());
                continue;
            }
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
                if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
        }
        Ok(paths)
    }
}

pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
