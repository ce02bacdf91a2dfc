use crate::error::{Result, SplitError};
use std::path::Path;

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| SplitError::io(path, e))?;
    }
    Ok(())
}

/// Make a token safe to embed in a file name.
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; anything else becomes `_`.
/// A leading dot is replaced too so the result never names a hidden file
/// or a parent directory.
pub fn sanitize_filename(filename: &str) -> String {
    let mut out: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.starts_with('.') {
        out.replace_range(..1, "_");
    }
    out
}

/// First `max` bytes of `text`, cut on a char boundary.
pub fn preview(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
