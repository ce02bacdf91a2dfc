use serde::{Deserialize, Serialize};
use std::fmt;

/// Page categories a solicitation is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Pages before the first recognized header
    Static,
    References,
    Qualifications,
    Acknowledgment,
}

impl SectionKind {
    /// Lowercase key used in field names and manifests.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Static => "static",
            SectionKind::References => "references",
            SectionKind::Qualifications => "qualifications",
            SectionKind::Acknowledgment => "acknowledgment",
        }
    }

    /// Name used in output file names.
    pub fn display_name(self) -> &'static str {
        match self {
            SectionKind::Static => "Static",
            SectionKind::References => "References",
            SectionKind::Qualifications => "Qualifications",
            SectionKind::Acknowledgment => "Acknowledgment",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultilineText,
}

/// Rectangle in PDF user space: left, bottom, right, top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl FieldRect {
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }
}

/// Static definition of one fillable field owned by a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub section: SectionKind,
    pub name: &'static str,
    pub kind: FieldKind,
    pub rect: FieldRect,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutputRecord {
    pub section: SectionKind,
    pub file_name: String,
    pub pages: Vec<usize>,
    pub fields_per_page: usize,
}

/// Summary of one processed input, written out as the JSON manifest.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub display_identifier: String,
    pub page_count: usize,
    pub processing_timestamp: String,
    pub outputs: Vec<OutputRecord>,
}

impl ProcessingReport {
    pub fn file_names(&self) -> Vec<String> {
        self.outputs.iter().map(|o| o.file_name.clone()).collect()
    }
}
