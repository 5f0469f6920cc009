//! Output-facing document model.
//!
//! Field declaration order is the serialized key order, and optional fields
//! serialize as `null` rather than being skipped, so every record has the
//! same shape.

use serde::{Deserialize, Serialize};

use ruleprint_core::{ProcessingError, Violation};

/// Producer metadata stamped on every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub version: String,
    pub package: String,
}

impl ReportMetadata {
    pub fn new(version: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            package: package.into(),
        }
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"), "ruleprint")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub version: String,
    pub package: String,
    pub timestamp: String,
    pub files: Vec<FileEntry>,
    pub errors: Vec<ErrorRecord>,
}

impl RenderedDocument {
    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|entry| entry.violations.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: String,
    pub violations: Vec<ViolationRecord>,
}

impl FileEntry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            violations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub begin_line: u32,
    pub end_line: u32,
    pub package: Option<String>,
    pub function: Option<String>,
    pub class: Option<String>,
    pub method: Option<String>,
    pub description: String,
    pub rule: String,
    pub rule_set: String,
    pub external_info_url: Option<String>,
    pub priority: u32,
}

impl From<&Violation> for ViolationRecord {
    fn from(violation: &Violation) -> Self {
        let rule = &violation.rule;
        Self {
            begin_line: violation.begin_line,
            end_line: violation.end_line,
            package: violation.namespace_name.clone(),
            function: violation.function_name.clone(),
            class: violation.class_name.clone(),
            method: violation.method_name.clone(),
            description: violation.description.clone(),
            rule: rule.name.clone(),
            rule_set: rule.rule_set_name.clone(),
            external_info_url: rule.external_info_url.clone(),
            priority: rule.priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub file_name: String,
    pub message: String,
}

impl From<&ProcessingError> for ErrorRecord {
    fn from(error: &ProcessingError) -> Self {
        Self {
            file_name: error.file.clone(),
            message: error.message.clone(),
        }
    }
}
