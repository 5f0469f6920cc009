//! The completed analysis run.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::violation::Violation;

/// A non-fatal failure recorded while analyzing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingError {
    pub file: String,
    pub message: String,
}

impl ProcessingError {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Violations and processing errors collected over one run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    violations: Vec<Violation>,
    #[serde(default)]
    errors: Vec<ProcessingError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn add_error(&mut self, error: ProcessingError) {
        self.errors.push(error);
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn errors(&self) -> &[ProcessingError] {
        &self.errors
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_violations() && !self.has_errors()
    }

    /// Checks the record invariants, stopping at the first broken one.
    pub fn validate(&self) -> Result<(), ReportError> {
        for (index, violation) in self.violations.iter().enumerate() {
            if violation.file_name.is_empty() {
                return Err(ReportError::EmptyFileName { index });
            }
            if violation.begin_line > violation.end_line {
                return Err(ReportError::InvertedLines {
                    index,
                    begin: violation.begin_line,
                    end: violation.end_line,
                });
            }
            if violation.rule.priority == 0 {
                return Err(ReportError::ZeroPriority {
                    rule: violation.rule.name.clone(),
                });
            }
        }

        for (index, error) in self.errors.iter().enumerate() {
            if error.file.is_empty() {
                return Err(ReportError::EmptyErrorFile { index });
            }
        }

        Ok(())
    }
}

impl FromIterator<Violation> for Report {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
            errors: Vec::new(),
        }
    }
}
