//! Folds a report into the ordered document model.

use std::collections::HashMap;

use ruleprint_core::Report;
use tracing::debug;

use crate::clock::{Clock, SystemClock, format_timestamp};
use crate::document::{ErrorRecord, FileEntry, RenderedDocument, ReportMetadata, ViolationRecord};
use crate::error::RenderError;

/// Builds [`RenderedDocument`]s with fixed metadata and an injected clock.
#[derive(Debug, Clone)]
pub struct Assembler<C = SystemClock> {
    metadata: ReportMetadata,
    clock: C,
}

impl<C: Clock> Assembler<C> {
    pub fn new(metadata: ReportMetadata, clock: C) -> Self {
        Self { metadata, clock }
    }

    /// Groups violations by file in first-seen order, keeping each file's
    /// violations in report order. The clock is read once per call.
    pub fn assemble(&self, report: &Report) -> Result<RenderedDocument, RenderError> {
        report.validate()?;

        let timestamp = format_timestamp(self.clock.now());

        let mut files: Vec<FileEntry> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for violation in report.violations() {
            let position = *positions
                .entry(violation.file_name.as_str())
                .or_insert_with(|| {
                    files.push(FileEntry::new(violation.file_name.as_str()));
                    files.len() - 1
                });
            files[position]
                .violations
                .push(ViolationRecord::from(violation));
        }

        let errors: Vec<ErrorRecord> = report.errors().iter().map(ErrorRecord::from).collect();

        debug!(
            files = files.len(),
            violations = report.violations().len(),
            errors = errors.len(),
            "assembled report document"
        );

        Ok(RenderedDocument {
            version: self.metadata.version.clone(),
            package: self.metadata.package.clone(),
            timestamp,
            files,
            errors,
        })
    }
}
