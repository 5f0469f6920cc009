use thiserror::Error;

/// A report record that breaks an invariant the renderers rely on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("violation #{index} has an empty file name")]
    EmptyFileName { index: usize },

    #[error("violation #{index} ends before it begins (lines {begin}-{end})")]
    InvertedLines { index: usize, begin: u32, end: u32 },

    #[error("rule '{rule}' has priority 0 (priorities start at 1)")]
    ZeroPriority { rule: String },

    #[error("processing error #{index} has an empty file name")]
    EmptyErrorFile { index: usize },
}
