//! Core types for the ruleprint report renderer.
//!
//! This crate provides the analysis result model handed to renderers:
//! - Rules and their priorities (Rule)
//! - Rule findings at a code location (Violation)
//! - Per-file analysis failures (ProcessingError)
//! - The completed run (Report) and its invariant checks

mod error;
mod report;
mod rule;
mod violation;

pub use error::ReportError;
pub use report::{ProcessingError, Report};
pub use rule::Rule;
pub use violation::Violation;
