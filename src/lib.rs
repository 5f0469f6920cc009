pub mod cli;
pub mod config;

// Re-export the rendering API for convenience
pub use ruleprint_core::{ProcessingError, Report, ReportError, Rule, Violation};
pub use ruleprint_reports::{
    EncodeOptions, JsonRenderer, OutputFormat, RenderError, Renderer, ReportMetadata,
};
