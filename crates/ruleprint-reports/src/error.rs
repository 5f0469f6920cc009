use ruleprint_core::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid report: {0}")]
    InvalidInput(#[from] ReportError),

    #[error("failed to encode report: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}
