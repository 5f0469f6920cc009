use std::io::Write;

use ruleprint_core::Report;

use crate::assembler::Assembler;
use crate::clock::{Clock, SystemClock};
use crate::document::ReportMetadata;
use crate::encoder::{EncodeOptions, encode};
use crate::error::RenderError;
use crate::sink::deliver;

/// Renders a completed report to a sink.
///
/// Other output formats plug in behind the same trait.
pub trait Renderer {
    fn render(&self, report: &Report, sink: &mut dyn Write) -> Result<(), RenderError>;
}

/// Renders reports as HTML-safe JSON.
#[derive(Debug, Clone)]
pub struct JsonRenderer<C = SystemClock> {
    assembler: Assembler<C>,
    options: EncodeOptions,
}

impl JsonRenderer<SystemClock> {
    pub fn new(metadata: ReportMetadata, options: EncodeOptions) -> Self {
        Self::with_clock(metadata, options, SystemClock)
    }
}

impl Default for JsonRenderer<SystemClock> {
    fn default() -> Self {
        Self::new(ReportMetadata::default(), EncodeOptions::default())
    }
}

impl<C: Clock> JsonRenderer<C> {
    pub fn with_clock(metadata: ReportMetadata, options: EncodeOptions, clock: C) -> Self {
        Self {
            assembler: Assembler::new(metadata, clock),
            options,
        }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// The encoded document without the trailing newline.
    pub fn render_to_string(&self, report: &Report) -> Result<String, RenderError> {
        let document = self.assembler.assemble(report)?;
        encode(&document, &self.options)
    }
}

impl<C: Clock> Renderer for JsonRenderer<C> {
    fn render(&self, report: &Report, sink: &mut dyn Write) -> Result<(), RenderError> {
        let text = self.render_to_string(report)?;
        deliver(&text, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::encoder::OutputFormat;
    use ruleprint_core::{ProcessingError, Rule, Violation};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn renderer(format: OutputFormat) -> JsonRenderer<FixedClock> {
        JsonRenderer::with_clock(
            ReportMetadata::new("2.15.0", "ruleprint"),
            EncodeOptions {
                format,
                ..EncodeOptions::default()
            },
            FixedClock::parse("2024-03-01T09:30:00+00:00").unwrap(),
        )
    }

    #[test]
    fn test_render_writes_document_and_newline() {
        let rule = Arc::new(Rule::new("ShortVariable", "naming", 3));
        let mut report = Report::new();
        report.add_violation(Violation::new("a.php", 2, 2, "Avoid $i", rule).with_function("loop"));
        report.add_error(ProcessingError::new("b.php", "Unexpected end of file"));

        let mut sink = Vec::new();
        renderer(OutputFormat::Compact).render(&report, &mut sink).unwrap();

        let text = String::from_utf8(sink).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(text.matches('\n').count(), 1);

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "version": "2.15.0",
                "package": "ruleprint",
                "timestamp": "2024-03-01T09:30:00+00:00",
                "files": [{
                    "file": "a.php",
                    "violations": [{
                        "beginLine": 2,
                        "endLine": 2,
                        "package": null,
                        "function": "loop",
                        "class": null,
                        "method": null,
                        "description": "Avoid $i",
                        "rule": "ShortVariable",
                        "ruleSet": "naming",
                        "externalInfoUrl": null,
                        "priority": 3
                    }]
                }],
                "errors": [{"fileName": "b.php", "message": "Unexpected end of file"}]
            })
        );
    }

    #[test]
    fn test_invalid_report_writes_nothing() {
        let rule = Arc::new(Rule::new("ShortVariable", "naming", 3));
        let report: Report = std::iter::once(Violation::new("a.php", 5, 1, "inverted", rule)).collect();

        let mut sink = Vec::new();
        let result = renderer(OutputFormat::Pretty).render(&report, &mut sink);

        assert!(matches!(result, Err(RenderError::InvalidInput(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_render_through_trait_object() {
        let boxed: Box<dyn Renderer> = Box::new(renderer(OutputFormat::Pretty));
        let mut sink = Vec::new();
        boxed.render(&Report::new(), &mut sink).unwrap();

        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("\"files\": [],"));
        assert!(text.ends_with("\"errors\": []\n}\n"));
    }

    #[test]
    fn test_default_renderer_uses_pretty_safe_encoding() {
        let renderer: JsonRenderer = JsonRenderer::default();

        assert_eq!(renderer.options().format, OutputFormat::Pretty);
        assert!(renderer.options().escape_slashes);
        assert!(renderer.options().escape_unicode);
    }
}
