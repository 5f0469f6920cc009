use std::io::{self, ErrorKind, Write};
use std::sync::Arc;

use ruleprint::{
    EncodeOptions, JsonRenderer, OutputFormat, ProcessingError, RenderError, Renderer, Report,
    ReportMetadata, Rule, Violation,
};
use ruleprint_reports::{Assembler, FixedClock, RenderedDocument, encode};
use serde_json::Value;

fn clock() -> FixedClock {
    FixedClock::parse("2024-03-01T09:30:00+00:00").unwrap()
}

fn metadata() -> ReportMetadata {
    ReportMetadata::new("2.15.0", "ruleprint")
}

fn renderer(format: OutputFormat) -> JsonRenderer<FixedClock> {
    JsonRenderer::with_clock(
        metadata(),
        EncodeOptions {
            format,
            ..EncodeOptions::default()
        },
        clock(),
    )
}

/// Two violations in A.php, one in B.php, one processing error for C.php.
fn scenario_report() -> Report {
    let unused = Arc::new(Rule::new("UnusedPrivateField", "Unused Code Rules", 3));
    let naming = Arc::new(
        Rule::new("ShortVariable", "Naming Rules", 2)
            .with_external_info_url("https://phpmd.org/rules/naming.html#shortvariable"),
    );

    let mut report = Report::new();
    report.add_violation(
        Violation::new("A.php", 3, 3, "Avoid unused private fields such as $bar.", Arc::clone(&unused))
            .with_class("Foo"),
    );
    report.add_violation(
        Violation::new("B.php", 1, 1, "Avoid variables with short names like $i.", Arc::clone(&naming))
            .with_function("helper"),
    );
    report.add_violation(
        Violation::new("A.php", 10, 12, "Avoid variables with short names like $x.", naming)
            .with_namespace("App")
            .with_method("Foo", "baz"),
    );
    report.add_error(ProcessingError::new("C.php", "parse failure"));
    report
}

#[test]
fn test_scenario_grouping() {
    let text = renderer(OutputFormat::Compact)
        .render_to_string(&scenario_report())
        .unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["file"], "A.php");
    assert_eq!(files[1]["file"], "B.php");

    let a = files[0]["violations"].as_array().unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!((a[0]["beginLine"].as_u64(), a[0]["endLine"].as_u64()), (Some(3), Some(3)));
    assert_eq!((a[1]["beginLine"].as_u64(), a[1]["endLine"].as_u64()), (Some(10), Some(12)));
    assert_eq!(files[1]["violations"].as_array().unwrap().len(), 1);

    assert_eq!(
        value["errors"],
        serde_json::json!([{"fileName": "C.php", "message": "parse failure"}])
    );
}

#[test]
fn test_scenario_pretty_output() {
    let mut sink = Vec::new();
    renderer(OutputFormat::Pretty)
        .render(&scenario_report(), &mut sink)
        .unwrap();
    let text = String::from_utf8(sink).unwrap();

    insta::assert_snapshot!(text.trim_end(), @r#"
    {
        "version": "2.15.0",
        "package": "ruleprint",
        "timestamp": "2024-03-01T09:30:00+00:00",
        "files": [
            {
                "file": "A.php",
                "violations": [
                    {
                        "beginLine": 3,
                        "endLine": 3,
                        "package": null,
                        "function": null,
                        "class": "Foo",
                        "method": null,
                        "description": "Avoid unused private fields such as $bar.",
                        "rule": "UnusedPrivateField",
                        "ruleSet": "Unused Code Rules",
                        "externalInfoUrl": null,
                        "priority": 3
                    },
                    {
                        "beginLine": 10,
                        "endLine": 12,
                        "package": "App",
                        "function": null,
                        "class": "Foo",
                        "method": "baz",
                        "description": "Avoid variables with short names like $x.",
                        "rule": "ShortVariable",
                        "ruleSet": "Naming Rules",
                        "externalInfoUrl": "https:\/\/phpmd.org\/rules\/naming.html#shortvariable",
                        "priority": 2
                    }
                ]
            },
            {
                "file": "B.php",
                "violations": [
                    {
                        "beginLine": 1,
                        "endLine": 1,
                        "package": null,
                        "function": "helper",
                        "class": null,
                        "method": null,
                        "description": "Avoid variables with short names like $i.",
                        "rule": "ShortVariable",
                        "ruleSet": "Naming Rules",
                        "externalInfoUrl": "https:\/\/phpmd.org\/rules\/naming.html#shortvariable",
                        "priority": 2
                    }
                ]
            }
        ],
        "errors": [
            {
                "fileName": "C.php",
                "message": "parse failure"
            }
        ]
    }
    "#);
}

#[test]
fn test_round_trip_preserves_report_content() {
    let report = scenario_report();
    let assembler = Assembler::new(metadata(), clock());
    let document = assembler.assemble(&report).unwrap();

    for options in [EncodeOptions::default(), EncodeOptions::compact()] {
        let text = encode(&document, &options).unwrap();
        let decoded: RenderedDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, document);
    }

    // Every input violation can be found in its file entry, in input order.
    for entry in &document.files {
        let expected: Vec<_> = report
            .violations()
            .iter()
            .filter(|v| v.file_name == entry.file)
            .map(|v| (v.begin_line, v.end_line, v.description.as_str()))
            .collect();
        let actual: Vec<_> = entry
            .violations
            .iter()
            .map(|v| (v.begin_line, v.end_line, v.description.as_str()))
            .collect();
        assert_eq!(actual, expected);
    }
    assert_eq!(document.violation_count(), report.violations().len());
}

#[test]
fn test_pretty_and_compact_agree() {
    let report = scenario_report();
    let pretty: Value =
        serde_json::from_str(&renderer(OutputFormat::Pretty).render_to_string(&report).unwrap()).unwrap();
    let compact: Value =
        serde_json::from_str(&renderer(OutputFormat::Compact).render_to_string(&report).unwrap()).unwrap();

    assert_eq!(pretty, compact);
}

#[test]
fn test_script_injection_is_escaped() {
    let rule = Arc::new(Rule::new("EvalExpression", "Design Rules", 1));
    let description = "Found <script>alert('x & \"y\"')</script> in source";
    let report: Report = std::iter::once(Violation::new("x.php", 1, 1, description, rule)).collect();

    let text = renderer(OutputFormat::Compact).render_to_string(&report).unwrap();

    for needle in ["<", ">", "&", "'", "\\\""] {
        assert!(!text.contains(needle), "found {:?} in {}", needle, text);
    }
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["files"][0]["violations"][0]["description"], description);
}

#[test]
fn test_empty_report_has_metadata() {
    let mut sink = Vec::new();
    renderer(OutputFormat::Compact)
        .render(&Report::new(), &mut sink)
        .unwrap();

    assert_eq!(
        String::from_utf8(sink).unwrap(),
        "{\"version\":\"2.15.0\",\"package\":\"ruleprint\",\"timestamp\":\"2024-03-01T09:30:00+00:00\",\"files\":[],\"errors\":[]}\n"
    );
}

#[test]
fn test_system_clock_timestamp_has_offset() {
    let text = JsonRenderer::new(metadata(), EncodeOptions::compact())
        .render_to_string(&Report::new())
        .unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    let timestamp = value["timestamp"].as_str().unwrap();

    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(!timestamp.ends_with('Z'));
    assert!(!timestamp.contains('.'));
}

/// Takes the first `capacity` bytes, then behaves like a closed pipe.
struct ClosingSink {
    accepted: Vec<u8>,
    capacity: usize,
}

impl ClosingSink {
    fn new(capacity: usize) -> Self {
        Self {
            accepted: Vec::new(),
            capacity,
        }
    }
}

impl Write for ClosingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let remaining = self.capacity - self.accepted.len();
        if remaining == 0 {
            return Err(io::Error::new(ErrorKind::BrokenPipe, "closed"));
        }
        let n = buf.len().min(remaining);
        self.accepted.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_closed_sink_surfaces_write_error() {
    let mut sink = ClosingSink::new(0);
    let result = renderer(OutputFormat::Pretty).render(&scenario_report(), &mut sink);

    assert!(matches!(result, Err(RenderError::Write(ref e)) if e.kind() == ErrorKind::BrokenPipe));
    assert!(sink.accepted.is_empty());
}

#[test]
fn test_sink_closing_mid_document_holds_prefix() {
    let renderer = renderer(OutputFormat::Pretty);
    let report = scenario_report();
    let payload = format!("{}\n", renderer.render_to_string(&report).unwrap());

    let mut sink = ClosingSink::new(64);
    let result = renderer.render(&report, &mut sink);

    assert!(matches!(result, Err(RenderError::Write(ref e)) if e.kind() == ErrorKind::BrokenPipe));
    assert_eq!(sink.accepted.len(), 64);
    assert!(payload.as_bytes().starts_with(&sink.accepted));
}

#[test]
fn test_renderer_does_not_mutate_report() {
    let report = scenario_report();
    let before = report.clone();

    renderer(OutputFormat::Pretty).render(&report, &mut io::sink()).unwrap();

    assert_eq!(report, before);
}
