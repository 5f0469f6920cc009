//! HTML-safe JSON encoding.
//!
//! Plain JSON allows `<`, `>`, `&`, `'` and `"` (as `\"`) inside strings,
//! which is unsafe when the document is later embedded in a page or script.
//! [`SafeFormatter`] wraps a serde_json formatter and writes those characters
//! as `\u003C`, `\u003E`, `\u0026`, `\u0027` and `\u0022` instead.

use std::io::{self, Write};

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, PrettyFormatter};

use crate::document::RenderedDocument;
use crate::error::RenderError;

const PRETTY_INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Compact => "compact",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(format!(
                "Unsupported format: {} (expected 'pretty' or 'compact')",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub format: OutputFormat,
    /// Write `/` as `\/`.
    pub escape_slashes: bool,
    /// Write every non-ASCII character as `\uXXXX` (UTF-16 code units).
    pub escape_unicode: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            escape_slashes: true,
            escape_unicode: true,
        }
    }
}

impl EncodeOptions {
    pub fn compact() -> Self {
        Self {
            format: OutputFormat::Compact,
            ..Self::default()
        }
    }
}

pub fn encode(document: &RenderedDocument, options: &EncodeOptions) -> Result<String, RenderError> {
    let mut buf = Vec::with_capacity(256 + document.violation_count() * 320);

    match options.format {
        OutputFormat::Pretty => serialize_with(
            &mut buf,
            document,
            SafeFormatter::new(PrettyFormatter::with_indent(PRETTY_INDENT), options),
        )?,
        OutputFormat::Compact => serialize_with(
            &mut buf,
            document,
            SafeFormatter::new(CompactFormatter, options),
        )?,
    }

    String::from_utf8(buf).map_err(|e| RenderError::Encoding(serde_json::Error::custom(e)))
}

fn serialize_with<F: Formatter>(
    buf: &mut Vec<u8>,
    document: &RenderedDocument,
    formatter: F,
) -> Result<(), RenderError> {
    let mut serializer = serde_json::Serializer::with_formatter(buf, formatter);
    document
        .serialize(&mut serializer)
        .map_err(RenderError::Encoding)
}

/// Delegates layout to `inner` and rewrites string contents.
pub struct SafeFormatter<F> {
    inner: F,
    escape_slashes: bool,
    escape_unicode: bool,
}

impl<F: Formatter> SafeFormatter<F> {
    pub fn new(inner: F, options: &EncodeOptions) -> Self {
        Self {
            inner,
            escape_slashes: options.escape_slashes,
            escape_unicode: options.escape_unicode,
        }
    }

    fn escape_for(&self, c: char) -> Option<&'static [u8]> {
        match c {
            '<' => Some(b"\\u003C"),
            '>' => Some(b"\\u003E"),
            '&' => Some(b"\\u0026"),
            '\'' => Some(b"\\u0027"),
            '/' if self.escape_slashes => Some(b"\\/"),
            _ => None,
        }
    }
}

impl<F: Formatter> Formatter for SafeFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = self.escape_for(c);
            let needs_unicode = self.escape_unicode && !c.is_ascii();
            if escaped.is_none() && !needs_unicode {
                continue;
            }

            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            match escaped {
                Some(bytes) => writer.write_all(bytes)?,
                None => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        write!(writer, "\\u{:04x}", unit)?;
                    }
                }
            }
            start = i + c.len_utf8();
        }

        if start < fragment.len() {
            writer.write_all(fragment[start..].as_bytes())?;
        }
        Ok(())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => self.inner.write_char_escape(writer, other),
        }
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }
}
