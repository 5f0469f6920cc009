//! Report rendering for ruleprint.
//!
//! This crate turns a completed [`Report`](ruleprint_core::Report) into a
//! JSON document:
//! - Document model and assembly (grouping violations by file)
//! - Injectable clock for the generation timestamp
//! - HTML-safe JSON encoding (pretty or compact)
//! - Delivery to any `std::io::Write` sink

pub mod assembler;
pub mod clock;
pub mod document;
pub mod encoder;
pub mod error;
pub mod renderer;
pub mod sink;

pub use assembler::Assembler;
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{ErrorRecord, FileEntry, RenderedDocument, ReportMetadata, ViolationRecord};
pub use encoder::{EncodeOptions, OutputFormat, encode};
pub use error::RenderError;
pub use renderer::{JsonRenderer, Renderer};
pub use sink::deliver;
