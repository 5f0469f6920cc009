//! Delivery of encoded text to an output sink.

use std::io::Write;

use tracing::debug;

use crate::error::RenderError;

/// Writes `text` and one trailing newline with a single `write_all`, then
/// flushes. The sink's lifecycle stays with the caller, and nothing is retried.
pub fn deliver<W: Write + ?Sized>(text: &str, sink: &mut W) -> Result<(), RenderError> {
    let mut payload = String::with_capacity(text.len() + 1);
    payload.push_str(text);
    payload.push('\n');

    sink.write_all(payload.as_bytes())?;
    sink.flush()?;

    debug!(bytes = payload.len(), "report delivered");
    Ok(())
}
