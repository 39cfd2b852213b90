//! JSON trace persistence
//!
//! A trace is stored as a JSON array of events:
//!
//! ```json
//! [
//!   { "kind": "send", "process": "A", "clock": { "A": 1, "B": 0 }, "message_id": 0 },
//!   { "kind": "receive", "process": "B", "clock": { "A": 1, "B": 1 }, "message_id": 0 }
//! ]
//! ```

use crate::domain::trace::Trace;
use crate::error::ExportError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `trace` to `path` as pretty-printed JSON
///
/// # Errors
///
/// [`ExportError::Io`] if the file cannot be created or written,
/// [`ExportError::Json`] if serialization fails.
pub fn save_trace(trace: &Trace, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, trace)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), events = trace.len(), "saved trace");
    Ok(())
}

/// Read a trace previously written by [`save_trace`]
///
/// # Errors
///
/// [`ExportError::Io`] if the file cannot be read,
/// [`ExportError::Json`] if it is not a valid trace.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, ExportError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let trace: Trace = serde_json::from_reader(reader)?;

    info!(path = %path.display(), events = trace.len(), "loaded trace");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trace::TraceGenerator;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let trace = TraceGenerator::new(["A", "B", "C"], 3).unwrap().generate(25);

        save_trace(&trace, &path).unwrap();
        assert_eq!(load_trace(&path).unwrap(), trace);
    }

    #[test]
    fn test_load_handwritten_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(
            &path,
            r#"[
                {"kind": "send", "process": "A", "clock": {"A": 1}, "message_id": 0},
                {"kind": "receive", "process": "B", "clock": {"A": 1, "B": 1}, "message_id": 0},
                {"kind": "send", "process": "B", "clock": {"A": 1, "B": 2}}
            ]"#,
        )
        .unwrap();

        let trace = load_trace(&path).unwrap();
        assert_eq!(trace.len(), 3);
        assert!(trace.events()[0].happens_before(&trace.events()[1]));
        assert_eq!(trace.events()[2].message_id(), None);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load_trace(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ExportError::Io(_))));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{not json").unwrap();
        assert!(matches!(load_trace(&garbage), Err(ExportError::Json(_))));
    }
}
