//! Append-only CSV persistence
//!
//! Column headers come from the record's field names and are written only
//! when the destination is new or empty. Existing content is never truncated.

use std::fs::OpenOptions;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::errors::PersistenceError;
use crate::records::Record;

/// True if `path` is missing or zero-length
pub(crate) fn needs_header(path: &Path) -> Result<bool, PersistenceError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Append `batch` to the CSV at `path`, returning the number of rows written
///
/// Blocking; callers on the async runtime go through `spawn_blocking`.
pub fn append_batch<R: Record>(path: &Path, batch: &[R]) -> Result<usize, PersistenceError> {
    if batch.is_empty() {
        return Ok(0);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let write_header = needs_header(path)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);

    for record in batch {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(
        "Appended {} rows to {} (header written: {})",
        batch.len(),
        path.display(),
        write_header
    );
    Ok(batch.len())
}
