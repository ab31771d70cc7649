//! Flat-file writer for the dependency documents.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use depdocs_shared::{DepDocsError, Result};

use crate::documents::DocumentSet;

/// Write `entries` to `dir/filename`, one `<name><delimiter><value>` line each.
///
/// Content goes to a hidden temp file first and is renamed over the target,
/// so prior content is replaced whole and a failed write leaves no partial
/// document behind. An empty set produces a zero-byte file.
#[instrument(skip(entries), fields(dir = %dir.display(), entries = entries.len()))]
pub fn write_document(
    dir: &Path,
    filename: &str,
    entries: &DocumentSet,
    delimiter: &str,
) -> Result<PathBuf> {
    let target = dir.join(filename);
    let temp = dir.join(format!(".{filename}.tmp"));

    if let Err(e) = write_lines(&temp, entries, delimiter) {
        let _ = std::fs::remove_file(&temp);
        return Err(DepDocsError::write(&target, e));
    }

    if let Err(e) = std::fs::rename(&temp, &target) {
        let _ = std::fs::remove_file(&temp);
        return Err(DepDocsError::write(&target, e));
    }

    debug!(path = %target.display(), "wrote document");
    Ok(target)
}

fn write_lines(path: &Path, entries: &DocumentSet, delimiter: &str) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (name, value) in entries.iter() {
        writeln!(out, "{name}{delimiter}{value}")?;
    }
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}
