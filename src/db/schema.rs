//! Loading schema statements from `.sql` files.

use crate::error::{Result, SaberError};
use std::path::Path;
use tracing::{debug, warn};

/// Reads each file into one schema statement, preserving the given order.
///
/// A file may hold several statements; the client runs it as a script.
/// Files that are empty or whitespace-only are skipped.
pub fn load_schema_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>> {
    let mut statements = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SaberError::config(format!(
                "Failed to read schema file {}: {e}",
                path.display()
            ))
        })?;

        if content.trim().is_empty() {
            warn!("Skipping empty schema file {}", path.display());
            continue;
        }

        debug!("Loaded schema file {}", path.display());
        statements.push(content);
    }

    Ok(statements)
}
