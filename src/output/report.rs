use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Report file name used when none is configured
pub const DEFAULT_REPORT_FILE: &str = "issue_metrics.md";

/// Write the rendered report atomically
///
/// The file is either fully replaced or left untouched.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open report file at {}", path.display()))?;

    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save report at {}", path.display()))?;

    Ok(())
}
