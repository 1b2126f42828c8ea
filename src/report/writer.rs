// src/report/writer.rs
// =============================================================================
// This module writes a CrawlResult out as pretty-printed JSON.
//
// Output looks like:
//
//   {
//     "wordCounts": {
//       "crawler": 12,
//       "rust": 9
//     },
//     "urlsVisited": 4
//   }
//
// When writing to a file, an existing file is appended to rather than
// overwritten - repeated runs accumulate their results in one place.
//
// Rust concepts:
// - io::Write: One function serves files, stdout, and test buffers
// - OpenOptions: Precise control over create/append behavior
// =============================================================================

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::crawler::CrawlResult;

// Writes the result as JSON to the given file path (create + append)
pub fn write_result(result: &CrawlResult, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open result file: {}", path.display()))?;

    write_result_to(result, file)
}

// Writes the result as JSON to any writer (stdout, a file, a test buffer)
pub fn write_result_to(result: &CrawlResult, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;  // Trailing newline so appended results stay readable
    Ok(())
}
