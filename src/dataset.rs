//! Writers for the chunk and QA datasets and the report.

use std::io::Write;

use serde::Serialize;

use crate::{Chunk, QaRecord, Report, Result};

/// Write chunks as JSON Lines, one object per chunk.
///
/// ```rust
/// use folios::{write_chunks_jsonl, Chunk, SectionPath};
///
/// let chunks = vec![Chunk::new(0, SectionPath::root(), 1, 2, "text")];
/// let mut out = Vec::new();
/// write_chunks_jsonl(&mut out, &chunks).unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "{\"chunk_id\":0,\"section\":\"Root\",\"page_start\":1,\"page_end\":2,\"text\":\"text\"}\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_chunks_jsonl<W: Write>(writer: W, chunks: &[Chunk]) -> Result<()> {
    write_jsonl(writer, chunks)
}

/// Write QA records as JSON Lines: `{"chunk_id": .., "items": [..], "count": ..}`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_qa_jsonl<W: Write>(writer: W, records: &[QaRecord]) -> Result<()> {
    write_jsonl(writer, records)
}

fn write_jsonl<W: Write, T: Serialize>(mut writer: W, rows: &[T]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_report<W: Write>(mut writer: W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
