use crate::core::models::record::Record;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    id: &'a str,
    score: String,
}

/// Writes a headerless, tab-separated `id<TAB>score` table, one row per record, score to one
/// decimal. Records that never produced a score are written with `0.0`.
pub fn write_score_table<W: Write>(writer: W, records: &[Record]) -> Result<(), csv::Error> {
    let mut table = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for record in records {
        table.serialize(ScoreRow {
            id: &record.id,
            score: format!("{:.1}", record.score),
        })?;
    }
    table.flush()?;
    Ok(())
}
