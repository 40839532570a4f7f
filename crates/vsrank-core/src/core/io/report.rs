use crate::core::models::record::Record;

pub const REPORT_TITLE: &str = "Top Scoring Results from Virtual Screening";
/// Rows leave the trailing `Remark` column empty.
pub const COLUMN_HEADER: &str = "Id\tScore\tNumHA\tLigEff\tRemark";

/// Renders the hit report: title, the free-text `intro`, a column header and one
/// tab-separated row per record (`id`, score to 1 decimal, heavy atoms, efficiency to 3
/// decimals).
///
/// An empty selection yields an empty report.
pub fn render_report(intro: &str, records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let mut out = format!("{REPORT_TITLE}\n{intro}\n{COLUMN_HEADER}\n");
    for record in records {
        out.push_str(&render_row(record));
        out.push('\n');
    }
    out
}

pub fn render_row(record: &Record) -> String {
    let efficiency = match record.efficiency() {
        Ok(le) => format!("{:.3}", le),
        Err(_) => "n/a".to_string(),
    };
    format!(
        "{}\t{:.1}\t{}\t{}",
        record.id, record.score, record.heavy_atoms, efficiency
    )
}
