use crate::data::StoreError;
use crate::ledger::Ledger;

/// Serializes the whole ledger in the flat colon-delimited format, one
/// record per line with a terminal newline. Records go out sorted ascending
/// by the raw date string; the sort is stable, so records sharing a date
/// keep the table's first-seen order. Two-digit years only order correctly
/// within a single century, which matches the format as it stands.
pub(crate) fn write_records<W: std::io::Write>(
    writer: W,
    ledger: &Ledger,
) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b':')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    let mut records = ledger.records();
    records.sort_by(|a, b| a.date.cmp(&b.date));
    for record in &records {
        wtr.serialize(record).map_err(StoreError::from_csv)?;
    }
    wtr.flush()?;
    Ok(())
}
