use std::path::Path;

use crate::models::{CheckInInput, CheckInRecord};
use crate::store::{self, SheetTable, EXPECTED_COLUMNS};

/// Timestamps are exported in one of the formats the loader accepts, so an
/// export re-parses without loss.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The cells of one record in export column order; missing values export
/// as blank cells.
pub fn record_cells(record: &CheckInRecord) -> [String; 13] {
    [
        record
            .timestamp
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
        record.organization.clone(),
        record.role.clone(),
        number_cell(record.mood),
        record.workload.clone(),
        number_cell(record.sleep_hours),
        number_cell(record.focus),
        record.conflicts.clone(),
        number_cell(record.stress),
        number_cell(record.motivation),
        number_cell(record.risk),
        record
            .keyword_flag
            .map(|flag| flag.to_string())
            .unwrap_or_default(),
        record.comment.clone(),
    ]
}

fn number_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize records to downloadable CSV bytes with the fixed header order.
pub fn to_csv_bytes(records: &[CheckInRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPECTED_COLUMNS)?;
    for record in records {
        writer.write_record(record_cells(record))?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("finish csv export: {}", err.error()))
}

/// Read exported CSV back through the same coercion path as the collected
/// store, so the two read surfaces behave identically.
pub fn from_csv_bytes(bytes: &[u8]) -> anyhow::Result<Vec<CheckInRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result?;
        rows.push(row.iter().map(str::to_string).collect());
    }

    Ok(store::records_from_table(&SheetTable { header, rows }))
}

/// Raw check-in inputs for batch scoring, one form submission per row.
pub fn read_inputs(path: &Path) -> anyhow::Result<Vec<CheckInInput>> {
    collect_inputs(csv::Reader::from_path(path)?)
}

fn collect_inputs<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Vec<CheckInInput>> {
    let mut inputs = Vec::new();
    for result in reader.deserialize::<CheckInInput>() {
        inputs.push(result?);
    }
    Ok(inputs)
}
