//! Whole-file CSV reading and writing
//!
//! The reader is header-driven and produces untyped raw rows; column
//! validation and type parsing happen at the record store boundary, not
//! here.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use scout_core::{RawRow, Record};
use scout_core::schema::DatasetSchema;

use crate::export::export_csv;
use crate::DataError;

/// Read every row of a CSV file into raw rows keyed by header name
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, DataError> {
    let bytes = fs::read(path)?;
    let rows = read_rows_from_bytes(&bytes)?;
    info!(path = %path.display(), rows = rows.len(), "CSV loaded");
    Ok(rows)
}

/// Parse uploaded CSV bytes into raw rows
pub fn read_rows_from_bytes<R: AsRef<[u8]>>(bytes: R) -> Result<Vec<RawRow>, DataError> {
    read_rows_from_reader(bytes.as_ref())
}

fn read_rows_from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                (
                    name.to_string(),
                    record.get(idx).unwrap_or("").to_string(),
                )
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Write the record set back to its CSV file ("save changes").
///
/// Derived fields are not persisted; the file carries exactly the
/// schema's columns in schema order.
pub fn write_rows(path: &Path, schema: &DatasetSchema, records: &[Record]) -> Result<(), DataError> {
    let bytes = export_csv(schema, records)?;
    fs::write(path, &bytes)?;
    info!(path = %path.display(), rows = records.len(), "CSV saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_keyed_by_header() {
        let csv = "Name,Rent,Furnished\n\"Flat A\",500,true\n\"Flat B\",,false\n";
        let rows = read_rows_from_bytes(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], "Flat A");
        assert_eq!(rows[0]["Rent"], "500");
        assert_eq!(rows[1]["Rent"], "");
    }

    #[test]
    fn test_read_rows_preserves_column_order() {
        let csv = "B,A\n1,2\n";
        let rows = read_rows_from_bytes(csv.as_bytes()).unwrap();
        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, vec!["B", "A"]);
    }

    #[test]
    fn test_short_row_fills_missing_cells() {
        let csv = "Name,Rent\nFlat A\n";
        let rows = read_rows_from_bytes(csv.as_bytes()).unwrap();
        assert_eq!(rows[0]["Rent"], "");
    }

    #[test]
    fn test_header_only_file_is_empty_set() {
        let csv = "Name,Rent\n";
        let rows = read_rows_from_bytes(csv.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
