//! CSV export
//!
//! Serializes the current record set for download or save. Derived
//! fields are excluded; the header row and column order come straight
//! from the schema, so an export round-trips through import without
//! reordering or renaming.

use csv::{QuoteStyle, WriterBuilder};

use scout_core::schema::DatasetSchema;
use scout_core::Record;

use crate::DataError;

/// Serialize the record set to CSV bytes.
///
/// All fields are quoted; missing numbers are written as empty strings,
/// never "None" or "nan".
pub fn export_csv(schema: &DatasetSchema, records: &[Record]) -> Result<Vec<u8>, DataError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(schema.column_names())?;
    for record in records {
        writer.write_record(record.values.iter().map(|v| v.to_csv_cell()))?;
    }

    writer
        .into_inner()
        .map_err(|e| DataError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_io::read_rows_from_bytes;
    use scout_core::schema::FieldSpec;
    use scout_core::{FieldValue, RawRow, RecordStore};

    fn schema() -> DatasetSchema {
        DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €").required(),
                FieldSpec::number("Size", " m²"),
                FieldSpec::boolean("Furnished"),
            ],
        )
    }

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_header_matches_schema_order() {
        let bytes = export_csv(&schema(), &[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().next().unwrap(), "\"Name\",\"Rent\",\"Size\",\"Furnished\"");
    }

    #[test]
    fn test_missing_number_is_empty_cell() {
        let mut store = RecordStore::new(schema());
        store
            .add(&raw(&[("Name", "Flat \"A\""), ("Rent", "500")]))
            .unwrap();

        let bytes = export_csv(store.schema(), store.all()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.lines().nth(1).unwrap(),
            "\"Flat \"\"A\"\"\",\"500\",\"\",\"false\""
        );
    }

    #[test]
    fn test_export_import_round_trip_preserves_records() {
        let mut store = RecordStore::new(schema());
        store
            .add(&raw(&[
                ("Name", "A"),
                ("Rent", "500"),
                ("Size", "20.5"),
                ("Furnished", "true"),
            ]))
            .unwrap();
        store.add(&raw(&[("Name", "B"), ("Rent", "700")])).unwrap();
        // leave a gap in the ids
        store.add(&raw(&[("Name", "gone"), ("Rent", "1")])).unwrap();
        store.delete(2).unwrap();

        let bytes = export_csv(store.schema(), store.all()).unwrap();
        let rows = read_rows_from_bytes(&bytes).unwrap();

        let mut reloaded = RecordStore::new(schema());
        reloaded.replace_all(&rows).unwrap();

        assert_eq!(reloaded.len(), store.len());
        for (orig, back) in store.all().iter().zip(reloaded.all()) {
            // ids are renumbered, values and order survive
            assert_eq!(orig.values, back.values);
        }
        assert_eq!(
            reloaded.all()[0].value(reloaded.schema(), "Size"),
            Some(&FieldValue::Number(Some(20.5)))
        );
    }
}
