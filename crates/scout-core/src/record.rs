//! Record model and raw-row parsing
//!
//! Raw rows come from two places, the CSV reader and the add form, and
//! carry untyped strings. They are parsed into typed `FieldValue`s at the
//! store boundary; nothing downstream sees unparsed input.

use indexmap::IndexMap;

use crate::schema::{DatasetSchema, FieldType};

/// Stable per-record identifier, assigned by the store
pub type RecordId = u64;

/// One untyped input row: column name -> raw string value.
///
/// `IndexMap` keeps the incoming column order so diagnostics and
/// re-exports stay readable.
pub type RawRow = IndexMap<String, String>;

/// Typed value of a single record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// `None` is a missing/unset number, not zero
    Number(Option<f64>),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Value as persisted in a CSV cell; missing numbers become the
    /// empty string, never "None" or "nan".
    pub fn to_csv_cell(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(Some(n)) => format_number(*n),
            FieldValue::Number(None) => String::new(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

/// Format a number without a trailing ".0" for whole values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One entity instance: a housing listing, a hotel, an activity
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique within the store, stable across edits, never reused
    pub id: RecordId,

    /// Positionally aligned with the schema's field order
    pub values: Vec<FieldValue>,
}

impl Record {
    /// Parse a raw row into a typed record.
    ///
    /// Columns absent from the row fall back to the field default
    /// (empty text, unset number, false). Schema-level validation
    /// happens before this is called.
    pub fn from_raw(schema: &DatasetSchema, raw: &RawRow, id: RecordId) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|spec| {
                let cell = raw.get(&spec.name).map(String::as_str).unwrap_or("");
                parse_field(spec.field_type, cell)
            })
            .collect();
        Self { id, values }
    }

    /// Value of the named field, if the schema knows it
    pub fn value(&self, schema: &DatasetSchema, name: &str) -> Option<&FieldValue> {
        schema.index_of(name).and_then(|idx| self.values.get(idx))
    }

    pub fn number(&self, schema: &DatasetSchema, name: &str) -> Option<f64> {
        self.value(schema, name).and_then(FieldValue::as_number)
    }

    /// Display name, used in delete confirmations and list rows
    pub fn name(&self, schema: &DatasetSchema) -> &str {
        self.value(schema, "Name")
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }
}

/// Parse one raw cell according to the field type
pub fn parse_field(field_type: FieldType, cell: &str) -> FieldValue {
    let trimmed = cell.trim();
    match field_type {
        FieldType::Text => FieldValue::Text(trimmed.to_string()),
        FieldType::Number => FieldValue::Number(parse_number(trimmed)),
        FieldType::Bool => FieldValue::Bool(parse_bool(trimmed)),
    }
}

/// Parse a numeric cell; anything non-finite or unparseable is unset
pub fn parse_number(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Accepted true tokens: true/1/yes/ja; everything else is false
pub fn parse_bool(cell: &str) -> bool {
    matches!(cell.to_lowercase().as_str(), "true" | "1" | "yes" | "ja")
}

/// Names of required fields that are missing or unparseable in `raw`.
///
/// A required text field must be non-empty after trimming; a required
/// number must parse to a finite value.
pub fn missing_required(schema: &DatasetSchema, raw: &RawRow) -> Vec<String> {
    schema
        .fields
        .iter()
        .filter(|spec| spec.required)
        .filter(|spec| {
            let cell = raw.get(&spec.name).map(String::as_str).unwrap_or("");
            match spec.field_type {
                FieldType::Text => cell.trim().is_empty(),
                FieldType::Number => parse_number(cell.trim()).is_none(),
                // A checkbox is always present, checked or not
                FieldType::Bool => false,
            }
        })
        .map(|spec| spec.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;

    fn schema() -> DatasetSchema {
        DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €").required(),
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
    fn test_parse_field_defaults() {
        let record = Record::from_raw(&schema(), &raw(&[("Name", "Flat A")]), 0);
        assert_eq!(record.values[0], FieldValue::Text("Flat A".to_string()));
        assert_eq!(record.values[1], FieldValue::Number(None));
        assert_eq!(record.values[2], FieldValue::Bool(false));
    }

    #[test]
    fn test_parse_bool_tokens() {
        for token in ["true", "1", "yes", "Ja", "TRUE"] {
            assert!(parse_bool(token), "{token}");
        }
        for token in ["false", "0", "no", "nein", ""] {
            assert!(!parse_bool(token), "{token}");
        }
    }

    #[test]
    fn test_missing_required_names_fields() {
        let missing = missing_required(&schema(), &raw(&[("Name", "Flat A"), ("Rent", "")]));
        assert_eq!(missing, vec!["Rent".to_string()]);
    }

    #[test]
    fn test_unparseable_number_counts_as_missing() {
        let missing = missing_required(&schema(), &raw(&[("Name", "X"), ("Rent", "cheap")]));
        assert_eq!(missing, vec!["Rent".to_string()]);
    }

    #[test]
    fn test_csv_cell_rendering() {
        assert_eq!(FieldValue::Number(None).to_csv_cell(), "");
        assert_eq!(FieldValue::Number(Some(650.0)).to_csv_cell(), "650");
        assert_eq!(FieldValue::Number(Some(2.5)).to_csv_cell(), "2.5");
        assert_eq!(FieldValue::Bool(true).to_csv_cell(), "true");
    }
}
