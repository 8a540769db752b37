//! Derived-field engine
//!
//! Pure, stateless functions computing generated values from the record
//! set: map-link URLs from addresses, marker sizes normalized into a
//! fixed pixel range, hover labels, and color values. Derived values are
//! never stored; every sync recomputes them from scratch.

use url::form_urlencoded;

use crate::record::{format_number, FieldValue, Record};
use crate::schema::{DatasetSchema, FieldType};
use crate::session::Texts;

/// Marker radius range in display pixels
pub const SIZE_MIN: f64 = 14.0;
pub const SIZE_MAX: f64 = 42.0;
/// Fallback radius for degenerate inputs (constant or absent field)
pub const SIZE_MID: f64 = 28.0;

/// Placeholder for missing numeric values in hover text
pub const MISSING_TOKEN: &str = "–";

const MAPS_PLACE_TEMPLATE: &str = "https://www.google.com/maps/place/";

/// Build a map-search URL from a free-text address.
///
/// Empty, whitespace-only, or "nan" placeholder strings produce an empty
/// link rather than a malformed URL.
pub fn maps_place_url(addr: &str) -> String {
    let trimmed = addr.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return String::new();
    }
    let encoded: String = form_urlencoded::byte_serialize(trimmed.as_bytes()).collect();
    format!("{MAPS_PLACE_TEMPLATE}{encoded}")
}

/// Linearly rescale a numeric field into marker radii in [14, 42].
///
/// A constant field (max == min) and a field with no finite values both
/// yield the midpoint 28 for every record; a record missing the value
/// gets the midpoint of the observed min/max so missing data is not
/// drawn as minimal.
pub fn marker_sizes(schema: &DatasetSchema, records: &[Record], field: &str) -> Vec<f64> {
    let values: Vec<Option<f64>> = records.iter().map(|r| r.number(schema, field)).collect();
    let finite: Vec<f64> = values.iter().filter_map(|v| *v).collect();

    let (Some(min), Some(max)) = (
        finite.iter().copied().reduce(f64::min),
        finite.iter().copied().reduce(f64::max),
    ) else {
        return vec![SIZE_MID; records.len()];
    };
    if min == max {
        return vec![SIZE_MID; records.len()];
    }

    values
        .iter()
        .map(|v| {
            let value = v.unwrap_or((min + max) / 2.0);
            SIZE_MIN + (value - min) / (max - min) * (SIZE_MAX - SIZE_MIN)
        })
        .collect()
}

/// Values of a field for the color scale.
///
/// Boolean fields map to 0/1 before they are handed to the scale; a
/// missing numeric value becomes the midpoint of the observed range.
pub fn color_values(schema: &DatasetSchema, records: &[Record], field: &str) -> Vec<f64> {
    let is_bool = schema
        .field(field)
        .map(|spec| spec.field_type == FieldType::Bool)
        .unwrap_or(false);

    if is_bool {
        return records
            .iter()
            .map(|r| {
                let set = r
                    .value(schema, field)
                    .and_then(FieldValue::as_bool)
                    .unwrap_or(false);
                if set {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
    }

    let values: Vec<Option<f64>> = records.iter().map(|r| r.number(schema, field)).collect();
    let finite: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    let fallback = match (
        finite.iter().copied().reduce(f64::min),
        finite.iter().copied().reduce(f64::max),
    ) {
        (Some(min), Some(max)) => (min + max) / 2.0,
        _ => 0.0,
    };
    values.iter().map(|v| v.unwrap_or(fallback)).collect()
}

/// Derived quotient metric for one record, per the schema's `RatioSpec`.
///
/// `None` when the schema has no ratio, either operand is missing, or
/// the denominator is zero.
pub fn ratio_value(schema: &DatasetSchema, record: &Record) -> Option<f64> {
    let ratio = schema.ratio.as_ref()?;
    let numerator = record.number(schema, &ratio.numerator)?;
    let denominator = record.number(schema, &ratio.denominator)?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Format a ratio metric with two decimals and its unit
pub fn format_ratio(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{unit}"),
        None => MISSING_TOKEN.to_string(),
    }
}

/// Format one field value for display in hover text and metrics
pub fn format_value(value: &FieldValue, unit: &str, texts: &Texts) -> String {
    match value {
        FieldValue::Text(s) if s.is_empty() => MISSING_TOKEN.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(None) => MISSING_TOKEN.to_string(),
        FieldValue::Number(Some(n)) => format!("{}{}", format_number(*n), unit),
        FieldValue::Bool(true) => texts.yes.to_string(),
        FieldValue::Bool(false) => texts.no.to_string(),
    }
}

/// Compose the fixed-order multi-line hover label for one record.
///
/// The record name heads the label; every other display field follows as
/// "Label: value" in schema order. A schema with a ratio metric gets it
/// as the closing line.
pub fn hover_text(schema: &DatasetSchema, record: &Record, texts: &Texts) -> String {
    let mut lines = vec![record.name(schema).to_string()];
    for (spec, value) in schema.fields.iter().zip(&record.values) {
        if spec.name == "Name" {
            continue;
        }
        lines.push(format!(
            "{}: {}",
            spec.name,
            format_value(value, spec.unit, texts)
        ));
    }
    if let Some(ratio) = &schema.ratio {
        lines.push(format!(
            "{}: {}",
            ratio.label,
            format_ratio(ratio_value(schema, record), ratio.unit)
        ));
    }
    lines.join("\n")
}
