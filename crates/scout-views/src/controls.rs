//! Encoding controls, record selection and summary metrics

use std::collections::BTreeSet;

use egui::Ui;

use scout_core::derive::{format_ratio, format_value, ratio_value};
use scout_core::record::FieldValue;
use scout_core::schema::DatasetSchema;
use scout_core::{Encoding, Record, RecordId, Texts};

/// Combo boxes picking the plot encodings from the schema's options
pub struct EncodingControls;

impl EncodingControls {
    /// Render the four pickers; returns true if any encoding changed
    pub fn ui(ui: &mut Ui, schema: &DatasetSchema, encoding: &mut Encoding) -> bool {
        let numeric = schema.numeric_fields();
        let color = schema.color_fields();
        let mut changed = false;

        ui.horizontal(|ui| {
            changed |= field_combo(ui, "X Axis", &mut encoding.x, &numeric);
            changed |= field_combo(ui, "Y Axis", &mut encoding.y, &numeric);
            changed |= field_combo(ui, "Color", &mut encoding.color, &color);
            changed |= field_combo(ui, "Size", &mut encoding.size, &numeric);
        });

        changed
    }
}

fn field_combo(ui: &mut Ui, label: &str, current: &mut String, options: &[&str]) -> bool {
    let mut changed = false;
    egui::ComboBox::from_label(label)
        .selected_text(current.clone())
        .show_ui(ui, |ui| {
            for option in options {
                if ui
                    .selectable_value(current, option.to_string(), *option)
                    .changed()
                {
                    changed = true;
                }
            }
        });
    changed
}

/// Per-record checkboxes choosing which records appear in the plot.
///
/// `hidden` holds the deselected ids, so records added later default to
/// shown. Returns true when the selection changed.
pub fn selection_strip(
    ui: &mut Ui,
    schema: &DatasetSchema,
    records: &[Record],
    hidden: &mut BTreeSet<RecordId>,
    texts: &Texts,
) -> bool {
    let mut changed = false;
    ui.label(texts.select_entries);
    ui.horizontal_wrapped(|ui| {
        for record in records {
            let mut shown = !hidden.contains(&record.id);
            let label = format!("{}: {}", record.id, record.name(schema));
            if ui.checkbox(&mut shown, label).changed() {
                if shown {
                    hidden.remove(&record.id);
                } else {
                    hidden.insert(record.id);
                }
                changed = true;
            }
        }
    });
    changed
}

/// Mean of a numeric field over the records that carry a value
pub fn field_mean(schema: &DatasetSchema, records: &[Record], field: &str) -> Option<f64> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.number(schema, field))
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the schema's derived quotient metric, over the records where
/// it is defined
pub fn ratio_mean(schema: &DatasetSchema, records: &[Record]) -> Option<f64> {
    schema.ratio.as_ref()?;
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| ratio_value(schema, r))
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Horizontal strip of per-field means, shown above the plot
pub fn means_strip(ui: &mut Ui, schema: &DatasetSchema, records: &[Record], texts: &Texts) {
    ui.horizontal(|ui| {
        ui.strong(texts.means_title);
        ui.separator();
        for spec in &schema.fields {
            let Some(mean) = field_mean(schema, records, &spec.name) else {
                continue;
            };
            let rounded = (mean * 100.0).round() / 100.0;
            ui.label(format!(
                "{}: {}",
                spec.name,
                format_value(&FieldValue::Number(Some(rounded)), spec.unit, texts)
            ));
        }
        if let (Some(ratio), Some(mean)) = (&schema.ratio, ratio_mean(schema, records)) {
            ui.label(format!("{}: {}", ratio.label, format_ratio(Some(mean), ratio.unit)));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::schema::{FieldSpec, RatioSpec};
    use scout_core::RawRow;

    fn schema() -> DatasetSchema {
        DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €"),
            ],
        )
    }

    fn record(pairs: &[(&str, &str)], id: u64) -> Record {
        let raw: RawRow = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Record::from_raw(&schema(), &raw, id)
    }

    #[test]
    fn test_mean_skips_missing_values() {
        let records = vec![
            record(&[("Name", "A"), ("Rent", "400")], 0),
            record(&[("Name", "B")], 1),
            record(&[("Name", "C"), ("Rent", "800")], 2),
        ];
        assert_eq!(field_mean(&schema(), &records, "Rent"), Some(600.0));
    }

    #[test]
    fn test_mean_of_no_values_is_none() {
        let records = vec![record(&[("Name", "A")], 0)];
        assert_eq!(field_mean(&schema(), &records, "Rent"), None);
        assert_eq!(field_mean(&schema(), &records, "Name"), None);
    }

    #[test]
    fn test_ratio_mean_skips_undefined_ratios() {
        let with_ratio = DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €"),
                FieldSpec::number("Size", " m²"),
            ],
        )
        .with_ratio(RatioSpec::new("Rent/Size", "Rent", "Size", " €/m²"));

        let make = |pairs: &[(&str, &str)], id| {
            let raw: RawRow = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Record::from_raw(&with_ratio, &raw, id)
        };
        let records = vec![
            make(&[("Name", "A"), ("Rent", "500"), ("Size", "50")], 0),
            make(&[("Name", "B"), ("Rent", "800"), ("Size", "40")], 1),
            // no size, no ratio; must not drag the mean down
            make(&[("Name", "C"), ("Rent", "900")], 2),
        ];
        assert_eq!(ratio_mean(&with_ratio, &records), Some(15.0));
        // schema without a ratio never reports one
        assert_eq!(ratio_mean(&schema(), &records), None);
    }
}
