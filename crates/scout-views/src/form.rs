//! Add-record form
//!
//! Schema-driven: one input per field, text boxes for text and numbers,
//! checkboxes for booleans. Submission emits the raw row as entered;
//! required-field validation happens in the store, and the resulting
//! error is displayed next to the submit button.

use egui::Ui;

use scout_core::schema::{DatasetSchema, FieldType};
use scout_core::{RawRow, Texts};

use crate::ViewEvent;

/// Form state for adding a record
pub struct AddForm {
    text_buffers: Vec<String>,
    bool_buffers: Vec<bool>,
}

impl AddForm {
    pub fn new(schema: &DatasetSchema) -> Self {
        Self {
            text_buffers: vec![String::new(); schema.fields.len()],
            bool_buffers: vec![false; schema.fields.len()],
        }
    }

    /// Render the form; returns `AddSubmitted` when the button is hit
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        schema: &DatasetSchema,
        texts: &Texts,
        error: Option<&str>,
    ) -> Option<ViewEvent> {
        let mut submitted = false;

        ui.heading(texts.add_title);
        ui.separator();

        egui::Grid::new("add_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for (idx, spec) in schema.fields.iter().enumerate() {
                    let label = if spec.unit.is_empty() {
                        spec.name.clone()
                    } else {
                        format!("{} ({})", spec.name, spec.unit.trim())
                    };
                    let label = if spec.required {
                        format!("{label} *")
                    } else {
                        label
                    };
                    ui.label(label);
                    match spec.field_type {
                        FieldType::Text | FieldType::Number => {
                            ui.text_edit_singleline(&mut self.text_buffers[idx]);
                        }
                        FieldType::Bool => {
                            ui.checkbox(&mut self.bool_buffers[idx], "");
                        }
                    }
                    ui.end_row();
                }
            });

        ui.horizontal(|ui| {
            if ui.button(texts.add_button).clicked() {
                submitted = true;
            }
            if let Some(message) = error {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
        });

        if submitted {
            Some(ViewEvent::AddSubmitted(self.raw_row(schema)))
        } else {
            None
        }
    }

    /// Reset all inputs, called by the shell after a successful add
    pub fn clear(&mut self) {
        for buffer in &mut self.text_buffers {
            buffer.clear();
        }
        for buffer in &mut self.bool_buffers {
            *buffer = false;
        }
    }

    fn raw_row(&self, schema: &DatasetSchema) -> RawRow {
        schema
            .fields
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                let cell = match spec.field_type {
                    FieldType::Bool => self.bool_buffers[idx].to_string(),
                    _ => self.text_buffers[idx].trim().to_string(),
                };
                (spec.name.clone(), cell)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::schema::FieldSpec;

    #[test]
    fn test_raw_row_from_buffers() {
        let schema = DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €").required(),
                FieldSpec::boolean("Furnished"),
            ],
        );
        let mut form = AddForm::new(&schema);
        form.text_buffers[0] = "  Flat A ".to_string();
        form.text_buffers[1] = "500".to_string();
        form.bool_buffers[2] = true;

        let raw = form.raw_row(&schema);
        assert_eq!(raw["Name"], "Flat A");
        assert_eq!(raw["Rent"], "500");
        assert_eq!(raw["Furnished"], "true");
    }
}
