//! Record table view
//!
//! Displays the list projection with clickable link columns, per-row
//! inline editing and a delete button. Edits are buffered locally and
//! only leave the widget as a `RowEdited` event when saved; the table
//! never touches the store directly.

use egui::Ui;
use egui_extras::{Column, TableBuilder};

use scout_core::derive::format_value;
use scout_core::schema::DatasetSchema;
use scout_core::{FieldValue, ListProjection, RawRow, RecordId, Texts};

use crate::ViewEvent;

/// Editable record table
#[derive(Default)]
pub struct RecordTable {
    editing: Option<EditState>,
}

/// Buffered cell values for the row currently being edited
struct EditState {
    id: RecordId,
    buffers: Vec<CellBuffer>,
}

enum CellBuffer {
    Text(String),
    Bool(bool),
}

impl CellBuffer {
    fn from_value(value: &FieldValue) -> Self {
        match value {
            FieldValue::Bool(b) => CellBuffer::Bool(*b),
            other => CellBuffer::Text(other.to_csv_cell()),
        }
    }

    fn to_cell(&self) -> String {
        match self {
            CellBuffer::Text(s) => s.clone(),
            CellBuffer::Bool(b) => b.to_string(),
        }
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the list projection; returns at most one event per frame
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        schema: &DatasetSchema,
        list: &ListProjection,
        texts: &Texts,
    ) -> Option<ViewEvent> {
        let mut event = None;
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.8;

        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true)
            .column(Column::initial(36.0).at_least(28.0)); // id

        for _ in &schema.fields {
            builder = builder.column(Column::initial(110.0).at_least(60.0).clip(true));
        }
        // maps link + row actions
        builder = builder
            .column(Column::initial(90.0).at_least(60.0))
            .column(Column::initial(70.0).at_least(60.0));

        builder
            .header(text_height, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for spec in &schema.fields {
                    header.col(|ui| {
                        ui.strong(&spec.name);
                    });
                }
                header.col(|ui| {
                    ui.strong("Maps");
                });
                header.col(|_ui| {});
            })
            .body(|mut body| {
                for row_data in &list.rows {
                    let is_editing = self
                        .editing
                        .as_ref()
                        .map(|e| e.id == row_data.id)
                        .unwrap_or(false);

                    body.row(text_height, |mut row| {
                        row.col(|ui| {
                            ui.monospace(row_data.id.to_string());
                        });

                        if let Some(edit) =
                            self.editing.as_mut().filter(|e| e.id == row_data.id)
                        {
                            for buffer in &mut edit.buffers {
                                row.col(|ui| match buffer {
                                    CellBuffer::Text(text) => {
                                        ui.add(
                                            egui::TextEdit::singleline(text)
                                                .desired_width(f32::INFINITY),
                                        );
                                    }
                                    CellBuffer::Bool(checked) => {
                                        ui.checkbox(checked, "");
                                    }
                                });
                            }
                        } else {
                            for (spec, value) in schema.fields.iter().zip(&row_data.values) {
                                row.col(|ui| {
                                    match value {
                                        FieldValue::Text(url)
                                            if spec.is_link && !url.is_empty() =>
                                        {
                                            ui.hyperlink_to(texts.open_link, url);
                                        }
                                        _ => {
                                            ui.label(format_value(value, spec.unit, texts));
                                        }
                                    };
                                });
                            }
                        }

                        row.col(|ui| {
                            if !row_data.maps_url.is_empty() {
                                ui.hyperlink_to(texts.open_maps, &row_data.maps_url);
                            }
                        });

                        row.col(|ui| {
                            if is_editing {
                                if ui.small_button("✔").clicked() {
                                    if let Some(edit) = self.editing.take() {
                                        event = Some(ViewEvent::RowEdited(
                                            edit.id,
                                            edited_row(schema, &edit),
                                        ));
                                    }
                                }
                                if ui.small_button("⟲").on_hover_text(texts.cancel).clicked() {
                                    self.editing = None;
                                }
                            } else {
                                if ui.small_button("✏").clicked() {
                                    self.editing = Some(EditState {
                                        id: row_data.id,
                                        buffers: row_data
                                            .values
                                            .iter()
                                            .map(CellBuffer::from_value)
                                            .collect(),
                                    });
                                }
                                if ui
                                    .small_button("×")
                                    .on_hover_text(texts.delete_tooltip)
                                    .clicked()
                                {
                                    event = Some(ViewEvent::DeleteRequested(row_data.id));
                                }
                            }
                        });
                    });
                }
            });

        event
    }

    /// Drop any in-progress edit, e.g. after a bulk replace
    pub fn clear_edit(&mut self) {
        self.editing = None;
    }
}

fn edited_row(schema: &DatasetSchema, edit: &EditState) -> RawRow {
    schema
        .fields
        .iter()
        .zip(&edit.buffers)
        .map(|(spec, buffer)| (spec.name.clone(), buffer.to_cell()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::schema::FieldSpec;

    #[test]
    fn test_edited_row_rebuilds_raw_values() {
        let schema = DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €"),
                FieldSpec::boolean("Furnished"),
            ],
        );
        let edit = EditState {
            id: 3,
            buffers: vec![
                CellBuffer::Text("Flat".to_string()),
                CellBuffer::Text("640".to_string()),
                CellBuffer::Bool(true),
            ],
        };
        let raw = edited_row(&schema, &edit);
        assert_eq!(raw["Name"], "Flat");
        assert_eq!(raw["Rent"], "640");
        assert_eq!(raw["Furnished"], "true");
    }

    #[test]
    fn test_cell_buffer_round_trip() {
        let buffer = CellBuffer::from_value(&FieldValue::Number(Some(2.5)));
        assert_eq!(buffer.to_cell(), "2.5");
        let buffer = CellBuffer::from_value(&FieldValue::Number(None));
        assert_eq!(buffer.to_cell(), "");
    }
}
