//! Dataset pages
//!
//! A `DatasetPage` owns the record store for one dataset, the current
//! encoding, the cached projections and the view widgets. All view
//! events funnel through `apply_event`, which mutates the store and then
//! rebuilds both projections with exactly one `sync` call.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use egui::Ui;
use tracing::{info, warn};

use scout_core::schema::DatasetSchema;
use scout_core::sync::sync;
use scout_core::{
    CoreError, Encoding, FieldValue, Projections, Record, RecordId, RecordStore, Session,
};
use scout_data::{export_csv, read_rows, read_rows_from_bytes, write_rows};
use scout_views::{
    means_strip, selection_strip, AddForm, EncodingControls, RecordTable, ScatterView, ViewEvent,
};

/// Status line shown under the page header
struct Status {
    message: String,
    is_error: bool,
}

/// One browsable dataset: store, projections, widgets, backing file
pub struct DatasetPage {
    store: RecordStore,
    encoding: Encoding,
    projections: Projections,
    scatter: ScatterView,
    table: RecordTable,
    form: AddForm,
    csv_path: PathBuf,
    status: Option<Status>,
    add_error: Option<String>,
    /// Delete waiting for user confirmation
    pending_delete: Option<RecordId>,
    /// Records deselected from the plot; new records default to shown
    hidden: BTreeSet<RecordId>,
}

impl DatasetPage {
    /// Create a page and load its backing CSV if present
    pub fn new(schema: DatasetSchema, csv_path: PathBuf, session: &Session) -> Self {
        let encoding = Encoding::default_for(&schema);
        let form = AddForm::new(&schema);
        let mut store = RecordStore::new(schema);

        let mut status = None;
        if csv_path.exists() {
            match read_rows(&csv_path).map_err(anyhow::Error::from).and_then(|rows| {
                store.load(&rows)?;
                Ok(())
            }) {
                Ok(()) => {}
                Err(e) => {
                    warn!(path = %csv_path.display(), error = %e, "failed to load dataset");
                    status = Some(Status {
                        message: e.to_string(),
                        is_error: true,
                    });
                }
            }
        }

        let mut page = Self {
            store,
            encoding,
            projections: Projections::default(),
            scatter: ScatterView::new(&csv_path.display().to_string()),
            table: RecordTable::new(),
            form,
            csv_path,
            status,
            add_error: None,
            pending_delete: None,
            hidden: BTreeSet::new(),
        };
        page.resync(session);
        page
    }

    pub fn title(&self) -> &str {
        &self.store.schema().title
    }

    /// Rebuild both projections from the store. The only update path.
    pub fn resync(&mut self, session: &Session) {
        self.projections = sync(&self.store, &self.encoding, &self.hidden, session.texts());
    }

    /// Route one view event into a store mutation plus one resync
    fn apply_event(&mut self, ui: &Ui, event: ViewEvent, session: &Session) {
        let texts = session.texts();
        match event {
            ViewEvent::AddSubmitted(raw) => match self.store.add(&raw) {
                Ok(id) => {
                    info!(id, dataset = self.title(), "record added");
                    self.form.clear();
                    self.add_error = None;
                    self.set_status(texts.add_success.to_string(), false);
                    self.resync(session);
                }
                Err(e) => {
                    self.add_error = Some(e.to_string());
                }
            },
            ViewEvent::RowEdited(id, raw) => match self.store.update(id, &raw) {
                Ok(()) => self.resync(session),
                Err(e) => self.set_status(e.to_string(), true),
            },
            ViewEvent::DeleteRequested(id) => {
                self.pending_delete = Some(id);
            }
            ViewEvent::PointClicked(id) => {
                if let Some(url) = self.record_link(id) {
                    ui.ctx()
                        .output_mut(|o| o.open_url = Some(egui::OpenUrl::new_tab(url)));
                }
            }
        }
    }

    /// External link of a record, if it has a non-empty link field
    fn record_link(&self, id: RecordId) -> Option<String> {
        let schema = self.store.schema();
        let record = self.store.get(id).ok()?;
        let spec = schema.fields.iter().find(|f| f.is_link)?;
        match record.value(schema, &spec.name) {
            Some(FieldValue::Text(url)) if !url.is_empty() => Some(url.clone()),
            _ => None,
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status = Some(Status { message, is_error });
    }

    /// Replace the record set from uploaded CSV bytes
    fn import_replace(&mut self, bytes: &[u8], session: &Session) {
        let texts = session.texts();
        let rows = match read_rows_from_bytes(bytes) {
            Ok(rows) => rows,
            Err(e) => {
                self.set_status(format!("{}: {e}", texts.upload_read_error), true);
                return;
            }
        };
        match self.store.replace_all(&rows) {
            Ok(()) => {
                self.table.clear_edit();
                // ids were reassigned, so stale deselections are dropped
                self.hidden.clear();
                self.set_status(texts.upload_success.to_string(), false);
                self.resync(session);
            }
            Err(e @ CoreError::Schema { .. }) => {
                self.set_status(
                    format!("{}{}", texts.upload_error, e.field_names().join(", ")),
                    true,
                );
            }
            Err(e) => self.set_status(e.to_string(), true),
        }
    }

    fn upload_block(&mut self, ui: &mut Ui, session: &Session) {
        let texts = session.texts();
        if ui
            .button(texts.upload_csv)
            .on_hover_text(texts.upload_help)
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV", &["csv"])
                .pick_file()
            {
                match fs::read(&path) {
                    Ok(bytes) => self.import_replace(&bytes, session),
                    Err(e) => {
                        self.set_status(format!("{}: {e}", texts.upload_read_error), true)
                    }
                }
            }
        }
    }

    fn actions_block(&mut self, ui: &mut Ui, session: &Session) {
        let texts = session.texts();
        ui.horizontal(|ui| {
            if ui.button(texts.save_changes).clicked() {
                match write_rows(&self.csv_path, self.store.schema(), self.store.all()) {
                    Ok(()) => self.set_status(texts.save_success.to_string(), false),
                    Err(e) => self.set_status(e.to_string(), true),
                }
            }
            if ui.button(texts.download_csv).clicked() {
                self.download_csv();
            }
        });
    }

    fn download_csv(&mut self) {
        let file_name = self
            .csv_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("export.csv");
        let Some(target) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };
        let result = export_csv(self.store.schema(), self.store.all())
            .map_err(anyhow::Error::from)
            .and_then(|bytes| Ok(fs::write(&target, bytes)?));
        match result {
            Ok(()) => info!(path = %target.display(), "CSV exported"),
            Err(e) => self.set_status(e.to_string(), true),
        }
    }

    /// Confirmation modal for a pending delete
    fn confirm_delete(&mut self, ui: &Ui, session: &Session) {
        let Some(id) = self.pending_delete else {
            return;
        };
        let texts = session.texts();
        let name = self
            .store
            .get(id)
            .map(|r| r.name(self.store.schema()).to_string())
            .unwrap_or_default();

        let mut decided = None;
        egui::Window::new(texts.delete_confirm)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(name);
                ui.horizontal(|ui| {
                    if ui.button(texts.delete_tooltip).clicked() {
                        decided = Some(true);
                    }
                    if ui.button(texts.cancel).clicked() {
                        decided = Some(false);
                    }
                });
            });

        match decided {
            Some(true) => {
                self.pending_delete = None;
                match self.store.delete(id) {
                    Ok(_) => {
                        self.hidden.remove(&id);
                        self.resync(session);
                    }
                    Err(e) => self.set_status(e.to_string(), true),
                }
            }
            Some(false) => self.pending_delete = None,
            None => {}
        }
    }

    /// Render the whole page
    pub fn ui(&mut self, ui: &mut Ui, session: &Session) {
        let texts = session.texts();

        ui.horizontal(|ui| {
            ui.heading(self.title());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.upload_block(ui, session);
            });
        });

        if let Some(status) = &self.status {
            let color = if status.is_error {
                ui.visuals().error_fg_color
            } else {
                ui.visuals().hyperlink_color
            };
            ui.colored_label(color, &status.message);
        }
        ui.separator();

        if self.store.is_empty() {
            ui.label(texts.no_data);
        } else {
            let selection_changed = selection_strip(
                ui,
                self.store.schema(),
                self.store.all(),
                &mut self.hidden,
                texts,
            );
            if selection_changed {
                self.resync(session);
            }

            if self.projections.plot.is_empty() {
                ui.label(texts.no_selection);
            } else {
                let shown: Vec<Record> = self
                    .store
                    .all()
                    .iter()
                    .filter(|r| !self.hidden.contains(&r.id))
                    .cloned()
                    .collect();
                means_strip(ui, self.store.schema(), &shown, texts);
                if EncodingControls::ui(ui, self.store.schema(), &mut self.encoding) {
                    self.resync(session);
                }

                let available = ui.available_height();
                let plot_height = (available * 0.45).max(220.0);
                let event = self
                    .scatter
                    .ui(ui, &self.projections.plot, &self.encoding, plot_height);
                if let Some(event) = event {
                    self.apply_event(ui, event, session);
                }
                ui.small(texts.hover_info);
            }
        }

        ui.separator();
        ui.strong(texts.edit_title);
        let schema = self.store.schema().clone();
        let event = self
            .table
            .ui(ui, &schema, &self.projections.list, texts);
        if let Some(event) = event {
            self.apply_event(ui, event, session);
        }

        ui.separator();
        egui::CollapsingHeader::new(texts.add_title)
            .default_open(self.store.is_empty())
            .show(ui, |ui| {
                let error = self.add_error.clone();
                if let Some(event) = self.form.ui(ui, &schema, texts, error.as_deref()) {
                    self.apply_event(ui, event, session);
                }
            });

        ui.separator();
        self.actions_block(ui, session);
        ui.small(format!("{} {}", self.store.len(), texts.entries));

        self.confirm_delete(ui, session);
    }
}
