//! UI session context
//!
//! The session is an explicit value passed into every operation that
//! formats user-facing text, never ambient global state. This keeps the
//! core testable without a UI framework attached.

use serde::{Deserialize, Serialize};

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::De => "DE",
        }
    }
}

/// Per-session UI state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub language: Language,
}

impl Session {
    pub fn texts(&self) -> &'static Texts {
        texts(self.language)
    }
}

/// Localized interface strings
pub struct Texts {
    pub yes: &'static str,
    pub no: &'static str,
    pub upload_csv: &'static str,
    pub upload_help: &'static str,
    pub upload_error: &'static str,
    pub upload_success: &'static str,
    pub upload_read_error: &'static str,
    pub hover_info: &'static str,
    pub edit_title: &'static str,
    pub add_title: &'static str,
    pub add_button: &'static str,
    pub add_success: &'static str,
    pub save_changes: &'static str,
    pub save_success: &'static str,
    pub download_csv: &'static str,
    pub delete_confirm: &'static str,
    pub delete_tooltip: &'static str,
    pub cancel: &'static str,
    pub entries: &'static str,
    pub no_data: &'static str,
    pub select_entries: &'static str,
    pub no_selection: &'static str,
    pub means_title: &'static str,
    pub open_link: &'static str,
    pub open_maps: &'static str,
    pub start_title: &'static str,
    pub start_info: &'static str,
}

static EN: Texts = Texts {
    yes: "Yes",
    no: "No",
    upload_csv: "Upload CSV",
    upload_help: "Upload a CSV file to replace the current data.",
    upload_error: "Uploaded CSV must contain: ",
    upload_success: "File uploaded and data replaced successfully!",
    upload_read_error: "Error reading uploaded file",
    hover_info: "Hover over a marker to see all details. Use the table below to open the link or maps.",
    edit_title: "View, edit or delete your data:",
    add_title: "Add",
    add_button: "＋ Add",
    add_success: "New entry added!",
    save_changes: "Save Changes",
    save_success: "Changes saved!",
    download_csv: "Download CSV",
    delete_confirm: "Delete this entry?",
    delete_tooltip: "Delete entry",
    cancel: "Cancel",
    entries: "entries",
    no_data: "No data to plot. Please add entries first.",
    select_entries: "Select entries to display:",
    no_selection: "No entries selected.",
    means_title: "Means",
    open_link: "Open",
    open_maps: "Open in Maps",
    start_title: "Welcome",
    start_info: "Pick a section in the sidebar to browse housing options, hotels or activities. Each section plots its entries, lets you edit them in the table, and saves back to a CSV file.",
};

static DE: Texts = Texts {
    yes: "Ja",
    no: "Nein",
    upload_csv: "CSV hochladen",
    upload_help: "Laden Sie eine CSV-Datei hoch, um die aktuellen Daten zu ersetzen.",
    upload_error: "Hochgeladene CSV muss enthalten: ",
    upload_success: "Datei hochgeladen und Daten erfolgreich ersetzt!",
    upload_read_error: "Fehler beim Lesen der hochgeladenen Datei",
    hover_info: "Fahren Sie mit der Maus über einen Marker, um alle Details zu sehen. Verwenden Sie die Tabelle unten, um den Link oder die Karte zu öffnen.",
    edit_title: "Daten anzeigen, bearbeiten oder löschen:",
    add_title: "Hinzufügen",
    add_button: "＋ Hinzufügen",
    add_success: "Neuer Eintrag hinzugefügt!",
    save_changes: "Änderungen speichern",
    save_success: "Änderungen gespeichert!",
    download_csv: "CSV herunterladen",
    delete_confirm: "Diesen Eintrag löschen?",
    delete_tooltip: "Eintrag löschen",
    cancel: "Abbrechen",
    entries: "Einträge",
    no_data: "Keine Daten zum Anzeigen. Bitte zuerst Einträge hinzufügen.",
    select_entries: "Wählen Sie Einträge aus:",
    no_selection: "Keine Einträge ausgewählt.",
    means_title: "Mittelwerte",
    open_link: "Öffnen",
    open_maps: "In Maps öffnen",
    start_title: "Willkommen",
    start_info: "Wählen Sie in der Seitenleiste einen Bereich, um Wohnungen, Hotels oder Aktivitäten zu durchsuchen. Jeder Bereich zeigt die Einträge im Diagramm, erlaubt Bearbeitung in der Tabelle und speichert in eine CSV-Datei.",
};

/// Strings table for a language
pub fn texts(language: Language) -> &'static Texts {
    match language {
        Language::En => &EN,
        Language::De => &DE,
    }
}
