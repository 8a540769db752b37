//! Main application entry point

use std::path::PathBuf;

use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scout_core::{datasets, Language, Session};

mod pages;

use pages::DatasetPage;

/// Which page the sidebar has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageSelection {
    Start,
    Dataset(usize),
}

/// Main application state
struct ScoutApp {
    session: Session,
    pages: Vec<DatasetPage>,
    current: PageSelection,
}

impl ScoutApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let session = Session::default();
        let pages = vec![
            DatasetPage::new(datasets::housing(), PathBuf::from("Data/Housing.csv"), &session),
            DatasetPage::new(datasets::hotels(), PathBuf::from("Data/Hotels.csv"), &session),
            DatasetPage::new(
                datasets::activities(),
                PathBuf::from("Data/Activities.csv"),
                &session,
            ),
        ];

        Self {
            session,
            pages,
            current: PageSelection::Start,
        }
    }

    fn set_language(&mut self, language: Language) {
        if self.session.language == language {
            return;
        }
        self.session.language = language;
        // hover text carries localized tokens, so every page rebuilds
        for page in &mut self.pages {
            page.resync(&self.session);
        }
    }

    fn sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Relocation Scout");
        ui.separator();

        ui.selectable_value(
            &mut self.current,
            PageSelection::Start,
            self.session.texts().start_title,
        );
        for (idx, page) in self.pages.iter().enumerate() {
            ui.selectable_value(
                &mut self.current,
                PageSelection::Dataset(idx),
                page.title(),
            );
        }

        ui.separator();
        ui.horizontal(|ui| {
            let mut language = self.session.language;
            ui.selectable_value(&mut language, Language::En, Language::En.label());
            ui.selectable_value(&mut language, Language::De, Language::De.label());
            self.set_language(language);
        });
    }

    fn start_page(&self, ui: &mut egui::Ui) {
        let texts = self.session.texts();
        ui.heading(texts.start_title);
        ui.separator();
        ui.label(texts.start_info);
    }
}

impl eframe::App for ScoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("sections")
            .default_width(180.0)
            .show(ctx, |ui| {
                self.sidebar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.current {
                PageSelection::Start => self.start_page(ui),
                PageSelection::Dataset(idx) => {
                    let session = self.session.clone();
                    self.pages[idx].ui(ui, &session);
                }
            });
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    info!("starting Relocation Scout");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Relocation Scout",
        native_options,
        Box::new(|cc| Box::new(ScoutApp::new(cc))),
    )
}
