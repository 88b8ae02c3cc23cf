use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use panda_explorer::color::ColumnColors;
use panda_explorer::data::loader::load_file;
use panda_explorer::{
    Action, ExplorationContext, ExplorerConfig, ExplorerHandlers, ExplorerSlot, InMemoryDataset,
};

use crate::ui::{grid, panels, plot, split};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub slot: ExplorerSlot,
    pub config: ExplorerConfig,
    pub colors: ColumnColors,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Most recent intent reported through the action handler.
    pub last_action: Rc<RefCell<Option<Action>>>,
    back_requested: Rc<Cell<bool>>,
}

impl ExplorerApp {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            slot: ExplorerSlot::new(),
            config,
            colors: ColumnColors::default(),
            status_message: None,
            last_action: Rc::new(RefCell::new(None)),
            back_requested: Rc::new(Cell::new(false)),
        }
    }

    /// Load a dataset file and mount it, reporting failures in the status line.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.install(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn install(&mut self, dataset: InMemoryDataset) {
        let dataset = Arc::new(dataset);
        match self.slot.try_get_mut() {
            Ok(ctx) => ctx.set_dataset(dataset),
            Err(_) => {
                let ctx = ExplorationContext::new(dataset, &self.config, self.handlers());
                self.slot.establish(ctx);
            }
        }
        self.colors = ColumnColors::new(self.slot.get().columns());
        self.status_message = None;
    }

    fn handlers(&self) -> ExplorerHandlers {
        let last_action = Rc::clone(&self.last_action);
        let back_requested = Rc::clone(&self.back_requested);
        ExplorerHandlers::default()
            .with_action(move |action| {
                log::info!("action requested: {} {:?}", action.kind, action.payload);
                *last_action.borrow_mut() = Some(action.clone());
            })
            .with_back(move || back_requested.set(true))
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, self);
        });

        if !self.slot.is_established() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to explore it  (File → Open…)");
                });
            });
            return;
        }

        let bins = self.config.histogram_bins;
        let colors = &self.colors;
        let explorer = self.slot.get_mut();

        // ---- Left side panel: columns ----
        egui::SidePanel::left("column_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::column_panel(ui, explorer, colors);
            });

        // ---- Central panel: charts, preview, split ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                ui.columns(2, |cols| {
                    plot::histogram_plot(&mut cols[0], explorer, bins, colors);
                    plot::scatter_plot(&mut cols[1], explorer, colors);
                });

                ui.separator();
                egui::CollapsingHeader::new("Preview")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| grid::preview_grid(ui, explorer, colors));

                egui::CollapsingHeader::new("Column statistics")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| grid::stats_table(ui, explorer.stats()));

                egui::CollapsingHeader::new("Train / validation / test split")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| split::split_panel(ui, explorer));
            });
        });

        if self.back_requested.take() {
            self.slot.teardown();
            self.colors = ColumnColors::default();
        }
    }
}
