mod app;
mod ui;

use std::path::PathBuf;

use app::ExplorerApp;
use clap::Parser;
use eframe::egui;
use panda_explorer::ExplorerConfig;

/// Explore a tabular dataset: column statistics, charts and split previews.
#[derive(Debug, Parser)]
#[command(name = "panda-explorer", version, about)]
struct Args {
    /// Dataset to open on startup (.json bundle, .csv or .parquet)
    path: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/panda-explorer/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let config = ExplorerConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("{e:#}; using default configuration");
        ExplorerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Panda Explorer",
        options,
        Box::new(move |_cc| {
            let mut app = ExplorerApp::new(config);
            if let Some(path) = &args.path {
                app.open_path(path);
            }
            Ok(Box::new(app))
        }),
    )
}
