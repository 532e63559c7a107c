mod atlas;
mod config;
mod style;
mod ui;

use anyhow::{anyhow, Context};
use eframe::NativeOptions;
use egui::ViewportBuilder;

use crate::{config::AppConfig, ui::UiMainWindow};

fn main() -> anyhow::Result<()> {
    log4rs::init_file("log4rs.yaml", Default::default()).context("Failed to initialize log4rs")?;
    let config = AppConfig::load()?;

    log::info!("Starting up");
    let title = config.window.title.clone();
    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };
    eframe::run_native(&title, options, Box::new(move |cc| Box::new(UiMainWindow::new(config, cc))))
        .map_err(|err| anyhow!("Failed to run the editor: {err}"))
}
