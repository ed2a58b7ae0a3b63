// src/main.rs
use anyhow::Result;
use eframe::egui;

mod analysis;
mod app;
mod data;
mod error;
mod state;
mod ui;

use app::TrendLabApp;

fn main() -> Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("TrendLab"),
        ..Default::default()
    };

    eframe::run_native(
        "TrendLab",
        options,
        Box::new(|_cc| Box::new(TrendLabApp::new())),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
