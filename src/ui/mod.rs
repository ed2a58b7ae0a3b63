// src/ui/mod.rs
pub mod home;
pub mod hypothesis;
pub mod time_series;

use std::path::{Path, PathBuf};

use eframe::egui;

fn banner(ui: &mut egui::Ui, accent: egui::Color32, text: &str) {
    egui::Frame::none()
        .fill(accent.linear_multiply(0.12))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(10.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(accent, text);
        });
}

pub(crate) fn success_banner(ui: &mut egui::Ui, text: &str) {
    banner(ui, egui::Color32::from_rgb(110, 200, 110), text);
}

pub(crate) fn warning_banner(ui: &mut egui::Ui, text: &str) {
    banner(ui, egui::Color32::from_rgb(230, 180, 70), text);
}

pub(crate) fn error_banner(ui: &mut egui::Ui, text: &str) {
    banner(ui, egui::Color32::from_rgb(225, 90, 90), text);
}

/// Upload button plus the currently loaded file name. Returns the picked
/// path on the frame the user confirms the dialog.
pub(crate) fn open_csv_button(ui: &mut egui::Ui, current: Option<&Path>) -> Option<PathBuf> {
    let mut picked = None;
    ui.horizontal(|ui| {
        if ui.button("📂 Upload CSV").clicked() {
            picked = rfd::FileDialog::new()
                .add_filter("CSV files", &["csv"])
                .set_title("Open CSV File")
                .pick_file();
        }
        if let Some(path) = current {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            ui.weak(name);
        }
    });
    picked
}

/// First rows of a table as a preview grid, header row on top.
pub(crate) fn preview_grid(
    ui: &mut egui::Ui,
    id: &str,
    headers: &[String],
    rows: &[Vec<String>],
) {
    egui::Grid::new(id)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for header in headers {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();
            for row in rows {
                for cell in row {
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
}
