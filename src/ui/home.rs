// src/ui/home.rs
use eframe::egui;

use crate::state::{AppState, Screen};

pub fn show_home_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(
            egui::RichText::new("TrendLab")
                .size(52.0)
                .strong()
                .color(egui::Color32::from_rgb(0, 150, 255)),
        );
        ui.label(
            egui::RichText::new("Explore Data. Discover Insights. Forecast the Future.")
                .size(18.0)
                .weak(),
        );
        ui.add_space(48.0);
    });

    ui.columns(2, |columns| {
        columns[0].vertical_centered(|ui| {
            if ui
                .add_sized([260.0, 56.0], egui::Button::new("📈 Time Series Analysis"))
                .clicked()
            {
                state.navigate(Screen::TimeSeries);
            }
        });
        columns[1].vertical_centered(|ui| {
            if ui
                .add_sized([260.0, 56.0], egui::Button::new("📊 Hypothesis Testing"))
                .clicked()
            {
                state.navigate(Screen::Hypothesis);
            }
        });
    });
}
