// src/app.rs
use eframe::egui;

use crate::state::{AppState, Screen};

pub struct TrendLabApp {
    state: AppState,
}

impl TrendLabApp {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.label(egui::RichText::new("TrendLab").strong());
            ui.separator();

            // Tab selection using buttons
            let tabs = [
                (Screen::Home, "Home"),
                (Screen::TimeSeries, "Time Series"),
                (Screen::Hypothesis, "Hypothesis"),
            ];

            for (screen, label) in tabs {
                if ui
                    .selectable_label(self.state.current_screen == screen, label)
                    .clicked()
                {
                    self.state.navigate(screen);
                }
            }
        });
    }
}

impl eframe::App for TrendLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("screen_scroll")
                .show(ui, |ui| match self.state.current_screen {
                    Screen::Home => {
                        crate::ui::home::show_home_view(ui, &mut self.state);
                    }
                    Screen::TimeSeries => {
                        crate::ui::time_series::show_time_series_view(ui, &mut self.state);
                    }
                    Screen::Hypothesis => {
                        crate::ui::hypothesis::show_hypothesis_view(ui, &mut self.state);
                    }
                });
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}
