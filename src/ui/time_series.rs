// src/ui/time_series.rs
use chrono::NaiveDate;
use eframe::egui;

use crate::analysis::{
    adf_test, seasonal_decompose, ArimaModel, ARIMA_ORDER, MAX_FORECAST_STEPS, MIN_FORECAST_STEPS,
    SEASONAL_PERIOD,
};
use crate::data::IndexedTable;
use crate::state::{AppState, Screen, TimeSeriesState};
use crate::ui::{error_banner, open_csv_button, preview_grid, success_banner, warning_banner};

const PREVIEW_ROWS: usize = 5;

pub fn show_time_series_view(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.button("⬅ Back").clicked() {
        state.navigate(Screen::Home);
    }
    ui.heading("📈 Time Series Analysis");
    ui.add_space(8.0);

    if let Some(path) = open_csv_button(ui, state.time_series.source.as_deref()) {
        state.load_time_series_csv(&path);
    }
    ui.add_space(8.0);

    if let Some(err) = &state.time_series.load_error {
        // No date column (or a broken one) halts the whole screen.
        let err = err.clone();
        error_banner(ui, &err);
        return;
    }

    let TimeSeriesState {
        table,
        selected_column,
        forecast_steps,
        ..
    } = &mut state.time_series;

    let Some(indexed) = table.as_ref() else {
        ui.weak("Upload a CSV with a date column to get started.");
        return;
    };

    draw_preview(ui, indexed);
    ui.add_space(8.0);

    let numeric_names = indexed.table.numeric_column_names();
    if numeric_names.is_empty() {
        error_banner(ui, "No numeric columns to analyze!");
        return;
    }

    let current = selected_column
        .clone()
        .unwrap_or_else(|| numeric_names[0].clone());
    egui::ComboBox::from_label("Select Numeric Column")
        .selected_text(current.clone())
        .show_ui(ui, |ui| {
            for name in &numeric_names {
                ui.selectable_value(selected_column, Some(name.clone()), name);
            }
        });
    let column = selected_column.clone().unwrap_or(current);

    let Some(values) = indexed.table.column(&column).and_then(|c| c.numeric()) else {
        return;
    };

    ui.add_space(8.0);
    draw_line_plot(ui, indexed, &column, values);
    ui.add_space(8.0);
    draw_decomposition(ui, indexed, values);
    ui.add_space(8.0);
    draw_adf(ui, values);
    ui.add_space(8.0);
    draw_forecast(ui, indexed, values, forecast_steps);
}

fn draw_preview(ui: &mut egui::Ui, indexed: &IndexedTable) {
    ui.group(|ui| {
        ui.heading("📄 Data Preview");
        let mut headers = vec![indexed.index_name.clone()];
        headers.extend(indexed.table.columns().iter().map(|c| c.name.clone()));

        let n = indexed.n_rows().min(PREVIEW_ROWS);
        let rows: Vec<Vec<String>> = (0..n)
            .map(|row| {
                let mut cells = vec![indexed.dates[row].to_string()];
                cells.extend(indexed.table.columns().iter().map(|c| c.cell(row)));
                cells
            })
            .collect();

        preview_grid(ui, "ts_preview", &headers, &rows);
    });
}

fn draw_line_plot(ui: &mut egui::Ui, indexed: &IndexedTable, column: &str, values: &[f64]) {
    ui.group(|ui| {
        ui.heading("📉 Time Series Plot");
        ui.weak(format!("Trend Over Time — {}", column));
        let points = series_points(&indexed.dates, values);
        egui_plot::Plot::new("ts_line")
            .height(220.0)
            .allow_zoom(false)
            .allow_drag(false)
            .show(ui, |plot_ui| {
                plot_ui.line(egui_plot::Line::new(points).name(column).width(1.5));
            });
    });
}

fn draw_decomposition(ui: &mut egui::Ui, indexed: &IndexedTable, values: &[f64]) {
    ui.group(|ui| {
        ui.heading("🔍 Trend, Seasonality & Residual Decomposition");
        match seasonal_decompose(values, SEASONAL_PERIOD) {
            Ok(d) => {
                let panels = [
                    ("Observed", &d.observed),
                    ("Trend", &d.trend),
                    ("Seasonal", &d.seasonal),
                    ("Residual", &d.residual),
                ];
                for (label, component) in panels {
                    ui.label(label);
                    let points = series_points(&indexed.dates, component);
                    egui_plot::Plot::new(format!("decompose_{}", label))
                        .height(90.0)
                        .allow_zoom(false)
                        .allow_drag(false)
                        .show(ui, |plot_ui| {
                            plot_ui.line(egui_plot::Line::new(points).name(label));
                        });
                }
            }
            Err(e) => warning_banner(ui, &format!("Decomposition error: {}", e)),
        }
    });
}

fn draw_adf(ui: &mut egui::Ui, values: &[f64]) {
    ui.group(|ui| {
        ui.heading("📌 ADF Stationarity Test");
        match adf_test(values) {
            Ok(r) => {
                ui.label(format!("ADF Statistic: {:.6}", r.statistic));
                ui.label(format!("p-value: {:.6}", r.p_value));
                if r.is_stationary() {
                    success_banner(ui, "Data is Stationary");
                } else {
                    warning_banner(ui, "Data is Not Stationary");
                }
            }
            Err(e) => warning_banner(ui, &format!("ADF test error: {}", e)),
        }
    });
}

fn draw_forecast(ui: &mut egui::Ui, indexed: &IndexedTable, values: &[f64], forecast_steps: &mut usize) {
    ui.group(|ui| {
        ui.heading("🔮 Forecast (ARIMA)");
        let mut steps = *forecast_steps;
        ui.add(
            egui::Slider::new(&mut steps, MIN_FORECAST_STEPS..=MAX_FORECAST_STEPS)
                .text("Forecast Steps"),
        );
        *forecast_steps = crate::analysis::clamp_forecast_steps(steps);

        match ArimaModel::fit(values, ARIMA_ORDER) {
            Ok(model) => {
                let forecast = model.forecast(*forecast_steps);
                let history = series_points(&indexed.dates, values);
                let future = forecast_points(&indexed.dates, &forecast);
                egui_plot::Plot::new("ts_forecast")
                    .height(220.0)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .legend(egui_plot::Legend::default())
                    .show(ui, |plot_ui| {
                        plot_ui.line(
                            egui_plot::Line::new(history)
                                .name("History")
                                .color(egui::Color32::from_rgb(100, 150, 255)),
                        );
                        plot_ui.line(
                            egui_plot::Line::new(future)
                                .name("Forecast")
                                .color(egui::Color32::from_rgb(255, 150, 80)),
                        );
                    });
            }
            Err(e) => warning_banner(ui, &format!("ARIMA({},{},{}) failed: {}", ARIMA_ORDER.p, ARIMA_ORDER.d, ARIMA_ORDER.q, e)),
        }
    });
}

/// Plot points keyed by days since the first observation. Non-finite
/// values are dropped so they do not break the polyline.
pub(crate) fn series_points(dates: &[NaiveDate], values: &[f64]) -> Vec<[f64; 2]> {
    let Some(origin) = dates.first().copied() else {
        return Vec::new();
    };
    dates
        .iter()
        .zip(values.iter())
        .filter(|(_, y)| y.is_finite())
        .map(|(d, &y)| [(*d - origin).num_days() as f64, y])
        .collect()
}

/// Forecast points continue after the last observed date at the median
/// observed spacing.
pub(crate) fn forecast_points(dates: &[NaiveDate], forecast: &[f64]) -> Vec<[f64; 2]> {
    let (Some(origin), Some(last)) = (dates.first().copied(), dates.last().copied()) else {
        return Vec::new();
    };
    let step = median_step_days(dates);
    let last_x = (last - origin).num_days() as f64;
    forecast
        .iter()
        .enumerate()
        .map(|(i, &y)| [last_x + step * (i + 1) as f64, y])
        .collect()
}

fn median_step_days(dates: &[NaiveDate]) -> f64 {
    let mut diffs: Vec<i64> = dates
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .filter(|&d| d > 0)
        .collect();
    if diffs.is_empty() {
        return 1.0;
    }
    diffs.sort_unstable();
    diffs[diffs.len() / 2] as f64
}
