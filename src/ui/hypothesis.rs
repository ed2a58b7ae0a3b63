// src/ui/hypothesis.rs
use eframe::egui;

use crate::analysis::hypothesis::check_categorical_columns;
use crate::analysis::{chi_square_test, contingency_table, t_test};
use crate::data::DataTable;
use crate::state::{AppState, HypothesisState, HypothesisTest, Screen, TestOutcome};
use crate::ui::{error_banner, open_csv_button, preview_grid, success_banner, warning_banner};

const PREVIEW_ROWS: usize = 5;

pub fn show_hypothesis_view(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.button("⬅ Back").clicked() {
        state.navigate(Screen::Home);
    }
    ui.heading("📊 Hypothesis Testing");
    ui.add_space(8.0);

    if let Some(path) = open_csv_button(ui, state.hypothesis.source.as_deref()) {
        state.load_hypothesis_csv(&path);
    }
    ui.add_space(8.0);

    if let Some(err) = &state.hypothesis.load_error {
        let err = err.clone();
        error_banner(ui, &err);
        return;
    }

    let HypothesisState {
        table,
        test,
        sample_a,
        sample_b,
        category_a,
        category_b,
        outcome,
        ..
    } = &mut state.hypothesis;

    let Some(table) = table.as_ref() else {
        ui.weak("Upload a CSV to get started.");
        return;
    };

    draw_preview(ui, table);
    ui.add_space(8.0);

    let previous = *test;
    egui::ComboBox::from_label("Select Test")
        .selected_text(test.label())
        .show_ui(ui, |ui| {
            for candidate in HypothesisTest::ALL {
                ui.selectable_value(test, candidate, candidate.label());
            }
        });
    if *test != previous {
        *outcome = None;
    }
    ui.add_space(8.0);

    match *test {
        HypothesisTest::TTest => {
            let numeric = table.numeric_column_names();
            if numeric.len() < 2 {
                error_banner(ui, "Need 2 numeric columns!");
                *outcome = None;
            } else {
                column_combo(ui, "Sample 1", &numeric, sample_a);
                column_combo(ui, "Sample 2", &numeric, sample_b);
                if ui.button("Run T-Test").clicked() {
                    if let (Some(a), Some(b)) = (sample_a.clone(), sample_b.clone()) {
                        *outcome = Some(run_t_test(table, &a, &b));
                    }
                }
            }
        }
        HypothesisTest::ChiSquare => {
            let categorical = table.text_column_names();
            if let Err(e) = check_categorical_columns(&categorical) {
                error_banner(ui, &e.to_string());
                *outcome = None;
            } else {
                column_combo(ui, "Category 1", &categorical, category_a);
                column_combo(ui, "Category 2", &categorical, category_b);
                if ui.button("Run Chi-Square").clicked() {
                    if let (Some(a), Some(b)) = (category_a.clone(), category_b.clone()) {
                        *outcome = Some(run_chi_square(table, &a, &b));
                    }
                }
            }
        }
    }

    ui.add_space(8.0);
    if let Some(outcome) = outcome {
        draw_outcome(ui, outcome);
    }
}

fn draw_preview(ui: &mut egui::Ui, table: &DataTable) {
    ui.group(|ui| {
        ui.heading("📄 Data Preview");
        let headers: Vec<String> = table.columns().iter().map(|c| c.name.clone()).collect();
        let n = table.n_rows().min(PREVIEW_ROWS);
        let rows: Vec<Vec<String>> = (0..n)
            .map(|row| table.columns().iter().map(|c| c.cell(row)).collect())
            .collect();
        preview_grid(ui, "hy_preview", &headers, &rows);
    });
}

fn column_combo(ui: &mut egui::Ui, label: &str, names: &[String], slot: &mut Option<String>) {
    let current = slot.clone().unwrap_or_else(|| names[0].clone());
    egui::ComboBox::from_label(label)
        .selected_text(current)
        .show_ui(ui, |ui| {
            for name in names {
                ui.selectable_value(slot, Some(name.clone()), name);
            }
        });
    if slot.is_none() {
        *slot = names.first().cloned();
    }
}

fn draw_outcome(ui: &mut egui::Ui, outcome: &TestOutcome) {
    match outcome {
        TestOutcome::TTest(r) => {
            ui.group(|ui| {
                ui.heading("📌 T-Test Result");
                ui.label(format!("T-Statistic: {:.6}", r.statistic));
                ui.label(format!("p-value: {:.6}", r.p_value));
                if r.is_significant() {
                    success_banner(ui, "Reject H₀ — Significant Difference");
                } else {
                    warning_banner(ui, "Fail to Reject H₀");
                }
            });
        }
        TestOutcome::ChiSquare(r) => {
            ui.group(|ui| {
                ui.heading("📌 Chi-Square Result");
                ui.label(format!("Chi-Square Value: {:.6}", r.statistic));
                ui.label(format!("p-value: {:.6}", r.p_value));
                if r.is_significant() {
                    success_banner(ui, "Reject H₀ — Dependent Variables");
                } else {
                    warning_banner(ui, "Fail to Reject H₀ — Independent");
                }
            });
        }
        TestOutcome::Failed(message) => error_banner(ui, message),
    }
}

pub(crate) fn run_t_test(table: &DataTable, a: &str, b: &str) -> TestOutcome {
    let xs = table.column(a).and_then(|c| c.numeric());
    let ys = table.column(b).and_then(|c| c.numeric());
    match (xs, ys) {
        (Some(xs), Some(ys)) => match t_test(a, xs, b, ys) {
            Ok(result) => TestOutcome::TTest(result),
            Err(e) => TestOutcome::Failed(format!("T-Test failed: {}", e)),
        },
        _ => TestOutcome::Failed(format!("Columns '{}' and '{}' must both be numeric", a, b)),
    }
}

pub(crate) fn run_chi_square(table: &DataTable, a: &str, b: &str) -> TestOutcome {
    let xs = table.column(a).and_then(|c| c.text());
    let ys = table.column(b).and_then(|c| c.text());
    match (xs, ys) {
        (Some(xs), Some(ys)) => {
            match contingency_table(xs, ys).and_then(|t| chi_square_test(&t)) {
                Ok(result) => TestOutcome::ChiSquare(result),
                Err(e) => TestOutcome::Failed(format!("Chi-Square failed: {}", e)),
            }
        }
        _ => TestOutcome::Failed(format!("Columns '{}' and '{}' must both be categorical", a, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_table;

    fn sales_table() -> DataTable {
        let csv = "Region,Outcome,Before,After\n\
                   North,Win,10,12\n\
                   South,Loss,11,14\n\
                   North,Loss,9,13\n\
                   South,Win,12,15\n";
        read_table(csv.as_bytes()).unwrap()
    }

    #[test]
    fn run_t_test_produces_a_result() {
        let table = sales_table();
        match run_t_test(&table, "Before", "After") {
            TestOutcome::TTest(r) => assert!(r.statistic < 0.0),
            other => panic!("expected TTest outcome, got {:?}", other),
        }
    }

    #[test]
    fn run_t_test_on_text_column_fails_gracefully() {
        let table = sales_table();
        assert!(matches!(
            run_t_test(&table, "Region", "After"),
            TestOutcome::Failed(_)
        ));
    }

    #[test]
    fn run_chi_square_produces_a_result() {
        let table = sales_table();
        match run_chi_square(&table, "Region", "Outcome") {
            TestOutcome::ChiSquare(r) => {
                assert_eq!(r.dof, 1);
                assert!(r.p_value > 0.0 && r.p_value <= 1.0);
            }
            other => panic!("expected ChiSquare outcome, got {:?}", other),
        }
    }

    #[test]
    fn run_chi_square_on_numeric_column_fails_gracefully() {
        let table = sales_table();
        assert!(matches!(
            run_chi_square(&table, "Before", "Outcome"),
            TestOutcome::Failed(_)
        ));
    }
}
