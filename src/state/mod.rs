// src/state/mod.rs
use std::path::{Path, PathBuf};

use log::warn;

use crate::analysis::hypothesis::{ChiSquareResult, TTestResult};
use crate::analysis::{clamp_forecast_steps, DEFAULT_FORECAST_STEPS};
use crate::data::{self, DataTable, IndexedTable};
use crate::error::IngestError;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Home,
    TimeSeries,
    Hypothesis,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Home
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HypothesisTest {
    TTest,
    ChiSquare,
}

impl Default for HypothesisTest {
    fn default() -> Self {
        HypothesisTest::TTest
    }
}

impl HypothesisTest {
    pub const ALL: [HypothesisTest; 2] = [HypothesisTest::TTest, HypothesisTest::ChiSquare];

    pub fn label(&self) -> &'static str {
        match self {
            HypothesisTest::TTest => "T-Test",
            HypothesisTest::ChiSquare => "Chi-Square Test",
        }
    }
}

/// Result slot filled when the user presses Run on the hypothesis screen.
#[derive(Debug, Clone)]
pub enum TestOutcome {
    TTest(TTestResult),
    ChiSquare(ChiSquareResult),
    Failed(String),
}

#[derive(Debug)]
pub struct TimeSeriesState {
    pub source: Option<PathBuf>,
    pub table: Option<IndexedTable>,
    pub selected_column: Option<String>,
    pub forecast_steps: usize,
    pub load_error: Option<String>,
}

impl Default for TimeSeriesState {
    fn default() -> Self {
        Self {
            source: None,
            table: None,
            selected_column: None,
            forecast_steps: DEFAULT_FORECAST_STEPS,
            load_error: None,
        }
    }
}

impl TimeSeriesState {
    pub fn set_forecast_steps(&mut self, steps: usize) {
        self.forecast_steps = clamp_forecast_steps(steps);
    }
}

#[derive(Debug, Default)]
pub struct HypothesisState {
    pub source: Option<PathBuf>,
    pub table: Option<DataTable>,
    pub test: HypothesisTest,
    pub sample_a: Option<String>,
    pub sample_b: Option<String>,
    pub category_a: Option<String>,
    pub category_b: Option<String>,
    pub outcome: Option<TestOutcome>,
    pub load_error: Option<String>,
}

// Core application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_screen: Screen,
    pub time_series: TimeSeriesState,
    pub hypothesis: HypothesisState,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.current_screen = screen;
    }

    /// Load a CSV for the time-series screen. The file must carry a
    /// date-like column; without one the load fails and the previous
    /// table is discarded.
    pub fn load_time_series_csv(&mut self, path: &Path) {
        let result = data::load_table(path).and_then(data::index_by_date);

        {
            let ts = &mut self.time_series;
            ts.source = Some(path.to_path_buf());
            ts.table = None;
            ts.selected_column = None;
            ts.load_error = None;
        }

        match result {
            Ok(indexed) => {
                let ts = &mut self.time_series;
                ts.selected_column = indexed.table.numeric_column_names().into_iter().next();
                ts.table = Some(indexed);
            }
            Err(e) => {
                warn!("time-series load failed: {}", e);
                self.report_ingest_error(e, Screen::TimeSeries);
            }
        }
    }

    /// Load a CSV for the hypothesis screen. No date column is required.
    pub fn load_hypothesis_csv(&mut self, path: &Path) {
        let result = data::load_table(path);

        self.hypothesis = HypothesisState {
            source: Some(path.to_path_buf()),
            ..Default::default()
        };

        match result {
            Ok(table) => {
                let hy = &mut self.hypothesis;
                let numeric = table.numeric_column_names();
                hy.sample_a = numeric.first().cloned();
                hy.sample_b = numeric.get(1).or(numeric.first()).cloned();
                let text = table.text_column_names();
                hy.category_a = text.first().cloned();
                hy.category_b = text.get(1).or(text.first()).cloned();
                hy.table = Some(table);
            }
            Err(e) => {
                warn!("hypothesis load failed: {}", e);
                self.report_ingest_error(e, Screen::Hypothesis);
            }
        }
    }

    /// Environment failures (unreadable file) go to the modal; everything
    /// else is an inline banner on the screen that triggered the load.
    fn report_ingest_error(&mut self, error: IngestError, screen: Screen) {
        match error {
            IngestError::Io { .. } => self.error_message = Some(error.to_string()),
            other => {
                let slot = match screen {
                    Screen::TimeSeries => &mut self.time_series.load_error,
                    _ => &mut self.hypothesis.load_error,
                };
                *slot = Some(other.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MAX_FORECAST_STEPS, MIN_FORECAST_STEPS};

    #[test]
    fn starts_on_home_screen() {
        let state = AppState::new();
        assert_eq!(state.current_screen, Screen::Home);
        assert_eq!(state.time_series.forecast_steps, DEFAULT_FORECAST_STEPS);
    }

    #[test]
    fn navigation_moves_between_screens() {
        let mut state = AppState::new();
        state.navigate(Screen::TimeSeries);
        assert_eq!(state.current_screen, Screen::TimeSeries);
        state.navigate(Screen::Home);
        assert_eq!(state.current_screen, Screen::Home);
    }

    #[test]
    fn forecast_steps_are_clamped() {
        let mut ts = TimeSeriesState::default();
        ts.set_forecast_steps(4);
        assert_eq!(ts.forecast_steps, MIN_FORECAST_STEPS);
        ts.set_forecast_steps(100);
        assert_eq!(ts.forecast_steps, MAX_FORECAST_STEPS);
        ts.set_forecast_steps(12);
        assert_eq!(ts.forecast_steps, 12);
    }

    fn temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("trendlab_test_{}", name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_date_column_surfaces_as_screen_error() {
        let path = temp_csv("no_date.csv", "Region,Sales\nNorth,1\nSouth,2\n");
        let mut state = AppState::new();
        state.load_time_series_csv(&path);
        assert!(state.time_series.table.is_none());
        let err = state.time_series.load_error.as_deref().unwrap();
        assert!(err.contains("no date column"), "got: {}", err);
        assert!(state.error_message.is_none());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unreadable_file_surfaces_as_modal_error() {
        let mut state = AppState::new();
        state.load_time_series_csv(Path::new("/nonexistent/trendlab.csv"));
        assert!(state.error_message.is_some());
        assert!(state.time_series.load_error.is_none());
    }

    #[test]
    fn loading_selects_default_columns() {
        let path = temp_csv(
            "orders.csv",
            "OrderDate,Sales,Units\n2023-01-01,10,1\n2023-02-01,20,2\n",
        );
        let mut state = AppState::new();
        state.load_time_series_csv(&path);
        assert_eq!(state.time_series.selected_column.as_deref(), Some("Sales"));

        let path2 = temp_csv(
            "hypo.csv",
            "Region,Outcome,Before,After\nNorth,Win,1,2\nSouth,Loss,3,4\n",
        );
        state.load_hypothesis_csv(&path2);
        assert_eq!(state.hypothesis.sample_a.as_deref(), Some("Before"));
        assert_eq!(state.hypothesis.sample_b.as_deref(), Some("After"));
        assert_eq!(state.hypothesis.category_a.as_deref(), Some("Region"));
        assert_eq!(state.hypothesis.category_b.as_deref(), Some("Outcome"));
        assert_eq!(state.hypothesis.test, HypothesisTest::TTest);

        std::fs::remove_file(path).ok();
        std::fs::remove_file(path2).ok();
    }
}
