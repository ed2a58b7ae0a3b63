// src/data/table.rs
use chrono::NaiveDate;

/// Values of one column. Numeric columns keep empty cells as NaN so row
/// alignment with the other columns is preserved; text columns keep the
/// raw cell content.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Numeric(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.values, ColumnValues::Text(_))
    }

    pub fn numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&[String]> {
        match &self.values {
            ColumnValues::Text(v) => Some(v),
            ColumnValues::Numeric(_) => None,
        }
    }

    /// Cell rendered for the preview grid.
    pub fn cell(&self, row: usize) -> String {
        match &self.values {
            ColumnValues::Numeric(v) => {
                let x = v[row];
                if x.is_nan() {
                    String::new()
                } else {
                    format!("{}", x)
                }
            }
            ColumnValues::Text(v) => v[row].clone(),
        }
    }
}

/// An ordered collection of typed columns of equal length. Lives only for
/// the current session; loading another file replaces it.
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: usize,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, rows: usize) -> Self {
        Self { columns, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    pub fn text_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_text()).collect()
    }

    pub fn numeric_column_names(&self) -> Vec<String> {
        self.numeric_columns()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn text_column_names(&self) -> Vec<String> {
        self.text_columns().iter().map(|c| c.name.clone()).collect()
    }

    /// Index of the first column whose name contains "date",
    /// case-insensitively.
    pub fn date_column_index(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.to_lowercase().contains("date"))
    }

    pub(crate) fn take_column(&mut self, index: usize) -> Column {
        self.columns.remove(index)
    }
}

/// A table whose rows are keyed by a parsed calendar-date index, required
/// by the time-series screen.
#[derive(Debug, Clone)]
pub struct IndexedTable {
    pub index_name: String,
    pub dates: Vec<NaiveDate>,
    pub table: DataTable,
}

impl IndexedTable {
    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }
}
