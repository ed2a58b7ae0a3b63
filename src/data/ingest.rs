// src/data/ingest.rs
use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

use crate::data::table::{Column, ColumnValues, DataTable, IndexedTable};
use crate::error::IngestError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];

pub fn load_table(path: &Path) -> Result<DataTable, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(file)?;
    info!(
        "loaded {} ({} rows, {} columns)",
        path.display(),
        table.n_rows(),
        table.columns().len()
    );
    Ok(table)
}

/// Parse CSV content (header row first) into a typed table. A column is
/// numeric when every non-empty cell parses as f64, text otherwise.
pub fn read_table<R: io::Read>(reader: R) -> Result<DataTable, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.push(record.get(i).unwrap_or("").trim().to_string());
        }
    }

    let rows = cells.first().map(|c| c.len()).unwrap_or(0);
    if headers.is_empty() || rows == 0 {
        return Err(IngestError::Empty);
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| {
            let values = classify(&raw);
            debug!(
                "column '{}' classified as {}",
                name,
                if matches!(values, ColumnValues::Numeric(_)) { "numeric" } else { "text" }
            );
            Column { name, values }
        })
        .collect();

    Ok(DataTable::new(columns, rows))
}

fn classify(raw: &[String]) -> ColumnValues {
    let mut parsed = Vec::with_capacity(raw.len());
    let mut any_value = false;
    for cell in raw {
        if cell.is_empty() {
            parsed.push(f64::NAN);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(x) => {
                any_value = true;
                parsed.push(x);
            }
            Err(_) => return ColumnValues::Text(raw.to_vec()),
        }
    }
    // A column of only empty cells carries no numbers to analyze.
    if any_value {
        ColumnValues::Numeric(parsed)
    } else {
        ColumnValues::Text(raw.to_vec())
    }
}

/// Promote the first "date"-named column to a calendar-date index. The
/// first cell that fails to parse fails the whole table.
pub fn index_by_date(mut table: DataTable) -> Result<IndexedTable, IngestError> {
    let index = table.date_column_index().ok_or(IngestError::MissingDateColumn)?;
    let column = table.take_column(index);

    let cells: Vec<String> = match &column.values {
        ColumnValues::Text(v) => v.clone(),
        // A date column that happened to classify numeric (e.g. years) is
        // re-read through the same parser path.
        ColumnValues::Numeric(v) => v.iter().map(|x| format!("{}", x)).collect(),
    };

    let mut dates = Vec::with_capacity(cells.len());
    for cell in &cells {
        let date = parse_date(cell).ok_or_else(|| IngestError::DateParse {
            column: column.name.clone(),
            value: cell.clone(),
        })?;
        dates.push(date);
    }

    Ok(IndexedTable {
        index_name: column.name,
        dates,
        table,
    })
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> DataTable {
        read_table(csv.as_bytes()).unwrap()
    }

    #[test]
    fn classifies_numeric_and_text_columns() {
        let t = table("Region,Sales,Note\nNorth,10.5,ok\nSouth,3,\n");
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.numeric_column_names(), vec!["Sales"]);
        assert_eq!(t.text_column_names(), vec!["Region", "Note"]);
        assert_eq!(t.column("Sales").unwrap().numeric().unwrap(), &[10.5, 3.0]);
    }

    #[test]
    fn empty_numeric_cells_become_nan() {
        let t = table("Sales\n1\n\n2\n");
        let v = t.column("Sales").unwrap().numeric().unwrap();
        assert_eq!(v.len(), 3);
        assert!(v[1].is_nan());
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(read_table("".as_bytes()), Err(IngestError::Empty)));
        assert!(matches!(read_table("A,B\n".as_bytes()), Err(IngestError::Empty)));
    }

    #[test]
    fn date_index_uses_first_date_named_column() {
        let t = table("Id,OrderDate,ShipDate,Sales\n1,2023-01-01,2023-01-05,10\n2,2023-02-01,2023-02-03,20\n");
        let indexed = index_by_date(t).unwrap();
        assert_eq!(indexed.index_name, "OrderDate");
        assert_eq!(
            indexed.dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            ]
        );
        // The index column is removed from the remaining table.
        assert!(indexed.table.column("OrderDate").is_none());
        assert!(indexed.table.column("ShipDate").is_some());
    }

    #[test]
    fn missing_date_column_is_reported() {
        let t = table("Region,Sales\nNorth,1\n");
        assert!(matches!(index_by_date(t), Err(IngestError::MissingDateColumn)));
    }

    #[test]
    fn unparseable_date_fails_whole_ingestion() {
        let t = table("Date,Sales\n2023-01-01,1\nnot-a-date,2\n");
        match index_by_date(t) {
            Err(IngestError::DateParse { column, value }) => {
                assert_eq!(column, "Date");
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected DateParse, got {:?}", other.map(|t| t.index_name)),
        }
    }

    #[test]
    fn several_date_formats_are_accepted() {
        for cell in ["2023-03-31", "2023/03/31", "03/31/2023", "31-03-2023"] {
            assert!(parse_date(cell).is_some(), "failed to parse {}", cell);
        }
        assert!(parse_date("31st of March").is_none());
    }
}
