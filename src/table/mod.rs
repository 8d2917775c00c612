//! CSV tables feeding the column line plot and the bar plot.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("column {0:?} not found (available: {1})")]
    MissingColumn(String, String),
    #[error("row {row}, column {column:?}: {value:?} is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },
    #[error("table has no data rows")]
    Empty,
}

/// A header row plus string cells, as read from a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: std::io::Read>(rdr: R) -> Result<Self, TableError> {
        Self::from_csv(csv::Reader::from_reader(rdr))
    }

    fn from_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self, TableError> {
        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        if rows.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string(), self.headers.join(", ")))
    }

    /// Cells of a column as strings.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>, TableError> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map(|c| c.trim().to_string()).unwrap_or_default())
            .collect())
    }

    /// Cells of a column parsed as numbers. Row numbers in errors are 1-based data rows.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cell = row.get(idx).map(|c| c.trim()).unwrap_or_default();
                cell.parse::<f64>().map_err(|_| TableError::NotNumeric {
                    row: i + 1,
                    column: name.to_string(),
                    value: cell.to_string(),
                })
            })
            .collect()
    }

    pub fn first_header(&self) -> Option<&str> {
        self.headers.first().map(String::as_str)
    }
}
