// ============================================================
// WORKBOOK READER
// ============================================================
// Read the first worksheet of an Excel/ODS workbook into a ticket table

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, Table};

/// Read the first worksheet. The first row is the header row.
pub fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        AppError::SpreadsheetError(format!(
            "Failed to open workbook {}: {}",
            path.display(),
            e
        ))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            AppError::SpreadsheetError(format!("No worksheet found in {}", path.display()))
        })?
        .map_err(|e| {
            AppError::SpreadsheetError(format!(
                "Failed to read worksheet range {}: {}",
                path.display(),
                e
            ))
        })?;

    let table = range_to_table(&range);
    debug!(
        "Read {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );

    Ok(table)
}

/// Convert a worksheet range into a table
pub fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| match cell_value(cell) {
                Some(name) => name.trim().to_string(),
                None => {
                    warn!("Header cell {} is empty; naming it 'Unnamed: {}'", idx, idx);
                    format!("Unnamed: {}", idx)
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .filter(|cells: &Vec<Cell>| cells.iter().any(|c| c.is_some()))
        .collect();

    Table::new(headers, body)
}

/// Render a cell as text. Empty and blank cells are missing.
fn cell_value(cell: &Data) -> Cell {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        // Integral floats (student numbers, ids) render without a fraction
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::DateTime(_) | Data::DateTimeIso(_) => Some(
            cell.as_datetime()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| cell.to_string()),
        ),
        other => Some(other.to_string()),
    }
}
