// ============================================================
// TABLE TYPES
// ============================================================
// Rows of named text columns, loaded once and transformed in place

use serde::{Deserialize, Serialize};

/// A single cell value. `None` marks a missing value.
pub type Cell = Option<String>;

/// A single row in a ticket table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Cell values, aligned with `Table::headers`
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get a cell by column position
    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

/// A ticket table with a header row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from headers and raw cell rows.
    /// Short rows are padded with missing cells and long rows are truncated.
    pub fn new(headers: Vec<String>, raw_rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = raw_rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, None);
                Row::new(cells)
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get a cell of a row by column name
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All values of a column, or `None` if the column does not exist
    pub fn column_values(&self, name: &str) -> Option<Vec<Cell>> {
        let column = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.cells.get(column).cloned().flatten())
                .collect(),
        )
    }

    /// Header names that appear more than once, in first-seen order
    pub fn duplicate_headers(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (i, header) in self.headers.iter().enumerate() {
            if self.headers[..i].contains(header) && !duplicates.contains(&header.as_str()) {
                duplicates.push(header);
            }
        }
        duplicates
    }

    /// Drop every column with this name. Returns false if none exists.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let mut dropped = false;
        while let Some(column) = self.column_index(name) {
            self.headers.remove(column);
            for row in &mut self.rows {
                row.cells.remove(column);
            }
            dropped = true;
        }
        dropped
    }

    /// Append a column, or overwrite it if a column with that name exists
    pub fn push_column(&mut self, name: &str, values: Vec<Cell>) {
        let mut values = values;
        values.resize(self.rows.len(), None);

        match self.column_index(name) {
            Some(column) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.cells[column] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.cells.push(value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Subject".to_string(), "Contact Name".to_string()],
            vec![
                vec![Some("Login issue".to_string()), Some("Jane Doe".to_string())],
                vec![Some("Visa".to_string())],
            ],
        )
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.rows[1].cells.len(), 2);
        assert_eq!(table.cell(1, "Contact Name"), None);
        assert_eq!(table.cell(0, "Contact Name"), Some("Jane Doe"));
    }

    #[test]
    fn test_drop_column() {
        let mut table = sample();
        assert!(table.drop_column("Contact Name"));
        assert!(!table.drop_column("Contact Name"));
        assert_eq!(table.headers, vec!["Subject".to_string()]);
        assert!(table.rows.iter().all(|r| r.cells.len() == 1));
    }

    #[test]
    fn test_drop_column_removes_duplicates() {
        let mut table = Table::new(
            vec![
                "Contact Name".to_string(),
                "Subject".to_string(),
                "Contact Name".to_string(),
            ],
            vec![vec![
                Some("Jane Doe".to_string()),
                Some("Visa".to_string()),
                Some("J. Doe".to_string()),
            ]],
        );

        assert_eq!(table.duplicate_headers(), vec!["Contact Name"]);
        assert!(table.drop_column("Contact Name"));
        assert_eq!(table.headers, vec!["Subject".to_string()]);
        assert_eq!(table.rows[0].cells, vec![Some("Visa".to_string())]);
        assert!(table.duplicate_headers().is_empty());
    }

    #[test]
    fn test_push_column_appends_and_overwrites() {
        let mut table = sample();
        table.push_column("Category", vec![Some("Login".to_string())]);
        assert_eq!(table.cell(0, "Category"), Some("Login"));
        assert_eq!(table.cell(1, "Category"), None);

        table.push_column(
            "Category",
            vec![Some("Other".to_string()), Some("International".to_string())],
        );
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.cell(0, "Category"), Some("Other"));
        assert_eq!(table.cell(1, "Category"), Some("International"));
    }
}
