// ============================================================
// SPREADSHEET INFRASTRUCTURE LAYER
// ============================================================
// Workbook/CSV loading and CSV/JSON output

mod csv_reader;
mod writer;
mod xlsx_reader;

pub use csv_reader::CsvReader;
pub use writer::{
    write_report, write_table, CATEGORIES_FILE, COMMON_PHRASES_FILE, COMMON_WORDS_FILE,
    REPORT_JSON_FILE, TIME_TRENDS_FILE,
};
pub use xlsx_reader::read_workbook;

use std::path::Path;
use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// Load a ticket table, choosing the reader by file extension
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "Input file {} does not exist",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        "csv" | "tsv" | "txt" => CsvReader::read_file_auto_detect(path)?,
        other => {
            return Err(AppError::ValidationError(format!(
                "Unsupported input format '{}' for {}",
                other,
                path.display()
            )))
        }
    };

    let duplicates = table.duplicate_headers();
    if !duplicates.is_empty() {
        warn!(
            "Duplicate column headers in {}: {:?}; lookups use the first, removal drops all",
            path.display(),
            duplicates
        );
    }

    info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.headers,
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = load_table(Path::new("missing/data.xlsx"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let result = load_table(file.path());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_csv_round_trip_through_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.csv");
        let table = Table::new(
            vec!["Subject".to_string(), "Description".to_string()],
            vec![
                vec![Some("Visa".to_string()), Some("Study permit, expired".to_string())],
                vec![Some("Login".to_string()), None],
                vec![
                    Some("Portal".to_string()),
                    Some("step one; step two; step three; step four; error".to_string()),
                ],
                vec![
                    Some("Portal".to_string()),
                    Some("retry; refresh; logout; login; same error".to_string()),
                ],
            ],
        );

        write_table(&table, &path).unwrap();
        let loaded = load_table(&path).unwrap();

        assert_eq!(loaded, table);
    }
}
