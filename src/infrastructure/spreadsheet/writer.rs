// ============================================================
// TABLE & REPORT WRITER
// ============================================================
// Persist cleaned tables and analysis reports as CSV/JSON

use csv::Writer;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::analysis::{AnalysisReport, TermCount};
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const TIME_TRENDS_FILE: &str = "time_trends.csv";
pub const COMMON_PHRASES_FILE: &str = "common_phrases.csv";
pub const COMMON_WORDS_FILE: &str = "common_words.csv";
pub const REPORT_JSON_FILE: &str = "analysis_report.json";

fn csv_err(path: &Path, e: csv::Error) -> AppError {
    AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
}

fn create_writer(path: &Path) -> Result<Writer<std::fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Writer::from_path(path).map_err(|e| csv_err(path, e))
}

/// Write a table as CSV. Missing cells are written empty.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    if matches!(extension.as_deref(), Some("xlsx" | "xls" | "xlsm" | "ods")) {
        return Err(AppError::ValidationError(format!(
            "Cannot write workbook format to {}; use a .csv output path",
            path.display()
        )));
    }

    let mut writer = create_writer(path)?;
    writer
        .write_record(&table.headers)
        .map_err(|e| csv_err(path, e))?;

    for row in &table.rows {
        writer
            .write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))
            .map_err(|e| csv_err(path, e))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_term_counts(path: &Path, header: &str, terms: &[TermCount]) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record([header, "Count"])
        .map_err(|e| csv_err(path, e))?;
    for term in terms {
        writer
            .write_record([term.term.as_str(), term.count.to_string().as_str()])
            .map_err(|e| csv_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every section of an analysis report into `dir`.
/// Returns the paths written.
pub fn write_report(report: &AnalysisReport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    // Categories
    let path = dir.join(CATEGORIES_FILE);
    let mut writer = create_writer(&path)?;
    writer
        .write_record(["Category", "Count"])
        .map_err(|e| csv_err(&path, e))?;
    for entry in &report.category_counts {
        writer
            .write_record([entry.category.as_str(), entry.count.to_string().as_str()])
            .map_err(|e| csv_err(&path, e))?;
    }
    writer.flush()?;
    written.push(path);

    // Time trends, one row per month and one column per category
    if report.time_trends.as_ref().is_some_and(|t| !t.is_empty()) {
        let path = dir.join(TIME_TRENDS_FILE);
        let categories: Vec<&str> = report
            .category_counts
            .iter()
            .map(|c| c.category.as_str())
            .collect();

        let mut writer = create_writer(&path)?;
        let mut header = vec!["Month"];
        header.extend(categories.iter().copied());
        writer.write_record(&header).map_err(|e| csv_err(&path, e))?;

        for month in report.trend_months() {
            let mut record = vec![month.clone()];
            record.extend(
                categories
                    .iter()
                    .map(|category| report.trend_count(&month, category).to_string()),
            );
            writer.write_record(&record).map_err(|e| csv_err(&path, e))?;
        }
        writer.flush()?;
        written.push(path);
    }

    let path = dir.join(COMMON_PHRASES_FILE);
    write_term_counts(&path, "Phrase", &report.top_bigrams)?;
    written.push(path);

    let path = dir.join(COMMON_WORDS_FILE);
    write_term_counts(&path, "Word", &report.top_words)?;
    written.push(path);

    let path = dir.join(REPORT_JSON_FILE);
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Internal(format!("Failed to serialize report: {}", e)))?;
    std::fs::write(&path, json)?;
    written.push(path);

    info!("Wrote {} report files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{CategoryCount, MonthlyTrend};

    #[test]
    fn test_write_table_leaves_missing_cells_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cleaned.csv");
        let table = Table::new(
            vec!["Subject".to_string(), "Description".to_string()],
            vec![vec![Some("Login".to_string()), None]],
        );

        write_table(&table, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Subject,Description\nLogin,\n");
    }

    #[test]
    fn test_write_table_rejects_workbook_extension() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_table(&Table::default(), &dir.path().join("out.xlsx"));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_write_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = AnalysisReport {
            rows_analyzed: 3,
            category_counts: vec![
                CategoryCount {
                    category: "Login".to_string(),
                    count: 2,
                },
                CategoryCount {
                    category: "Other".to_string(),
                    count: 1,
                },
            ],
            time_trends: Some(vec![MonthlyTrend {
                month: "2024-03".to_string(),
                category: "Login".to_string(),
                count: 2,
            }]),
            undated_rows: 1,
            top_bigrams: vec![TermCount::new("reset password", 2)],
            top_words: vec![TermCount::new("password", 2)],
        };

        let written = write_report(&report, dir.path()).unwrap();
        assert_eq!(written.len(), 5);

        let trends = std::fs::read_to_string(dir.path().join(TIME_TRENDS_FILE)).unwrap();
        assert_eq!(trends, "Month,Login,Other\n2024-03,2,0\n");

        let phrases = std::fs::read_to_string(dir.path().join(COMMON_PHRASES_FILE)).unwrap();
        assert_eq!(phrases, "Phrase,Count\nreset password,2\n");
    }
}
