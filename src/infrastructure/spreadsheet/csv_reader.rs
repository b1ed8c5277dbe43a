// ============================================================
// CSV READER
// ============================================================
// Parse CSV files into a ticket table with encoding and delimiter detection

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use std::path::Path;
use tracing::warn;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Cell, Table};

/// CSV reader producing a `Table`
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
        }
    }
}

impl CsvReader {
    /// Create a new CSV reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a CSV file, detecting its delimiter from the content
    pub fn read_file_auto_detect(path: &Path) -> Result<Table> {
        let content = Self::read_with_encoding_detection(path)?;
        let delimiter = Self::detect_delimiter(&content);

        Self::default()
            .with_delimiter(delimiter)
            .parse_content(&content)
    }

    /// Parse CSV content from string. The first record is the header row.
    pub fn parse_content(&self, content: &str) -> Result<Table> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > headers.len() {
                warn!(
                    "CSV row {} has {} fields but only {} headers; extra fields dropped",
                    index + 1,
                    record.len(),
                    headers.len()
                );
            }

            rows.push(Self::record_to_cells(&record));
        }

        Ok(Table::new(headers, rows))
    }

    /// Read file as UTF-8, falling back to Windows-1252 for legacy exports
    fn read_with_encoding_detection(path: &Path) -> Result<String> {
        let buffer = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        match String::from_utf8(buffer) {
            Ok(content) => Ok(content),
            Err(err) => {
                warn!(
                    "{} is not valid UTF-8, decoding as Windows-1252",
                    path.display()
                );
                let (decoded, _, _) = WINDOWS_1252.decode(err.as_bytes());
                Ok(decoded.into_owned())
            }
        }
    }

    fn record_to_cells(record: &StringRecord) -> Vec<Cell> {
        record
            .iter()
            .map(|value| {
                if value.trim().is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            })
            .collect()
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe).
    ///
    /// Each candidate parses a sample of records; quoted fields are honored,
    /// so delimiters inside ticket text do not count. The candidate whose
    /// records most often match the header width wins, then the wider header.
    pub fn detect_delimiter(content: &str) -> u8 {
        const SAMPLE_RECORDS: usize = 10;
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = (0usize, 0usize);

        for &delimiter in &candidates {
            let mut reader = ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(false)
                .flexible(true)
                .from_reader(content.as_bytes());

            let widths: Vec<Option<usize>> = reader
                .records()
                .take(SAMPLE_RECORDS)
                .map(|record| record.ok().map(|r| r.len()))
                .collect();

            let Some(Some(header_width)) = widths.first().copied() else {
                continue;
            };
            if header_width < 2 {
                continue;
            }

            let consistent = widths
                .iter()
                .filter(|w| **w == Some(header_width))
                .count();
            let score = (consistent, header_width);

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_csv() {
        let content = "Subject,Description\nLogin,Cannot log in\nVisa,";
        let table = CsvReader::new().parse_content(content).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers, vec!["Subject", "Description"]);
        assert_eq!(table.cell(0, "Description"), Some("Cannot log in"));
        assert_eq!(table.cell(1, "Description"), None);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let content = "Subject,Description\n\"Hello, world\",\"Line one\nline two\"";
        let table = CsvReader::new().parse_content(content).unwrap();

        assert_eq!(table.cell(0, "Subject"), Some("Hello, world"));
        assert_eq!(table.cell(0, "Description"), Some("Line one\nline two"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let content = "\u{feff}Subject\nLogin";
        let table = CsvReader::new().parse_content(content).unwrap();
        assert!(table.has_column("Subject"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvReader::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvReader::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvReader::detect_delimiter("a\tb\tc\nd\te\tf"), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_text() {
        let content = "Subject,Description\n\
                       Login,\"step one; step two; step three; step four; error\"\n\
                       Visa,\"permit; renewal; status\"\n";
        assert_eq!(CsvReader::detect_delimiter(content), b',');

        let semicolons = "Subject;Description\nLogin;\"Hi, there, again\"\n";
        assert_eq!(CsvReader::detect_delimiter(semicolons), b';');
    }

    #[test]
    fn test_windows_1252_fallback() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        // "Café" with 0xE9 for é, invalid as UTF-8
        file.write_all(b"Subject\nCaf\xe9\n").unwrap();

        let table = CsvReader::read_file_auto_detect(file.path()).unwrap();
        assert_eq!(table.cell(0, "Subject"), Some("Café"));
    }
}
