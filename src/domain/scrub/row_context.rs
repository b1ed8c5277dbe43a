// ============================================================
// ROW CONTEXT
// ============================================================
// Per-row PII values that drive the targeted removal passes

use crate::domain::scrub::ScrubConfig;
use crate::domain::table::Table;

/// Known PII values for the row whose text is being cleaned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowContext {
    pub student_number: Option<String>,
    pub birthdate: Option<String>,
    pub contact_name: Option<String>,
}

impl RowContext {
    /// Read the context columns of a row. Absent columns and blank cells
    /// become `None`.
    pub fn from_row(table: &Table, row: usize, config: &ScrubConfig) -> Self {
        let read = |column: &str| {
            table
                .cell(row, column)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            student_number: read(&config.student_number_column),
            birthdate: read(&config.birthdate_column),
            contact_name: read(&config.contact_name_column),
        }
    }

    /// Student number with spreadsheet float artifacts removed
    /// (`41165988.0` -> `41165988`)
    pub fn normalized_student_number(&self) -> Option<String> {
        let raw = self.student_number.as_deref()?;
        let digits = raw.strip_suffix(".0").unwrap_or(raw).trim();

        if digits.is_empty() {
            None
        } else {
            Some(digits.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_reads_context_columns() {
        let table = Table::new(
            vec![
                "Description".to_string(),
                "Student Number".to_string(),
                "Contact Name".to_string(),
            ],
            vec![vec![
                Some("text".to_string()),
                Some("41165988.0".to_string()),
                Some("  ".to_string()),
            ]],
        );

        let ctx = RowContext::from_row(&table, 0, &ScrubConfig::default());

        assert_eq!(ctx.normalized_student_number().as_deref(), Some("41165988"));
        assert_eq!(ctx.contact_name, None);
        assert_eq!(ctx.birthdate, None);
    }
}
