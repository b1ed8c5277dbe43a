// ============================================================
// SCRUB REPORT
// ============================================================
// What a scrub run touched, for logging and auditing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Individual removal passes of the scrubbing pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionPass {
    StudentNumber,
    RowStudentNumber,
    Birthdate,
    NameList,
    ContactName,
    Email,
    Phone,
    NamedEntity,
}

impl RedactionPass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionPass::StudentNumber => "student_number",
            RedactionPass::RowStudentNumber => "row_student_number",
            RedactionPass::Birthdate => "birthdate",
            RedactionPass::NameList => "name_list",
            RedactionPass::ContactName => "contact_name",
            RedactionPass::Email => "email",
            RedactionPass::Phone => "phone",
            RedactionPass::NamedEntity => "named_entity",
        }
    }
}

impl std::fmt::Display for RedactionPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of scrubbing a ticket table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrubReport {
    /// Number of rows in the table
    pub rows_processed: usize,

    /// Columns that were scrubbed
    pub cleaned_columns: Vec<String>,

    /// Configured clean columns absent from the input
    pub missing_columns: Vec<String>,

    /// Columns that were dropped
    pub removed_columns: Vec<String>,

    /// Configured remove columns absent from the input
    pub unremovable_columns: Vec<String>,

    /// Cells whose text changed
    pub cells_changed: usize,

    /// Number of removed matches per pass
    pub removals: BTreeMap<RedactionPass, usize>,
}

impl ScrubReport {
    pub fn record(&mut self, pass: RedactionPass, count: usize) {
        if count > 0 {
            *self.removals.entry(pass).or_insert(0) += count;
        }
    }

    pub fn total_removals(&self) -> usize {
        self.removals.values().sum()
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let passes = self
            .removals
            .iter()
            .map(|(pass, count)| format!("{}={}", pass, count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Scrub Report ({} rows):\n\
             - Cleaned columns: {:?}\n\
             - Removed columns: {:?}\n\
             - Cells changed: {}\n\
             - Removals: {}",
            self.rows_processed,
            self.cleaned_columns,
            self.removed_columns,
            self.cells_changed,
            if passes.is_empty() { "none".to_string() } else { passes }
        )
    }
}
