// ============================================================
// ANALYSIS REPORT
// ============================================================
// Category distribution, monthly trends and common phrases

use serde::{Deserialize, Serialize};

/// Number of tickets assigned to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Tickets closed in a month for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Month as `YYYY-MM`
    pub month: String,
    pub category: String,
    pub count: usize,
}

/// A word or phrase with its number of occurrences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

impl TermCount {
    pub fn new(term: impl Into<String>, count: usize) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

/// Result of analyzing a ticket table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of rows analyzed
    pub rows_analyzed: usize,

    /// Category distribution, most frequent first
    pub category_counts: Vec<CategoryCount>,

    /// Monthly counts per category, `None` when the input has no date column
    pub time_trends: Option<Vec<MonthlyTrend>>,

    /// Rows whose close date was missing or malformed
    pub undated_rows: usize,

    /// Most common adjacent word pairs
    pub top_bigrams: Vec<TermCount>,

    /// Most common words
    pub top_words: Vec<TermCount>,
}

impl AnalysisReport {
    /// Distinct months present in the trends, ascending
    pub fn trend_months(&self) -> Vec<String> {
        let mut months: Vec<String> = self
            .time_trends
            .iter()
            .flatten()
            .map(|t| t.month.clone())
            .collect();
        months.sort();
        months.dedup();
        months
    }

    /// Count of a category in a month, zero when absent
    pub fn trend_count(&self, month: &str, category: &str) -> usize {
        self.time_trends
            .iter()
            .flatten()
            .find(|t| t.month == month && t.category == category)
            .map(|t| t.count)
            .unwrap_or(0)
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let categories = self
            .category_counts
            .iter()
            .map(|c| format!("{}={}", c.category, c.count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Ticket Analysis ({} rows):\n\
             - Categories: {}\n\
             - Months with trends: {}\n\
             - Undated rows: {}\n\
             - Top phrase: {}",
            self.rows_analyzed,
            categories,
            self.trend_months().len(),
            self.undated_rows,
            self.top_bigrams
                .first()
                .map(|b| format!("\"{}\" ({})", b.term, b.count))
                .unwrap_or_else(|| "none".to_string())
        )
    }
}
