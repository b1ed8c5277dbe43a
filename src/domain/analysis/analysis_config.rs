// ============================================================
// ANALYSIS CONFIGURATION
// ============================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_category_rules, CategoryRule};

/// Configuration for ticket categorization and frequency statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Free-text column used for categorization and frequencies
    #[validate(length(min = 1))]
    pub text_column: String,

    /// Column holding the close timestamp (e.g. "2024-03-05, 2:15 p.m.")
    pub date_column: String,

    /// Name of the column the category is written to
    #[validate(length(min = 1))]
    pub category_column: String,

    /// Ordered topic rules
    #[validate(length(min = 1), nested)]
    pub categories: Vec<CategoryRule>,

    /// Number of most common bigrams to report (default: 20)
    #[validate(range(min = 1, max = 10000))]
    pub top_bigrams: usize,

    /// Number of most common words to report (default: 30)
    #[validate(range(min = 1, max = 10000))]
    pub top_words: usize,

    /// Only pair words from the same ticket. By default the descriptions are
    /// read as one stream, so the last word of a ticket pairs with the first
    /// word of the next.
    pub bigrams_within_ticket: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            text_column: "Description".to_string(),
            date_column: "Date/Time Closed".to_string(),
            category_column: "Category".to_string(),
            categories: default_category_rules(),
            top_bigrams: 20,
            top_words: 30,
            bigrams_within_ticket: false,
        }
    }
}
