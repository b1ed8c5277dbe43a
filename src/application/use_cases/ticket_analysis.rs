// ============================================================
// TICKET ANALYSIS USE CASE
// ============================================================
// Categorize tickets, count categories per month and find common phrases

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::application::use_cases::categorizer::Categorizer;
use crate::application::use_cases::close_date::{month_key, parse_close_date};
use crate::application::use_cases::frequency_analyzer::FrequencyAnalyzer;
use crate::domain::analysis::{AnalysisConfig, AnalysisReport, CategoryCount, MonthlyTrend};
use crate::domain::error::Result;
use crate::domain::table::{Cell, Table};
use crate::infrastructure::spreadsheet::{load_table, write_report};

/// Ticket categorization and frequency statistics
pub struct TicketAnalysis {
    config: AnalysisConfig,
    categorizer: Categorizer,
    frequencies: FrequencyAnalyzer,
}

impl TicketAnalysis {
    pub fn new(config: AnalysisConfig) -> Self {
        let categorizer = Categorizer::new(config.categories.clone());
        let frequencies = FrequencyAnalyzer::new(config.top_bigrams, config.top_words)
            .with_bigrams_within_text(config.bigrams_within_ticket);

        Self {
            config,
            categorizer,
            frequencies,
        }
    }

    /// Load `input`, analyze it and write the report files into `output_dir`
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<AnalysisReport> {
        let start = Instant::now();

        info!("Loading data...");
        let mut table = load_table(input)?;

        info!("Analyzing...");
        let report = self.analyze_table(&mut table);

        info!("Saving results...");
        write_report(&report, output_dir)?;

        info!(
            "Analysis of {} rows finished in {} ms",
            report.rows_analyzed,
            start.elapsed().as_millis()
        );
        info!("{}", report.summary());

        Ok(report)
    }

    /// Add the category column and compute the report
    pub fn analyze_table(&self, table: &mut Table) -> AnalysisReport {
        let texts: Vec<Cell> = match table.column_values(&self.config.text_column) {
            Some(values) => values,
            None => {
                warn!(
                    "Column '{}' not found; every ticket is categorized as Other",
                    self.config.text_column
                );
                vec![None; table.len()]
            }
        };

        let categories: Vec<String> = texts
            .iter()
            .map(|text| self.categorizer.categorize(text.as_deref()).to_string())
            .collect();

        let (time_trends, undated_rows) = match table.column_values(&self.config.date_column) {
            Some(dates) => {
                let (trends, undated) = self.monthly_trends(&dates, &categories);
                (Some(trends), undated)
            }
            None => {
                info!(
                    "Column '{}' not found; skipping time trends",
                    self.config.date_column
                );
                (None, 0)
            }
        };

        let frequencies = self
            .frequencies
            .analyze(texts.iter().filter_map(|t| t.as_deref()));

        let category_counts = self.category_counts(&categories);

        table.push_column(
            &self.config.category_column,
            categories.into_iter().map(Some).collect(),
        );

        AnalysisReport {
            rows_analyzed: table.len(),
            category_counts,
            time_trends,
            undated_rows,
            top_bigrams: frequencies.top_bigrams,
            top_words: frequencies.top_words,
        }
    }

    /// Counts per category, most frequent first; ties follow rule order
    fn category_counts(&self, categories: &[String]) -> Vec<CategoryCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for category in categories {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();

        counts.sort_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| {
                self.categorizer
                    .rank(&a.category)
                    .cmp(&self.categorizer.rank(&b.category))
            })
        });
        counts
    }

    /// Tickets per (month, category). Rows without a parseable date are
    /// excluded and counted separately.
    fn monthly_trends(&self, dates: &[Cell], categories: &[String]) -> (Vec<MonthlyTrend>, usize) {
        let mut buckets: HashMap<(String, &str), usize> = HashMap::new();
        let mut undated = 0;

        for (date, category) in dates.iter().zip(categories) {
            match date.as_deref().and_then(parse_close_date) {
                Some(date) => {
                    *buckets.entry((month_key(&date), category.as_str())).or_insert(0) += 1;
                }
                None => undated += 1,
            }
        }

        if undated > 0 {
            warn!("{} rows have a missing or malformed close date", undated);
        }

        let mut trends: Vec<MonthlyTrend> = buckets
            .into_iter()
            .map(|((month, category), count)| MonthlyTrend {
                month,
                category: category.to_string(),
                count,
            })
            .collect();

        trends.sort_by(|a, b| {
            a.month.cmp(&b.month).then_with(|| {
                self.categorizer
                    .rank(&a.category)
                    .cmp(&self.categorizer.rank(&b.category))
            })
        });

        (trends, undated)
    }
}

impl Default for TicketAnalysis {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
