// ============================================================
// TABLE SCRUBBER USE CASE
// ============================================================
// Orchestrate loading, per-row PII scrubbing, column removal and output

use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::application::use_cases::pii_scrubber::PiiScrubber;
use crate::domain::error::Result;
use crate::domain::scrub::{RowContext, ScrubConfig, ScrubReport};
use crate::domain::table::Table;
use crate::infrastructure::spreadsheet::{load_table, write_table};

/// Scrubs PII from every configured column of a ticket table
pub struct TableScrubber {
    config: ScrubConfig,
    scrubber: PiiScrubber,
}

impl TableScrubber {
    pub fn new(config: ScrubConfig) -> Self {
        let scrubber = PiiScrubber::new(&config);
        Self { config, scrubber }
    }

    /// Use a preconfigured scrubber (e.g. with a custom entity recognizer)
    pub fn with_scrubber(config: ScrubConfig, scrubber: PiiScrubber) -> Self {
        Self { config, scrubber }
    }

    /// Load `input`, scrub it and write the result to `output`
    pub fn run(&self, input: &Path, output: &Path) -> Result<ScrubReport> {
        let start = Instant::now();

        let mut table = load_table(input)?;

        info!("Original columns: {:?}", table.headers);
        info!("Columns to clean: {:?}", self.config.columns_to_clean);
        info!("Columns to remove: {:?}", self.config.columns_to_remove);

        let report = self.scrub_table(&mut table);

        write_table(&table, output)?;

        info!(
            "Cleaned data saved to {} in {} ms",
            output.display(),
            start.elapsed().as_millis()
        );
        info!("Final columns: {:?}", table.headers);
        info!("{}", report.summary());

        Ok(report)
    }

    /// Scrub the configured columns in place, then drop the PII columns
    pub fn scrub_table(&self, table: &mut Table) -> ScrubReport {
        let mut report = ScrubReport {
            rows_processed: table.len(),
            ..Default::default()
        };

        // Context is read up front; the columns it comes from may be dropped below
        let contexts: Vec<RowContext> = (0..table.len())
            .map(|row| RowContext::from_row(table, row, &self.config))
            .collect();

        for column_name in &self.config.columns_to_clean {
            let Some(column) = table.column_index(column_name) else {
                warn!("Column '{}' not found in input file", column_name);
                report.missing_columns.push(column_name.clone());
                continue;
            };

            info!("Cleaning column '{}'", column_name);
            for (row, ctx) in table.rows.iter_mut().zip(&contexts) {
                let Some(value) = row.cells[column].as_deref() else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }

                let scrubbed = self.scrubber.scrub(value, ctx);
                for (pass, count) in &scrubbed.removals {
                    report.record(*pass, *count);
                }
                if scrubbed.text != value {
                    report.cells_changed += 1;
                }
                row.cells[column] = Some(scrubbed.text);
            }
            report.cleaned_columns.push(column_name.clone());
        }

        for column_name in &self.config.columns_to_remove {
            if table.drop_column(column_name) {
                report.removed_columns.push(column_name.clone());
            } else {
                warn!("Column '{}' not found - cannot remove", column_name);
                report.unremovable_columns.push(column_name.clone());
            }
        }

        info!("Removed columns: {:?}", report.removed_columns);
        report
    }
}

impl Default for TableScrubber {
    fn default() -> Self {
        Self::new(ScrubConfig::default())
    }
}
