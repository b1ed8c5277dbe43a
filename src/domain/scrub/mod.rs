// ============================================================
// PII SCRUB DOMAIN LAYER
// ============================================================
// Configuration, per-row context and reporting for PII removal

mod row_context;
mod scrub_config;
mod scrub_report;

pub use row_context::RowContext;
pub use scrub_config::ScrubConfig;
pub use scrub_report::{RedactionPass, ScrubReport};
