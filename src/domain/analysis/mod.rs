// ============================================================
// TICKET ANALYSIS DOMAIN LAYER
// ============================================================
// Category rules, analysis settings and the resulting report

mod analysis_config;
mod analysis_report;
mod category_rule;

pub use analysis_config::AnalysisConfig;
pub use analysis_report::{AnalysisReport, CategoryCount, MonthlyTrend, TermCount};
pub use category_rule::{default_category_rules, CategoryRule, OTHER_CATEGORY};
