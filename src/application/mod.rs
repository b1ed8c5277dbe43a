pub mod use_cases;

pub use use_cases::categorizer::Categorizer;
pub use use_cases::pii_scrubber::PiiScrubber;
pub use use_cases::table_scrubber::TableScrubber;
pub use use_cases::ticket_analysis::TicketAnalysis;
