pub mod categorizer;
pub mod close_date;
pub mod frequency_analyzer;
pub mod pii_scrubber;
pub mod table_scrubber;
pub mod ticket_analysis;
