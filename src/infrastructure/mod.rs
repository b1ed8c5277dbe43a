pub mod config;
pub mod ner;
pub mod spreadsheet;
