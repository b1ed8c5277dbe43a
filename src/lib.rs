pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use app::run;
pub use application::{Categorizer, PiiScrubber, TableScrubber, TicketAnalysis};
pub use domain::error::{AppError, Result};
