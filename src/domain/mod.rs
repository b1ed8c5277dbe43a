pub mod analysis;
pub mod error;
pub mod scrub;
pub mod table;
