// ============================================================
// TICKET TABLE DOMAIN LAYER
// ============================================================
// In-memory representation of a ticket spreadsheet
// No I/O, no external dependencies

mod ticket_table;

pub use ticket_table::{Cell, Row, Table};
