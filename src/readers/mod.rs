pub mod csv_table;
pub mod text_source;

pub use csv_table::{cell, CsvTable};
pub use text_source::{open_text, Compression};
