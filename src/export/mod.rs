//! Export functionality for analysis
//!
//! This module provides functionality to export learned data for outside
//! tools. Currently supports CSV export of Q-tables.

mod q_table_csv;

pub use q_table_csv::QTableCsvExporter;
