//! CSV export for learned Q-tables
//!
//! This module provides functionality to dump a learned Q-table to CSV for
//! host-side analysis. Export is write-only; the crate never reads a table
//! back from CSV.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{Result, maze::State, q_learning::QTable};

/// Exporter for Q-table CSV files
pub struct QTableCsvExporter;

impl QTableCsvExporter {
    /// Export a Q-table to CSV
    ///
    /// Writes a header row of successor indices, then one row per state with
    /// that state's full Q-value row.
    ///
    /// # Returns
    /// Number of state rows written
    pub fn export(table: &QTable, path: &Path) -> Result<usize> {
        let mut writer = BufWriter::new(File::create(path)?);

        Self::write_header(&mut writer, table.n_states())?;
        for from in 0..table.n_states() {
            Self::write_row(&mut writer, from, table.row(from))?;
        }

        writer.flush()?;
        Ok(table.n_states())
    }

    /// Write CSV header
    fn write_header<W: Write>(writer: &mut W, n_states: usize) -> Result<()> {
        write!(writer, "state")?;
        for to in 0..n_states {
            write!(writer, ",{to}")?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Write a single state row to CSV
    fn write_row<W: Write>(writer: &mut W, from: State, row: &[f64]) -> Result<()> {
        write!(writer, "{from}")?;
        for &value in row {
            write!(writer, ",{}", Self::fmt_float(value))?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Format float for CSV (handles NaN/Inf)
    fn fmt_float(value: f64) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else if value.is_infinite() {
            if value.is_sign_positive() {
                "inf".to_string()
            } else {
                "-inf".to_string()
            }
        } else {
            format!("{value:.6}")
        }
    }
}
