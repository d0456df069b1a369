//! CSV table output.
//!
//! One row per scenario, each field rounded independently for display:
//! the move in percent to 1 place, money columns to 2 places and the
//! return on collateral as a fraction to 4 places. Rounding is exact on
//! the binary value with ties to even, and numbers are printed in their
//! shortest round-trip form (`-50000.0`, `-0.25`, `-0.0`). Records end in
//! CRLF.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pricer_trs::{ScenarioRecord, ScenarioSet};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::sink::{ensure_parent_dir, ScenarioSink};

/// Fixed column headers.
pub const TABLE_HEADER: [&str; 6] = [
    "Market Move (%)",
    "Direct Ownership PnL (£)",
    "TRS PnL before Fee (£)",
    "Financing Fee (£)",
    "TRS Net PnL (£)",
    "TRS % Return on Collateral",
];

const MOVE_PLACES: usize = 1;
const MONEY_PLACES: usize = 2;
const RETURN_PLACES: usize = 4;

/// Round `value` to `places` decimal places.
///
/// Uses the exact decimal expansion of the float, so `2.675` (stored just
/// below) rounds to `2.67`. Non-finite values pass through unchanged.
pub fn round_to_places(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Shortest round-trip text for a float, keeping `.0` on integral values.
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Display row for one record, already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    /// Market move in percent
    pub move_pct: f64,
    /// Direct ownership PnL
    pub direct_pnl: f64,
    /// Swap PnL before financing
    pub trs_before_fee: f64,
    /// Financing fee
    pub financing_fee: f64,
    /// Swap net PnL
    pub trs_net_pnl: f64,
    /// Return on collateral as a fraction
    pub trs_return_on_collateral: f64,
}

impl TableRow {
    /// Round a record for display.
    pub fn from_record(record: &ScenarioRecord) -> Self {
        Self {
            move_pct: round_to_places(record.move_pct(), MOVE_PLACES),
            direct_pnl: round_to_places(record.direct_pnl, MONEY_PLACES),
            trs_before_fee: round_to_places(record.trs_before_fee, MONEY_PLACES),
            financing_fee: round_to_places(record.financing_fee, MONEY_PLACES),
            trs_net_pnl: round_to_places(record.trs_net_pnl, MONEY_PLACES),
            trs_return_on_collateral: round_to_places(
                record.trs_return_on_collateral,
                RETURN_PLACES,
            ),
        }
    }

    /// Formatted fields in column order.
    pub fn fields(&self) -> [String; 6] {
        [
            format_number(self.move_pct),
            format_number(self.direct_pnl),
            format_number(self.trs_before_fee),
            format_number(self.financing_fee),
            format_number(self.trs_net_pnl),
            format_number(self.trs_return_on_collateral),
        ]
    }
}

/// Write the header and one row per record to `writer`.
pub fn render_table<W: Write>(set: &ScenarioSet, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv_writer.write_record(TABLE_HEADER)?;
    for record in set {
        csv_writer.write_record(TableRow::from_record(record).fields())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the table to an in-memory string.
pub fn table_to_string(set: &ScenarioSet) -> Result<String> {
    let mut buffer = Vec::new();
    render_table(set, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ReportError::Csv(io::Error::new(io::ErrorKind::InvalidData, e).into()))
}

/// Writes the results table to a CSV file.
#[derive(Debug, Clone)]
pub struct TableWriter {
    path: PathBuf,
}

impl TableWriter {
    /// Create a writer targeting `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ScenarioSink for TableWriter {
    fn name(&self) -> &'static str {
        "table"
    }

    fn destination(&self) -> &Path {
        &self.path
    }

    fn write(&self, set: &ScenarioSet) -> Result<PathBuf> {
        ensure_parent_dir(&self.path)?;
        let file = File::create(&self.path).map_err(|e| ReportError::write(&self.path, e))?;
        render_table(set, file)?;

        info!(
            path = %self.path.display(),
            rows = set.len(),
            "Results table written"
        );
        Ok(self.path.clone())
    }
}
