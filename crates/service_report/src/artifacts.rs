//! Artifact layout and the combined write of table and charts.

use std::path::{Component, Path, PathBuf};

use pricer_trs::ScenarioSet;
use tracing::info;

use crate::chart::{ChartKind, ChartWriter};
use crate::error::Result;
use crate::sink::ScenarioSink;
use crate::table::TableWriter;

/// Table path relative to the output root
pub const TABLE_FILE: &str = "data/trs_results.csv";
/// PnL comparison chart path relative to the output root
pub const PNL_CHART_FILE: &str = "images/trs_pnl.png";
/// Return on collateral chart path relative to the output root
pub const ROC_CHART_FILE: &str = "images/trs_return_on_collateral.png";

/// Destination paths of the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Results table
    pub table: PathBuf,
    /// Direct vs swap PnL chart
    pub pnl_chart: PathBuf,
    /// Return on collateral chart
    pub roc_chart: PathBuf,
}

impl OutputPaths {
    /// Resolve the standard layout under `root`.
    ///
    /// A root of `.` yields plain relative paths (`data/trs_results.csv`).
    pub fn under(root: impl AsRef<Path>) -> Self {
        let mut root = root.as_ref();
        if root.components().eq([Component::CurDir]) {
            root = Path::new("");
        }
        Self {
            table: root.join(TABLE_FILE),
            pnl_chart: root.join(PNL_CHART_FILE),
            roc_chart: root.join(ROC_CHART_FILE),
        }
    }

    /// Paths in output order: table, PnL chart, return chart.
    pub fn all(&self) -> [&Path; 3] {
        [&self.table, &self.pnl_chart, &self.roc_chart]
    }

    /// Sinks for every artifact, in the same order as [`OutputPaths::all`].
    pub fn sinks(&self) -> Vec<Box<dyn ScenarioSink>> {
        vec![
            Box::new(TableWriter::new(&self.table)),
            Box::new(ChartWriter::new(ChartKind::PnlComparison, &self.pnl_chart)),
            Box::new(ChartWriter::new(
                ChartKind::ReturnOnCollateral,
                &self.roc_chart,
            )),
        ]
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::under(".")
    }
}

/// Write the table and both charts for `set`.
///
/// The table is written alongside the two charts on the rayon pool.
/// Returns the written paths in output order, or the first error.
pub fn write_all(set: &ScenarioSet, paths: &OutputPaths) -> Result<Vec<PathBuf>> {
    let sinks = paths.sinks();
    let (table, charts) = match sinks.split_first() {
        Some(split) => split,
        None => return Ok(Vec::new()),
    };

    let (table_result, chart_results) = rayon::join(
        || table.write(set),
        || {
            charts
                .iter()
                .map(|sink| sink.write(set))
                .collect::<Result<Vec<_>>>()
        },
    );

    let mut written = vec![table_result?];
    written.extend(chart_results?);

    info!(
        artifacts = written.len(),
        records = set.len(),
        "All artifacts written"
    );
    Ok(written)
}
