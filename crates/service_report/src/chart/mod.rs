//! Line charts of a scenario sweep.
//!
//! Two charts share the market move (in percent) on the x axis:
//!
//! - [`ChartKind::PnlComparison`]: direct ownership vs swap net PnL
//! - [`ChartKind::ReturnOnCollateral`]: swap return on collateral in percent
//!
//! Charts are laid out as SVG documents with title, axis labels, grid lines
//! and a legend, then rasterised to PNG. An empty scenario set still renders
//! a complete chart frame with no data line.

mod raster;
mod svg;

pub use raster::{raster_size, svg_to_png, RASTER_SCALE};

use std::fs;
use std::path::{Path, PathBuf};

use pricer_trs::{ScenarioRecord, ScenarioSet};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::sink::{ensure_parent_dir, ScenarioSink};

const DIRECT_COLOR: &str = "#1f77b4";
const TRS_COLOR: &str = "#ff7f0e";

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label
    pub label: String,
    /// Stroke colour
    pub color: &'static str,
    /// `(x, y)` points in plotting order
    pub points: Vec<(f64, f64)>,
}

/// A titled line chart with labelled axes.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Lines to draw, in legend order
    pub series: Vec<Series>,
}

impl LineChart {
    /// Render as an SVG document.
    pub fn to_svg(&self) -> String {
        svg::render(self)
    }

    /// Render as PNG image bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        svg_to_png(&self.to_svg())
    }
}

/// The charts produced for a scenario sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Direct ownership PnL against swap net PnL
    PnlComparison,
    /// Swap return on collateral, showing the embedded leverage
    ReturnOnCollateral,
}

impl ChartKind {
    /// All chart kinds in output order
    pub fn all() -> [Self; 2] {
        [Self::PnlComparison, Self::ReturnOnCollateral]
    }

    /// Chart title
    pub fn title(&self) -> &'static str {
        match self {
            Self::PnlComparison => "Direct vs TRS PnL",
            Self::ReturnOnCollateral => "TRS Return on Collateral (Hidden Leverage)",
        }
    }

    /// Log name
    pub fn name(&self) -> &'static str {
        match self {
            Self::PnlComparison => "pnl_chart",
            Self::ReturnOnCollateral => "return_on_collateral_chart",
        }
    }

    /// Build the chart for `set`.
    pub fn build(&self, set: &ScenarioSet) -> LineChart {
        let series_from =
            |label: &str, color: &'static str, value: fn(&ScenarioRecord) -> f64| Series {
                label: label.to_string(),
                color,
                points: set.iter().map(|r| (r.move_pct(), value(r))).collect(),
            };

        match self {
            Self::PnlComparison => LineChart {
                title: self.title().to_string(),
                x_label: "Market Move (%)".to_string(),
                y_label: "PnL (£)".to_string(),
                series: vec![
                    series_from("Direct Ownership PnL", DIRECT_COLOR, |r| r.direct_pnl),
                    series_from("TRS Net PnL", TRS_COLOR, |r| r.trs_net_pnl),
                ],
            },
            Self::ReturnOnCollateral => LineChart {
                title: self.title().to_string(),
                x_label: "Market Move (%)".to_string(),
                y_label: "Return on Collateral (%)".to_string(),
                series: vec![series_from(
                    "TRS % Return on Collateral",
                    DIRECT_COLOR,
                    |r| r.return_on_collateral_pct(),
                )],
            },
        }
    }
}

/// Writes one chart kind to a PNG file.
#[derive(Debug, Clone)]
pub struct ChartWriter {
    kind: ChartKind,
    path: PathBuf,
}

impl ChartWriter {
    /// Create a writer for `kind` targeting `path`.
    pub fn new(kind: ChartKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Chart kind being written
    pub fn kind(&self) -> ChartKind {
        self.kind
    }
}

impl ScenarioSink for ChartWriter {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn destination(&self) -> &Path {
        &self.path
    }

    fn write(&self, set: &ScenarioSet) -> Result<PathBuf> {
        ensure_parent_dir(&self.path)?;
        let image = self.kind.build(set).to_png()?;
        fs::write(&self.path, &image).map_err(|e| ReportError::write(&self.path, e))?;

        info!(
            path = %self.path.display(),
            chart = self.kind.name(),
            bytes = image.len(),
            "Chart written"
        );
        Ok(self.path.clone())
    }
}
