//! # service_report: Table and Chart Output
//!
//! Service layer adapters that turn a [`pricer_trs::ScenarioSet`] into files:
//!
//! - [`table`]: CSV results table with per-column display rounding
//! - [`chart`]: PNG line charts (PnL comparison, return on collateral)
//! - [`artifacts`]: standard output layout and the combined write
//! - [`sink`]: the [`sink::ScenarioSink`] trait shared by all writers
//!
//! Every writer creates missing parent directories and overwrites existing
//! files.
//!
//! ```rust,no_run
//! use pricer_trs::{evaluate, ScenarioParameters};
//! use service_report::{write_all, OutputPaths};
//!
//! let set = evaluate(ScenarioParameters::default()).unwrap();
//! let written = write_all(&set, &OutputPaths::under("out")).unwrap();
//! assert_eq!(written.len(), 3);
//! ```

#![deny(missing_docs)]

pub mod artifacts;
pub mod chart;
pub mod error;
pub mod sink;
pub mod table;

pub use artifacts::{write_all, OutputPaths};
pub use error::{ReportError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifacts::{write_all, OutputPaths};
    pub use crate::chart::{raster_size, ChartKind, ChartWriter, LineChart, Series};
    pub use crate::error::{ReportError, Result};
    pub use crate::sink::ScenarioSink;
    pub use crate::table::{render_table, table_to_string, TableRow, TableWriter};
}
