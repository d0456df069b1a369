//! # pricer_trs: Direct Ownership vs Total Return Swap Scenarios
//!
//! ## Pricer Layer Role
//!
//! pricer_trs is the computational kernel of the simulator. It compares the
//! PnL of holding an asset outright with the PnL of the same exposure taken
//! through a financed total return swap, over a sweep of market moves:
//!
//! - Scenario inputs and validation (`params`)
//! - Market move grid with half-open `arange` stepping (`grid`)
//! - Per-move derived values (`record`)
//! - Sequential and Rayon-parallel evaluation (`evaluator`)
//! - Run-level analytics: leverage, break-even move, extremes (`summary`)
//!
//! The crate performs no I/O; table and chart output live in the service
//! layer.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_trs::{evaluate, ScenarioParameters};
//!
//! let set = evaluate(ScenarioParameters::default()).unwrap();
//! assert_eq!(set.len(), 9);
//!
//! // Market down 20%: the swap loses the move plus the financing fee
//! let crash = set.records()[0];
//! assert_eq!(crash.direct_pnl, -200_000.0);
//! assert_eq!(crash.trs_net_pnl, -250_000.0);
//! assert_eq!(crash.trs_return_on_collateral, -1.25);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for parameters, records and summaries

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod evaluator;
pub mod grid;
pub mod params;
pub mod record;
pub mod summary;

pub use error::{Result, TrsError};
pub use evaluator::{evaluate, ScenarioEvaluator, ScenarioSet, MAX_GRID_POINTS};
pub use grid::MoveGrid;
pub use params::ScenarioParameters;
pub use record::ScenarioRecord;
pub use summary::ScenarioSummary;
