//! Run-level analytics over a scenario set.

use crate::evaluator::ScenarioSet;
use crate::record::ScenarioRecord;

/// Headline figures for a scenario sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSummary {
    /// Number of evaluated scenarios
    pub scenario_count: usize,
    /// Financing fee charged in every scenario
    pub financing_fee: f64,
    /// Notional per unit of collateral
    pub leverage: f64,
    /// Market move at which the swap breaks even
    pub breakeven_move: f64,
    /// Lowest swap net PnL on the grid
    pub worst_net_pnl: Option<f64>,
    /// Highest swap net PnL on the grid
    pub best_net_pnl: Option<f64>,
    /// Lowest return on collateral on the grid
    pub worst_return_on_collateral: Option<f64>,
    /// Highest return on collateral on the grid
    pub best_return_on_collateral: Option<f64>,
}

impl ScenarioSummary {
    /// Summarise a scenario set.
    pub fn from_set(set: &ScenarioSet) -> Self {
        let params = set.parameters();
        let (worst_net_pnl, best_net_pnl) = extent(set.records(), |r| r.trs_net_pnl);
        let (worst_return_on_collateral, best_return_on_collateral) =
            extent(set.records(), |r| r.trs_return_on_collateral);

        Self {
            scenario_count: set.len(),
            financing_fee: params.financing_fee(),
            leverage: params.leverage(),
            breakeven_move: params.breakeven_move(),
            worst_net_pnl,
            best_net_pnl,
            worst_return_on_collateral,
            best_return_on_collateral,
        }
    }
}

fn extent<F>(records: &[ScenarioRecord], field: F) -> (Option<f64>, Option<f64>)
where
    F: Fn(&ScenarioRecord) -> f64,
{
    records
        .iter()
        .map(field)
        .fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), v| {
            (
                Some(lo.map_or(v, |lo| lo.min(v))),
                Some(hi.map_or(v, |hi| hi.max(v))),
            )
        })
}
