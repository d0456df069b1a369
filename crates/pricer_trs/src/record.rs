//! Per-scenario derived values.

use crate::params::ScenarioParameters;

/// Direct ownership and swap PnL for one market move.
///
/// Every field is derived from the parameters and the move; records are
/// never modified after evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioRecord {
    /// Fractional market move
    pub market_move: f64,
    /// PnL from holding the asset outright
    pub direct_pnl: f64,
    /// Swap PnL before financing (same exposure as direct ownership)
    pub trs_before_fee: f64,
    /// Financing cost over the period, negative for a long notional
    pub financing_fee: f64,
    /// Swap PnL after financing
    pub trs_net_pnl: f64,
    /// Net swap PnL as a fraction of posted collateral
    pub trs_return_on_collateral: f64,
}

impl ScenarioRecord {
    /// Evaluate a single market move.
    ///
    /// # Examples
    /// ```
    /// use pricer_trs::{ScenarioParameters, ScenarioRecord};
    ///
    /// let record = ScenarioRecord::evaluate(&ScenarioParameters::default(), 0.0);
    /// assert_eq!(record.trs_net_pnl, -50_000.0);
    /// assert_eq!(record.trs_return_on_collateral, -0.25);
    /// ```
    pub fn evaluate(params: &ScenarioParameters, market_move: f64) -> Self {
        let direct_pnl = params.notional * market_move;
        let trs_before_fee = direct_pnl;
        let financing_fee = params.financing_fee();
        let trs_net_pnl = trs_before_fee + financing_fee;

        Self {
            market_move,
            direct_pnl,
            trs_before_fee,
            financing_fee,
            trs_net_pnl,
            trs_return_on_collateral: trs_net_pnl / params.collateral,
        }
    }

    /// Market move in percent.
    #[inline]
    pub fn move_pct(&self) -> f64 {
        self.market_move * 100.0
    }

    /// Return on collateral in percent.
    #[inline]
    pub fn return_on_collateral_pct(&self) -> f64 {
        self.trs_return_on_collateral * 100.0
    }

    /// Swap minus direct ownership PnL; always the financing fee.
    #[inline]
    pub fn financing_drag(&self) -> f64 {
        self.trs_net_pnl - self.direct_pnl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_params() -> ScenarioParameters {
        ScenarioParameters::default()
    }

    #[test]
    fn test_flat_market() {
        let record = ScenarioRecord::evaluate(&default_params(), 0.0);
        assert_eq!(record.direct_pnl, 0.0);
        assert_eq!(record.trs_before_fee, 0.0);
        assert_relative_eq!(record.financing_fee, -50_000.0);
        assert_relative_eq!(record.trs_net_pnl, -50_000.0);
        assert_relative_eq!(record.trs_return_on_collateral, -0.25);
    }

    #[test]
    fn test_up_twenty_percent() {
        let record = ScenarioRecord::evaluate(&default_params(), 0.20);
        assert_relative_eq!(record.direct_pnl, 200_000.0);
        assert_relative_eq!(record.trs_net_pnl, 150_000.0);
        assert_relative_eq!(record.trs_return_on_collateral, 0.75);
    }

    #[test]
    fn test_down_twenty_percent() {
        let record = ScenarioRecord::evaluate(&default_params(), -0.20);
        assert_relative_eq!(record.direct_pnl, -200_000.0);
        assert_relative_eq!(record.trs_net_pnl, -250_000.0);
        assert_relative_eq!(record.trs_return_on_collateral, -1.25);
    }

    #[test]
    fn test_before_fee_matches_direct() {
        let record = ScenarioRecord::evaluate(&default_params(), 0.137);
        assert_eq!(record.trs_before_fee, record.direct_pnl);
    }

    #[test]
    fn test_breakeven_move_zeroes_net_pnl() {
        let params = default_params();
        let record = ScenarioRecord::evaluate(&params, params.breakeven_move());
        assert_relative_eq!(record.trs_net_pnl, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_percent_helpers() {
        let record = ScenarioRecord::evaluate(&default_params(), 0.20);
        assert_relative_eq!(record.move_pct(), 20.0);
        assert_relative_eq!(record.return_on_collateral_pct(), 75.0);
        assert_relative_eq!(record.financing_drag(), -50_000.0);
    }
}
