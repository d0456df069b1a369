//! Scenario evaluation.
//!
//! Turns validated [`ScenarioParameters`] into an ordered [`ScenarioSet`],
//! one [`ScenarioRecord`] per grid point. Records depend only on their own
//! market move, so the parallel path maps grid indices with Rayon and
//! still returns records in grid order.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, TrsError};
use crate::grid::MoveGrid;
use crate::params::ScenarioParameters;
use crate::record::ScenarioRecord;
use crate::summary::ScenarioSummary;

/// Largest grid the evaluator accepts.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Parameters of a run together with its ordered records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSet {
    parameters: ScenarioParameters,
    records: Vec<ScenarioRecord>,
}

impl ScenarioSet {
    /// Parameters that produced the records.
    pub fn parameters(&self) -> &ScenarioParameters {
        &self.parameters
    }

    /// Records in grid order.
    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the grid produced no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in grid order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioRecord> {
        self.records.iter()
    }

    /// Run-level analytics.
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary::from_set(self)
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a ScenarioRecord;
    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Evaluates direct ownership against swap exposure over a move grid.
///
/// # Examples
/// ```
/// use pricer_trs::{ScenarioEvaluator, ScenarioParameters};
///
/// let evaluator = ScenarioEvaluator::new(ScenarioParameters::default()).unwrap();
/// let set = evaluator.evaluate();
/// assert_eq!(set.len(), 9);
/// assert!(set.iter().all(|r| r.financing_fee == -50_000.0));
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioEvaluator {
    parameters: ScenarioParameters,
    grid: MoveGrid,
}

impl ScenarioEvaluator {
    /// Validate the parameters and build the move grid.
    pub fn new(parameters: ScenarioParameters) -> Result<Self> {
        parameters.validate()?;

        let grid = MoveGrid::new(
            parameters.move_start,
            parameters.move_stop,
            parameters.move_step,
        );
        if grid.len() > MAX_GRID_POINTS {
            return Err(TrsError::GridTooLarge {
                points: grid.len(),
                limit: MAX_GRID_POINTS,
            });
        }

        debug!(
            notional = parameters.notional,
            financing_rate = parameters.financing_rate,
            period_years = parameters.period_years,
            collateral = parameters.collateral,
            points = grid.len(),
            "Scenario grid built"
        );
        if grid.is_empty() {
            warn!(
                move_start = parameters.move_start,
                move_stop = parameters.move_stop,
                move_step = parameters.move_step,
                "Move range produces no scenarios"
            );
        }

        Ok(Self { parameters, grid })
    }

    /// Parameters being evaluated.
    pub fn parameters(&self) -> &ScenarioParameters {
        &self.parameters
    }

    /// Move grid being evaluated.
    pub fn grid(&self) -> &MoveGrid {
        &self.grid
    }

    /// Evaluate every grid point sequentially.
    pub fn evaluate(&self) -> ScenarioSet {
        let records = self
            .grid
            .iter()
            .map(|market_move| ScenarioRecord::evaluate(&self.parameters, market_move))
            .collect();

        self.finish(records)
    }

    /// Evaluate every grid point on the Rayon pool.
    ///
    /// Produces exactly the same set as [`evaluate`](Self::evaluate).
    pub fn evaluate_parallel(&self) -> ScenarioSet {
        let records = (0..self.grid.len())
            .into_par_iter()
            .map(|i| ScenarioRecord::evaluate(&self.parameters, self.grid.value_at(i)))
            .collect();

        self.finish(records)
    }

    fn finish(&self, records: Vec<ScenarioRecord>) -> ScenarioSet {
        ScenarioSet {
            parameters: self.parameters,
            records,
        }
    }
}

/// Validate `parameters` and evaluate the full grid sequentially.
pub fn evaluate(parameters: ScenarioParameters) -> Result<ScenarioSet> {
    Ok(ScenarioEvaluator::new(parameters)?.evaluate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_run() {
        let set = evaluate(ScenarioParameters::default()).unwrap();
        assert_eq!(set.len(), 9);

        let first = set.records()[0];
        assert_relative_eq!(first.market_move, -0.20);
        assert_relative_eq!(first.trs_net_pnl, -250_000.0);
        assert_relative_eq!(first.trs_return_on_collateral, -1.25);

        let last = set.records()[8];
        assert_relative_eq!(last.market_move, 0.20, epsilon = 1e-12);
        assert_relative_eq!(last.trs_net_pnl, 150_000.0, epsilon = 1e-6);
        assert_relative_eq!(last.trs_return_on_collateral, 0.75, epsilon = 1e-10);
    }

    #[test]
    fn test_rows_follow_grid_order() {
        let set = evaluate(ScenarioParameters::default()).unwrap();
        assert!(set
            .records()
            .windows(2)
            .all(|w| w[0].market_move < w[1].market_move));
    }

    #[test]
    fn test_empty_grid_is_not_an_error() {
        let params = ScenarioParameters::default().with_moves(0.0, 0.0, 0.05);
        let set = evaluate(params).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_zero_collateral_is_an_error() {
        let params = ScenarioParameters::default().with_collateral(0.0);
        assert_eq!(
            evaluate(params).unwrap_err(),
            TrsError::InvalidCollateral(0.0)
        );
    }

    #[test]
    fn test_grid_too_large() {
        let params = ScenarioParameters::default().with_moves(0.0, 1.0, 1e-9);
        assert!(matches!(
            ScenarioEvaluator::new(params),
            Err(TrsError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let params = ScenarioParameters::default().with_moves(-0.5, 0.5, 0.001);
        let evaluator = ScenarioEvaluator::new(params).unwrap();
        assert_eq!(evaluator.evaluate(), evaluator.evaluate_parallel());
    }

    #[test]
    fn test_set_keeps_parameters() {
        let params = ScenarioParameters::default().with_notional(250_000.0);
        let set = evaluate(params).unwrap();
        assert_eq!(set.parameters(), &params);
    }

    #[test]
    fn test_into_iterator() {
        let set = evaluate(ScenarioParameters::default()).unwrap();
        let count = (&set).into_iter().count();
        assert_eq!(count, set.len());
    }
}
