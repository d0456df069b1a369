//! Scenario parameters.
//!
//! A run is fully described by one immutable [`ScenarioParameters`] value:
//! the swap terms (notional, financing rate, holding period, collateral) and
//! the market move range to sweep.

use crate::error::{Result, TrsError};

/// Default notional (1,000,000).
pub const DEFAULT_NOTIONAL: f64 = 1_000_000.0;
/// Default annual financing rate (5%).
pub const DEFAULT_FINANCING_RATE: f64 = 0.05;
/// Default holding period in years.
pub const DEFAULT_PERIOD_YEARS: f64 = 1.0;
/// Default posted collateral (200,000).
pub const DEFAULT_COLLATERAL: f64 = 200_000.0;
/// Default first market move (-20%).
pub const DEFAULT_MOVE_START: f64 = -0.20;
/// Default exclusive market move bound (+21%, so +20% is the last point).
pub const DEFAULT_MOVE_STOP: f64 = 0.21;
/// Default market move increment (5%).
pub const DEFAULT_MOVE_STEP: f64 = 0.05;

/// Inputs for a single scenario sweep.
///
/// # Examples
/// ```
/// use pricer_trs::ScenarioParameters;
///
/// let params = ScenarioParameters::default().with_collateral(100_000.0);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.financing_fee(), -50_000.0);
/// assert_eq!(params.leverage(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ScenarioParameters {
    /// Size of the exposure (signed, monetary units)
    pub notional: f64,
    /// Annualised financing rate charged on the swap
    pub financing_rate: f64,
    /// Holding period in years
    pub period_years: f64,
    /// Cash posted against the swap
    pub collateral: f64,
    /// First market move (inclusive)
    pub move_start: f64,
    /// Market move bound (exclusive)
    pub move_stop: f64,
    /// Market move increment
    pub move_step: f64,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            notional: DEFAULT_NOTIONAL,
            financing_rate: DEFAULT_FINANCING_RATE,
            period_years: DEFAULT_PERIOD_YEARS,
            collateral: DEFAULT_COLLATERAL,
            move_start: DEFAULT_MOVE_START,
            move_stop: DEFAULT_MOVE_STOP,
            move_step: DEFAULT_MOVE_STEP,
        }
    }
}

impl ScenarioParameters {
    /// Set the notional.
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Set the annual financing rate.
    pub fn with_financing_rate(mut self, financing_rate: f64) -> Self {
        self.financing_rate = financing_rate;
        self
    }

    /// Set the holding period in years.
    pub fn with_period_years(mut self, period_years: f64) -> Self {
        self.period_years = period_years;
        self
    }

    /// Set the posted collateral.
    pub fn with_collateral(mut self, collateral: f64) -> Self {
        self.collateral = collateral;
        self
    }

    /// Set the market move range.
    pub fn with_moves(mut self, start: f64, stop: f64, step: f64) -> Self {
        self.move_start = start;
        self.move_stop = stop;
        self.move_step = step;
        self
    }

    /// Check that every parameter can be evaluated.
    ///
    /// All values must be finite and the collateral strictly positive.
    /// The move range itself is never rejected; a range that produces no
    /// points simply yields an empty grid.
    pub fn validate(&self) -> Result<()> {
        let finite_checks = [
            ("notional", self.notional),
            ("financing_rate", self.financing_rate),
            ("period_years", self.period_years),
            ("move_start", self.move_start),
            ("move_stop", self.move_stop),
            ("move_step", self.move_step),
        ];
        for (name, value) in finite_checks {
            if !value.is_finite() {
                return Err(TrsError::invalid_parameter(name, value));
            }
        }

        if !self.collateral.is_finite() || self.collateral <= 0.0 {
            return Err(TrsError::InvalidCollateral(self.collateral));
        }

        Ok(())
    }

    /// Financing fee charged over the holding period, as a signed PnL.
    ///
    /// Independent of the market move.
    #[inline]
    pub fn financing_fee(&self) -> f64 {
        -(self.notional * self.financing_rate * self.period_years)
    }

    /// Notional exposure per unit of collateral.
    #[inline]
    pub fn leverage(&self) -> f64 {
        self.notional / self.collateral
    }

    /// Market move at which the swap's net PnL is zero.
    ///
    /// The underlying must rise by the financing cost to break even, so
    /// this is `financing_rate × period_years` regardless of notional.
    #[inline]
    pub fn breakeven_move(&self) -> f64 {
        self.financing_rate * self.period_years
    }
}
