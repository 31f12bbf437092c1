//! Calculator engine: fixed savings, goal finder and step-up projections

use super::growth::future_value;
use super::params::{CalculationMode, InvestmentParameters};
use super::rates::{NetRate, TaxRates};
use super::result::{GoalProjection, ProjectionResult, StandardProjection};
use super::state::AccountState;
use crate::error::ProjectionError;

/// Goal search stops after this many months (50 years)
pub const GOAL_MONTH_CAP: u32 = 600;

/// Longest fixed-savings term; longer requests are clamped to it
pub const MAX_SAVING_YEARS: u32 = 100;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Whether to record month-by-month balances
    pub detailed_output: bool,

    /// Upper bound on goal-finder months
    pub goal_month_cap: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            detailed_output: false,
            goal_month_cap: GOAL_MONTH_CAP,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    tax_rates: TaxRates,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given tax table and config
    pub fn new(tax_rates: TaxRates, config: ProjectionConfig) -> Self {
        Self { tax_rates, config }
    }

    pub fn tax_rates(&self) -> &TaxRates {
        &self.tax_rates
    }

    /// After-tax rates for a set of inputs
    pub fn net_rate(&self, params: &InvestmentParameters) -> NetRate {
        self.tax_rates.net_rate(params.annual_rate_pct, params.is_tax_filer)
    }

    /// Run whichever calculator the mode selects
    pub fn project(
        &self,
        params: &InvestmentParameters,
        mode: &CalculationMode,
    ) -> Result<ProjectionResult, ProjectionError> {
        match mode {
            CalculationMode::FixedSavings { years } => {
                Ok(ProjectionResult::Standard(self.fixed_savings(params, *years)))
            }
            CalculationMode::GoalFinder { target_monthly_profit } => self
                .goal_finder(params, *target_monthly_profit)
                .map(ProjectionResult::Goal),
            CalculationMode::StepUp { yearly_amounts } => self
                .step_up(params, yearly_amounts)
                .map(ProjectionResult::Standard),
        }
    }

    /// Level contribution over `years`, valued with the closed-form annuity-due
    ///
    /// Terms beyond [`MAX_SAVING_YEARS`] are clamped to it.
    pub fn fixed_savings(&self, params: &InvestmentParameters, years: u32) -> StandardProjection {
        let rate = self.net_rate(params);
        if years > MAX_SAVING_YEARS {
            log::warn!("{years} years requested, clamping to {MAX_SAVING_YEARS}");
        }
        let years = years.min(MAX_SAVING_YEARS);
        let months = years * 12;

        let final_value = future_value(
            params.initial_balance,
            params.monthly_contribution,
            rate.monthly_rate,
            months,
        );
        let total_invested = params.initial_balance + params.monthly_contribution * months as f64;

        let trajectory = if self.config.detailed_output {
            let mut state = AccountState::new(params.initial_balance, rate.monthly_rate);
            (0..months)
                .map(|_| state.advance_month(params.monthly_contribution))
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        };

        log::debug!(
            "fixed savings: {} months at {:.6}/month -> {:.2}",
            months,
            rate.monthly_rate,
            final_value
        );

        StandardProjection {
            duration_years: years,
            duration_months: months,
            net_annual_rate: rate.net_annual_rate,
            monthly_rate: rate.monthly_rate,
            total_invested,
            total_profit: final_value - total_invested,
            final_value,
            monthly_net_profit: final_value * rate.monthly_rate,
            trajectory,
        }
    }

    /// Months of saving until the balance yields `target_monthly_profit` a month
    ///
    /// Returns `ProjectionError::ZeroRate` when the net rate is zero, since no
    /// balance can produce a yield. The search gives up at the month cap and
    /// reports whatever it reached.
    pub fn goal_finder(
        &self,
        params: &InvestmentParameters,
        target_monthly_profit: f64,
    ) -> Result<GoalProjection, ProjectionError> {
        let rate = self.net_rate(params);
        if rate.is_zero() {
            return Err(ProjectionError::ZeroRate);
        }

        let required_balance = target_monthly_profit / rate.monthly_rate;
        let mut state = AccountState::new(params.initial_balance, rate.monthly_rate);
        let mut trajectory = Vec::new();

        while state.balance < required_balance && state.month < self.config.goal_month_cap {
            let row = state.advance_month(params.monthly_contribution);
            if self.config.detailed_output {
                trajectory.push(row);
            }
        }

        let reached = state.balance >= required_balance;
        if !reached {
            log::debug!(
                "goal of {:.2}/month not reached within {} months",
                target_monthly_profit,
                self.config.goal_month_cap
            );
        }

        Ok(GoalProjection {
            target_monthly_profit,
            required_balance,
            months_needed: state.month,
            reached,
            monthly_contribution: params.monthly_contribution,
            net_annual_rate: rate.net_annual_rate,
            monthly_rate: rate.monthly_rate,
            total_invested: state.total_invested,
            total_profit: state.profit(),
            final_value: state.balance,
            trajectory,
        })
    }

    /// Contribution fixed within each year but free to change year to year
    ///
    /// `params.monthly_contribution` is ignored; `yearly_amounts[k]` is paid in
    /// each of the twelve months of year k.
    pub fn step_up(
        &self,
        params: &InvestmentParameters,
        yearly_amounts: &[f64],
    ) -> Result<StandardProjection, ProjectionError> {
        if yearly_amounts.is_empty() {
            return Err(ProjectionError::NoYears);
        }

        let rate = self.net_rate(params);
        let mut state = AccountState::new(params.initial_balance, rate.monthly_rate);
        let mut trajectory = Vec::new();

        for &amount in yearly_amounts {
            for _ in 0..12 {
                let row = state.advance_month(amount);
                if self.config.detailed_output {
                    trajectory.push(row);
                }
            }
        }

        let years = yearly_amounts.len() as u32;
        log::debug!("step-up: {} years -> {:.2}", years, state.balance);

        Ok(StandardProjection {
            duration_years: years,
            duration_months: state.month,
            net_annual_rate: rate.net_annual_rate,
            monthly_rate: rate.monthly_rate,
            total_invested: state.total_invested,
            total_profit: state.profit(),
            final_value: state.balance,
            monthly_net_profit: state.balance * rate.monthly_rate,
            trajectory,
        })
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(TaxRates::default(), ProjectionConfig::default())
    }
}
