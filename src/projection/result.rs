//! Projection output structures

use serde::{Deserialize, Serialize};

/// Account position at the end of one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRow {
    pub month: u32,
    pub contribution: f64,
    pub total_invested: f64,
    pub balance: f64,
}

/// Result of a fixed-savings or step-up projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardProjection {
    /// Whole years covered by the plan
    pub duration_years: u32,

    pub duration_months: u32,

    /// Annual rate in percent after tax
    pub net_annual_rate: f64,

    pub monthly_rate: f64,

    pub total_invested: f64,

    /// final_value - total_invested
    pub total_profit: f64,

    pub final_value: f64,

    /// Monthly yield of the final balance (final_value * monthly_rate)
    pub monthly_net_profit: f64,

    /// Month-by-month balances; empty unless detailed output was requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectory: Vec<BalanceRow>,
}

/// Result of a goal-finder search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjection {
    pub target_monthly_profit: f64,

    /// Balance whose monthly yield equals the target
    pub required_balance: f64,

    /// Months simulated, capped at the search limit
    pub months_needed: u32,

    /// Whether the balance reached required_balance within the cap
    pub reached: bool,

    pub monthly_contribution: f64,

    pub net_annual_rate: f64,

    pub monthly_rate: f64,

    pub total_invested: f64,

    /// final_value - total_invested
    pub total_profit: f64,

    /// Balance actually reached after months_needed
    pub final_value: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectory: Vec<BalanceRow>,
}

impl GoalProjection {
    /// Time to goal in fractional years
    pub fn years_needed(&self) -> f64 {
        self.months_needed as f64 / 12.0
    }
}

/// Outcome of any calculator mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProjectionResult {
    Standard(StandardProjection),
    Goal(GoalProjection),
}

impl ProjectionResult {
    pub fn final_value(&self) -> f64 {
        match self {
            ProjectionResult::Standard(p) => p.final_value,
            ProjectionResult::Goal(p) => p.final_value,
        }
    }

    pub fn total_invested(&self) -> f64 {
        match self {
            ProjectionResult::Standard(p) => p.total_invested,
            ProjectionResult::Goal(p) => p.total_invested,
        }
    }

    pub fn total_profit(&self) -> f64 {
        match self {
            ProjectionResult::Standard(p) => p.total_profit,
            ProjectionResult::Goal(p) => p.total_profit,
        }
    }

    pub fn net_annual_rate(&self) -> f64 {
        match self {
            ProjectionResult::Standard(p) => p.net_annual_rate,
            ProjectionResult::Goal(p) => p.net_annual_rate,
        }
    }

    pub fn trajectory(&self) -> &[BalanceRow] {
        match self {
            ProjectionResult::Standard(p) => &p.trajectory,
            ProjectionResult::Goal(p) => &p.trajectory,
        }
    }

    /// Human-readable duration, e.g. "5 Years" or "7.3 Years (88 months)"
    pub fn duration_label(&self) -> String {
        match self {
            ProjectionResult::Standard(p) => format!("{} Years", p.duration_years),
            ProjectionResult::Goal(p) => {
                format!("{:.1} Years ({} months)", p.years_needed(), p.months_needed)
            }
        }
    }
}
