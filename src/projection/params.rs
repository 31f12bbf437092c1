//! Calculator inputs

use crate::input::{parse_amount, parse_amount_list, parse_count};
use serde::{Deserialize, Serialize};

/// Inputs shared by every calculator mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentParameters {
    /// Lump sum present at month zero
    pub initial_balance: f64,

    /// Amount added at the start of each month
    pub monthly_contribution: f64,

    /// Fund's nominal annual return in percent, before tax
    pub annual_rate_pct: f64,

    /// Selects the tax bracket
    pub is_tax_filer: bool,
}

impl InvestmentParameters {
    pub fn new(
        initial_balance: f64,
        monthly_contribution: f64,
        annual_rate_pct: f64,
        is_tax_filer: bool,
    ) -> Self {
        Self {
            initial_balance,
            monthly_contribution,
            annual_rate_pct,
            is_tax_filer,
        }
    }

    /// Build from raw form text; unparseable amounts become zero
    pub fn from_text(initial: &str, monthly: &str, annual_rate_pct: f64, is_tax_filer: bool) -> Self {
        Self::new(parse_amount(initial), parse_amount(monthly), annual_rate_pct, is_tax_filer)
    }
}

/// Calculator mode selector without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationKind {
    #[default]
    FixedSavings,
    GoalFinder,
    StepUp,
}

impl CalculationKind {
    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::FixedSavings => "Fixed Savings",
            CalculationKind::GoalFinder => "Goal Finder",
            CalculationKind::StepUp => "Step-Up Journey",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "fixed-savings" | "fixed" => Some(CalculationKind::FixedSavings),
            "goal-finder" | "goal" => Some(CalculationKind::GoalFinder),
            "step-up" | "stepup" => Some(CalculationKind::StepUp),
            _ => None,
        }
    }
}

/// Calculator mode with its mode-specific parameters
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationMode {
    /// Level monthly contribution for a whole number of years
    FixedSavings { years: u32 },

    /// Months needed until the balance yields the target each month
    GoalFinder { target_monthly_profit: f64 },

    /// One monthly contribution amount per year, in order
    StepUp { yearly_amounts: Vec<f64> },
}

impl CalculationMode {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationMode::FixedSavings { .. } => CalculationKind::FixedSavings,
            CalculationMode::GoalFinder { .. } => CalculationKind::GoalFinder,
            CalculationMode::StepUp { .. } => CalculationKind::StepUp,
        }
    }

    pub fn fixed_savings_from_text(years: &str) -> Self {
        CalculationMode::FixedSavings {
            years: parse_count(years),
        }
    }

    pub fn goal_finder_from_text(target: &str) -> Self {
        CalculationMode::GoalFinder {
            target_monthly_profit: parse_amount(target),
        }
    }

    pub fn step_up_from_text(amounts: &str) -> Self {
        CalculationMode::StepUp {
            yearly_amounts: parse_amount_list(amounts),
        }
    }
}

/// Suggested step-up ladder: year k contributes `monthly * k`
pub fn default_step_up_amounts(monthly: f64, years: u32) -> Vec<f64> {
    (1..=years).map(|year| monthly * year as f64).collect()
}
