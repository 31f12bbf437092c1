//! Portfolio dashboard metrics
//!
//! Holdings are valued by compounding each monthly contribution forward
//! individually (see [`growth::accumulated_value`]), which differs from the
//! calculators' annuity-due by one month of interest on contributions.

use chrono::NaiveDate;
use serde::Serialize;

use super::investment::StoredInvestment;
use crate::projection::{growth, TaxRates};

/// Default number of months in the forward trend series
pub const DEFAULT_TREND_MONTHS: u32 = 12;

/// Longest trend series the aggregator will produce
pub const MAX_TREND_MONTHS: u32 = 600;

/// Valuation of a single holding at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSnapshot {
    pub id: String,
    pub fund_name: String,
    pub fund_type: String,
    pub elapsed_months: u32,
    pub net_annual_rate: f64,
    pub invested: f64,
    pub current_value: f64,
    pub profit: f64,

    /// Average profit per elapsed month (at least one month)
    pub monthly_income: f64,
}

/// Totals across every holding
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_invested: f64,
    pub total_current_value: f64,
    pub total_profit: f64,
    pub total_monthly_income: f64,
    pub active_investments: usize,

    /// total_profit / total_invested * 100, zero when nothing is invested
    pub return_rate_pct: f64,
}

/// Invested amount attributed to one fund category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub fund_type: String,
    pub invested: f64,
}

/// Total projected portfolio value `month` months ahead
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: u32,
    pub total_value: f64,
}

/// Everything the dashboard view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub metrics: DashboardMetrics,
    pub categories: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
    pub holdings: Vec<InvestmentSnapshot>,
}

/// Folds stored investments into dashboard figures
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    tax_rates: TaxRates,
}

impl Aggregator {
    pub fn new(tax_rates: TaxRates) -> Self {
        Self { tax_rates }
    }

    /// Value one holding at `as_of`
    pub fn evaluate(&self, investment: &StoredInvestment, as_of: NaiveDate) -> InvestmentSnapshot {
        let rate = self
            .tax_rates
            .net_rate(investment.annual_rate_pct, investment.is_tax_filer);
        let months = investment.elapsed_months(as_of);

        let current_value = growth::accumulated_value(
            investment.initial_balance,
            investment.monthly_contribution,
            rate.monthly_rate,
            months,
        );
        let invested = investment.initial_balance + investment.monthly_contribution * months as f64;
        let profit = current_value - invested;

        InvestmentSnapshot {
            id: investment.id.clone(),
            fund_name: investment.fund_name.clone(),
            fund_type: investment.fund_type.clone(),
            elapsed_months: months,
            net_annual_rate: rate.net_annual_rate,
            invested,
            current_value,
            profit,
            monthly_income: profit / months.max(1) as f64,
        }
    }

    /// Portfolio totals at `as_of`
    pub fn aggregate(&self, investments: &[StoredInvestment], as_of: NaiveDate) -> DashboardMetrics {
        let snapshots: Vec<_> = investments.iter().map(|inv| self.evaluate(inv, as_of)).collect();
        metrics_from(&snapshots)
    }

    /// Invested amount per fund category, in order of first appearance
    pub fn category_breakdown(
        &self,
        investments: &[StoredInvestment],
        as_of: NaiveDate,
    ) -> Vec<CategoryTotal> {
        let snapshots: Vec<_> = investments.iter().map(|inv| self.evaluate(inv, as_of)).collect();
        categories_from(&snapshots)
    }

    /// Forward projection of total value for months `0..=horizon_months`
    ///
    /// Each holding is compounded from its initial balance for `month`
    /// months regardless of its own start date. Horizons beyond
    /// [`MAX_TREND_MONTHS`] are clamped.
    pub fn trend(&self, investments: &[StoredInvestment], horizon_months: u32) -> Vec<TrendPoint> {
        let horizon = horizon_months.min(MAX_TREND_MONTHS);
        let rates: Vec<f64> = investments
            .iter()
            .map(|inv| {
                self.tax_rates
                    .net_rate(inv.annual_rate_pct, inv.is_tax_filer)
                    .monthly_rate
            })
            .collect();
        let mut values: Vec<f64> = investments.iter().map(|inv| inv.initial_balance).collect();

        let mut points = Vec::with_capacity(horizon as usize + 1);
        for month in 0..=horizon {
            if month > 0 {
                // Same recurrence as growth::accumulated_value, one month at a time
                for ((value, inv), &rate) in values.iter_mut().zip(investments).zip(&rates) {
                    *value = *value * (1.0 + rate) + inv.monthly_contribution;
                }
            }
            points.push(TrendPoint {
                month,
                total_value: values.iter().sum(),
            });
        }
        points
    }

    /// Metrics, categories, trend and per-holding rows in one pass
    pub fn dashboard(
        &self,
        investments: &[StoredInvestment],
        as_of: NaiveDate,
        horizon_months: u32,
    ) -> Dashboard {
        let holdings: Vec<_> = investments.iter().map(|inv| self.evaluate(inv, as_of)).collect();
        let trend = if investments.is_empty() {
            Vec::new()
        } else {
            self.trend(investments, horizon_months)
        };

        Dashboard {
            as_of,
            metrics: metrics_from(&holdings),
            categories: categories_from(&holdings),
            trend,
            holdings,
        }
    }
}

fn metrics_from(snapshots: &[InvestmentSnapshot]) -> DashboardMetrics {
    let mut metrics = DashboardMetrics {
        active_investments: snapshots.len(),
        ..Default::default()
    };

    for snap in snapshots {
        metrics.total_invested += snap.invested;
        metrics.total_current_value += snap.current_value;
        metrics.total_monthly_income += snap.monthly_income;
    }

    metrics.total_profit = metrics.total_current_value - metrics.total_invested;
    metrics.return_rate_pct = if metrics.total_invested > 0.0 {
        metrics.total_profit / metrics.total_invested * 100.0
    } else {
        0.0
    };
    metrics
}

fn categories_from(snapshots: &[InvestmentSnapshot]) -> Vec<CategoryTotal> {
    let mut categories: Vec<CategoryTotal> = Vec::new();
    for snap in snapshots {
        match categories.iter_mut().find(|c| c.fund_type == snap.fund_type) {
            Some(existing) => existing.invested += snap.invested,
            None => categories.push(CategoryTotal {
                fund_type: snap.fund_type.clone(),
                invested: snap.invested,
            }),
        }
    }
    categories
}
