//! Projection engine for fund savings calculators

mod engine;
pub mod growth;
mod params;
mod rates;
mod result;
mod state;

pub use engine::{ProjectionConfig, ProjectionEngine, GOAL_MONTH_CAP, MAX_SAVING_YEARS};
pub use params::{default_step_up_amounts, CalculationKind, CalculationMode, InvestmentParameters};
pub use rates::{NetRate, TaxRates};
pub use result::{BalanceRow, GoalProjection, ProjectionResult, StandardProjection};
pub use state::AccountState;
