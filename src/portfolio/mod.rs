//! User portfolio: stored investments, persistence and dashboard aggregation

mod aggregate;
mod investment;
mod storage;
mod store;

pub use aggregate::{
    Aggregator, CategoryTotal, Dashboard, DashboardMetrics, InvestmentSnapshot, TrendPoint,
    DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS,
};
pub use investment::{months_between, InvestmentPatch, NewInvestment, StoredInvestment};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{PortfolioStore, PORTFOLIO_KEY};
