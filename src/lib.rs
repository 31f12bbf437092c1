//! Fund Calculator - savings projections and a personal investment portfolio
//!
//! This library provides:
//! - Fund catalog with base annual returns
//! - Fixed savings, goal finder and step-up projections with flat-rate tax
//! - A persisted investment portfolio with add/edit/delete
//! - Dashboard aggregation: totals, category breakdown and a forward trend

pub mod config;
pub mod error;
pub mod funds;
pub mod input;
pub mod portfolio;
pub mod projection;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{FundError, ProjectionError, StorageError};
pub use funds::{Fund, FundCatalog, FundKind};
pub use portfolio::{Aggregator, Dashboard, FileBlobStore, PortfolioStore, StoredInvestment};
pub use projection::{
    CalculationMode, InvestmentParameters, ProjectionConfig, ProjectionEngine, ProjectionResult,
    TaxRates,
};
