//! Error types for projections, persistence and catalog loading

use thiserror::Error;

/// Reasons a projection cannot be produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Goal finder needs a non-zero monthly rate to size the required balance
    #[error("goal cannot be computed: net monthly rate is zero")]
    ZeroRate,

    /// Step-up plan was given no yearly amounts
    #[error("step-up plan needs at least one year")]
    NoYears,
}

/// Failures reading or writing the persisted portfolio
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no investment with id {0}")]
    NotFound(String),

    #[error("blob store I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize portfolio: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures loading a fund catalog or the application config
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid rate {value:?} for fund {fund}")]
    InvalidRate { fund: String, value: String },

    #[error("catalog contains no funds")]
    Empty,
}

/// Top-level crate error
#[derive(Debug, Error)]
pub enum FundError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("config file {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("unknown fund {0:?}")]
    UnknownFund(String),
}

pub type Result<T> = std::result::Result<T, FundError>;
