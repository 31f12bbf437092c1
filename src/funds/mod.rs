//! Fund catalog: names, categories and base annual return rates

mod data;
pub mod loader;

pub use data::{Fund, FundCatalog, FundKind};
pub use loader::{load_catalog, load_catalog_from_reader};
