//! CSV-based fund catalog loader
//!
//! Expected columns: `name,type,rate,description`. The `type` and
//! `description` columns may be left empty; an empty type falls back to the
//! fund name.

use super::{Fund, FundCatalog};
use crate::error::CatalogError;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the catalog columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    #[serde(rename = "type", default)]
    fund_type: String,
    rate: String,
    #[serde(default)]
    description: String,
}

impl CsvRow {
    fn into_fund(self) -> Result<Fund, CatalogError> {
        let base_rate = match self.rate.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() => rate,
            _ => {
                return Err(CatalogError::InvalidRate {
                    fund: self.name,
                    value: self.rate,
                })
            }
        };
        let fund_type = if self.fund_type.trim().is_empty() {
            self.name.clone()
        } else {
            self.fund_type
        };
        Ok(Fund {
            base_rate,
            name: self.name,
            fund_type,
            description: self.description,
        })
    }
}

/// Load a catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<FundCatalog, CatalogError> {
    let reader = csv::Reader::from_path(path)?;
    collect_catalog(reader)
}

/// Load a catalog from any reader (e.g., string buffer)
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<FundCatalog, CatalogError> {
    collect_catalog(csv::Reader::from_reader(reader))
}

fn collect_catalog<R: Read>(mut reader: csv::Reader<R>) -> Result<FundCatalog, CatalogError> {
    let mut funds = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        funds.push(row.into_fund()?);
    }

    if funds.is_empty() {
        return Err(CatalogError::Empty);
    }
    log::debug!("loaded {} funds from catalog CSV", funds.len());
    Ok(FundCatalog::new(funds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_from_reader() {
        let data = "name,type,rate,description\n\
                    Growth Fund,Equity,18.5,Aggressive\n\
                    Savings Fund,,7.25,\n";
        let catalog = load_catalog_from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let growth = catalog.find("growth fund").unwrap();
        assert_eq!(growth.fund_type, "Equity");
        assert_eq!(growth.base_rate, 18.5);

        let savings = catalog.find("Savings Fund").unwrap();
        assert_eq!(savings.fund_type, "Savings Fund");
        assert_eq!(savings.base_rate, 7.25);
    }

    #[test]
    fn test_rejects_bad_rate() {
        let data = "name,type,rate,description\nOdd Fund,Odd,high,\n";
        let err = load_catalog_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRate { .. }));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let data = "name,type,rate,description\n";
        let err = load_catalog_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }
}
