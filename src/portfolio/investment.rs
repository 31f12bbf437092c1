//! Stored investment records and the edit/creation payloads

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One user-entered holding, as persisted in the portfolio blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredInvestment {
    /// Opaque identifier assigned at creation
    pub id: String,

    pub fund_name: String,

    /// Category label used for distribution breakdowns
    pub fund_type: String,

    pub initial_balance: f64,

    #[serde(rename = "monthlyInvestment")]
    pub monthly_contribution: f64,

    /// Nominal annual return in percent
    #[serde(rename = "returnRate")]
    pub annual_rate_pct: f64,

    pub start_date: NaiveDate,

    pub is_tax_filer: bool,
}

impl StoredInvestment {
    /// Whole calendar months from the start date to `as_of`, never negative
    pub fn elapsed_months(&self, as_of: NaiveDate) -> u32 {
        months_between(self.start_date, as_of)
    }

    /// Merge the fields present in `patch`; the id is never changed
    pub fn apply(&mut self, patch: InvestmentPatch) {
        if let Some(fund_name) = patch.fund_name {
            self.fund_name = fund_name;
        }
        if let Some(fund_type) = patch.fund_type {
            self.fund_type = fund_type;
        }
        if let Some(initial_balance) = patch.initial_balance {
            self.initial_balance = initial_balance;
        }
        if let Some(monthly) = patch.monthly_contribution {
            self.monthly_contribution = monthly;
        }
        if let Some(rate) = patch.annual_rate_pct {
            self.annual_rate_pct = rate;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(is_tax_filer) = patch.is_tax_filer {
            self.is_tax_filer = is_tax_filer;
        }
    }
}

/// Fields of a new investment; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub fund_name: String,
    pub fund_type: String,
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub annual_rate_pct: f64,
    pub start_date: NaiveDate,
    pub is_tax_filer: bool,
}

impl NewInvestment {
    pub(crate) fn with_id(self, id: String) -> StoredInvestment {
        StoredInvestment {
            id,
            fund_name: self.fund_name,
            fund_type: self.fund_type,
            initial_balance: self.initial_balance,
            monthly_contribution: self.monthly_contribution,
            annual_rate_pct: self.annual_rate_pct,
            start_date: self.start_date,
            is_tax_filer: self.is_tax_filer,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestmentPatch {
    pub fund_name: Option<String>,
    pub fund_type: Option<String>,
    pub initial_balance: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub annual_rate_pct: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub is_tax_filer: Option<bool>,
}

impl InvestmentPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Calendar month difference, ignoring day of month, clamped at zero
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> StoredInvestment {
        StoredInvestment {
            id: "1700000000000".to_string(),
            fund_name: "Income Fund".to_string(),
            fund_type: "Income Fund".to_string(),
            initial_balance: 50_000.0,
            monthly_contribution: 5_000.0,
            annual_rate_pct: 12.5,
            start_date: date(2024, 1, 15),
            is_tax_filer: true,
        }
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(months_between(date(2023, 11, 1), date(2025, 2, 28)), 15);
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 5, 30)), 0);
        assert_eq!(months_between(date(2025, 1, 1), date(2024, 6, 1)), 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fundName"], "Income Fund");
        assert_eq!(json["monthlyInvestment"], 5000.0);
        assert_eq!(json["returnRate"], 12.5);
        assert_eq!(json["startDate"], "2024-01-15");
        assert_eq!(json["isTaxFiler"], true);
    }

    #[test]
    fn test_apply_patch_keeps_id_and_untouched_fields() {
        let mut investment = sample();
        investment.apply(InvestmentPatch {
            monthly_contribution: Some(7_500.0),
            is_tax_filer: Some(false),
            ..Default::default()
        });
        assert_eq!(investment.id, "1700000000000");
        assert_eq!(investment.monthly_contribution, 7_500.0);
        assert!(!investment.is_tax_filer);
        assert_eq!(investment.initial_balance, 50_000.0);
        assert_eq!(investment.fund_name, "Income Fund");
    }
}
