//! Tax brackets and the net monthly rate derived from a fund's annual return

use serde::{Deserialize, Serialize};

/// Flat tax rates applied to investment returns, as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    /// Rate for registered tax filers
    pub filer: f64,

    /// Rate for non-filers
    pub non_filer: f64,
}

impl TaxRates {
    pub const DEFAULT_FILER: f64 = 0.15;
    pub const DEFAULT_NON_FILER: f64 = 0.30;

    /// Bracket selected by filer status
    pub fn rate_for(&self, is_tax_filer: bool) -> f64 {
        if is_tax_filer {
            self.filer
        } else {
            self.non_filer
        }
    }

    /// Derive the after-tax annual and monthly rates for a nominal percentage
    pub fn net_rate(&self, annual_rate_pct: f64, is_tax_filer: bool) -> NetRate {
        NetRate::new(annual_rate_pct, self.rate_for(is_tax_filer))
    }
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            filer: Self::DEFAULT_FILER,
            non_filer: Self::DEFAULT_NON_FILER,
        }
    }
}

/// After-tax rate breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetRate {
    /// Tax fraction that was applied
    pub tax_rate: f64,

    /// Annual rate in percent after tax
    pub net_annual_rate: f64,

    /// Monthly rate as a decimal (net_annual_rate / 100 / 12)
    pub monthly_rate: f64,
}

impl NetRate {
    pub fn new(annual_rate_pct: f64, tax_rate: f64) -> Self {
        let net_annual_rate = annual_rate_pct * (1.0 - tax_rate);
        Self {
            tax_rate,
            net_annual_rate,
            monthly_rate: net_annual_rate / 100.0 / 12.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.monthly_rate == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_filer_net_rate() {
        let rate = TaxRates::default().net_rate(12.5, true);
        assert_eq!(rate.tax_rate, 0.15);
        assert_relative_eq!(rate.net_annual_rate, 10.625, max_relative = 1e-12);
        assert_relative_eq!(rate.monthly_rate, 0.008854166666666666, max_relative = 1e-12);
    }

    #[test]
    fn test_non_filer_bracket() {
        let rate = TaxRates::default().net_rate(20.0, false);
        assert_eq!(rate.tax_rate, 0.30);
        assert_relative_eq!(rate.net_annual_rate, 14.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate() {
        assert!(TaxRates::default().net_rate(0.0, true).is_zero());
        assert!(!TaxRates::default().net_rate(0.1, false).is_zero());
    }
}
