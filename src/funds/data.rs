//! Fund definitions and the built-in catalog

use serde::{Deserialize, Serialize};

/// The six funds offered by the calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundKind {
    Income,
    Cash,
    Equity,
    MoneyMarket,
    Balanced,
    Islamic,
}

impl FundKind {
    pub const ALL: [FundKind; 6] = [
        FundKind::Income,
        FundKind::Cash,
        FundKind::Equity,
        FundKind::MoneyMarket,
        FundKind::Balanced,
        FundKind::Islamic,
    ];

    /// Display name, also used as the portfolio category label
    pub fn name(&self) -> &'static str {
        match self {
            FundKind::Income => "Income Fund",
            FundKind::Cash => "Cash Fund",
            FundKind::Equity => "Equity Fund",
            FundKind::MoneyMarket => "Money Market Fund",
            FundKind::Balanced => "Balanced Fund",
            FundKind::Islamic => "Islamic Fund",
        }
    }

    /// Short identifier accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            FundKind::Income => "income",
            FundKind::Cash => "cash",
            FundKind::Equity => "equity",
            FundKind::MoneyMarket => "money-market",
            FundKind::Balanced => "balanced",
            FundKind::Islamic => "islamic",
        }
    }

    /// Expected nominal annual return in percent, before tax
    pub fn base_rate(&self) -> f64 {
        match self {
            FundKind::Income => 12.5,
            FundKind::Cash => 11.5,
            FundKind::Equity => 20.0,
            FundKind::MoneyMarket => 9.8,
            FundKind::Balanced => 14.2,
            FundKind::Islamic => 13.5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FundKind::Income => {
                "A stable income-generating fund focusing on fixed-income securities with moderate risk"
            }
            FundKind::Cash => "A highly liquid fund for short-term investments with minimal risk",
            FundKind::Equity => {
                "High-growth potential fund investing in stock markets with higher risk"
            }
            FundKind::MoneyMarket => {
                "Short-term investments in money market instruments with low risk"
            }
            FundKind::Balanced => {
                "A diversified portfolio balancing equity and fixed-income securities"
            }
            FundKind::Islamic => {
                "Shariah-compliant investments following Islamic financial principles"
            }
        }
    }

    /// Match a slug or display name, ignoring case
    pub fn parse(text: &str) -> Option<Self> {
        let wanted = text.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.slug().eq_ignore_ascii_case(wanted) || kind.name().eq_ignore_ascii_case(wanted)
        })
    }
}

/// One entry of the fund catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    /// Display name
    pub name: String,

    /// Category label used for portfolio grouping
    pub fund_type: String,

    /// Nominal annual return in percent
    pub base_rate: f64,

    pub description: String,
}

impl From<FundKind> for Fund {
    fn from(kind: FundKind) -> Self {
        Self {
            name: kind.name().to_string(),
            fund_type: kind.name().to_string(),
            base_rate: kind.base_rate(),
            description: kind.description().to_string(),
        }
    }
}

/// Ordered set of funds available to the calculators and the portfolio picker
#[derive(Debug, Clone, PartialEq)]
pub struct FundCatalog {
    funds: Vec<Fund>,
}

impl FundCatalog {
    /// Build from an explicit list of funds
    pub fn new(funds: Vec<Fund>) -> Self {
        Self { funds }
    }

    /// The six built-in funds at their published base rates
    pub fn builtin() -> Self {
        Self {
            funds: FundKind::ALL.into_iter().map(Fund::from).collect(),
        }
    }

    pub fn funds(&self) -> &[Fund] {
        &self.funds
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Look up a fund by slug, display name or category label
    pub fn find(&self, key: &str) -> Option<&Fund> {
        let key = key.trim();
        let by_kind = FundKind::parse(key).map(|kind| kind.name());
        self.funds.iter().find(|fund| {
            fund.name.eq_ignore_ascii_case(key)
                || fund.fund_type.eq_ignore_ascii_case(key)
                || by_kind.is_some_and(|name| fund.name == name)
        })
    }
}

impl Default for FundCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rates() {
        let catalog = FundCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.find("cash").map(|f| f.base_rate), Some(11.5));
        assert_eq!(catalog.find("Equity Fund").map(|f| f.base_rate), Some(20.0));
        assert_eq!(catalog.find("money-market").map(|f| f.base_rate), Some(9.8));
    }

    #[test]
    fn test_fund_kind_parse() {
        assert_eq!(FundKind::parse("ISLAMIC"), Some(FundKind::Islamic));
        assert_eq!(FundKind::parse("Balanced Fund"), Some(FundKind::Balanced));
        assert_eq!(FundKind::parse("bond"), None);
    }

    #[test]
    fn test_find_unknown_fund() {
        assert!(FundCatalog::builtin().find("crypto").is_none());
    }
}
