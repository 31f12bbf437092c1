//! Month-by-month account state used by the iterative calculators

use super::growth::roll_forward;
use super::result::BalanceRow;

/// Running state of a simulated savings account
#[derive(Debug, Clone)]
pub struct AccountState {
    /// Months simulated so far
    pub month: u32,

    /// Balance after the latest month's contribution and interest
    pub balance: f64,

    /// Initial balance plus every contribution made so far
    pub total_invested: f64,

    /// Net monthly rate applied each month
    monthly_rate: f64,
}

impl AccountState {
    /// Start from a lump sum at month zero
    pub fn new(initial_balance: f64, monthly_rate: f64) -> Self {
        Self {
            month: 0,
            balance: initial_balance,
            total_invested: initial_balance,
            monthly_rate,
        }
    }

    /// Contribute at the start of the month, then accrue a month of interest
    pub fn advance_month(&mut self, contribution: f64) -> BalanceRow {
        self.month += 1;
        self.balance = roll_forward(self.balance, contribution, self.monthly_rate);
        self.total_invested += contribution;

        BalanceRow {
            month: self.month,
            contribution,
            total_invested: self.total_invested,
            balance: self.balance,
        }
    }

    pub fn profit(&self) -> f64 {
        self.balance - self.total_invested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_month() {
        let mut state = AccountState::new(1000.0, 0.01);
        let row = state.advance_month(100.0);
        assert_eq!(row.month, 1);
        assert_eq!(row.total_invested, 1100.0);
        assert_relative_eq!(row.balance, 1111.0, max_relative = 1e-12);
        assert_relative_eq!(state.profit(), 11.0, max_relative = 1e-9);
    }
}
