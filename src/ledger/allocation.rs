//! Automatic savings and charity shares taken from income.

/// Share of every income entry moved to savings.
pub const SAVINGS_RATE: f64 = 0.10;
/// Share of every income entry moved to charity.
pub const CHARITY_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub savings: f64,
    pub charity: f64,
}

pub struct AllocationPolicy;

impl AllocationPolicy {
    pub fn derive_from_income(amount: f64) -> Allocation {
        Allocation {
            savings: amount * SAVINGS_RATE,
            charity: amount * CHARITY_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_fixed_rates() {
        let allocation = AllocationPolicy::derive_from_income(1000.0);
        assert_eq!(allocation.savings, 100.0);
        assert_eq!(allocation.charity, 50.0);
    }

    #[test]
    fn zero_income_allocates_nothing() {
        let allocation = AllocationPolicy::derive_from_income(0.0);
        assert_eq!(allocation, Allocation { savings: 0.0, charity: 0.0 });
    }
}
