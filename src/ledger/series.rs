use crate::domain::{Month, MONTHS_PER_YEAR};

/// Twelve monthly accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlySeries([f64; MONTHS_PER_YEAR]);

impl MonthlySeries {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn add(&mut self, month: Month, amount: f64) {
        self.0[month.index()] += amount;
    }

    pub fn get(&self, month: Month) -> f64 {
        self.0[month.index()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn values(&self) -> [f64; MONTHS_PER_YEAR] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_per_month() {
        let mut series = MonthlySeries::zeroed();
        let may = Month::new(4).unwrap();
        series.add(may, 10.0);
        series.add(may, 2.5);
        series.add(Month::DECEMBER, 1.0);
        assert_eq!(series.get(may), 12.5);
        assert_eq!(series.sum(), 13.5);
        assert_eq!(series.values()[11], 1.0);
    }
}
