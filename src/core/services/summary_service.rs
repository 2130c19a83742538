//! Read-only aggregation queries over the ledger.

use std::collections::BTreeMap;

use crate::domain::{Category, Month, Subcategory, Transaction, MONTHS_PER_YEAR};
use crate::errors::LedgerError;
use crate::ledger::Ledger;

use super::ServiceResult;

/// Smallest axis ceiling a chart is drawn with.
pub const MIN_CHART_CEILING: f64 = 100.0;
/// Headroom applied above the tallest bar.
pub const CHART_HEADROOM: f64 = 1.2;

pub struct SummaryService;

impl SummaryService {
    pub fn category_total(ledger: &Ledger, category: Category) -> f64 {
        ledger.category_total(category)
    }

    /// Annual sum per subcategory, zeros included.
    pub fn subcategory_breakdown(
        ledger: &Ledger,
        category: Category,
    ) -> ServiceResult<BTreeMap<Subcategory, f64>> {
        if !category.is_compound() {
            return Err(
                LedgerError::InvalidInput(format!("{category} has no subcategories")).into(),
            );
        }
        Ok(category
            .subcategories()
            .iter()
            .map(|sub| (*sub, ledger.subcategory_series(category, *sub).sum()))
            .collect())
    }

    /// Breakdown with empty subcategories dropped, in the category's display order.
    pub fn nonzero_breakdown(
        ledger: &Ledger,
        category: Category,
    ) -> ServiceResult<Vec<(Subcategory, f64)>> {
        let breakdown = Self::subcategory_breakdown(ledger, category)?;
        Ok(category
            .subcategories()
            .iter()
            .filter_map(|sub| {
                let total = breakdown.get(sub).copied().unwrap_or_default();
                (total != 0.0).then_some((*sub, total))
            })
            .collect())
    }

    pub fn monthly_series(ledger: &Ledger, category: Category) -> [f64; MONTHS_PER_YEAR] {
        ledger.series(category).values()
    }

    pub fn combined_monthly_total(ledger: &Ledger, month: Month) -> f64 {
        Category::ALL
            .into_iter()
            .map(|category| ledger.series(category).get(month))
            .sum()
    }

    pub fn combined_monthly_totals(ledger: &Ledger) -> [f64; MONTHS_PER_YEAR] {
        let mut totals = [0.0; MONTHS_PER_YEAR];
        for month in Month::all() {
            totals[month.index()] = Self::combined_monthly_total(ledger, month);
        }
        totals
    }

    pub fn transaction_log(ledger: &Ledger) -> &[Transaction] {
        ledger.transactions()
    }

    /// Upper bound of a chart's value axis.
    pub fn chart_ceiling(values: &[f64]) -> f64 {
        let max = values.iter().copied().fold(0.0, f64::max);
        (max * CHART_HEADROOM).max(MIN_CHART_CEILING)
    }

    pub fn combined_chart_ceiling(ledger: &Ledger) -> f64 {
        Self::chart_ceiling(&Self::combined_monthly_totals(ledger))
    }
}
