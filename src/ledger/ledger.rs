use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    transaction::ValidatedEntry, Category, EntryLabel, Month, RecordRequest, SourceType,
    Subcategory, Transaction,
};
use crate::errors::{LedgerError, LedgerResult};

use super::allocation::AllocationPolicy;
use super::series::MonthlySeries;

const RELATIVE_TOLERANCE: f64 = 1e-6;

/// Monthly series kept for one category. Simple categories leave the
/// breakdown empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBook {
    pub total: MonthlySeries,
    pub breakdown: BTreeMap<Subcategory, MonthlySeries>,
    /// Sum of absolute amounts per month. Bounds every partial sum of the
    /// month's entries.
    volume: MonthlySeries,
}

impl CategoryBook {
    fn for_category(category: Category) -> Self {
        Self {
            total: MonthlySeries::zeroed(),
            breakdown: category
                .subcategories()
                .iter()
                .map(|sub| (*sub, MonthlySeries::zeroed()))
                .collect(),
            volume: MonthlySeries::zeroed(),
        }
    }

    fn add(&mut self, month: Month, amount: f64, subcategory: Option<Subcategory>) {
        self.total.add(month, amount);
        self.volume.add(month, amount.abs());
        if let Some(sub) = subcategory {
            self.breakdown.entry(sub).or_default().add(month, amount);
        }
    }

    /// Whether adding `amount` keeps the book's annual volume finite.
    fn can_absorb(&self, amount: f64) -> bool {
        (self.volume.sum() + amount.abs()).is_finite()
    }
}

/// Result of a successful [`Ledger::record`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub category: Category,
    pub category_total: f64,
    pub transactions: Vec<Transaction>,
}

/// Aggregate root owning every monthly series and the transaction history.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    books: BTreeMap<Category, CategoryBook>,
    transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            books: Category::ALL
                .into_iter()
                .map(|category| (category, CategoryBook::for_category(category)))
                .collect(),
            transactions: Vec::new(),
        }
    }

    /// Single mutation entry point. Validates the whole request before
    /// touching any state, so a rejected request leaves the ledger unchanged.
    pub fn record(&mut self, request: &RecordRequest) -> LedgerResult<RecordOutcome> {
        let entry = request.validate()?;
        if entry.kind != entry.category {
            return Err(LedgerError::invalid(format!(
                "category `{}` does not match entry type `{}`",
                entry.category, entry.kind
            )));
        }

        self.check_capacity(&entry)?;

        let appended = self.apply(entry);
        debug_assert!(self.verify().is_ok(), "{:?}", self.verify());

        Ok(RecordOutcome {
            category: entry.category,
            category_total: self.category_total(entry.category),
            transactions: appended,
        })
    }

    fn apply(&mut self, entry: ValidatedEntry) -> Vec<Transaction> {
        let ValidatedEntry {
            kind,
            category,
            month,
            amount,
            subcategory,
        } = entry;

        let mut appended = Vec::with_capacity(3);
        self.book_mut(category).add(month, amount, subcategory);
        appended.push(Transaction::new(
            SourceType::from(kind),
            category,
            subcategory.map(EntryLabel::Named),
            month,
            amount,
        ));
        debug!(%category, month = month.index(), amount, ?subcategory, "recorded entry");

        if kind == Category::Income {
            let allocation = AllocationPolicy::derive_from_income(amount);
            self.book_mut(Category::Savings).add(month, allocation.savings, None);
            self.book_mut(Category::Charity).add(month, allocation.charity, None);
            appended.push(Transaction::automatic(
                Category::Savings,
                month,
                allocation.savings,
            ));
            appended.push(Transaction::automatic(
                Category::Charity,
                month,
                allocation.charity,
            ));
            debug!(
                savings = allocation.savings,
                charity = allocation.charity,
                "applied automatic allocation"
            );
        }

        self.transactions.extend(appended.iter().cloned());
        appended
    }

    /// Rejects amounts that would overflow any affected series.
    fn check_capacity(&self, entry: &ValidatedEntry) -> LedgerResult<()> {
        let mut affected = vec![(entry.category, entry.amount)];
        if entry.kind == Category::Income {
            let allocation = AllocationPolicy::derive_from_income(entry.amount);
            affected.push((Category::Savings, allocation.savings));
            affected.push((Category::Charity, allocation.charity));
        }
        for (category, amount) in affected {
            let fits = self
                .book(category)
                .map_or(amount.is_finite(), |book| book.can_absorb(amount));
            if !fits {
                return Err(LedgerError::invalid(format!(
                    "amount {} would overflow the {category} totals",
                    entry.amount
                )));
            }
        }
        Ok(())
    }

    fn book_mut(&mut self, category: Category) -> &mut CategoryBook {
        self.books
            .entry(category)
            .or_insert_with(|| CategoryBook::for_category(category))
    }

    pub fn book(&self, category: Category) -> Option<&CategoryBook> {
        self.books.get(&category)
    }

    /// Annual total of a category; for compound categories this is the
    /// `total` series, which may exceed the breakdown sum.
    pub fn category_total(&self, category: Category) -> f64 {
        self.series(category).sum()
    }

    pub fn series(&self, category: Category) -> MonthlySeries {
        self.book(category)
            .map(|book| book.total)
            .unwrap_or_default()
    }

    pub fn subcategory_series(&self, category: Category, sub: Subcategory) -> MonthlySeries {
        self.book(category)
            .and_then(|book| book.breakdown.get(&sub).copied())
            .unwrap_or_default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Checks that every compound total equals its breakdown plus the entries
    /// recorded without a subcategory, and that every series value equals the
    /// sum of the logged amounts behind it.
    pub fn verify(&self) -> LedgerResult<()> {
        for category in Category::ALL {
            let book = self.book(category).cloned().unwrap_or_default();
            for month in Month::all() {
                let total = book.total.get(month);
                let scale = book.volume.get(month);
                if category.is_compound() {
                    let breakdown_sum: f64 = book.breakdown.values().map(|s| s.get(month)).sum();
                    let unattributed =
                        self.logged_amount(category, month, |txn| txn.subcategory.is_none());
                    if !approx_eq(breakdown_sum + unattributed, total, scale) {
                        return Err(LedgerError::InvariantViolation(format!(
                            "{category} {month}: subcategories sum to {breakdown_sum} \
                             plus {unattributed} unattributed, total is {total}"
                        )));
                    }
                }

                let logged = self.logged_amount(category, month, |_| true);
                if !approx_eq(logged, total, scale) {
                    return Err(LedgerError::InvariantViolation(format!(
                        "{category} {month}: series holds {total}, log holds {logged}"
                    )));
                }

                for (sub, series) in &book.breakdown {
                    let logged = self.logged_amount(category, month, |txn| {
                        txn.subcategory.and_then(EntryLabel::subcategory) == Some(*sub)
                    });
                    if !approx_eq(logged, series.get(month), scale) {
                        return Err(LedgerError::InvariantViolation(format!(
                            "{category}/{sub} {month}: series holds {}, log holds {logged}",
                            series.get(month)
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn logged_amount<F>(&self, category: Category, month: Month, filter: F) -> f64
    where
        F: Fn(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .filter(|txn| txn.category == category && txn.month == month && filter(txn))
            .map(|txn| txn.amount)
            .sum()
    }
}

/// Compares two sums of the same entries taken in different orders. The
/// rounding error of either is bounded by the entries' absolute volume.
fn approx_eq(a: f64, b: f64, volume: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * volume.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            approx_eq(actual, expected, expected.abs()),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn new_ledger_is_zeroed() {
        let ledger = Ledger::new();
        for category in Category::ALL {
            assert_eq!(ledger.category_total(category), 0.0);
        }
        assert_eq!(ledger.transaction_count(), 0);
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn income_triggers_allocation() {
        let mut ledger = Ledger::new();
        let outcome = ledger
            .record(
                &RecordRequest::for_category(Category::Income, 0, 1000.0)
                    .with_subcategory("Salary"),
            )
            .unwrap();

        assert_eq!(outcome.category, Category::Income);
        assert_close(outcome.category_total, 1000.0);
        assert_eq!(outcome.transactions.len(), 3);
        assert_close(ledger.category_total(Category::Savings), 100.0);
        assert_close(ledger.category_total(Category::Charity), 50.0);

        let auto: Vec<_> = ledger
            .transactions()
            .iter()
            .filter(|txn| txn.is_automatic())
            .collect();
        assert_eq!(auto.len(), 2);
        assert_eq!(auto[0].category, Category::Savings);
        assert_eq!(auto[1].category, Category::Charity);
    }

    #[test]
    fn simple_categories_reject_subcategories() {
        let mut ledger = Ledger::new();
        let err = ledger
            .record(
                &RecordRequest::for_category(Category::Savings, 2, 10.0).with_subcategory("Other"),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(ledger.transaction_count(), 0);
    }

    #[test]
    fn mismatched_category_and_type_is_rejected() {
        let mut ledger = Ledger::new();
        let request = RecordRequest::new("Income", "Expense", 1, 10.0);
        assert!(ledger.record(&request).is_err());
        assert_eq!(ledger, Ledger::new());
    }

    #[test]
    fn verify_detects_drift_between_log_and_series() {
        let mut ledger = Ledger::new();
        ledger
            .record(&RecordRequest::for_category(Category::Loan, 3, 40.0))
            .unwrap();
        ledger
            .book_mut(Category::Loan)
            .total
            .add(Month::new(3).unwrap(), 1.0);
        let err = ledger.verify().unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation(ref msg) if msg.contains("Loan")));
    }

    #[test]
    fn verify_detects_breakdown_diverging_from_total() {
        let mut ledger = Ledger::new();
        ledger
            .book_mut(Category::Expense)
            .breakdown
            .entry(Subcategory::Groceries)
            .or_default()
            .add(Month::JANUARY, 5.0);
        assert!(matches!(
            ledger.verify(),
            Err(LedgerError::InvariantViolation(_))
        ));
    }
}
