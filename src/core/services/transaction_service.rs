//! Command boundary for recording entries.

use tracing::{debug, warn};

use crate::core::services::ServiceResult;
use crate::domain::RecordRequest;
use crate::ledger::{Ledger, RecordOutcome};

/// Dispatches record requests to the ledger and traces the outcome.
pub struct TransactionService;

impl TransactionService {
    pub fn record(ledger: &mut Ledger, request: &RecordRequest) -> ServiceResult<RecordOutcome> {
        match ledger.record(request) {
            Ok(outcome) => {
                debug!(
                    category = %outcome.category,
                    total = outcome.category_total,
                    appended = outcome.transactions.len(),
                    "record accepted"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(?request, error = %err, "record rejected");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::domain::Category;
    use crate::errors::LedgerError;

    #[test]
    fn rejected_request_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        let request = RecordRequest::for_category(Category::Expense, 3, 20.0)
            .with_subcategory("Salary");
        let err = TransactionService::record(&mut ledger, &request)
            .expect_err("salary is not an expense subcategory");
        assert!(matches!(err, ServiceError::Ledger(LedgerError::InvalidInput(_))));
        assert_eq!(ledger, Ledger::new());
    }

    #[test]
    fn accepted_request_returns_appended_transactions() {
        let mut ledger = Ledger::new();
        let outcome = TransactionService::record(
            &mut ledger,
            &RecordRequest::for_category(Category::Loan, 1, 15.0),
        )
        .unwrap();
        assert_eq!(outcome.transactions.as_slice(), ledger.transactions());
        assert_eq!(outcome.category_total, 15.0);
    }
}
