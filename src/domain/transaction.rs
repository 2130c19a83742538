//! Immutable entries of the ledger's history.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::category::{Category, Subcategory};
use crate::domain::month::Month;
use crate::errors::{LedgerError, LedgerResult};

/// Tag describing what produced a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Income,
    Expense,
    Savings,
    Charity,
    Loan,
    Automatic,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Income => "Income",
            SourceType::Expense => "Expense",
            SourceType::Savings => "Savings",
            SourceType::Charity => "Charity",
            SourceType::Loan => "Loan",
            SourceType::Automatic => "Automatic",
        }
    }
}

impl From<Category> for SourceType {
    fn from(category: Category) -> Self {
        match category {
            Category::Income => SourceType::Income,
            Category::Expense => SourceType::Expense,
            Category::Savings => SourceType::Savings,
            Category::Charity => SourceType::Charity,
            Category::Loan => SourceType::Loan,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subcategory column of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryLabel {
    Named(Subcategory),
    AutoAllocation,
}

impl EntryLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryLabel::Named(sub) => sub.as_str(),
            EntryLabel::AutoAllocation => "Auto-allocation",
        }
    }

    pub fn subcategory(self) -> Option<Subcategory> {
        match self {
            EntryLabel::Named(sub) => Some(sub),
            EntryLabel::AutoAllocation => None,
        }
    }
}

impl fmt::Display for EntryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub source: SourceType,
    pub category: Category,
    pub subcategory: Option<EntryLabel>,
    pub month: Month,
    pub amount: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        source: SourceType,
        category: Category,
        subcategory: Option<EntryLabel>,
        month: Month,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            category,
            subcategory,
            month,
            amount,
            recorded_at: Utc::now(),
        }
    }

    pub fn automatic(category: Category, month: Month, amount: f64) -> Self {
        Self::new(
            SourceType::Automatic,
            category,
            Some(EntryLabel::AutoAllocation),
            month,
            amount,
        )
    }

    pub fn is_automatic(&self) -> bool {
        self.source == SourceType::Automatic
    }

    /// Subcategory text as shown in the history, empty when absent.
    pub fn subcategory_label(&self) -> &'static str {
        self.subcategory.map(EntryLabel::as_str).unwrap_or("")
    }
}

/// Raw inbound request for [`crate::ledger::Ledger::record`].
///
/// Tokens are kept as text so that the ledger owns validation of every field.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRequest {
    pub category_type: String,
    pub category: String,
    pub month: i64,
    pub amount: f64,
    pub subcategory: Option<String>,
}

impl RecordRequest {
    pub fn new(
        category_type: impl Into<String>,
        category: impl Into<String>,
        month: i64,
        amount: f64,
    ) -> Self {
        Self {
            category_type: category_type.into(),
            category: category.into(),
            month,
            amount,
            subcategory: None,
        }
    }

    /// Request where the category and its type coincide, which is how every
    /// entry form submits.
    pub fn for_category(category: Category, month: i64, amount: f64) -> Self {
        Self::new(category.as_str(), category.as_str(), month, amount)
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub(crate) fn validate(&self) -> LedgerResult<ValidatedEntry> {
        let kind = Category::parse(&self.category_type)?;
        let category = Category::parse(&self.category)?;
        let month = Month::new(self.month)?;
        if !self.amount.is_finite() {
            return Err(LedgerError::invalid(format!(
                "amount {} is not a finite number",
                self.amount
            )));
        }
        let subcategory = match self.subcategory.as_deref() {
            Some(token) => Some(Subcategory::parse_for(kind, token)?),
            None => None,
        };
        Ok(ValidatedEntry {
            kind,
            category,
            month,
            amount: self.amount,
            subcategory,
        })
    }
}

/// A request whose tokens all resolved to known values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ValidatedEntry {
    pub kind: Category,
    pub category: Category,
    pub month: Month,
    pub amount: f64,
    pub subcategory: Option<Subcategory>,
}
