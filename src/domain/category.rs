//! Fixed category and subcategory sets.

use std::fmt;

use crate::errors::{LedgerError, LedgerResult};

/// Top-level ledger category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Income,
    Expense,
    Savings,
    Charity,
    Loan,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Income,
        Category::Expense,
        Category::Savings,
        Category::Charity,
        Category::Loan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
            Category::Savings => "Savings",
            Category::Charity => "Charity",
            Category::Loan => "Loan",
        }
    }

    /// Compound categories carry a per-subcategory breakdown next to their total.
    pub fn is_compound(self) -> bool {
        matches!(self, Category::Income | Category::Expense)
    }

    pub fn subcategories(self) -> &'static [Subcategory] {
        match self {
            Category::Income => &[Subcategory::Salary, Subcategory::Gift, Subcategory::Other],
            Category::Expense => &[
                Subcategory::Transport,
                Subcategory::Groceries,
                Subcategory::Entertainment,
                Subcategory::Other,
            ],
            Category::Savings | Category::Charity | Category::Loan => &[],
        }
    }

    pub fn parse(token: &str) -> LedgerResult<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Category::Income),
            "expense" | "expenses" => Ok(Category::Expense),
            "savings" | "saving" => Ok(Category::Savings),
            "charity" => Ok(Category::Charity),
            "loan" | "loans" => Ok(Category::Loan),
            _ => Err(LedgerError::invalid(format!("unknown category `{token}`"))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breakdown bucket of a compound category. `Other` exists under both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subcategory {
    Salary,
    Gift,
    Transport,
    Groceries,
    Entertainment,
    Other,
}

impl Subcategory {
    pub const ALL: [Subcategory; 6] = [
        Subcategory::Salary,
        Subcategory::Gift,
        Subcategory::Transport,
        Subcategory::Groceries,
        Subcategory::Entertainment,
        Subcategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subcategory::Salary => "Salary",
            Subcategory::Gift => "Gift",
            Subcategory::Transport => "Transport",
            Subcategory::Groceries => "Groceries",
            Subcategory::Entertainment => "Entertainment",
            Subcategory::Other => "Other",
        }
    }

    pub fn belongs_to(self, category: Category) -> bool {
        category.subcategories().contains(&self)
    }

    pub fn parse(token: &str) -> LedgerResult<Self> {
        let lower = token.trim().to_ascii_lowercase();
        Subcategory::ALL
            .into_iter()
            .find(|sub| sub.as_str().to_ascii_lowercase() == lower)
            .ok_or_else(|| LedgerError::invalid(format!("unknown subcategory `{token}`")))
    }

    /// Parses `token` and checks that it is one of `category`'s subcategories.
    pub fn parse_for(category: Category, token: &str) -> LedgerResult<Self> {
        if !category.is_compound() {
            return Err(LedgerError::invalid(format!(
                "{category} has no subcategories"
            )));
        }
        let sub = Subcategory::parse(token)?;
        if sub.belongs_to(category) {
            Ok(sub)
        } else {
            Err(LedgerError::invalid(format!(
                "{sub} is not a subcategory of {category}"
            )))
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
