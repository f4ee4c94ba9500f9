use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Category, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Free-text merchant/memo as it appears on the statement.
    pub description: String,
    /// Negative = outflow, positive = inflow.
    pub amount: Decimal,
    pub category: Category,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: Category::Uncategorized,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}
