use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{Category, Transaction, YearMonth};

/// Signed sum and count of one (category, month) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MonthlyTotal {
    pub(crate) sum: Decimal,
    pub(crate) count: usize,
}

impl MonthlyTotal {
    /// Outflow magnitude: `-sum` for a net outflow, zero otherwise.
    pub(crate) fn outflow(&self) -> Decimal {
        if self.sum < Decimal::ZERO {
            -self.sum
        } else {
            Decimal::ZERO
        }
    }
}

/// Monthly aggregates keyed by (category, month).
///
/// Sparse: a month with no transactions for a category has no cell. The
/// table is built in one pass and never patched; re-run [`aggregate`] on new
/// input instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AggregateTable {
    cells: BTreeMap<(Category, YearMonth), MonthlyTotal>,
}

pub(crate) fn aggregate(transactions: &[Transaction]) -> Result<AggregateTable, EngineError> {
    let mut cells: BTreeMap<(Category, YearMonth), MonthlyTotal> = BTreeMap::new();

    for txn in transactions {
        if !txn.category.is_categorized() {
            warn!(date = %txn.date, description = %txn.description, "uncategorized transaction reached aggregation");
            return Err(EngineError::ContractViolation(format!(
                "transaction on {} ('{}') was not categorized before aggregation",
                txn.date, txn.description
            )));
        }

        let cell = cells
            .entry((txn.category.clone(), txn.month()))
            .or_default();
        cell.sum = cell.sum.checked_add(txn.amount).ok_or_else(|| {
            EngineError::ContractViolation(format!(
                "amount overflow summing {} for {}",
                txn.category,
                txn.month()
            ))
        })?;
        cell.count += 1;
    }

    debug!(
        transactions = transactions.len(),
        cells = cells.len(),
        "aggregated transactions"
    );
    Ok(AggregateTable { cells })
}

impl AggregateTable {
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn get(&self, category: &Category, month: YearMonth) -> Option<&MonthlyTotal> {
        self.cells.get(&(category.clone(), month))
    }

    /// Cells in (category, month) order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Category, YearMonth, &MonthlyTotal)> {
        self.cells.iter().map(|((c, m), t)| (c, *m, t))
    }

    pub(crate) fn categories(&self) -> Vec<&Category> {
        let set: BTreeSet<&Category> = self.cells.keys().map(|(c, _)| c).collect();
        set.into_iter().collect()
    }

    pub(crate) fn months(&self) -> Vec<YearMonth> {
        let set: BTreeSet<YearMonth> = self.cells.keys().map(|(_, m)| *m).collect();
        set.into_iter().collect()
    }

    pub(crate) fn first_month(&self) -> Option<YearMonth> {
        self.cells.keys().map(|(_, m)| *m).min()
    }

    /// The most recent month present for any category; the "as of" month.
    pub(crate) fn latest_month(&self) -> Option<YearMonth> {
        self.cells.keys().map(|(_, m)| *m).max()
    }

    fn first_month_of(&self, category: &Category) -> Option<YearMonth> {
        self.cells
            .keys()
            .filter(|(c, _)| c == category)
            .map(|(_, m)| *m)
            .min()
    }

    /// Dense outflow series for one category, from its first month through
    /// the table's latest month. Missing months read as zero.
    pub(crate) fn category_series(&self, category: &Category) -> Vec<(YearMonth, Decimal)> {
        let (Some(start), Some(end)) = (self.first_month_of(category), self.latest_month()) else {
            return Vec::new();
        };
        YearMonth::range_inclusive(start, end)
            .map(|m| {
                let outflow = self
                    .get(category, m)
                    .map(MonthlyTotal::outflow)
                    .unwrap_or(Decimal::ZERO);
                (m, outflow)
            })
            .collect()
    }

    /// Dense series of total outflow across categories, first month to latest.
    /// Each category contributes its own outflow, so a refund in one category
    /// never offsets spending in another.
    pub(crate) fn total_series(&self) -> Result<Vec<(YearMonth, Decimal)>, EngineError> {
        let (Some(start), Some(end)) = (self.first_month(), self.latest_month()) else {
            return Ok(Vec::new());
        };
        let mut per_month: BTreeMap<YearMonth, Decimal> =
            YearMonth::range_inclusive(start, end).map(|m| (m, Decimal::ZERO)).collect();
        for ((_, month), total) in &self.cells {
            let slot = per_month.entry(*month).or_default();
            *slot = slot.checked_add(total.outflow()).ok_or_else(|| {
                EngineError::ContractViolation(format!("outflow overflow totalling {month}"))
            })?;
        }
        Ok(per_month.into_iter().collect())
    }
}

/// Outflow per category across all expense transactions, largest first.
pub(crate) fn expense_totals(transactions: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut totals: BTreeMap<&Category, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let slot = totals.entry(&txn.category).or_default();
        *slot = slot.saturating_add(txn.abs_amount());
    }
    let mut sorted: Vec<(Category, Decimal)> = totals
        .into_iter()
        .map(|(c, amt)| (c.clone(), amt))
        .collect();
    // Stable, so equal totals stay in category order.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Split into (debits, credits). Zero-amount lines count as credits.
pub(crate) fn split_debits_credits(
    transactions: &[Transaction],
) -> (Vec<&Transaction>, Vec<&Transaction>) {
    transactions.iter().partition(|t| t.is_expense())
}

pub(crate) fn inflow_total(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}
