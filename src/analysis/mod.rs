use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::aggregate::{self, AggregateTable};
use crate::budget;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::forecast;
use crate::models::{BudgetRecommendation, Category, Forecast, ForecastTarget, Provenance, Transaction};

/// What the presentation layer can show for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DataState {
    /// Empty input: empty tables, no forecasts.
    NoData,
    /// Some forecast fell back to naive persistence.
    InsufficientHistory,
    Ready,
}

/// Every derived table for one session, computed in a single pass:
/// categorize -> aggregate -> recommend and forecast.
///
/// Re-running on new input builds a fresh `Analysis`; nothing is patched.
#[derive(Debug, Clone)]
pub(crate) struct Analysis {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) aggregates: AggregateTable,
    pub(crate) budgets: BTreeMap<Category, BudgetRecommendation>,
    pub(crate) forecasts: Vec<Forecast>,
    pub(crate) expense_totals: Vec<(Category, Decimal)>,
    pub(crate) inflow_total: Decimal,
    /// Configured budget window in months; a category may use fewer.
    pub(crate) budget_window: usize,
}

impl Analysis {
    pub(crate) fn run(
        mut transactions: Vec<Transaction>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        config.categorizer().categorize_batch(&mut transactions);
        let aggregates = aggregate::aggregate(&transactions)?;
        let budgets = budget::recommend(&aggregates, config.budget())?;
        let forecasts = forecast::forecast_all(&aggregates, config.forecast())?;
        let expense_totals = aggregate::expense_totals(&transactions);
        let inflow_total = aggregate::inflow_total(&transactions);

        debug!(
            transactions = transactions.len(),
            rules = config.categorizer().len(),
            cells = aggregates.len(),
            budgets = budgets.len(),
            forecasts = forecasts.len(),
            "analysis complete"
        );

        Ok(Self {
            transactions,
            aggregates,
            budgets,
            forecasts,
            expense_totals,
            inflow_total,
            budget_window: config.budget().window_months,
        })
    }

    pub(crate) fn state(&self) -> DataState {
        if self.transactions.is_empty() {
            DataState::NoData
        } else if self
            .forecasts
            .iter()
            .any(|f| f.provenance == Provenance::Naive)
        {
            DataState::InsufficientHistory
        } else {
            DataState::Ready
        }
    }

    pub(crate) fn debits(&self) -> Vec<&Transaction> {
        aggregate::split_debits_credits(&self.transactions).0
    }

    pub(crate) fn credits(&self) -> Vec<&Transaction> {
        aggregate::split_debits_credits(&self.transactions).1
    }

    pub(crate) fn total_forecast(&self) -> Option<&Forecast> {
        self.forecasts
            .iter()
            .find(|f| f.target == ForecastTarget::Total)
    }

    pub(crate) fn category_forecasts(&self) -> impl Iterator<Item = &Forecast> {
        self.forecasts
            .iter()
            .filter(|f| f.target != ForecastTarget::Total)
    }
}

#[cfg(test)]
mod tests;
