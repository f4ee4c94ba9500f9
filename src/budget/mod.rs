use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use tracing::debug;

use crate::aggregate::AggregateTable;
use crate::config::DEFAULT_BUDGET_WINDOW_MONTHS;
use crate::error::EngineError;
use crate::models::{BudgetRecommendation, Category, SpendingStatus, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetSettings {
    /// Trailing months averaged per category; clamped to the history available.
    pub(crate) window_months: usize,
    /// Multiplier on the trailing average: below 1 biases toward saving.
    pub(crate) margin: Decimal,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            window_months: DEFAULT_BUDGET_WINDOW_MONTHS,
            margin: Decimal::ONE,
        }
    }
}

/// One recommendation per category in the table, keyed in category order.
pub(crate) fn recommend(
    table: &AggregateTable,
    settings: &BudgetSettings,
) -> Result<BTreeMap<Category, BudgetRecommendation>, EngineError> {
    let recommendations = table
        .categories()
        .into_iter()
        .map(|category| {
            let series = table.category_series(category);
            recommend_category(category, &series, settings)
                .map(|rec| (category.clone(), rec))
        })
        .collect::<Result<BTreeMap<_, _>, EngineError>>()?;

    debug!(
        categories = recommendations.len(),
        window = settings.window_months,
        margin = %settings.margin,
        "computed budget recommendations"
    );
    Ok(recommendations)
}

/// Recommendation from a chronological outflow series. An empty or all-zero
/// series yields a zero ceiling.
pub(crate) fn recommend_category(
    category: &Category,
    series: &[(YearMonth, Decimal)],
    settings: &BudgetSettings,
) -> Result<BudgetRecommendation, EngineError> {
    let window = settings.window_months.max(1);
    let trailing = &series[series.len().saturating_sub(window)..];
    let months_used = trailing.len();

    if months_used == 0 {
        return Ok(BudgetRecommendation {
            category: category.clone(),
            ceiling: Decimal::ZERO,
            trailing_average: Decimal::ZERO,
            months_used: 0,
            latest_outflow: Decimal::ZERO,
            deviation_pct: None,
            status: SpendingStatus::WithinRange,
        });
    }

    let overflow = || {
        EngineError::ContractViolation(format!("outflow overflow computing budget for {category}"))
    };

    let mut total = Decimal::ZERO;
    for (_, outflow) in trailing {
        total = total.checked_add(*outflow).ok_or_else(overflow)?;
    }
    let trailing_average = total
        .checked_div(Decimal::from(months_used))
        .ok_or_else(overflow)?;
    let ceiling = trailing_average
        .checked_mul(settings.margin)
        .ok_or_else(overflow)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO);

    let latest_outflow = trailing
        .last()
        .map(|(_, outflow)| *outflow)
        .unwrap_or(Decimal::ZERO);
    let deviation_pct = if trailing_average.is_zero() {
        None
    } else {
        (latest_outflow - trailing_average)
            .checked_div(trailing_average)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    };

    Ok(BudgetRecommendation {
        category: category.clone(),
        ceiling,
        trailing_average,
        months_used,
        latest_outflow,
        deviation_pct,
        status: SpendingStatus::from_deviation(deviation_pct),
    })
}
