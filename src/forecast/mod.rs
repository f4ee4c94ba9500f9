//! Next-month spending forecasts.
//!
//! Each series is a chronological list of monthly outflow magnitudes. With
//! enough history an ordinary least-squares line is fit over the month index
//! (x = 1..=n) and evaluated at n + 1; shorter series repeat the most recent
//! value. Results are floored at zero and rounded to cents. All arithmetic is
//! `Decimal`, so identical input always gives identical output.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::aggregate::AggregateTable;
use crate::config::DEFAULT_FORECAST_MIN_HISTORY_MONTHS;
use crate::error::EngineError;
use crate::models::{Forecast, ForecastTarget, Provenance, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ForecastSettings {
    /// Months required before a trend line is fit. Never below 2.
    pub(crate) min_history_months: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            min_history_months: DEFAULT_FORECAST_MIN_HISTORY_MONTHS,
        }
    }
}

/// Forecast every category in the table, then the overall total.
pub(crate) fn forecast_all(
    table: &AggregateTable,
    settings: &ForecastSettings,
) -> Result<Vec<Forecast>, EngineError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let mut forecasts = Vec::new();
    for category in table.categories() {
        let series = table.category_series(category);
        forecasts.push(forecast_series(
            ForecastTarget::Category(category.clone()),
            &series,
            settings,
        )?);
    }
    forecasts.push(forecast_series(
        ForecastTarget::Total,
        &table.total_series()?,
        settings,
    )?);

    let naive = forecasts
        .iter()
        .filter(|f| f.provenance == Provenance::Naive)
        .count();
    debug!(forecasts = forecasts.len(), naive, "computed forecasts");
    Ok(forecasts)
}

pub(crate) fn forecast_series(
    target: ForecastTarget,
    series: &[(YearMonth, Decimal)],
    settings: &ForecastSettings,
) -> Result<Forecast, EngineError> {
    validate_series(&target, series)?;
    let Some(&(last_month, last_value)) = series.last() else {
        return Err(EngineError::ContractViolation(format!("empty series for {target}")));
    };

    let (raw, provenance) = if series.len() >= settings.min_history_months.max(2) {
        (linear_trend(&target, series)?, Provenance::Trend)
    } else {
        (last_value, Provenance::Naive)
    };

    let value = raw
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(Forecast {
        target,
        month: last_month.succ(),
        value,
        provenance,
        history: series.to_vec(),
    })
}

fn validate_series(
    target: &ForecastTarget,
    series: &[(YearMonth, Decimal)],
) -> Result<(), EngineError> {
    if series.windows(2).any(|w| w[0].0 >= w[1].0) {
        warn!(%target, "forecast series out of order");
        return Err(EngineError::ContractViolation(format!(
            "series for {target} is not strictly chronological"
        )));
    }
    let negative = series
        .iter()
        .find(|(_, v)| v.is_sign_negative() && !v.is_zero());
    if let Some((month, value)) = negative {
        warn!(%target, %month, %value, "negative outflow magnitude");
        return Err(EngineError::ContractViolation(format!(
            "series for {target} has negative magnitude {value} in {month}"
        )));
    }
    Ok(())
}

/// OLS fit over x = 1..=n evaluated at x = n + 1, via the normal equations.
///
/// With slope = N / D, where N = n·Σxy − Σx·Σy and D = n·Σx² − (Σx)², the
/// prediction intercept + slope·(n + 1) reduces to
/// (Σy·D + N·(n(n + 1) − Σx)) / (n·D). Dividing once keeps an exact half
/// cent exact, so the final rounding goes the right way.
fn linear_trend(
    target: &ForecastTarget,
    series: &[(YearMonth, Decimal)],
) -> Result<Decimal, EngineError> {
    let overflow =
        || EngineError::ContractViolation(format!("arithmetic overflow forecasting {target}"));

    let n = Decimal::from(series.len());
    let mut sum_x = Decimal::ZERO;
    let mut sum_y = Decimal::ZERO;
    let mut sum_xy = Decimal::ZERO;
    let mut sum_xx = Decimal::ZERO;

    for (i, (_, y)) in series.iter().enumerate() {
        let x = Decimal::from(i + 1);
        sum_x = sum_x.checked_add(x).ok_or_else(overflow)?;
        sum_y = sum_y.checked_add(*y).ok_or_else(overflow)?;
        sum_xy = x
            .checked_mul(*y)
            .and_then(|xy| sum_xy.checked_add(xy))
            .ok_or_else(overflow)?;
        sum_xx = x
            .checked_mul(x)
            .and_then(|xx| sum_xx.checked_add(xx))
            .ok_or_else(overflow)?;
    }

    let numerator = n
        .checked_mul(sum_xy)
        .zip(sum_x.checked_mul(sum_y))
        .and_then(|(a, b)| a.checked_sub(b))
        .ok_or_else(overflow)?;
    // Positive whenever n >= 2.
    let denominator = n
        .checked_mul(sum_xx)
        .zip(sum_x.checked_mul(sum_x))
        .and_then(|(a, b)| a.checked_sub(b))
        .ok_or_else(overflow)?;

    let offset = n
        .checked_add(Decimal::ONE)
        .and_then(|next| n.checked_mul(next))
        .and_then(|v| v.checked_sub(sum_x))
        .ok_or_else(overflow)?;
    let scaled = sum_y
        .checked_mul(denominator)
        .zip(numerator.checked_mul(offset))
        .and_then(|(a, b)| a.checked_add(b))
        .ok_or_else(overflow)?;
    n.checked_mul(denominator)
        .and_then(|d| scaled.checked_div(d))
        .ok_or_else(overflow)
}
