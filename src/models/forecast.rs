use rust_decimal::Decimal;

use super::{Category, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ForecastTarget {
    Category(Category),
    Total,
}

impl std::fmt::Display for ForecastTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(c) => write!(f, "{c}"),
            Self::Total => write!(f, "Total"),
        }
    }
}

/// Which strategy produced a forecast value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Trend,
    Naive,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Naive => "naive",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    pub target: ForecastTarget,
    /// The month being predicted.
    pub month: YearMonth,
    /// Predicted outflow magnitude, never negative.
    pub value: Decimal,
    pub provenance: Provenance,
    /// The (month, outflow) series the value was fit on.
    pub history: Vec<(YearMonth, Decimal)>,
}

impl Forecast {
    /// First and last month of the fitted series.
    pub fn fitted_range(&self) -> Option<(YearMonth, YearMonth)> {
        Some((self.history.first()?.0, self.history.last()?.0))
    }
}
