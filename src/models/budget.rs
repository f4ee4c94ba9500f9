use rust_decimal::Decimal;

use super::Category;

/// Latest month versus trailing average, bucketed by a symmetric deviation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingStatus {
    Overspending,
    SpendingLess,
    WithinRange,
}

impl SpendingStatus {
    /// Deviation band, in percent, outside of which spending is flagged.
    pub const THRESHOLD_PCT: i64 = 20;

    pub fn from_deviation(deviation_pct: Option<Decimal>) -> Self {
        let threshold = Decimal::from(Self::THRESHOLD_PCT);
        match deviation_pct {
            Some(d) if d > threshold => Self::Overspending,
            Some(d) if d < -threshold => Self::SpendingLess,
            _ => Self::WithinRange,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overspending => "Overspending",
            Self::SpendingLess => "Spending Less",
            Self::WithinRange => "Within Range",
        }
    }

    pub fn advice(&self, category: &Category) -> String {
        match self {
            Self::Overspending => format!("Reduce expenses in {category}."),
            Self::SpendingLess => format!("Good control in {category}."),
            Self::WithinRange => "Maintain this level.".to_string(),
        }
    }
}

impl std::fmt::Display for SpendingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRecommendation {
    pub category: Category,
    /// Suggested monthly spending ceiling (non-negative, 2 dp).
    pub ceiling: Decimal,
    /// Mean outflow over the months used; the statistic the ceiling is derived from.
    pub trailing_average: Decimal,
    pub months_used: usize,
    pub latest_outflow: Decimal,
    pub deviation_pct: Option<Decimal>,
    pub status: SpendingStatus,
}
