mod keywords;

use rust_decimal::Decimal;

use crate::budget::BudgetSettings;
use crate::categorize::Categorizer;
use crate::error::EngineError;
use crate::forecast::ForecastSettings;

pub(crate) use keywords::KeywordMap;

pub(crate) const DEFAULT_BUDGET_WINDOW_MONTHS: usize = 3;
pub(crate) const DEFAULT_FORECAST_MIN_HISTORY_MONTHS: usize = 2;
/// Upper bound on the budget margin; keeps ceiling arithmetic far from overflow.
pub(crate) const MAX_BUDGET_MARGIN: i64 = 10;

/// Validated engine configuration for one session.
///
/// The keyword mapping lives here rather than in process state, so two
/// sessions with different mappings never see each other's rules.
#[derive(Debug, Clone)]
pub(crate) struct EngineConfig {
    keywords: KeywordMap,
    categorizer: Categorizer,
    budget: BudgetSettings,
    forecast: ForecastSettings,
}

impl EngineConfig {
    pub(crate) fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub(crate) fn keywords(&self) -> &KeywordMap {
        &self.keywords
    }

    pub(crate) fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub(crate) fn budget(&self) -> &BudgetSettings {
        &self.budget
    }

    pub(crate) fn forecast(&self) -> &ForecastSettings {
        &self.forecast
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EngineConfigBuilder {
    keywords: KeywordMap,
    budget_window_months: usize,
    budget_margin: Decimal,
    forecast_min_history_months: usize,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self {
            keywords: KeywordMap::new(),
            budget_window_months: DEFAULT_BUDGET_WINDOW_MONTHS,
            budget_margin: Decimal::ONE,
            forecast_min_history_months: DEFAULT_FORECAST_MIN_HISTORY_MONTHS,
        }
    }
}

impl EngineConfigBuilder {
    pub(crate) fn keywords(mut self, keywords: KeywordMap) -> Self {
        self.keywords = keywords;
        self
    }

    pub(crate) fn budget_window_months(mut self, months: usize) -> Self {
        self.budget_window_months = months;
        self
    }

    pub(crate) fn budget_margin(mut self, margin: Decimal) -> Self {
        self.budget_margin = margin;
        self
    }

    pub(crate) fn forecast_min_history_months(mut self, months: usize) -> Self {
        self.forecast_min_history_months = months;
        self
    }

    /// Validate every option and compile the keyword rules. Nothing is
    /// computed from a config that fails here.
    pub(crate) fn build(self) -> Result<EngineConfig, EngineError> {
        if self.budget_window_months < 1 {
            return Err(EngineError::InvalidConfig(format!(
                "budget window must be at least 1 month, got {}",
                self.budget_window_months
            )));
        }
        if self.budget_margin <= Decimal::ZERO
            || self.budget_margin > Decimal::from(MAX_BUDGET_MARGIN)
        {
            return Err(EngineError::InvalidConfig(format!(
                "budget margin must be greater than 0 and at most {MAX_BUDGET_MARGIN}, got {}",
                self.budget_margin
            )));
        }
        if self.forecast_min_history_months < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "forecast minimum history must be at least 2 months, got {}",
                self.forecast_min_history_months
            )));
        }

        let categorizer = Categorizer::new(&self.keywords.rules())?;

        Ok(EngineConfig {
            keywords: self.keywords,
            categorizer,
            budget: BudgetSettings {
                window_months: self.budget_window_months,
                margin: self.budget_margin,
            },
            forecast: ForecastSettings {
                min_history_months: self.forecast_min_history_months,
            },
        })
    }
}
