mod budget;
mod category;
mod forecast;
mod keyword_rule;
mod month;
mod transaction;

pub use budget::{BudgetRecommendation, SpendingStatus};
pub use category::Category;
pub use forecast::{Forecast, ForecastTarget, Provenance};
pub use keyword_rule::KeywordRule;
pub use month::YearMonth;
pub use transaction::Transaction;

#[cfg(test)]
mod tests;
