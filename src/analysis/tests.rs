#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::config::KeywordMap;
use crate::models::{SpendingStatus, YearMonth};

fn named(name: &str) -> Category {
    Category::Named(name.to_string())
}

fn raw(date: &str, desc: &str, amount: Decimal) -> Transaction {
    Transaction::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        desc,
        amount,
    )
}

fn config(pairs: &[(&str, &str)]) -> EngineConfig {
    EngineConfig::builder()
        .keywords(KeywordMap::from_pairs(pairs.iter().copied()))
        .build()
        .unwrap()
}

#[test]
fn test_netflix_end_to_end() {
    let txns = vec![
        raw("2024-01-05", "Netflix", dec!(-15.00)),
        raw("2024-02-05", "Netflix", dec!(-15.00)),
        raw("2024-03-05", "Netflix", dec!(-15.00)),
    ];
    let analysis = Analysis::run(txns, &config(&[("netflix", "Subscriptions")])).unwrap();

    let subs = named("Subscriptions");
    assert!(analysis.transactions.iter().all(|t| t.category == subs));

    for month in 1..=3 {
        let cell = analysis
            .aggregates
            .get(&subs, YearMonth::new(2024, month).unwrap())
            .unwrap();
        assert_eq!(cell.sum, dec!(-15));
        assert_eq!(cell.count, 1);
    }
    assert_eq!(analysis.aggregates.len(), 3);

    assert_eq!(analysis.budgets[&subs].ceiling, dec!(15.00));

    let forecast = analysis.category_forecasts().next().unwrap();
    assert_eq!(forecast.target, ForecastTarget::Category(subs.clone()));
    assert_eq!(forecast.value, dec!(15.00));
    assert_eq!(forecast.provenance, Provenance::Trend);

    assert_eq!(analysis.state(), DataState::Ready);
}

#[test]
fn test_keyword_specificity_end_to_end() {
    let txns = vec![raw("2024-01-05", "Amazon Prime Membership", dec!(-14.99))];
    let analysis = Analysis::run(
        txns,
        &config(&[("amazon", "Shopping"), ("amazon prime", "Subscriptions")]),
    )
    .unwrap();
    assert_eq!(analysis.transactions[0].category, named("Subscriptions"));
}

#[test]
fn test_empty_input_is_no_data() {
    let analysis = Analysis::run(Vec::new(), &config(&[])).unwrap();
    assert_eq!(analysis.state(), DataState::NoData);
    assert!(analysis.aggregates.is_empty());
    assert!(analysis.budgets.is_empty());
    assert!(analysis.forecasts.is_empty());
    assert!(analysis.total_forecast().is_none());
    assert_eq!(analysis.inflow_total, Decimal::ZERO);
}

#[test]
fn test_single_month_is_insufficient_history() {
    let txns = vec![raw("2024-05-01", "Corner Store", dec!(-150))];
    let analysis = Analysis::run(txns, &config(&[])).unwrap();
    assert_eq!(analysis.state(), DataState::InsufficientHistory);

    let other = &analysis.forecasts[0];
    assert_eq!(other.target, ForecastTarget::Category(Category::Other));
    assert_eq!(other.value, dec!(150));
    assert_eq!(other.provenance, Provenance::Naive);

    // Budget window clamps to the single month.
    let rec = &analysis.budgets[&Category::Other];
    assert_eq!(rec.months_used, 1);
    assert_eq!(rec.ceiling, dec!(150.00));
}

#[test]
fn test_every_record_is_categorized() {
    let txns = vec![
        raw("2024-01-01", "", dec!(-1)),
        raw("2024-01-02", "Unknown Vendor", dec!(-2)),
        raw("2024-01-03", "Safeway #12", dec!(-3)),
    ];
    let analysis = Analysis::run(txns, &config(&[("safeway", "Groceries")])).unwrap();
    assert!(analysis
        .transactions
        .iter()
        .all(|t| t.category == Category::Other || t.category == named("Groceries")));
}

#[test]
fn test_run_is_deterministic_and_order_independent() {
    let txns = vec![
        raw("2024-01-03", "Safeway", dec!(-80)),
        raw("2024-01-09", "Shell", dec!(-40)),
        raw("2024-02-03", "Safeway", dec!(-95.50)),
        raw("2024-02-20", "Payroll", dec!(3000)),
        raw("2024-03-03", "Safeway", dec!(-70.25)),
        raw("2024-03-09", "Shell", dec!(-45)),
    ];
    let cfg = config(&[("safeway", "Groceries"), ("shell", "Fuel")]);

    let a = Analysis::run(txns.clone(), &cfg).unwrap();
    let b = Analysis::run(txns.clone(), &cfg).unwrap();
    let mut shuffled = txns;
    shuffled.reverse();
    let c = Analysis::run(shuffled, &cfg).unwrap();

    assert_eq!(a.aggregates, b.aggregates);
    assert_eq!(a.aggregates, c.aggregates);
    assert_eq!(a.budgets, c.budgets);
    assert_eq!(a.forecasts, c.forecasts);
    assert_eq!(a.expense_totals, c.expense_totals);
}

#[test]
fn test_sessions_do_not_share_mappings() {
    let txns = vec![raw("2024-01-05", "Netflix", dec!(-15))];
    let first = Analysis::run(txns.clone(), &config(&[("netflix", "Streaming")])).unwrap();
    let second = Analysis::run(txns, &config(&[])).unwrap();
    assert_eq!(first.transactions[0].category, named("Streaming"));
    assert_eq!(second.transactions[0].category, Category::Other);
}

#[test]
fn test_summaries_and_split() {
    let txns = vec![
        raw("2024-01-03", "Safeway", dec!(-80)),
        raw("2024-01-15", "Payroll", dec!(3000)),
        raw("2024-01-20", "Refund Safeway", dec!(20)),
    ];
    let analysis = Analysis::run(txns, &config(&[("safeway", "Groceries")])).unwrap();
    assert_eq!(analysis.debits().len(), 1);
    assert_eq!(analysis.credits().len(), 2);
    assert_eq!(analysis.inflow_total, dec!(3020));
    assert_eq!(analysis.expense_totals, vec![(named("Groceries"), dec!(80))]);
    assert_eq!(
        analysis.budgets[&named("Groceries")].status,
        SpendingStatus::WithinRange
    );
    assert_eq!(analysis.total_forecast().unwrap().value, dec!(60));
}
