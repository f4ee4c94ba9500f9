#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Transaction ───────────────────────────────────────────────

fn make_txn(amount: Decimal) -> Transaction {
    Transaction::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), "Test", amount)
}

#[test]
fn test_new_transaction_is_uncategorized() {
    let txn = make_txn(dec!(-10.00));
    assert_eq!(txn.category, Category::Uncategorized);
    assert_eq!(txn.description, "Test");
}

#[test]
fn test_income() {
    let txn = make_txn(dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
}

#[test]
fn test_expense() {
    let txn = make_txn(dec!(-50.00));
    assert!(!txn.is_income());
    assert!(txn.is_expense());
}

#[test]
fn test_zero_is_neither() {
    let txn = make_txn(Decimal::ZERO);
    assert!(!txn.is_income());
    assert!(!txn.is_expense());
}

#[test]
fn test_abs_amount() {
    assert_eq!(make_txn(dec!(-42.99)).abs_amount(), dec!(42.99));
    assert_eq!(make_txn(dec!(42.99)).abs_amount(), dec!(42.99));
}

#[test]
fn test_transaction_month() {
    assert_eq!(make_txn(dec!(-1)).month(), YearMonth::new(2024, 1).unwrap());
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_named_reserved_names() {
    assert_eq!(Category::named("Other"), Category::Other);
    assert_eq!(Category::named("OTHER"), Category::Other);
    assert_eq!(Category::named("uncategorized"), Category::Uncategorized);
    assert_eq!(Category::named("  "), Category::Uncategorized);
    assert_eq!(
        Category::named(" Groceries "),
        Category::Named("Groceries".into())
    );
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::Named("Rent".into())), "Rent");
    assert_eq!(format!("{}", Category::Other), "Other");
    assert_eq!(format!("{}", Category::Uncategorized), "Uncategorized");
}

#[test]
fn test_category_ordering_puts_fallbacks_last() {
    let mut cats = vec![
        Category::Uncategorized,
        Category::Other,
        Category::Named("Zoo".into()),
        Category::Named("Apples".into()),
    ];
    cats.sort();
    assert_eq!(
        cats,
        vec![
            Category::Named("Apples".into()),
            Category::Named("Zoo".into()),
            Category::Other,
            Category::Uncategorized,
        ]
    );
}

#[test]
fn test_is_categorized() {
    assert!(Category::Other.is_categorized());
    assert!(Category::Named("Food".into()).is_categorized());
    assert!(!Category::Uncategorized.is_categorized());
}

// ── YearMonth ─────────────────────────────────────────────────

#[test]
fn test_year_month_rejects_bad_month() {
    assert!(YearMonth::new(2024, 0).is_none());
    assert!(YearMonth::new(2024, 13).is_none());
    assert!(YearMonth::new(2024, 12).is_some());
}

#[test]
fn test_year_month_succ_rolls_year() {
    let dec_2023 = YearMonth::new(2023, 12).unwrap();
    assert_eq!(dec_2023.succ(), YearMonth::new(2024, 1).unwrap());
    assert_eq!(
        YearMonth::new(2024, 5).unwrap().succ(),
        YearMonth::new(2024, 6).unwrap()
    );
}

#[test]
fn test_year_month_new_and_display() {
    let ym = YearMonth::new(2024, 3).unwrap();
    assert_eq!(ym.to_string(), "2024-03");
    assert_eq!(YearMonth::new(987, 11).unwrap().to_string(), "0987-11");
    assert!(YearMonth::new(2024, 0).is_none());
    assert!(YearMonth::new(2024, 13).is_none());
}

#[test]
fn test_year_month_months_until() {
    let a = YearMonth::new(2023, 11).unwrap();
    let b = YearMonth::new(2024, 2).unwrap();
    assert_eq!(a.months_until(b), 3);
    assert_eq!(b.months_until(a), -3);
}

#[test]
fn test_year_month_range_inclusive() {
    let start = YearMonth::new(2023, 11).unwrap();
    let end = YearMonth::new(2024, 1).unwrap();
    let months: Vec<String> = YearMonth::range_inclusive(start, end)
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2023-11", "2023-12", "2024-01"]);
    assert_eq!(YearMonth::range_inclusive(end, start).count(), 0);
}

// ── SpendingStatus ────────────────────────────────────────────

#[test]
fn test_status_thresholds() {
    assert_eq!(
        SpendingStatus::from_deviation(Some(dec!(20.01))),
        SpendingStatus::Overspending
    );
    assert_eq!(
        SpendingStatus::from_deviation(Some(dec!(20))),
        SpendingStatus::WithinRange
    );
    assert_eq!(
        SpendingStatus::from_deviation(Some(dec!(-20.5))),
        SpendingStatus::SpendingLess
    );
    assert_eq!(
        SpendingStatus::from_deviation(None),
        SpendingStatus::WithinRange
    );
}

#[test]
fn test_status_advice() {
    let cat = Category::Named("Dining".into());
    assert_eq!(
        SpendingStatus::Overspending.advice(&cat),
        "Reduce expenses in Dining."
    );
    assert_eq!(
        SpendingStatus::SpendingLess.advice(&cat),
        "Good control in Dining."
    );
    assert_eq!(
        SpendingStatus::WithinRange.advice(&cat),
        "Maintain this level."
    );
}

// ── Forecast ──────────────────────────────────────────────────

#[test]
fn test_forecast_fitted_range() {
    let jan = YearMonth::new(2024, 1).unwrap();
    let mar = YearMonth::new(2024, 3).unwrap();
    let forecast = Forecast {
        target: ForecastTarget::Total,
        month: mar.succ(),
        value: dec!(10),
        provenance: Provenance::Trend,
        history: vec![(jan, dec!(10)), (jan.succ(), dec!(10)), (mar, dec!(10))],
    };
    assert_eq!(forecast.fitted_range(), Some((jan, mar)));
    assert_eq!(forecast.target.to_string(), "Total");
    assert_eq!(forecast.provenance.to_string(), "trend");
}
