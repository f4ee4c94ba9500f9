#![allow(clippy::unwrap_used)]

use super::*;

fn h(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ── Bank format detection ─────────────────────────────────────

#[test]
fn test_detect_bank_statement() {
    let headers = h(&["Date", "Details", "Amount", "Debit/Credit"]);
    let first_row = h(&["05 Jan 2024", "Netflix", "15.00", "Debit"]);
    let profile = detect_bank_format(&headers, &first_row).unwrap();
    assert_eq!(profile.name, "Bank Statement");
    assert_eq!(profile.date_column, 0);
    assert_eq!(profile.description_column, 1);
    assert_eq!(profile.amount_column, Some(2));
    assert_eq!(profile.direction_column, Some(3));
    assert_eq!(profile.date_format, "%d %b %Y");
}

#[test]
fn test_detect_bank_statement_reordered_columns() {
    let headers = h(&["Debit/Credit", "Amount", "Details", "Date"]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.direction_column, Some(0));
    assert_eq!(profile.amount_column, Some(1));
    assert_eq!(profile.description_column, 2);
    assert_eq!(profile.date_column, 3);
}

#[test]
fn test_detect_wells_fargo() {
    let first_row = h(&["01/15/2024", "-4.50", "*", "123", "COFFEE SHOP"]);
    let profile = detect_bank_format(&[], &first_row).unwrap();
    assert_eq!(profile.name, "Wells Fargo");
    assert!(!profile.has_header);
    assert_eq!(profile.description_column, 4);
    assert_eq!(profile.amount_column, Some(1));
}

#[test]
fn test_detect_amex() {
    let headers = h(&["Date", "Description", "Card Member", "Amount"]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.name, "American Express");
    assert!(profile.negate_amounts);
    assert_eq!(profile.amount_column, Some(3));
}

#[test]
fn test_detect_citi() {
    let headers = h(&["Status", "Date", "Description", "Debit", "Credit"]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.name, "Citi");
    assert_eq!(profile.amount_column, None);
    assert_eq!(profile.debit_column, Some(3));
    assert_eq!(profile.credit_column, Some(4));
}

#[test]
fn test_detect_capital_one_credit() {
    let headers = h(&[
        "Transaction Date",
        "Posted Date",
        "Card No.",
        "Description",
        "Category",
        "Debit",
        "Credit",
    ]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.name, "Capital One Credit Card");
    assert_eq!(profile.date_format, "%Y-%m-%d");
    assert_eq!(profile.debit_column, Some(5));
}

#[test]
fn test_detect_chase_checking_not_mistaken_for_statement() {
    let headers = h(&[
        "Details",
        "Posting Date",
        "Description",
        "Amount",
        "Type",
        "Balance",
        "Check or Slip #",
    ]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.name, "Chase Checking");
    assert_eq!(profile.date_column, 1);
    assert_eq!(profile.direction_column, None);
}

#[test]
fn test_detect_chase_credit() {
    let headers = h(&[
        "Transaction Date",
        "Post Date",
        "Description",
        "Category",
        "Type",
        "Amount",
    ]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.name, "Chase Credit Card");
    assert_eq!(profile.amount_column, Some(5));
}

#[test]
fn test_detect_is_case_and_whitespace_insensitive() {
    let headers = h(&[" DATE ", "details", "AMOUNT", " Debit/Credit"]);
    let profile = detect_bank_format(&headers, &[]).unwrap();
    assert_eq!(profile.name, "Bank Statement");
}

#[test]
fn test_detect_unknown_returns_none() {
    let headers = h(&["When", "What", "How Much"]);
    assert!(detect_bank_format(&headers, &[]).is_none());
    assert!(detect_bank_format(&[], &h(&["a", "b"])).is_none());
}
