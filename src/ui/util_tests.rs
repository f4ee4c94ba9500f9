#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate("Netflix", 10), "Netflix");
    assert_eq!(truncate("Netflix", 7), "Netflix");
}

#[test]
fn test_truncate_long_description() {
    assert_eq!(truncate("AMAZON PRIME MEMBERSHIP", 8), "AMAZON …");
}

#[test]
fn test_truncate_edges() {
    assert_eq!(truncate("", 5), "");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café résumé", 5), "café…");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234.56)), "1,234.56 PKR");
    assert_eq!(format_amount(dec!(1234567.89)), "1,234,567.89 PKR");
}

#[test]
fn test_format_amount_small_and_zero() {
    assert_eq!(format_amount(dec!(15)), "15.00 PKR");
    assert_eq!(format_amount(dec!(0)), "0.00 PKR");
    assert_eq!(format_amount(dec!(1.5)), "1.50 PKR");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-42.50 PKR");
    assert_eq!(format_amount(dec!(-99999.01)), "-99,999.01 PKR");
}

#[test]
fn test_format_amount_rounds_half_away_from_zero() {
    assert_eq!(format_amount(dec!(2.345)), "2.35 PKR");
    assert_eq!(format_amount(dec!(-0.001)), "0.00 PKR");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(Some(dec!(25))), "+25.0%");
    assert_eq!(format_percent(Some(dec!(-33.333))), "-33.3%");
    assert_eq!(format_percent(Some(dec!(0))), "0.0%");
    assert_eq!(format_percent(None), "n/a");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_keeps_cursor_visible() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (1, 0);
    scroll_down(&mut index, &mut scroll, 2, 5);
    assert_eq!(index, 1);
    scroll_down(&mut index, &mut scroll, 0, 5);
    assert_eq!(index, 1);
}

#[test]
fn test_scroll_up_pulls_scroll_back() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bounds() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
