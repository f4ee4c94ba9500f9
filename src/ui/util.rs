use rust_decimal::{Decimal, RoundingStrategy};

pub(crate) const CURRENCY: &str = "PKR";

/// Format an amount with thousand separators, 2 decimal places and the
/// currency suffix, e.g. `1234567.89` → `"1,234,567.89 PKR"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{abs:.2}");
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO && !abs.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{with_commas}.{dec_part} {CURRENCY}")
}

/// Signed percentage with one decimal, or "n/a" when there is no baseline.
pub(crate) fn format_percent(pct: Option<Decimal>) -> String {
    match pct {
        Some(p) => {
            let p = p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            if p > Decimal::ZERO {
                format!("+{p:.1}%")
            } else {
                format!("{p:.1}%")
            }
        }
        None => "n/a".into(),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    let page = page.max(1);
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = *index + 1 - page;
        }
    }
}

pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
