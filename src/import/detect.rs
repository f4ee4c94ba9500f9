use super::CsvProfile;

/// Match the header row (or, for headerless exports, the first data row)
/// against the statement layouts we know how to read.
pub(crate) fn detect_bank_format(headers: &[String], first_row: &[String]) -> Option<CsvProfile> {
    let h: Vec<String> = headers
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    // Wells Fargo: headerless, five columns, "*" in the third
    if headers.is_empty() && first_row.len() == 5 && first_row.get(2).map(|s| s.trim()) == Some("*")
    {
        return Some(CsvProfile {
            description_column: 4,
            amount_column: Some(1),
            has_header: false,
            ..profile("Wells Fargo")
        });
    }

    // Chase Checking shares the "Details" header with plain statements, so
    // it has to be ruled out first.
    if has(&h, "details") && h.iter().any(|s| s.contains("check or slip")) {
        return Some(CsvProfile {
            date_column: col_index(&h, "posting date").unwrap_or(1),
            description_column: col_index(&h, "description").unwrap_or(2),
            amount_column: col_index(&h, "amount"),
            ..profile("Chase Checking")
        });
    }

    // Bank statement: Date, Details, Amount, Debit/Credit
    if has(&h, "details") && has(&h, "debit/credit") {
        return Some(CsvProfile {
            date_column: col_index(&h, "date").unwrap_or(0),
            description_column: col_index(&h, "details").unwrap_or(1),
            amount_column: col_index(&h, "amount").or(Some(2)),
            direction_column: col_index(&h, "debit/credit"),
            date_format: "%d %b %Y".into(),
            ..profile("Bank Statement")
        });
    }

    // American Express reports charges as positive amounts
    if has(&h, "card member") {
        return Some(CsvProfile {
            date_column: col_index(&h, "date").unwrap_or(0),
            description_column: col_index(&h, "description").unwrap_or(1),
            amount_column: col_index(&h, "amount"),
            negate_amounts: true,
            ..profile("American Express")
        });
    }

    // Citi: leading "Status" with split Debit and Credit columns
    if h.first().map(|s| s.as_str()) == Some("status") && has(&h, "debit") && has(&h, "credit") {
        return Some(CsvProfile {
            date_column: col_index(&h, "date").unwrap_or(1),
            description_column: col_index(&h, "description").unwrap_or(2),
            amount_column: None,
            debit_column: col_index(&h, "debit"),
            credit_column: col_index(&h, "credit"),
            ..profile("Citi")
        });
    }

    // Capital One Credit Card: "Card No." with ISO dates
    if has(&h, "card no.") {
        return Some(CsvProfile {
            date_column: col_index(&h, "transaction date").unwrap_or(0),
            description_column: col_index(&h, "description").unwrap_or(3),
            amount_column: None,
            debit_column: col_index(&h, "debit"),
            credit_column: col_index(&h, "credit"),
            date_format: "%Y-%m-%d".into(),
            ..profile("Capital One Credit Card")
        });
    }

    // Chase Credit Card: Transaction Date + Post Date + Type
    if has(&h, "transaction date") && has(&h, "post date") && has(&h, "type") {
        return Some(CsvProfile {
            date_column: col_index(&h, "transaction date").unwrap_or(0),
            description_column: col_index(&h, "description").unwrap_or(2),
            amount_column: col_index(&h, "amount"),
            ..profile("Chase Credit Card")
        });
    }

    None
}

fn profile(name: &str) -> CsvProfile {
    CsvProfile {
        name: name.into(),
        ..CsvProfile::default()
    }
}

fn has(headers: &[String], name: &str) -> bool {
    headers.iter().any(|h| h == name)
}

fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
