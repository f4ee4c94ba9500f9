use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CsvProfile {
    pub(crate) name: String,
    pub(crate) date_column: usize,
    pub(crate) description_column: usize,
    pub(crate) amount_column: Option<usize>,
    pub(crate) debit_column: Option<usize>,
    pub(crate) credit_column: Option<usize>,
    /// Column holding a "Debit"/"Credit" marker that decides the sign of an
    /// unsigned amount.
    pub(crate) direction_column: Option<usize>,
    pub(crate) date_format: String,
    pub(crate) has_header: bool,
    pub(crate) skip_rows: usize,
    pub(crate) negate_amounts: bool,
}

impl Default for CsvProfile {
    fn default() -> Self {
        Self {
            name: "Custom".into(),
            date_column: 0,
            description_column: 1,
            amount_column: Some(2),
            debit_column: None,
            credit_column: None,
            direction_column: None,
            date_format: "%m/%d/%Y".into(),
            has_header: true,
            skip_rows: 0,
            negate_amounts: false,
        }
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return headers + all rows as strings.
    pub(crate) fn preview(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .context("Failed to open CSV file")?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.trim().to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // Try to detect if first row is a header
        let first_row = &all_rows[0];
        let looks_like_header = first_row.iter().all(|field| {
            // Headers typically don't parse as dates or numbers
            parse_decimal(field).is_err() && parse_date(field, "%Y-%m-%d").is_err()
        });

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((headers, all_rows))
        } else {
            // Generate generic column names
            let headers: Vec<String> = (0..first_row.len())
                .map(|i| format!("Column {}", i + 1))
                .collect();
            Ok((headers, all_rows))
        }
    }

    /// Parse rows into uncategorized Transactions using the given profile.
    ///
    /// Blank lines are skipped. Any other row whose date or amount cannot be
    /// parsed fails the whole import with its row number; nothing is coerced
    /// to a default.
    pub(crate) fn parse(rows: &[Vec<String>], profile: &CsvProfile) -> Result<Vec<Transaction>> {
        let mut transactions = Vec::new();

        for (i, row) in rows.iter().enumerate().skip(profile.skip_rows) {
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let date_str = field(row, profile.date_column);
            let date = parse_date(date_str, &profile.date_format)
                .with_context(|| format!("Row {}: failed to parse date '{}'", i + 1, date_str))?;

            let description = field(row, profile.description_column).to_string();

            let amount = parse_amount(row, profile)
                .with_context(|| format!("Row {}: failed to parse amount", i + 1))?;

            transactions.push(Transaction::new(date, description, amount));
        }

        debug!(
            profile = %profile.name,
            rows = rows.len(),
            parsed = transactions.len(),
            "parsed CSV rows"
        );
        Ok(transactions)
    }

    /// Preview, detect the bank format, and parse in one step.
    pub(crate) fn load(path: &Path) -> Result<(CsvProfile, Vec<Transaction>)> {
        let (headers, mut rows) = Self::preview(path)?;
        let first_row = rows.first().cloned().unwrap_or_default();
        let header_names = if headers.iter().all(|h| h.starts_with("Column ")) {
            Vec::new()
        } else {
            headers
        };
        let profile = super::detect_bank_format(&header_names, &first_row).unwrap_or_default();
        if !profile.has_header && !header_names.is_empty() {
            // The header guess swallowed a data row.
            rows.insert(0, header_names);
        }
        let transactions = Self::parse(&rows, &profile)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        Ok((profile, transactions))
    }
}

fn field(row: &[String], column: usize) -> &str {
    row.get(column).map(|s| s.trim()).unwrap_or("")
}

fn parse_date(s: &str, fmt: &str) -> Result<NaiveDate> {
    // Try the specified format first
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Ok(d);
    }
    // Fallback: try common formats
    for fallback in &[
        "%m/%d/%Y",
        "%Y-%m-%d",
        "%d %b %Y",
        "%m-%d-%Y",
        "%m/%d/%y",
        "%d/%m/%Y",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fallback) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

fn parse_amount(row: &[String], profile: &CsvProfile) -> Result<Decimal> {
    let amount = if let Some(amt_col) = profile.amount_column {
        let value = parse_decimal(field(row, amt_col))?;
        match profile.direction_column {
            Some(dir_col) => apply_direction(value, field(row, dir_col))?,
            None => value,
        }
    } else {
        // Separate debit/credit columns
        let debit = profile.debit_column.map(|c| field(row, c)).unwrap_or("");
        let credit = profile.credit_column.map(|c| field(row, c)).unwrap_or("");

        if !debit.is_empty() {
            -parse_decimal(debit)?.abs()
        } else if !credit.is_empty() {
            parse_decimal(credit)?.abs()
        } else {
            anyhow::bail!("Both debit and credit columns are empty")
        }
    };

    if profile.negate_amounts {
        Ok(-amount)
    } else {
        Ok(amount)
    }
}

fn apply_direction(value: Decimal, marker: &str) -> Result<Decimal> {
    match marker.to_lowercase().as_str() {
        "debit" | "dr" | "d" => Ok(-value.abs()),
        "credit" | "cr" | "c" => Ok(value.abs()),
        other => anyhow::bail!("Unknown debit/credit marker '{}'", other),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Amount is empty");
    }
    Decimal::from_str(&cleaned).context(format!("Failed to parse '{}' as decimal", s))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
